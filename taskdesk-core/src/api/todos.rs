use serde_json::json;

use crate::error::TaskdeskResult;
use crate::http::{ApiClient, ApiRequest, MultipartPayload, Payload};
use crate::model::{ImageChange, ImageFile, Todo, TodoDraft};

pub struct TodosApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TodosApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        TodosApi { client }
    }

    pub async fn list(&self) -> TaskdeskResult<Vec<Todo>> {
        self.client.get("todos/").await
    }

    pub async fn get(&self, id: i64) -> TaskdeskResult<Todo> {
        self.client.get(&format!("todos/{}/", id)).await
    }

    pub async fn create(&self, draft: &TodoDraft) -> TaskdeskResult<Todo> {
        let mut request = ApiRequest::post("todos/");
        request.payload = draft_payload(draft);
        self.client.send(request).await
    }

    pub async fn update(&self, id: i64, draft: &TodoDraft) -> TaskdeskResult<Todo> {
        let mut request = ApiRequest::put(format!("todos/{}/", id));
        request.payload = draft_payload(draft);
        self.client.send(request).await
    }

    pub async fn delete(&self, id: i64) -> TaskdeskResult<()> {
        self.client
            .send_discard(ApiRequest::delete(format!("todos/{}/", id)))
            .await
    }
}

/// Multipart when the image changes (upload or removal), JSON otherwise.
fn draft_payload(draft: &TodoDraft) -> Payload {
    let multipart = |image: Option<&ImageFile>| {
        let mut form = MultipartPayload::new()
            .text("title", draft.title.trim())
            .text("description", draft.description.as_str())
            .text("status_id", draft.status_id.to_string())
            .text("priority_id", draft.priority_id.to_string());

        if let Some(due) = draft.due_date_string() {
            form = form.text("due_date", due);
        }

        match image {
            Some(file) => form.file("image", file.clone()),
            None => form.text("image", ""),
        }
    };

    match &draft.image {
        ImageChange::Upload(file) => Payload::Multipart(multipart(Some(file))),
        ImageChange::Remove => Payload::Multipart(multipart(None)),
        ImageChange::Keep => Payload::Json(json!({
            "title": draft.title.trim(),
            "description": draft.description,
            "status_id": draft.status_id,
            "priority_id": draft.priority_id,
            "due_date": draft.due_date_string(),
        })),
    }
}
