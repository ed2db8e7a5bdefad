use crate::error::TaskdeskResult;
use crate::http::{ApiClient, ApiRequest};
use crate::model::{Event, EventDraft};

pub struct EventsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> EventsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        EventsApi { client }
    }

    pub async fn list(&self) -> TaskdeskResult<Vec<Event>> {
        self.client.get("events/").await
    }

    pub async fn get(&self, id: i64) -> TaskdeskResult<Event> {
        self.client.get(&format!("events/{}/", id)).await
    }

    pub async fn create(&self, draft: &EventDraft) -> TaskdeskResult<Event> {
        self.client
            .send(ApiRequest::post("events/").json(draft)?)
            .await
    }

    pub async fn update(&self, id: i64, draft: &EventDraft) -> TaskdeskResult<Event> {
        self.client
            .send(ApiRequest::put(format!("events/{}/", id)).json(draft)?)
            .await
    }

    pub async fn delete(&self, id: i64) -> TaskdeskResult<()> {
        self.client
            .send_discard(ApiRequest::delete(format!("events/{}/", id)))
            .await
    }
}
