use crate::error::TaskdeskResult;
use crate::http::{ApiClient, ApiRequest};
use crate::model::{Category, CategoryDraft, CategoryKind};

/// CRUD for `/status/` and `/priority/`, which share one shape.
pub struct CategoriesApi<'a> {
    client: &'a ApiClient,
    kind: CategoryKind,
}

impl<'a> CategoriesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient, kind: CategoryKind) -> Self {
        CategoriesApi { client, kind }
    }

    pub fn kind(&self) -> CategoryKind {
        self.kind
    }

    fn item_path(&self, id: i64) -> String {
        format!("{}{}/", self.kind.path(), id)
    }

    pub async fn list(&self) -> TaskdeskResult<Vec<Category>> {
        self.client.get(self.kind.path()).await
    }

    pub async fn get(&self, id: i64) -> TaskdeskResult<Category> {
        self.client.get(&self.item_path(id)).await
    }

    pub async fn create(&self, name: &str) -> TaskdeskResult<Category> {
        let body = CategoryDraft { name: name.to_string() };
        self.client
            .send(ApiRequest::post(self.kind.path()).json(&body)?)
            .await
    }

    pub async fn update(&self, id: i64, name: &str) -> TaskdeskResult<Category> {
        let body = CategoryDraft { name: name.to_string() };
        self.client
            .send(ApiRequest::put(self.item_path(id)).json(&body)?)
            .await
    }

    pub async fn delete(&self, id: i64) -> TaskdeskResult<()> {
        self.client.send_discard(ApiRequest::delete(self.item_path(id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_store::MemoryTokenStore;
    use std::sync::Arc;

    #[test]
    fn item_paths_follow_kind() {
        let client = ApiClient::with_http(
            reqwest::Client::new(),
            "http://localhost/api",
            Arc::new(MemoryTokenStore::default()),
        )
        .unwrap();

        assert_eq!(client.statuses().item_path(4), "status/4/");
        assert_eq!(client.priorities().item_path(0), "priority/0/");
        assert_eq!(client.priorities().kind(), CategoryKind::Priority);
    }
}
