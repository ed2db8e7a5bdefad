use serde_json::json;

use crate::error::TaskdeskResult;
use crate::http::{ApiClient, ApiRequest, MultipartPayload};
use crate::model::{
    Credentials, LoginResponse, PasswordChange, ProfileUpdate, RegisterRequest, User,
};

pub struct AccountApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AccountApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        AccountApi { client }
    }

    /// POST /account/register/
    pub async fn register(&self, request: &RegisterRequest<'_>) -> TaskdeskResult<User> {
        self.client
            .send(ApiRequest::post("account/register/").json(request)?.without_refresh())
            .await
    }

    /// POST /account/login/
    pub async fn login(&self, credentials: &Credentials) -> TaskdeskResult<LoginResponse> {
        self.client
            .send(ApiRequest::post("account/login/").json(credentials)?.without_refresh())
            .await
    }

    /// GET /account/
    pub async fn profile(&self) -> TaskdeskResult<User> {
        self.client.get("account/").await
    }

    /// PUT /account/ (multipart when a new picture is attached, JSON otherwise)
    pub async fn update_profile(&self, update: &ProfileUpdate) -> TaskdeskResult<User> {
        let request = ApiRequest::put("account/");

        let request = match &update.image {
            Some(image) => {
                let form = update
                    .text_fields()
                    .into_iter()
                    .fold(MultipartPayload::new(), |form, (name, value)| {
                        form.text(name, value)
                    })
                    .file("image", image.clone());
                request.multipart(form)
            }
            None => {
                let body: serde_json::Map<String, serde_json::Value> = update
                    .text_fields()
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), json!(value)))
                    .collect();
                request.json(&body)?
            }
        };

        self.client.send(request).await
    }

    /// POST /account/change-password/ (validated locally first)
    pub async fn change_password(&self, change: &PasswordChange) -> TaskdeskResult<()> {
        let body = change.validate()?;
        self.client
            .send_discard(ApiRequest::post("account/change-password/").json(&body)?)
            .await
    }

    /// POST /account/deactivate-user/
    pub async fn deactivate(&self, password: &str) -> TaskdeskResult<()> {
        self.client
            .send_discard(ApiRequest::post("account/deactivate-user/").json(&json!({ "password": password }))?)
            .await
    }
}
