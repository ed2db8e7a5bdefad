//! Authenticated HTTP client for the taskdesk REST API.
//!
//! Every request carries `Authorization: Bearer <access>` when a token is
//! stored. A 401 triggers one silent refresh via `account/login/refresh/`
//! and a single replay of the original request. Concurrent 401s share one
//! refresh: whoever takes the refresh lock second sees that the stored
//! token already changed and just replays.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::Settings;
use crate::error::{TaskdeskError, TaskdeskResult};
use crate::model::ImageFile;
use crate::token_store::{StoredTokens, TokenStore};

const REFRESH_PATH: &str = "account/login/refresh/";

/// Whether the client currently holds a usable session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Unauthenticated,
    Authenticated,
}

/// Request body. Kept as data so the request can be replayed after a
/// token refresh.
#[derive(Debug, Clone, Default)]
pub enum Payload {
    #[default]
    Empty,
    Json(Value),
    Multipart(MultipartPayload),
}

/// Text fields plus optional files, encoded as `multipart/form-data`.
#[derive(Debug, Clone, Default)]
pub struct MultipartPayload {
    fields: Vec<(String, String)>,
    files: Vec<(String, ImageFile)>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(mut self, name: impl Into<String>, file: ImageFile) -> Self {
        self.files.push((name.into(), file));
        self
    }

    fn to_form(&self) -> TaskdeskResult<Form> {
        let mut form = Form::new();

        for (name, value) in &self.fields {
            form = form.text(name.clone(), value.clone());
        }

        for (name, file) in &self.files {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.mime)?;
            form = form.part(name.clone(), part);
        }

        Ok(form)
    }
}

/// One call against the API, relative to the configured base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub payload: Payload,
    refresh_on_401: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            payload: Payload::Empty,
            refresh_on_401: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> TaskdeskResult<Self> {
        self.payload = Payload::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, body: MultipartPayload) -> Self {
        self.payload = Payload::Multipart(body);
        self
    }

    /// A 401 on this request is a plain error (login, register).
    pub fn without_refresh(mut self) -> Self {
        self.refresh_on_401 = false;
        self
    }
}

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

struct Inner {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
    refresh_lock: Mutex<()>,
    status: watch::Sender<AuthStatus>,
}

/// Cheap to clone; clones share tokens, refresh lock and auth status.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

impl ApiClient {
    pub fn new(settings: &Settings, tokens: Arc<dyn TokenStore>) -> TaskdeskResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()?;

        Self::with_http(http, &settings.api_base_url, tokens)
    }

    pub fn with_http(
        http: reqwest::Client,
        base_url: &str,
        tokens: Arc<dyn TokenStore>,
    ) -> TaskdeskResult<Self> {
        // Url::join drops the last segment unless the base ends with '/'.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let base_url = Url::parse(&normalized)
            .map_err(|e| TaskdeskError::Config(format!("Invalid API base URL '{}': {}", base_url, e)))?;

        let (status, _) = watch::channel(AuthStatus::Unauthenticated);

        Ok(ApiClient {
            inner: Arc::new(Inner {
                http,
                base_url,
                tokens,
                refresh_lock: Mutex::new(()),
                status,
            }),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    pub fn tokens(&self) -> &dyn TokenStore {
        self.inner.tokens.as_ref()
    }

    pub fn auth_status(&self) -> AuthStatus {
        *self.inner.status.borrow()
    }

    /// Watch for status changes, e.g. to route to sign-in after the
    /// session is lost mid-request.
    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.inner.status.subscribe()
    }

    pub(crate) fn set_status(&self, status: AuthStatus) {
        let previous = self.inner.status.send_replace(status);
        if previous != status {
            info!(?status, "auth status changed");
        }
    }

    pub(crate) fn store_tokens(&self, tokens: &StoredTokens) -> TaskdeskResult<()> {
        self.inner.tokens.save(tokens)
    }

    /// Drop both tokens and mark the session as gone.
    pub(crate) fn sign_out(&self) -> TaskdeskResult<()> {
        self.set_status(AuthStatus::Unauthenticated);
        self.inner.tokens.clear()
    }

    fn url(&self, path: &str) -> TaskdeskResult<Url> {
        self.inner
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TaskdeskError::Config(format!("Invalid API path '{}': {}", path, e)))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> TaskdeskResult<T> {
        self.send(ApiRequest::get(path)).await
    }

    /// Send a request and decode the success body.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> TaskdeskResult<T> {
        decode(self.execute(request).await?).await
    }

    /// Send a request whose success body is ignored (deletes and actions).
    pub async fn send_discard(&self, request: ApiRequest) -> TaskdeskResult<()> {
        let response = self.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(error_for_status(status, &response.text().await?))
    }

    /// Dispatch a request, refreshing the access token once on 401.
    #[tracing::instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn execute(&self, request: ApiRequest) -> TaskdeskResult<Response> {
        let sent_with = self.inner.tokens.load()?.access_token;
        let response = self.dispatch(&request, sent_with.as_deref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED || !request.refresh_on_401 {
            return Ok(response);
        }

        debug!("access token rejected, refreshing");
        let access = self.refresh_access_token(sent_with.as_deref()).await?;

        self.dispatch(&request, Some(&access)).await
    }

    async fn dispatch(&self, request: &ApiRequest, token: Option<&str>) -> TaskdeskResult<Response> {
        let url = self.url(&request.path)?;
        let mut builder = self.inner.http.request(request.method.clone(), url);

        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        builder = match &request.payload {
            Payload::Empty => builder,
            Payload::Json(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body)?),
            // reqwest writes the multipart content type (with boundary) itself.
            Payload::Multipart(body) => builder.multipart(body.to_form()?),
        };

        let response = builder.send().await?;
        debug!(status = response.status().as_u16(), "response");
        Ok(response)
    }

    /// Get a fresh access token after `stale` was rejected.
    ///
    /// On failure both tokens are cleared, the status drops to
    /// unauthenticated and `SignedOut` is returned.
    async fn refresh_access_token(&self, stale: Option<&str>) -> TaskdeskResult<String> {
        let _guard = self.inner.refresh_lock.lock().await;
        let tokens = self.inner.tokens.load()?;

        if let Some(current) = tokens.access_token.as_deref() {
            if Some(current) != stale {
                debug!("token already refreshed by a concurrent request");
                return Ok(current.to_string());
            }
        }

        match self.request_refresh(&tokens).await {
            Ok(refreshed) => {
                self.inner.tokens.save(&refreshed)?;
                refreshed.access_token.ok_or(TaskdeskError::SignedOut)
            }
            Err(err) => {
                warn!(error = %err, "token refresh failed, signing out");
                self.sign_out()?;
                Err(TaskdeskError::SignedOut)
            }
        }
    }

    async fn request_refresh(&self, tokens: &StoredTokens) -> TaskdeskResult<StoredTokens> {
        let refresh = tokens.refresh_token.as_deref().ok_or(TaskdeskError::Unauthorized {
            body: Value::String("No refresh token stored".into()),
        })?;

        let response = self
            .inner
            .http
            .post(self.url(REFRESH_PATH)?)
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await?;

        let body: RefreshResponse = decode(response).await?;

        Ok(StoredTokens {
            access_token: Some(body.access),
            refresh_token: Some(body.refresh.unwrap_or_else(|| refresh.to_string())),
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> TaskdeskResult<T> {
    let status = response.status();
    let text = response.text().await?;

    if status.is_success() {
        let body = if text.trim().is_empty() { "null" } else { text.as_str() };
        return Ok(serde_json::from_str(body)?);
    }

    Err(error_for_status(status, &text))
}

fn error_for_status(status: StatusCode, text: &str) -> TaskdeskError {
    let body = serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()));

    match status.as_u16() {
        401 => TaskdeskError::Unauthorized { body },
        code @ 400..=499 => TaskdeskError::Validation { status: code, body },
        code => TaskdeskError::Server { status: code, body },
    }
}
