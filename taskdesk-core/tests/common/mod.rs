//! In-process stand-in for the taskdesk REST API.
//!
//! One valid access token at a time (`A1` after login, `A2` after a
//! refresh) and a single refresh token `R1`. Counters let tests assert how
//! many calls actually reached the server.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use taskdesk_core::{ApiClient, TokenStore};

pub const EMAIL: &str = "ada@example.com";
pub const PASSWORD: &str = "correct horse";
pub const TAKEN_EMAIL: &str = "taken@example.com";

#[derive(Debug, Clone)]
pub struct Upload {
    pub content_type: String,
    pub body: String,
}

pub struct MockApi {
    access: Mutex<String>,
    refresh_valid: AtomicBool,
    fail_priorities: AtomicBool,
    delete_with_message: AtomicBool,
    failing_ids: Mutex<HashSet<i64>>,
    last_bearer: Mutex<Option<String>>,
    last_upload: Mutex<Option<Upload>>,
    pub refresh_calls: AtomicUsize,
    pub todo_list_calls: AtomicUsize,
    pub todo_writes: AtomicUsize,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(MockApi {
            access: Mutex::new("A1".into()),
            refresh_valid: AtomicBool::new(true),
            fail_priorities: AtomicBool::new(false),
            delete_with_message: AtomicBool::new(false),
            failing_ids: Mutex::new(HashSet::new()),
            last_bearer: Mutex::new(None),
            last_upload: Mutex::new(None),
            refresh_calls: AtomicUsize::new(0),
            todo_list_calls: AtomicUsize::new(0),
            todo_writes: AtomicUsize::new(0),
        })
    }

    /// Invalidate the current access token; only a refresh gets a new one.
    pub fn expire_access(&self) {
        *self.access.lock().unwrap() = "expired".into();
    }

    pub fn revoke_refresh(&self) {
        self.refresh_valid.store(false, Ordering::SeqCst);
    }

    pub fn fail_priorities(&self) {
        self.fail_priorities.store(true, Ordering::SeqCst);
    }

    /// Answer successful deletes with `200` and a JSON message instead of `204`.
    pub fn delete_with_message(&self) {
        self.delete_with_message.store(true, Ordering::SeqCst);
    }

    pub fn fail_todo(&self, id: i64) {
        self.failing_ids.lock().unwrap().insert(id);
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn last_bearer(&self) -> Option<String> {
        self.last_bearer.lock().unwrap().clone()
    }

    pub fn last_upload(&self) -> Option<Upload> {
        self.last_upload.lock().unwrap().clone()
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string);

        let ok = bearer.as_deref() == Some(self.access.lock().unwrap().as_str());
        *self.last_bearer.lock().unwrap() = bearer;
        ok
    }

    fn record_upload(&self, headers: &HeaderMap, body: &Bytes) {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        *self.last_upload.lock().unwrap() = Some(Upload {
            content_type,
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    fn is_failing(&self, id: i64) -> bool {
        self.failing_ids.lock().unwrap().contains(&id)
    }

    fn deleted(&self, what: &str) -> Response {
        if self.delete_with_message.load(Ordering::SeqCst) {
            Json(json!({ "message": format!("{what} deleted successfully") })).into_response()
        } else {
            StatusCode::NO_CONTENT.into_response()
        }
    }
}

/// Start the mock on an ephemeral port and return its API base URL.
pub async fn spawn(api: Arc<MockApi>) -> String {
    let app = Router::new()
        .route("/api/account/login/", post(login))
        .route("/api/account/login/refresh/", post(refresh))
        .route("/api/account/register/", post(register))
        .route("/api/account/", get(profile))
        .route("/api/todos/", get(list_todos).post(create_todo))
        .route("/api/todos/{id}/", put(update_todo).delete(delete_todo))
        .route("/api/status/", get(list_statuses))
        .route("/api/status/{id}/", delete(delete_category))
        .route("/api/priority/", get(list_priorities))
        .route("/api/priority/{id}/", delete(delete_category))
        .route("/api/events/", get(list_events))
        .route("/api/events/{id}/", delete(delete_event))
        .with_state(api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/api", addr)
}

pub fn client(base_url: &str, tokens: Arc<dyn TokenStore>) -> ApiClient {
    ApiClient::with_http(reqwest::Client::new(), base_url, tokens).unwrap()
}

fn user() -> Value {
    json!({
        "id": 7,
        "email": EMAIL,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "user_name": "ada",
        "is_active": true,
    })
}

fn token_not_valid() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Given token not valid for any token type", "code": "token_not_valid" })),
    )
        .into_response()
}

async fn login(State(api): State<Arc<MockApi>>, Json(body): Json<Value>) -> Response {
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        *api.access.lock().unwrap() = "A1".into();
        return Json(json!({ "access": "A1", "refresh": "R1", "user": { "id": 7, "email": EMAIL } }))
            .into_response();
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "No active account found with the given credentials" })),
    )
        .into_response()
}

async fn refresh(State(api): State<Arc<MockApi>>, Json(body): Json<Value>) -> Response {
    api.refresh_calls.fetch_add(1, Ordering::SeqCst);
    // Keep the refresh in flight long enough for concurrent 401s to pile up.
    tokio::time::sleep(Duration::from_millis(50)).await;

    if api.refresh_valid.load(Ordering::SeqCst) && body["refresh"] == "R1" {
        *api.access.lock().unwrap() = "A2".into();
        return Json(json!({ "access": "A2" })).into_response();
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Token is invalid or expired", "code": "token_not_valid" })),
    )
        .into_response()
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"] == TAKEN_EMAIL {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "email": ["user with this email already exists."],
                "user_name": ["This field must be unique."],
            })),
        )
            .into_response();
    }

    (StatusCode::CREATED, Json(json!({ "id": 8, "email": body["email"] }))).into_response()
}

async fn profile(State(api): State<Arc<MockApi>>, headers: HeaderMap) -> Response {
    if !api.authorized(&headers) {
        return token_not_valid();
    }
    Json(user()).into_response()
}

async fn list_todos(State(api): State<Arc<MockApi>>, headers: HeaderMap) -> Response {
    api.todo_list_calls.fetch_add(1, Ordering::SeqCst);
    if !api.authorized(&headers) {
        return token_not_valid();
    }

    Json(json!([
        {
            "id": 1,
            "title": "Write report",
            "description": "Quarterly numbers",
            "status": { "id": 1, "name": "Not Started" },
            "priority": { "id": 3, "name": "High" },
            "due_date": "2025-03-10",
        },
        { "id": 2, "title": "Ship release", "status": 2, "priority": 2, "due_date": null },
        { "id": 3, "title": "Archive notes", "status_id": 3, "priority_id": 1 },
    ]))
    .into_response()
}

async fn create_todo(State(api): State<Arc<MockApi>>, headers: HeaderMap, body: Bytes) -> Response {
    if !api.authorized(&headers) {
        return token_not_valid();
    }
    api.record_upload(&headers, &body);
    api.todo_writes.fetch_add(1, Ordering::SeqCst);

    (StatusCode::CREATED, Json(json!({ "id": 99, "title": "created" }))).into_response()
}

async fn update_todo(
    State(api): State<Arc<MockApi>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !api.authorized(&headers) {
        return token_not_valid();
    }
    api.record_upload(&headers, &body);
    api.todo_writes.fetch_add(1, Ordering::SeqCst);

    if api.is_failing(id) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": "boom" }))).into_response();
    }

    Json(json!({ "id": id, "title": "updated" })).into_response()
}

async fn delete_todo(State(api): State<Arc<MockApi>>, Path(id): Path<i64>, headers: HeaderMap) -> Response {
    if !api.authorized(&headers) {
        return token_not_valid();
    }
    api.todo_writes.fetch_add(1, Ordering::SeqCst);

    if api.is_failing(id) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": "boom" }))).into_response();
    }

    api.deleted("Todo")
}

async fn delete_category(State(api): State<Arc<MockApi>>, headers: HeaderMap) -> Response {
    if !api.authorized(&headers) {
        return token_not_valid();
    }
    api.deleted("Category")
}

async fn delete_event(State(api): State<Arc<MockApi>>, headers: HeaderMap) -> Response {
    if !api.authorized(&headers) {
        return token_not_valid();
    }
    api.deleted("Event")
}

async fn list_statuses(State(api): State<Arc<MockApi>>, headers: HeaderMap) -> Response {
    if !api.authorized(&headers) {
        return token_not_valid();
    }

    Json(json!([
        { "id": 1, "name": "Not Started" },
        { "id": 2, "name": "In Progress" },
        { "id": 3, "name": "Completed" },
    ]))
    .into_response()
}

async fn list_priorities(State(api): State<Arc<MockApi>>, headers: HeaderMap) -> Response {
    if !api.authorized(&headers) {
        return token_not_valid();
    }
    if api.fail_priorities.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
    }

    Json(json!([
        { "id": 1, "name": "Low" },
        { "id": 2, "name": "Medium" },
        { "id": 3, "name": "High" },
    ]))
    .into_response()
}

async fn list_events(State(api): State<Arc<MockApi>>, headers: HeaderMap) -> Response {
    if !api.authorized(&headers) {
        return token_not_valid();
    }

    Json(json!([
        { "id": 1, "title": "Standup", "start_datetime": "2025-03-14T09:00:00Z" },
        { "id": 2, "title": "Offsite", "start_datetime": "2025-03-14", "is_all_day": true },
    ]))
    .into_response()
}
