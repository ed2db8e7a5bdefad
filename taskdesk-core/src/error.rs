//! Error types for taskdesk.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when talking to the taskdesk API.
#[derive(Error, Debug)]
pub enum TaskdeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// No response was received (connection refused, DNS, timeout, ...).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered 401 and the session could not be recovered.
    #[error("Not authorized: {}", summarize(.body))]
    Unauthorized { body: Value },

    /// Refresh was impossible; stored credentials have been cleared.
    #[error("Session expired, please sign in again")]
    SignedOut,

    #[error("Request rejected ({status}): {}", summarize(.body))]
    Validation { status: u16, body: Value },

    #[error("Server error ({status}): {}", summarize(.body))]
    Server { status: u16, body: Value },

    #[error("{0}")]
    InvalidInput(String),

    #[error("{failed} of {total} requests failed")]
    Bulk { failed: usize, total: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for taskdesk operations.
pub type TaskdeskResult<T> = Result<T, TaskdeskError>;

impl TaskdeskError {
    /// Response body attached to the error, if the server sent one.
    pub fn body(&self) -> Option<&Value> {
        match self {
            TaskdeskError::Unauthorized { body }
            | TaskdeskError::Validation { body, .. }
            | TaskdeskError::Server { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Turn the error into something a person can read.
    ///
    /// Looks at the response body in this order: plain string, `detail`,
    /// `message`, first entry of `non_field_errors`. Anything else yields
    /// `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        if let TaskdeskError::InvalidInput(msg) = self {
            return msg.clone();
        }

        self.body()
            .and_then(extract_message)
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Flatten a field-keyed validation body into
    /// `"field: msg1, msg2; field2: msg3"`.
    ///
    /// Returns `None` when the body is not a JSON object.
    pub fn field_errors_message(&self) -> Option<String> {
        let Value::Object(fields) = self.body()? else {
            return None;
        };

        let parts: Vec<String> = fields
            .iter()
            .map(|(field, value)| match value {
                Value::Array(messages) => {
                    let joined: Vec<String> = messages.iter().map(value_text).collect();
                    format!("{}: {}", field, joined.join(", "))
                }
                other => format!("{}: {}", field, value_text(other)),
            })
            .collect();

        Some(parts.join("; "))
    }
}

fn extract_message(body: &Value) -> Option<String> {
    match body {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => {
            for key in ["detail", "message"] {
                match map.get(key) {
                    Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
                    _ => {}
                }
            }

            map.get("non_field_errors")
                .and_then(Value::as_array)
                .and_then(|errors| errors.first())
                .map(value_text)
        }
        _ => None,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn summarize(body: &Value) -> String {
    extract_message(body).unwrap_or_else(|| body.to_string())
}

impl From<serde_json::Error> for TaskdeskError {
    fn from(err: serde_json::Error) -> Self {
        TaskdeskError::Serialization(err.to_string())
    }
}
