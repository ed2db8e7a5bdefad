pub mod account;
pub mod auth;
pub mod calendar;
pub mod categories;
pub mod dashboard;
pub mod events;
pub mod todos;

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use taskdesk_core::{ApiClient, AuthStatus, FileTokenStore, Session, Settings, TaskdeskError};

/// Client and session backed by the configured token file. The stored
/// session (if any) is restored before returning.
pub async fn open_session(settings: &Settings) -> Result<Session> {
    let token_path = settings.token_path()?;
    let tokens = FileTokenStore::open(&token_path)
        .with_context(|| format!("Failed to open token store at {}", token_path.display()))?;

    let client = ApiClient::new(settings, Arc::new(tokens))?;
    let mut session = Session::new(client);
    session.bootstrap().await;
    Ok(session)
}

/// Like [`open_session`], but fails unless someone is signed in.
pub async fn require_session(settings: &Settings) -> Result<Session> {
    let session = open_session(settings).await?;

    if session.client().auth_status() != AuthStatus::Authenticated {
        anyhow::bail!(
            "Not signed in.\n\n\
            Sign in with:\n  \
            taskdesk login"
        );
    }

    Ok(session)
}

/// Convert an API error for display: the server's own message when the
/// response carried one, otherwise `fallback` with the error as its cause.
pub fn api_error(fallback: &'static str) -> impl FnOnce(TaskdeskError) -> anyhow::Error {
    move |err| {
        if err.body().is_some() {
            anyhow::anyhow!(err.user_message(fallback))
        } else {
            anyhow::Error::new(err).context(fallback)
        }
    }
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", input))
}

/// Accepts "2025-03-20", "2025-03-20T15:00" or "2025-03-20 15:00".
/// Returns the parsed value and whether only a date was given.
pub fn parse_datetime(input: &str) -> Result<(NaiveDateTime, bool)> {
    let input = input.trim();

    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Ok((dt, false));
        }
    }

    let date = parse_date(input)
        .with_context(|| format!("Invalid date/time '{}', expected YYYY-MM-DD[THH:MM]", input))?;
    Ok((date.and_time(NaiveTime::MIN), true))
}
