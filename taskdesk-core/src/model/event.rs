use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::datetime;

/// A scheduled event from `/events/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "datetime::deserialize")]
    pub start_datetime: DateTime<Utc>,
    #[serde(default, deserialize_with = "datetime::deserialize_opt")]
    pub end_datetime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub reminder: bool,
    #[serde(default)]
    pub is_all_day: bool,
}

impl Event {
    /// Calendar day the event falls on (UTC), ignoring the time of day.
    pub fn date(&self) -> NaiveDate {
        self.start_datetime.date_naive()
    }
}

/// Fields sent when creating or updating an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub location: String,
    pub reminder: bool,
    pub is_all_day: bool,
}

impl EventDraft {
    pub fn from_event(event: &Event) -> Self {
        EventDraft {
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            start_datetime: event.start_datetime,
            end_datetime: event.end_datetime.unwrap_or(event.start_datetime),
            location: event.location.clone().unwrap_or_default(),
            reminder: event.reminder,
            is_all_day: event.is_all_day,
        }
    }
}
