use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::category::CategoryRef;
use super::datetime;
use super::upload::ImageFile;

/// A task as returned by `/todos/`.
///
/// `status`/`priority` may be a bare id or an expanded record; some
/// deployments only send the flat `status_id`/`priority_id` columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<CategoryRef>,
    #[serde(default)]
    pub status_id: Option<i64>,
    #[serde(default)]
    pub priority: Option<CategoryRef>,
    #[serde(default)]
    pub priority_id: Option<i64>,
    #[serde(default, deserialize_with = "datetime::deserialize_opt")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "datetime::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Todo {
    pub fn status_id(&self) -> Option<i64> {
        self.status.as_ref().map(CategoryRef::id).or(self.status_id)
    }

    pub fn priority_id(&self) -> Option<i64> {
        self.priority.as_ref().map(CategoryRef::id).or(self.priority_id)
    }

    /// Due strictly before `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_some_and(|due| due < now)
    }
}

/// What to do with a task's attachment on create/update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageChange {
    /// Leave the existing image alone (field omitted).
    #[default]
    Keep,
    Upload(ImageFile),
    /// Send an explicitly empty `image` field.
    Remove,
}

/// Fields sent when creating or updating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    pub description: String,
    pub status_id: i64,
    pub priority_id: i64,
    pub due_date: Option<NaiveDate>,
    pub image: ImageChange,
}

impl TodoDraft {
    /// Draft reproducing an existing task, used for single-field edits.
    ///
    /// Returns `None` if the task has no resolvable status or priority.
    pub fn from_todo(todo: &Todo) -> Option<Self> {
        Some(TodoDraft {
            title: todo.title.clone(),
            description: todo.description.clone().unwrap_or_default(),
            status_id: todo.status_id()?,
            priority_id: todo.priority_id()?,
            due_date: todo.due_date.map(|d| d.date_naive()),
            image: ImageChange::Keep,
        })
    }

    pub fn with_status(mut self, status_id: i64) -> Self {
        self.status_id = status_id;
        self
    }

    pub(crate) fn due_date_string(&self) -> Option<String> {
        self.due_date.map(|d| d.format("%Y-%m-%d").to_string())
    }
}
