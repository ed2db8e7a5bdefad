//! Search and the task list's filter bar.

use chrono::{DateTime, Duration, Utc};

use crate::model::Todo;

/// Case-insensitive match on title or description. An empty term matches
/// everything.
pub fn matches_search(todo: &Todo, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let term = term.to_lowercase();
    todo.title.to_lowercase().contains(&term)
        || todo
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&term))
}

pub fn search<'t>(todos: &'t [Todo], term: &str) -> Vec<&'t Todo> {
    todos.iter().filter(|t| matches_search(t, term)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueFilter {
    Overdue,
    /// Due on the same calendar day as `now` (UTC).
    Today,
    /// Due between now and seven days from now, inclusive.
    ThisWeek,
    NoDate,
}

impl DueFilter {
    pub fn matches(&self, todo: &Todo, now: DateTime<Utc>) -> bool {
        match (self, todo.due_date) {
            (DueFilter::NoDate, due) => due.is_none(),
            (_, None) => false,
            (DueFilter::Overdue, Some(due)) => due < now,
            (DueFilter::Today, Some(due)) => due.date_naive() == now.date_naive(),
            (DueFilter::ThisWeek, Some(due)) => due >= now && due <= now + Duration::days(7),
        }
    }
}

impl std::str::FromStr for DueFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overdue" => Ok(DueFilter::Overdue),
            "today" => Ok(DueFilter::Today),
            "week" => Ok(DueFilter::ThisWeek),
            "no-date" => Ok(DueFilter::NoDate),
            other => Err(format!(
                "Unknown due filter '{}'. Expected overdue, today, week or no-date",
                other
            )),
        }
    }
}

/// All criteria must hold; unset criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub search: String,
    pub status_id: Option<i64>,
    pub priority_id: Option<i64>,
    pub due: Option<DueFilter>,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.status_id.is_none()
            && self.priority_id.is_none()
            && self.due.is_none()
    }

    pub fn matches(&self, todo: &Todo, now: DateTime<Utc>) -> bool {
        matches_search(todo, &self.search)
            && self.status_id.is_none_or(|id| todo.status_id() == Some(id))
            && self.priority_id.is_none_or(|id| todo.priority_id() == Some(id))
            && self.due.is_none_or(|due| due.matches(todo, now))
    }

    pub fn apply<'t>(&self, todos: &'t [Todo], now: DateTime<Utc>) -> Vec<&'t Todo> {
        todos.iter().filter(|t| self.matches(t, now)).collect()
    }
}
