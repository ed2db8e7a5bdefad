//! Status/priority name resolution and bucket classification.

use crate::model::{Category, CategoryRef, Priority, Status, Todo};

/// Name shown when a status/priority cannot be resolved.
pub const UNKNOWN: &str = "Unknown";

/// Coarse meaning of a user-defined status name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusBucket {
    Completed,
    InProgress,
    NotStarted,
}

impl StatusBucket {
    /// Case-insensitive substring match, so "On Going", "In progress" and
    /// "WIP - in progress" all land in the same bucket.
    pub fn classify(name: &str) -> Option<Self> {
        let name = name.to_lowercase();

        if name.contains("not started")
            || name.contains("incomplete")
            || name.contains("not complete")
            || name.contains("pending")
            || name.contains("to do")
            || name.contains("todo")
        {
            Some(StatusBucket::NotStarted)
        } else if name.contains("complete") || name.contains("done") || name.contains("finished") {
            Some(StatusBucket::Completed)
        } else if name.contains("progress") || name.contains("on going") || name.contains("ongoing")
        {
            Some(StatusBucket::InProgress)
        } else {
            None
        }
    }
}

/// Coarse meaning of a user-defined priority name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityBucket {
    High,
    Medium,
    Low,
}

impl PriorityBucket {
    pub fn classify(name: &str) -> Option<Self> {
        let name = name.to_lowercase();

        if name.contains("high") || name.contains("extreme") || name.contains("urgent") {
            Some(PriorityBucket::High)
        } else if name.contains("medium") || name.contains("moderate") || name.contains("normal") {
            Some(PriorityBucket::Medium)
        } else if name.contains("low") {
            Some(PriorityBucket::Low)
        } else {
            None
        }
    }

    /// Styling class; anything unrecognised renders as medium.
    pub fn class_for(name: &str) -> Self {
        Self::classify(name).unwrap_or(PriorityBucket::Medium)
    }
}

/// Resolve a status/priority field to a display name.
///
/// Embedded record name first, then lookup of the id in `reference`, then
/// [`UNKNOWN`]. Id `0` is a valid id like any other.
pub fn resolve_name<'a>(
    field: Option<&'a CategoryRef>,
    fallback_id: Option<i64>,
    reference: &'a [Category],
) -> &'a str {
    if let Some(name) = field.and_then(CategoryRef::embedded_name) {
        return name;
    }

    field
        .map(CategoryRef::id)
        .or(fallback_id)
        .and_then(|id| reference.iter().find(|c| c.id == id))
        .map(|c| c.name.as_str())
        .unwrap_or(UNKNOWN)
}

/// The reference collections needed to interpret a task.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    pub statuses: &'a [Status],
    pub priorities: &'a [Priority],
}

impl<'a> Catalog<'a> {
    pub fn new(statuses: &'a [Status], priorities: &'a [Priority]) -> Self {
        Catalog {
            statuses,
            priorities,
        }
    }

    pub fn status_name(&self, todo: &'a Todo) -> &'a str {
        resolve_name(todo.status.as_ref(), todo.status_id, self.statuses)
    }

    pub fn priority_name(&self, todo: &'a Todo) -> &'a str {
        resolve_name(todo.priority.as_ref(), todo.priority_id, self.priorities)
    }

    pub fn status_bucket(&self, todo: &'a Todo) -> Option<StatusBucket> {
        StatusBucket::classify(self.status_name(todo))
    }

    pub fn priority_bucket(&self, todo: &'a Todo) -> Option<PriorityBucket> {
        PriorityBucket::classify(self.priority_name(todo))
    }

    pub fn is_completed(&self, todo: &'a Todo) -> bool {
        self.status_bucket(todo) == Some(StatusBucket::Completed)
    }

    pub fn is_high_priority(&self, todo: &'a Todo) -> bool {
        self.priority_bucket(todo) == Some(PriorityBucket::High)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: i64, name: &str) -> Category {
        Category {
            id,
            name: name.into(),
        }
    }

    fn todo(status: Option<CategoryRef>, status_id: Option<i64>) -> Todo {
        Todo {
            id: 1,
            title: "t".into(),
            description: None,
            status,
            status_id,
            priority: None,
            priority_id: None,
            due_date: None,
            image: None,
            created_at: None,
        }
    }

    #[test]
    fn status_buckets_match_by_substring() {
        assert_eq!(StatusBucket::classify("Completed"), Some(StatusBucket::Completed));
        assert_eq!(StatusBucket::classify("DONE"), Some(StatusBucket::Completed));
        assert_eq!(StatusBucket::classify("On Going"), Some(StatusBucket::InProgress));
        assert_eq!(StatusBucket::classify("in progress"), Some(StatusBucket::InProgress));
        assert_eq!(StatusBucket::classify("Not Started"), Some(StatusBucket::NotStarted));
        assert_eq!(StatusBucket::classify("Incomplete"), Some(StatusBucket::NotStarted));
        assert_eq!(StatusBucket::classify("Blocked"), None);
    }

    #[test]
    fn priority_buckets_match_by_substring() {
        assert_eq!(PriorityBucket::classify("Extreme"), Some(PriorityBucket::High));
        assert_eq!(PriorityBucket::classify("very HIGH"), Some(PriorityBucket::High));
        assert_eq!(PriorityBucket::classify("Moderate"), Some(PriorityBucket::Medium));
        assert_eq!(PriorityBucket::classify("low"), Some(PriorityBucket::Low));
        assert_eq!(PriorityBucket::classify("Someday"), None);
        assert_eq!(PriorityBucket::class_for("Someday"), PriorityBucket::Medium);
    }

    #[test]
    fn resolve_prefers_embedded_then_lookup_then_unknown() {
        let statuses = vec![cat(0, "Not Started"), cat(2, "Completed")];

        let embedded = todo(Some(CategoryRef::Embedded(cat(2, "Done (server)"))), None);
        let by_id = todo(Some(CategoryRef::Id(2)), None);
        let zero = todo(Some(CategoryRef::Id(0)), None);
        let flat_zero = todo(None, Some(0));
        let missing = todo(Some(CategoryRef::Id(99)), None);
        let nothing = todo(None, None);

        let catalog = Catalog::new(&statuses, &[]);
        assert_eq!(catalog.status_name(&embedded), "Done (server)");
        assert_eq!(catalog.status_name(&by_id), "Completed");
        assert_eq!(catalog.status_name(&zero), "Not Started");
        assert_eq!(catalog.status_name(&flat_zero), "Not Started");
        assert_eq!(catalog.status_name(&missing), UNKNOWN);
        assert_eq!(catalog.status_name(&nothing), UNKNOWN);
    }

    #[test]
    fn embedded_without_name_falls_back_to_lookup() {
        let statuses = vec![cat(3, "In Progress")];
        let t = todo(Some(CategoryRef::Embedded(cat(3, ""))), None);

        let catalog = Catalog::new(&statuses, &[]);
        assert_eq!(catalog.status_name(&t), "In Progress");
        assert_eq!(catalog.status_bucket(&t), Some(StatusBucket::InProgress));
    }
}
