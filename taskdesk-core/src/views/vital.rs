//! "Vital" tasks: high priority or overdue, and not done yet.

use chrono::{DateTime, NaiveDate, Utc};

use super::catalog::Catalog;
use crate::model::Todo;

/// Sort key stand-in for tasks without a due date.
fn far_future() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(9999, 12, 31)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

pub fn is_vital(todo: &Todo, catalog: Catalog<'_>, now: DateTime<Utc>) -> bool {
    (catalog.is_high_priority(todo) || todo.is_overdue(now)) && !catalog.is_completed(todo)
}

/// Vital tasks, overdue first, then by due date ascending; undated last.
/// Ties keep input order.
pub fn vital_tasks<'t>(todos: &'t [Todo], catalog: Catalog<'_>, now: DateTime<Utc>) -> Vec<&'t Todo> {
    let mut vital: Vec<&Todo> = todos
        .iter()
        .filter(|t| is_vital(t, catalog, now))
        .collect();

    let undated = far_future();
    vital.sort_by_key(|t| (!t.is_overdue(now), t.due_date.unwrap_or(undated)));
    vital
}

/// Counters shown above the vital list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VitalSummary {
    pub total: usize,
    pub overdue: usize,
    pub high_priority: usize,
}

pub fn vital_summary(vital: &[&Todo], catalog: Catalog<'_>, now: DateTime<Utc>) -> VitalSummary {
    VitalSummary {
        total: vital.len(),
        overdue: vital.iter().filter(|t| t.is_overdue(now)).count(),
        high_priority: vital.iter().filter(|t| catalog.is_high_priority(t)).count(),
    }
}
