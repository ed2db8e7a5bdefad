//! Dashboard percentages and the active/completed slices.

use serde::Serialize;

use super::catalog::{Catalog, StatusBucket};
use crate::model::Todo;

/// Share of tasks per status bucket, in whole percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub completed: u32,
    pub in_progress: u32,
    pub not_started: u32,
}

impl TaskStats {
    pub fn total(&self) -> u32 {
        self.completed + self.in_progress + self.not_started
    }
}

/// Percentages are rounded to the nearest integer (halves up). If the
/// three roundings overshoot 100, the share with the smallest fractional
/// part that was rounded up gives back a point. Tasks whose status fits no
/// bucket count toward the total only. Empty input yields all zeros.
pub fn task_stats(todos: &[Todo], catalog: Catalog<'_>) -> TaskStats {
    if todos.is_empty() {
        return TaskStats::default();
    }

    let mut counts = [0usize; 3];
    for todo in todos {
        match catalog.status_bucket(todo) {
            Some(StatusBucket::Completed) => counts[0] += 1,
            Some(StatusBucket::InProgress) => counts[1] += 1,
            Some(StatusBucket::NotStarted) => counts[2] += 1,
            None => {}
        }
    }

    let total = todos.len() as f64;
    let exact: Vec<f64> = counts.iter().map(|&c| c as f64 * 100.0 / total).collect();
    let mut rounded: Vec<u32> = exact.iter().map(|x| x.round() as u32).collect();

    while rounded.iter().sum::<u32>() > 100 {
        let Some(idx) = (0..3)
            .filter(|&i| rounded[i] as f64 > exact[i])
            .min_by(|&a, &b| exact[a].fract().total_cmp(&exact[b].fract()))
        else {
            break;
        };
        rounded[idx] -= 1;
    }

    TaskStats {
        completed: rounded[0],
        in_progress: rounded[1],
        not_started: rounded[2],
    }
}

/// Tasks not in the completed bucket, in source order, at most `limit`.
pub fn active_tasks<'t>(todos: &'t [Todo], catalog: Catalog<'_>, limit: usize) -> Vec<&'t Todo> {
    todos
        .iter()
        .filter(|t| !catalog.is_completed(t))
        .take(limit)
        .collect()
}

/// Tasks in the completed bucket, in source order, at most `limit`.
pub fn completed_tasks<'t>(todos: &'t [Todo], catalog: Catalog<'_>, limit: usize) -> Vec<&'t Todo> {
    todos
        .iter()
        .filter(|t| catalog.is_completed(t))
        .take(limit)
        .collect()
}
