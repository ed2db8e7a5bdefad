//! Checkbox selection for bulk actions.

use crate::model::Todo;

/// Add `id` if absent, remove it if present.
pub fn toggle_selection(selected: &mut Vec<i64>, id: i64) {
    if let Some(pos) = selected.iter().position(|&s| s == id) {
        selected.remove(pos);
    } else {
        selected.push(id);
    }
}

/// Select every visible task, or clear the selection if all of them are
/// already selected.
pub fn toggle_select_all(selected: &mut Vec<i64>, visible: &[&Todo]) {
    if selected.len() == visible.len() {
        selected.clear();
    } else {
        *selected = visible.iter().map(|t| t.id).collect();
    }
}
