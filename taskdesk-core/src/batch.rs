//! Multi-request operations: batched page loads and bulk edits.
//!
//! Page loads are all-or-nothing: if one fetch fails nothing is returned.
//! Bulk edits fire one request per id concurrently and wait for every one
//! to settle before reporting; any failure makes the whole batch fail.

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::error::{TaskdeskError, TaskdeskResult};
use crate::http::ApiClient;
use crate::model::{Event, Priority, Status, Todo, TodoDraft};
use crate::views::Catalog;

/// Everything the dashboard and task list render from.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub todos: Vec<Todo>,
    pub statuses: Vec<Status>,
    pub priorities: Vec<Priority>,
}

impl DashboardData {
    pub fn catalog(&self) -> Catalog<'_> {
        Catalog::new(&self.statuses, &self.priorities)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CalendarData {
    pub events: Vec<Event>,
    pub todos: Vec<Todo>,
}

/// Fetch todos, statuses and priorities together.
pub async fn load_dashboard(client: &ApiClient) -> TaskdeskResult<DashboardData> {
    let todos_api = client.todos();
    let statuses_api = client.statuses();
    let priorities_api = client.priorities();

    let (todos, statuses, priorities) =
        tokio::try_join!(todos_api.list(), statuses_api.list(), priorities_api.list())?;

    debug!(
        todos = todos.len(),
        statuses = statuses.len(),
        priorities = priorities.len(),
        "dashboard loaded"
    );

    Ok(DashboardData {
        todos,
        statuses,
        priorities,
    })
}

/// Fetch events and todos for the calendar.
pub async fn load_calendar(client: &ApiClient) -> TaskdeskResult<CalendarData> {
    let events_api = client.events();
    let todos_api = client.todos();

    let (events, todos) = tokio::try_join!(events_api.list(), todos_api.list())?;
    Ok(CalendarData { events, todos })
}

/// Move every selected task to `status_id`.
///
/// Ids missing from `todos`, or tasks without a resolvable status/priority,
/// count as failures. Returns the number of tasks updated.
pub async fn bulk_set_status(
    client: &ApiClient,
    todos: &[Todo],
    ids: &[i64],
    status_id: i64,
) -> TaskdeskResult<usize> {
    let mut tasks: JoinSet<TaskdeskResult<()>> = JoinSet::new();
    let mut failed = 0;

    for &id in ids {
        let Some(draft) = todos
            .iter()
            .find(|t| t.id == id)
            .and_then(TodoDraft::from_todo)
        else {
            warn!(todo_id = id, "cannot update status: task not loaded or incomplete");
            failed += 1;
            continue;
        };

        let client = client.clone();
        let draft = draft.with_status(status_id);
        tasks.spawn(async move {
            client.todos().update(id, &draft).await.map(|_| ())
        });
    }

    settle(tasks, failed, ids.len()).await
}

/// Delete every selected task. Returns the number deleted.
pub async fn bulk_delete(client: &ApiClient, ids: &[i64]) -> TaskdeskResult<usize> {
    let mut tasks: JoinSet<TaskdeskResult<()>> = JoinSet::new();

    for &id in ids {
        let client = client.clone();
        tasks.spawn(async move { client.todos().delete(id).await });
    }

    settle(tasks, 0, ids.len()).await
}

async fn settle(
    mut tasks: JoinSet<TaskdeskResult<()>>,
    mut failed: usize,
    total: usize,
) -> TaskdeskResult<usize> {
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                warn!(error = %err, "bulk request failed");
                failed += 1;
            }
            Err(err) => {
                warn!(error = %err, "bulk request task did not complete");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(TaskdeskError::Bulk { failed, total });
    }

    Ok(total)
}
