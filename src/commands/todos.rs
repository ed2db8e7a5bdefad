use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use owo_colors::OwoColorize;
use taskdesk_core::Settings;
use taskdesk_core::batch::{bulk_delete, bulk_set_status, load_dashboard};
use taskdesk_core::image::resolve_image_url;
use taskdesk_core::model::{ImageChange, ImageFile, TodoDraft};
use taskdesk_core::views::TaskFilter;

use super::{api_error, parse_date, require_session};
use crate::render::render_todo;
use crate::utils::tui::{self, pluralize};

pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub status: i64,
    pub priority: i64,
    pub due: Option<String>,
    pub image: Option<PathBuf>,
}

/// Fields given to `todos edit`. `None` keeps the current value.
pub struct TodoEdits {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<i64>,
    pub priority: Option<i64>,
    pub due: Option<String>,
    pub image: Option<PathBuf>,
    pub remove_image: bool,
}

fn read_image(path: &Path) -> Result<ImageFile> {
    ImageFile::from_path(path).with_context(|| format!("Failed to read image {}", path.display()))
}

pub async fn list(settings: &Settings, filter: TaskFilter, json: bool) -> Result<()> {
    let session = require_session(settings).await?;
    let data = tui::with_spinner("Loading tasks", load_dashboard(session.client()))
        .await
        .map_err(api_error("Failed to load tasks"))?;

    let catalog = data.catalog();
    let now = Utc::now();
    let todos = filter.apply(&data.todos, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&todos)?);
        return Ok(());
    }

    if todos.is_empty() {
        let message = if filter.is_empty() {
            "No tasks yet"
        } else {
            "No tasks match the filter"
        };
        println!("{}", message.dimmed());
        return Ok(());
    }

    for todo in &todos {
        println!("{}", render_todo(todo, catalog, now));
    }
    println!(
        "\n{}",
        format!(
            "{} of {} {}",
            todos.len(),
            data.todos.len(),
            pluralize("task", data.todos.len())
        )
        .dimmed()
    );

    Ok(())
}

pub async fn show(settings: &Settings, id: i64) -> Result<()> {
    let session = require_session(settings).await?;
    let data = load_dashboard(session.client())
        .await
        .map_err(api_error("Failed to load tasks"))?;

    let todo = data
        .todos
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| anyhow::anyhow!("Task #{} not found", id))?;

    println!("{}", render_todo(todo, data.catalog(), Utc::now()));

    if let Some(description) = todo.description.as_deref().filter(|d| !d.is_empty()) {
        println!("\n{}", description);
    }
    if let Some(url) = resolve_image_url(todo.image.as_deref(), &settings.asset_base_url) {
        println!("\n{} {}", "Image:".dimmed(), url);
    }
    if let Some(created) = todo.created_at {
        println!("{} {}", "Created:".dimmed(), created.format("%Y-%m-%d %H:%M"));
    }

    Ok(())
}

pub async fn add(settings: &Settings, new: NewTodo) -> Result<()> {
    let session = require_session(settings).await?;

    let draft = TodoDraft {
        title: new.title,
        description: new.description,
        status_id: new.status,
        priority_id: new.priority,
        due_date: new.due.as_deref().map(parse_date).transpose()?,
        image: match &new.image {
            Some(path) => ImageChange::Upload(read_image(path)?),
            None => ImageChange::Keep,
        },
    };

    let created = tui::with_spinner("Creating task", session.client().todos().create(&draft))
        .await
        .map_err(api_error("Failed to create task"))?;

    println!("Created task #{} {}", created.id, created.title.bold());
    Ok(())
}

pub async fn edit(settings: &Settings, id: i64, edits: TodoEdits) -> Result<()> {
    let session = require_session(settings).await?;
    let todos = session.client().todos();

    let current = todos
        .get(id)
        .await
        .map_err(api_error("Failed to load task"))?;
    let mut draft = match TodoDraft::from_todo(&current) {
        Some(draft) => draft,
        None => {
            let (Some(status_id), Some(priority_id)) = (edits.status, edits.priority) else {
                anyhow::bail!(
                    "Task #{} has no status or priority; pass --status and --priority",
                    id
                );
            };
            TodoDraft {
                title: current.title.clone(),
                description: current.description.clone().unwrap_or_default(),
                status_id,
                priority_id,
                due_date: current.due_date.map(|d| d.date_naive()),
                image: ImageChange::Keep,
            }
        }
    };

    if let Some(title) = edits.title {
        draft.title = title;
    }
    if let Some(description) = edits.description {
        draft.description = description;
    }
    if let Some(status) = edits.status {
        draft.status_id = status;
    }
    if let Some(priority) = edits.priority {
        draft.priority_id = priority;
    }
    match edits.due.as_deref() {
        Some("none") => draft.due_date = None,
        Some(due) => draft.due_date = Some(parse_date(due)?),
        None => {}
    }
    if let Some(path) = &edits.image {
        draft.image = ImageChange::Upload(read_image(path)?);
    } else if edits.remove_image {
        draft.image = ImageChange::Remove;
    }

    let updated = tui::with_spinner("Saving task", todos.update(id, &draft))
        .await
        .map_err(api_error("Failed to update task"))?;

    println!("Updated task #{} {}", updated.id, updated.title.bold());
    Ok(())
}

pub async fn move_to(settings: &Settings, status_id: i64, ids: &[i64]) -> Result<()> {
    let session = require_session(settings).await?;
    let todos = session
        .client()
        .todos()
        .list()
        .await
        .map_err(api_error("Failed to load tasks"))?;

    let moved = tui::with_spinner(
        "Updating tasks",
        bulk_set_status(session.client(), &todos, ids, status_id),
    )
    .await
    .map_err(api_error("Failed to update tasks"))?;

    println!("Moved {} {}", moved, pluralize("task", moved));
    Ok(())
}

pub async fn delete(settings: &Settings, ids: &[i64], force: bool) -> Result<()> {
    let session = require_session(settings).await?;

    if !force
        && !tui::confirm(format!(
            "Delete {} {}?",
            ids.len(),
            pluralize("task", ids.len())
        ))?
    {
        return Ok(());
    }

    let deleted = tui::with_spinner("Deleting tasks", bulk_delete(session.client(), ids))
        .await
        .map_err(api_error("Failed to delete tasks"))?;

    println!("Deleted {} {}", deleted, pluralize("task", deleted));
    Ok(())
}
