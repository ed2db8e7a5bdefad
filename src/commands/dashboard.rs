use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use taskdesk_core::Settings;
use taskdesk_core::batch::load_dashboard;
use taskdesk_core::constants::{DASHBOARD_ACTIVE_LIMIT, DASHBOARD_COMPLETED_LIMIT};
use taskdesk_core::views::{active_tasks, completed_tasks, task_stats, vital_summary, vital_tasks};

use super::{api_error, require_session};
use crate::render::{Render, render_todo};
use crate::utils::tui;

pub async fn run(settings: &Settings) -> Result<()> {
    let session = require_session(settings).await?;
    let data = tui::with_spinner("Loading dashboard", load_dashboard(session.client()))
        .await
        .map_err(api_error("Failed to load dashboard"))?;

    let catalog = data.catalog();
    let now = Utc::now();

    if let Some(user) = session.user() {
        println!("Welcome back, {}\n", user.display_name().bold());
    }

    println!("{}", "Task status".bold());
    println!("{}\n", task_stats(&data.todos, catalog).render());

    println!("{}", "To do".bold());
    let active = active_tasks(&data.todos, catalog, DASHBOARD_ACTIVE_LIMIT);
    if active.is_empty() {
        println!("   {}", "Nothing to do".dimmed());
    }
    for todo in active {
        println!("   {}", render_todo(todo, catalog, now));
    }

    println!("\n{}", "Completed".bold());
    let completed = completed_tasks(&data.todos, catalog, DASHBOARD_COMPLETED_LIMIT);
    if completed.is_empty() {
        println!("   {}", "No completed tasks yet".dimmed());
    }
    for todo in completed {
        println!("   {}", render_todo(todo, catalog, now));
    }

    Ok(())
}

pub async fn vital(settings: &Settings) -> Result<()> {
    let session = require_session(settings).await?;
    let data = tui::with_spinner("Loading tasks", load_dashboard(session.client()))
        .await
        .map_err(api_error("Failed to load tasks"))?;

    let catalog = data.catalog();
    let now = Utc::now();
    let vital = vital_tasks(&data.todos, catalog, now);

    if vital.is_empty() {
        println!("{}", "No vital tasks".dimmed());
        return Ok(());
    }

    println!("{}\n", vital_summary(&vital, catalog, now).render());
    for todo in vital {
        println!("{}", render_todo(todo, catalog, now));
    }

    Ok(())
}
