use anyhow::{Context, Result};
use chrono::Utc;
use owo_colors::OwoColorize;
use taskdesk_core::Settings;
use taskdesk_core::batch::load_calendar;
use taskdesk_core::calendar::{MonthGrid, YearMonth};

use super::{api_error, require_session};
use crate::render::render_month;
use crate::utils::tui::{self, pluralize};

/// Parse "YYYY-MM".
fn parse_month(input: &str) -> Result<YearMonth> {
    let (year, month) = input
        .trim()
        .split_once('-')
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", input))?;

    let year: i32 = year
        .parse()
        .with_context(|| format!("Invalid year in '{}'", input))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("Invalid month in '{}'", input))?;

    Ok(YearMonth::new(year, month)?)
}

pub async fn run(settings: &Settings, month: Option<String>) -> Result<()> {
    let today = Utc::now().date_naive();
    let month = match month.as_deref() {
        Some(input) => parse_month(input)?,
        None => YearMonth::of(today),
    };

    let session = require_session(settings).await?;
    let data = tui::with_spinner("Loading calendar", load_calendar(session.client()))
        .await
        .map_err(api_error("Failed to load calendar"))?;

    let grid = MonthGrid::build(month, today, &data.events, &data.todos);
    println!("{}", render_month(&grid, settings.calendar_events_per_cell));

    let in_month = grid
        .cells
        .iter()
        .filter(|c| c.is_current_month)
        .map(|c| c.events.len())
        .sum::<usize>();
    println!(
        "{}",
        format!(
            "{} {} in {}",
            in_month,
            pluralize("event", in_month),
            month.title()
        )
        .dimmed()
    );
    println!(
        "{}",
        format!("Previous: {}  Next: {}", label(month.prev()), label(month.next())).dimmed()
    );

    Ok(())
}

fn label(month: YearMonth) -> String {
    format!("taskdesk calendar -m {}-{:02}", month.year(), month.month())
}
