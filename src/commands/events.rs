use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Local, NaiveDateTime, NaiveTime, TimeZone, Utc};
use owo_colors::OwoColorize;
use taskdesk_core::Settings;
use taskdesk_core::model::EventDraft;

use super::{api_error, parse_date, parse_datetime, require_session};
use crate::render::Render;
use crate::utils::tui;

pub struct NewEvent {
    pub title: String,
    pub start: String,
    pub end: Option<String>,
    pub location: Option<String>,
    pub description: String,
    pub all_day: bool,
    pub reminder: bool,
}

pub async fn list(settings: &Settings, from: Option<String>) -> Result<()> {
    let session = require_session(settings).await?;
    let from = from.as_deref().map(parse_date).transpose()?;

    let mut events = tui::with_spinner("Loading events", session.client().events().list())
        .await
        .map_err(api_error("Failed to load events"))?;

    if let Some(from) = from {
        events.retain(|e| e.date() >= from);
    }
    events.sort_by_key(|e| e.start_datetime);

    if events.is_empty() {
        println!("{}", "No events".dimmed());
    }
    for event in &events {
        println!("{}", event.render());
    }

    Ok(())
}

/// Interpret a wall-clock time in the local timezone.
fn local_to_utc(dt: NaiveDateTime) -> Result<DateTime<Utc>> {
    Local
        .from_local_datetime(&dt)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .with_context(|| format!("{} does not exist in the local timezone", dt))
}

pub async fn add(settings: &Settings, new: NewEvent) -> Result<()> {
    let session = require_session(settings).await?;

    let (start, date_only) = parse_datetime(&new.start)?;
    let all_day = new.all_day || date_only;

    // All-day events are pinned to UTC midnight so they land on the right day.
    let start_datetime = if all_day {
        start.date().and_time(NaiveTime::MIN).and_utc()
    } else {
        local_to_utc(start)?
    };

    let end_datetime = match new.end.as_deref() {
        Some(end) => {
            let (end, _) = parse_datetime(end)?;
            if all_day { end.and_utc() } else { local_to_utc(end)? }
        }
        None if all_day => start_datetime,
        None => start_datetime + Duration::hours(1),
    };

    if end_datetime < start_datetime {
        anyhow::bail!("Event end must not be before its start");
    }

    let draft = EventDraft {
        title: new.title,
        description: new.description,
        start_datetime,
        end_datetime,
        location: new.location.unwrap_or_default(),
        reminder: new.reminder,
        is_all_day: all_day,
    };

    let created = tui::with_spinner("Creating event", session.client().events().create(&draft))
        .await
        .map_err(api_error("Failed to create event"))?;

    println!("Created {}", created.render());
    Ok(())
}

pub async fn delete(settings: &Settings, id: i64) -> Result<()> {
    let session = require_session(settings).await?;

    session
        .client()
        .events()
        .delete(id)
        .await
        .map_err(api_error("Failed to delete event"))?;

    println!("Deleted event #{}", id);
    Ok(())
}
