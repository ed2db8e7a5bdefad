//! Terminal rendering for taskdesk types.
//!
//! Extension traits and helpers that add colored output to taskdesk-core
//! types using owo_colors.

use chrono::{DateTime, Local, Utc};
use owo_colors::{AnsiColors, OwoColorize};
use taskdesk_core::calendar::{DayCell, MonthGrid, WEEKDAY_LABELS, color_slot, truncate_title};
use taskdesk_core::model::{Category, Event, Todo, User};
use taskdesk_core::views::{Catalog, PriorityBucket, StatusBucket, TaskStats, VitalSummary};

use crate::utils::tui::pluralize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for User {
    fn render(&self) -> String {
        let mut line = format!("{} <{}>", self.display_name().bold(), self.email);
        if let Some(position) = self.position.as_deref().filter(|p| !p.is_empty()) {
            line.push_str(&format!(" {}", position.dimmed()));
        }
        if self.is_admin {
            line.push_str(&format!(" {}", "admin".yellow()));
        }
        line
    }
}

impl Render for Category {
    fn render(&self) -> String {
        format!("{} {}", format!("#{:<4}", self.id).dimmed(), self.name)
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let when = if self.is_all_day {
            // All-day events sit on their UTC calendar day.
            format!("{} (all day)", self.start_datetime.format("%a %b %-d"))
        } else {
            let start = self.start_datetime.with_timezone(&Local);
            match self.end_datetime {
                Some(end) => format!(
                    "{} - {}",
                    start.format("%a %b %-d %H:%M"),
                    end.with_timezone(&Local).format("%H:%M")
                ),
                None => start.format("%a %b %-d %H:%M").to_string(),
            }
        };

        let mut line = format!(
            "{} {} {}",
            format!("#{:<4}", self.id).dimmed(),
            self.title.color(event_color(self.id)),
            when.dimmed()
        );
        if let Some(location) = self.location.as_deref().filter(|l| !l.is_empty()) {
            line.push_str(&format!(" @ {}", location));
        }
        if self.reminder {
            line.push_str(" (reminder)");
        }
        line
    }
}

impl Render for TaskStats {
    fn render(&self) -> String {
        [
            format!("{} {:>3}%", "Completed  ".green(), self.completed),
            format!("{} {:>3}%", "In progress".blue(), self.in_progress),
            format!("{} {:>3}%", "Not started".red(), self.not_started),
        ]
        .join("\n")
    }
}

impl Render for VitalSummary {
    fn render(&self) -> String {
        format!(
            "{} vital {} ({} overdue, {} high priority)",
            self.total,
            pluralize("task", self.total),
            self.overdue.to_string().red(),
            self.high_priority.to_string().yellow()
        )
    }
}

/// One task per line: id, title, status, priority and due date.
pub fn render_todo(todo: &Todo, catalog: Catalog<'_>, now: DateTime<Utc>) -> String {
    let status = catalog.status_name(todo);
    let status = match StatusBucket::classify(status) {
        Some(StatusBucket::Completed) => status.green().to_string(),
        Some(StatusBucket::InProgress) => status.blue().to_string(),
        Some(StatusBucket::NotStarted) => status.red().to_string(),
        None => status.dimmed().to_string(),
    };

    let priority = catalog.priority_name(todo);
    let priority = match PriorityBucket::class_for(priority) {
        PriorityBucket::High => priority.red().to_string(),
        PriorityBucket::Medium => priority.yellow().to_string(),
        PriorityBucket::Low => priority.green().to_string(),
    };

    let title = if catalog.is_completed(todo) {
        todo.title.strikethrough().to_string()
    } else {
        todo.title.bold().to_string()
    };

    let mut line = format!(
        "{} {}  [{}] [{}]",
        format!("#{:<4}", todo.id).dimmed(),
        title,
        status,
        priority
    );

    if let Some(due) = todo.due_date {
        let label = format!("due {}", due.format("%Y-%m-%d"));
        if todo.is_overdue(now) && !catalog.is_completed(todo) {
            line.push_str(&format!("  {}", format!("{} (overdue)", label).red()));
        } else {
            line.push_str(&format!("  {}", label.dimmed()));
        }
    }

    line
}

const EVENT_PALETTE: [AnsiColors; 6] = [
    AnsiColors::Blue,
    AnsiColors::Green,
    AnsiColors::Magenta,
    AnsiColors::Cyan,
    AnsiColors::Yellow,
    AnsiColors::Red,
];

fn event_color(event_id: i64) -> AnsiColors {
    EVENT_PALETTE[color_slot(event_id, EVENT_PALETTE.len())]
}

const CELL_WIDTH: usize = 14;

/// Plain text of one cell line, plus how to color it once padded.
enum CellLine<'a> {
    Day(&'a DayCell<'a>),
    Event(i64, String),
    More(usize),
    Todos(usize),
    Blank,
}

impl CellLine<'_> {
    fn render(&self) -> String {
        match self {
            CellLine::Day(cell) => {
                let text = pad(&cell.date.format("%-d").to_string());
                if cell.is_today {
                    text.reversed().bold().to_string()
                } else if !cell.is_current_month {
                    text.dimmed().to_string()
                } else {
                    text.bold().to_string()
                }
            }
            CellLine::Event(id, title) => pad(title).color(event_color(*id)).to_string(),
            CellLine::More(n) => pad(&format!("+{} more", n)).dimmed().to_string(),
            CellLine::Todos(n) => pad(&format!("* {} due", n)).yellow().to_string(),
            CellLine::Blank => pad(""),
        }
    }
}

fn pad(text: &str) -> String {
    format!("{:<width$}", text, width = CELL_WIDTH)
}

fn cell_lines<'a>(cell: &'a DayCell<'a>, events_per_cell: usize) -> Vec<CellLine<'a>> {
    let mut lines = vec![CellLine::Day(cell)];
    let preview = cell.event_preview(events_per_cell);

    lines.extend(
        preview
            .shown
            .iter()
            .map(|e| CellLine::Event(e.id, truncate_title(&e.title, CELL_WIDTH - 4))),
    );
    if preview.overflow > 0 {
        lines.push(CellLine::More(preview.overflow));
    }
    if !cell.todos.is_empty() {
        lines.push(CellLine::Todos(cell.todos.len()));
    }
    lines
}

/// The month as a Sunday-first table, one row of cells per week.
pub fn render_month(grid: &MonthGrid<'_>, events_per_cell: usize) -> String {
    let mut out = Vec::new();

    out.push(format!("{}", grid.month.title().bold()));
    out.push(
        WEEKDAY_LABELS
            .iter()
            .map(|label| pad(label).dimmed().to_string())
            .collect::<Vec<_>>()
            .join(" "),
    );

    for week in grid.weeks() {
        let columns: Vec<Vec<CellLine<'_>>> =
            week.iter().map(|cell| cell_lines(cell, events_per_cell)).collect();
        let height = columns.iter().map(Vec::len).max().unwrap_or(1);

        for row in 0..height {
            let line: Vec<String> = columns
                .iter()
                .map(|lines| lines.get(row).unwrap_or(&CellLine::Blank).render())
                .collect();
            out.push(line.join(" "));
        }
        out.push(String::new());
    }

    out.join("\n")
}
