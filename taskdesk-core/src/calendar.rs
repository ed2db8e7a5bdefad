//! Month grid for the calendar view.
//!
//! The grid is always 42 cells (six Sunday-first weeks): leading days from
//! the previous month, every day of the target month, then trailing days
//! from the next month. Events and tasks are attached to cells by calendar
//! day (UTC), never by exact instant.

use std::collections::HashMap;

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::error::{TaskdeskError, TaskdeskResult};
use crate::model::{Event, Todo};

pub const GRID_CELLS: usize = 42;
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> TaskdeskResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| YearMonth { first })
            .ok_or_else(|| TaskdeskError::InvalidInput(format!("Invalid month {year}-{month:02}")))
    }

    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month() {
            4 | 6 | 9 | 11 => 30,
            2 if NaiveDate::from_ymd_opt(self.year(), 2, 29).is_some() => 29,
            2 => 28,
            _ => 31,
        }
    }

    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| YearMonth { first })
            .unwrap_or(*self)
    }

    pub fn prev(&self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| YearMonth { first })
            .unwrap_or(*self)
    }

    /// e.g. "March 2025"
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

/// One square of the month grid.
#[derive(Debug, Clone)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub events: Vec<&'a Event>,
    pub todos: Vec<&'a Todo>,
}

/// The events a cell has room for, plus how many were left out.
#[derive(Debug, Clone, PartialEq)]
pub struct CellPreview<'c, 'a> {
    pub shown: &'c [&'a Event],
    pub overflow: usize,
}

impl<'a> DayCell<'a> {
    pub fn has_items(&self) -> bool {
        !self.events.is_empty() || !self.todos.is_empty()
    }

    /// First `limit` events and the "+N more" count. The cell keeps all of
    /// its events.
    pub fn event_preview(&self, limit: usize) -> CellPreview<'_, 'a> {
        let shown = &self.events[..self.events.len().min(limit)];
        CellPreview {
            shown,
            overflow: self.events.len() - shown.len(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MonthGrid<'a> {
    pub month: YearMonth,
    pub cells: Vec<DayCell<'a>>,
}

impl<'a> MonthGrid<'a> {
    pub fn build(month: YearMonth, today: NaiveDate, events: &'a [Event], todos: &'a [Todo]) -> Self {
        let mut events_by_day: HashMap<NaiveDate, Vec<&'a Event>> = HashMap::new();
        for event in events {
            events_by_day.entry(event.date()).or_default().push(event);
        }

        let mut todos_by_day: HashMap<NaiveDate, Vec<&'a Todo>> = HashMap::new();
        for todo in todos {
            if let Some(due) = todo.due_date {
                todos_by_day.entry(due.date_naive()).or_default().push(todo);
            }
        }

        let offset = i64::from(month.first_day().weekday().num_days_from_sunday());
        let grid_start = month.first_day() - Duration::days(offset);

        let cells = (0..GRID_CELLS as i64)
            .filter_map(|i| grid_start.checked_add_signed(Duration::days(i)))
            .map(|date| DayCell {
                date,
                is_current_month: month.contains(date),
                is_today: date == today,
                events: events_by_day.remove(&date).unwrap_or_default(),
                todos: todos_by_day.remove(&date).unwrap_or_default(),
            })
            .collect();

        MonthGrid { month, cells }
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell<'a>]> + '_ {
        self.cells.chunks(7)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell<'a>> {
        self.cells.iter().find(|c| c.date == date)
    }
}

/// Shorten a title to `max_chars`, marking the cut with "...".
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        return title.to_string();
    }

    let mut short: String = title.chars().take(max_chars).collect();
    short.push_str("...");
    short
}

/// Stable colour index for an event.
pub fn color_slot(event_id: i64, palette_len: usize) -> usize {
    if palette_len == 0 {
        return 0;
    }
    event_id.rem_euclid(palette_len as i64) as usize
}
