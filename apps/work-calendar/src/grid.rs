//! Month grid layout.

use crate::calendar::{classify, days_in_month, CalendarDay};
use chrono::{Datelike, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

pub const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One month laid out in Monday-first weeks.
///
/// `cells` holds `leading_blanks` empty cells, then one cell per day, then
/// enough trailing blanks to complete the last week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    /// 1-12
    pub month: u32,
    pub name: &'static str,
    pub leading_blanks: usize,
    pub cells: Vec<Option<CalendarDay>>,
}

impl MonthGrid {
    /// Rows of seven cells.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<CalendarDay>]> {
        self.cells.chunks(7)
    }

    pub fn week_count(&self) -> usize {
        self.cells.len() / 7
    }

    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.cells.iter().flatten()
    }

    pub fn day(&self, day: u32) -> Option<&CalendarDay> {
        self.days().find(|d| d.date.day() == day)
    }
}

/// Lay out month `month_index` (0 = January) of `year`.
pub fn render_month(year: i32, month_index: usize) -> Option<MonthGrid> {
    let name = *MONTH_NAMES.get(month_index)?;
    let month = month_index as u32 + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let leading_blanks = first.weekday().num_days_from_monday() as usize;

    let mut cells: Vec<Option<CalendarDay>> = vec![None; leading_blanks];
    cells.extend(
        (1..=days_in_month(year, month))
            .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
            .map(|date| Some(classify(date))),
    );
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    Some(MonthGrid {
        year,
        month,
        name,
        leading_blanks,
        cells,
    })
}

/// Lay out all twelve months of `year`.
pub fn render_calendar(year: i32) -> Vec<MonthGrid> {
    (0..12).filter_map(|m| render_month(year, m)).collect()
}
