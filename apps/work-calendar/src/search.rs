//! Date search.

use crate::calendar::days_in_month;
use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Years the calendar can show.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Please enter a valid year")]
    InvalidYear,
}

/// What the grid currently highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    Date(NaiveDate),
    /// Whole month, 1-12
    Month { year: i32, month: u32 },
}

impl Highlight {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            Self::None => false,
            Self::Date(d) => d == date,
            Self::Month { year, month } => date.year() == year && date.month() == month,
        }
    }

    /// Month (1-12) that should be scrolled into view.
    pub fn month(&self) -> Option<u32> {
        match *self {
            Self::None => None,
            Self::Date(d) => Some(d.month()),
            Self::Month { month, .. } => Some(month),
        }
    }
}

/// An optional numeric form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Empty,
    Number(i64),
    /// Filled in but not a number
    Invalid,
}

impl Field {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Self::Empty;
        }
        input.parse().map(Self::Number).unwrap_or(Self::Invalid)
    }

    fn is_filled(&self) -> bool {
        !matches!(self, Self::Empty)
    }
}

/// A parsed search form. Month is 1-based as typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchQuery {
    pub year: i32,
    pub month: Field,
    pub day: Field,
}

impl SearchQuery {
    /// Parse the three form fields. Only the year is mandatory.
    pub fn parse(year: &str, month: &str, day: &str) -> Result<Self, SearchError> {
        let year = match Field::parse(year) {
            Field::Number(y) if (MIN_YEAR as i64..=MAX_YEAR as i64).contains(&y) => y as i32,
            _ => return Err(SearchError::InvalidYear),
        };
        Ok(Self {
            year,
            month: Field::parse(month),
            day: Field::parse(day),
        })
    }

    /// What this query highlights once its year is shown.
    ///
    /// Month and day select one date; month alone selects the month. A day
    /// without a month, or values outside the calendar, select nothing.
    pub fn highlight(&self) -> Highlight {
        let month = match self.month {
            Field::Number(m) if (1..=12).contains(&m) => Some(m as u32),
            Field::Empty => return Highlight::None,
            _ => None,
        };
        let Some(month) = month else {
            return Highlight::None;
        };

        if self.day.is_filled() {
            match self.day {
                Field::Number(d) if d >= 1 && d <= days_in_month(self.year, month) as i64 => {
                    NaiveDate::from_ymd_opt(self.year, month, d as u32)
                        .map(Highlight::Date)
                        .unwrap_or_default()
                }
                _ => Highlight::None,
            }
        } else {
            Highlight::Month {
                year: self.year,
                month,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(y: &str, m: &str, d: &str) -> SearchQuery {
        SearchQuery::parse(y, m, d).unwrap()
    }

    #[test]
    fn test_year_required() {
        assert_eq!(SearchQuery::parse("", "1", "1"), Err(SearchError::InvalidYear));
        assert_eq!(SearchQuery::parse("abc", "", ""), Err(SearchError::InvalidYear));
        assert_eq!(SearchQuery::parse("0", "", ""), Err(SearchError::InvalidYear));
        assert_eq!(SearchQuery::parse("10000", "", ""), Err(SearchError::InvalidYear));
        assert_eq!(SearchError::InvalidYear.to_string(), "Please enter a valid year");
    }

    #[test]
    fn test_date_highlight() {
        let q = query("2024", "3", "8");
        let expected = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
        assert_eq!(q.highlight(), Highlight::Date(expected));
        assert!(q.highlight().contains(expected));
        assert_eq!(q.highlight().month(), Some(3));
    }

    #[test]
    fn test_month_highlight() {
        let h = query(" 2024 ", "12", "").highlight();
        assert_eq!(h, Highlight::Month { year: 2024, month: 12 });
        assert!(h.contains(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
        assert!(!h.contains(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()));
    }

    #[test]
    fn test_nothing_highlighted() {
        assert_eq!(query("2024", "", "").highlight(), Highlight::None);
        assert_eq!(query("2024", "", "5").highlight(), Highlight::None);
        assert_eq!(query("2024", "13", "").highlight(), Highlight::None);
        assert_eq!(query("2024", "0", "1").highlight(), Highlight::None);
        assert_eq!(query("2023", "2", "29").highlight(), Highlight::None);
        assert_eq!(query("2024", "2", "x").highlight(), Highlight::None);
        assert_eq!(query("2024", "x", "").highlight(), Highlight::None);
    }

    #[test]
    fn test_leap_day() {
        let h = query("2024", "2", "29").highlight();
        assert_eq!(h, Highlight::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
    }
}
