//! Day classification and yearly statistics.
//!
//! The holiday and shortened-day tables are fixed month/day lists that apply
//! to every year. Transfers of days off between years are not modelled.

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeMap;

/// Public holidays, keyed by `MM-DD`.
const HOLIDAYS: [(&str, &str); 14] = [
    ("01-01", "New Year"),
    ("01-02", "New Year Holidays"),
    ("01-03", "New Year Holidays"),
    ("01-04", "New Year Holidays"),
    ("01-05", "New Year Holidays"),
    ("01-06", "New Year Holidays"),
    ("01-07", "Orthodox Christmas"),
    ("01-08", "New Year Holidays"),
    ("02-23", "Defender of the Fatherland Day"),
    ("03-08", "International Women's Day"),
    ("05-01", "Spring and Labour Day"),
    ("05-09", "Victory Day"),
    ("06-12", "Russia Day"),
    ("11-04", "Unity Day"),
];

/// Pre-holiday days with a shortened working day.
const SHORT_DAYS: [&str; 7] = ["02-22", "03-07", "04-30", "05-08", "06-11", "11-03", "12-31"];

/// Classification of a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayKind {
    Holiday,
    ShortDay,
    Weekend,
    Workday,
}

impl DayKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Holiday => "Holiday",
            Self::ShortDay => "Short day",
            Self::Weekend => "Weekend",
            Self::Workday => "Workday",
        }
    }

    /// Whether the day counts as a working day in the statistics.
    pub fn is_working(&self) -> bool {
        matches!(self, Self::ShortDay | Self::Workday)
    }
}

/// A date with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub kind: DayKind,
    /// Holiday name, set only for holidays
    pub holiday: Option<&'static str>,
}

/// Day counts for one year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearStats {
    pub total_days: u32,
    pub work_days: u32,
    pub weekend_days: u32,
    pub holiday_days: u32,
}

/// The holiday table as `MM-DD` -> name. Identical for every year.
pub fn holidays(_year: i32) -> BTreeMap<&'static str, &'static str> {
    HOLIDAYS.iter().copied().collect()
}

/// The shortened-day table as `MM-DD` keys. Identical for every year.
pub fn short_days(_year: i32) -> &'static [&'static str] {
    &SHORT_DAYS
}

/// `MM-DD` key of a date.
pub fn month_day_key(date: NaiveDate) -> String {
    date.format("%m-%d").to_string()
}

pub fn holiday_name(date: NaiveDate) -> Option<&'static str> {
    let key = month_day_key(date);
    HOLIDAYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, name)| *name)
}

pub fn is_short_day(date: NaiveDate) -> bool {
    let key = month_day_key(date);
    SHORT_DAYS.contains(&key.as_str())
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Classify a date: holiday, then short day, then weekend, else workday.
pub fn classify(date: NaiveDate) -> CalendarDay {
    let holiday = holiday_name(date);
    let kind = if holiday.is_some() {
        DayKind::Holiday
    } else if is_short_day(date) {
        DayKind::ShortDay
    } else if is_weekend(date) {
        DayKind::Weekend
    } else {
        DayKind::Workday
    };
    CalendarDay {
        date,
        kind,
        holiday,
    }
}

/// Number of days in `month` (1-12), 0 for an invalid month or year.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    (28..=31)
        .rev()
        .find(|&day| NaiveDate::from_ymd_opt(year, month, day).is_some())
        .unwrap_or(0)
}

/// Every date of `year`, in order.
pub fn dates_of_year(year: i32) -> impl Iterator<Item = NaiveDate> {
    (1..=12u32).flat_map(move |month| {
        (1..=days_in_month(year, month)).filter_map(move |day| NaiveDate::from_ymd_opt(year, month, day))
    })
}

/// Count the days of `year` by kind. Short days count as work days.
pub fn compute_stats(year: i32) -> YearStats {
    let mut stats = YearStats::default();
    for date in dates_of_year(year) {
        stats.total_days += 1;
        match classify(date).kind {
            DayKind::Holiday => stats.holiday_days += 1,
            DayKind::Weekend => stats.weekend_days += 1,
            DayKind::ShortDay | DayKind::Workday => stats.work_days += 1,
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_year_is_holiday() {
        let day = classify(date(2024, 1, 1));
        assert_eq!(day.kind, DayKind::Holiday);
        assert_eq!(day.holiday, Some("New Year"));
    }

    #[test]
    fn test_saturday_is_weekend() {
        let day = classify(date(2024, 2, 24));
        assert_eq!(day.kind, DayKind::Weekend);
        assert_eq!(day.holiday, None);
    }

    #[test]
    fn test_priority() {
        // 2024-01-06 is a Saturday inside the New Year break
        assert_eq!(classify(date(2024, 1, 6)).kind, DayKind::Holiday);
        // 2025-02-22 is a Saturday and a pre-holiday day
        assert_eq!(classify(date(2025, 2, 22)).kind, DayKind::ShortDay);
        assert_eq!(classify(date(2024, 2, 22)).kind, DayKind::ShortDay);
        assert_eq!(classify(date(2024, 2, 21)).kind, DayKind::Workday);
        assert_eq!(classify(date(2024, 1, 7)).holiday, Some("Orthodox Christmas"));
    }

    #[test]
    fn test_tables() {
        let table = holidays(2024);
        assert_eq!(table.len(), 14);
        assert_eq!(table.get("11-04"), Some(&"Unity Day"));
        assert_eq!(table.get("01-08"), Some(&"New Year Holidays"));
        assert_eq!(holidays(1999), table);
        assert!(short_days(2024).contains(&"12-31"));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2023, 13), 0);
        assert_eq!(days_in_month(2023, 0), 0);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn test_stats_2024() {
        insta::assert_debug_snapshot!(compute_stats(2024), @r"
        YearStats {
            total_days: 366,
            work_days: 251,
            weekend_days: 101,
            holiday_days: 14,
        }
        ");
    }

    #[test]
    fn test_stats_common_year() {
        let stats = compute_stats(2023);
        assert_eq!(stats.total_days, 365);
        assert_eq!(stats.work_days, 253);
        assert_eq!(stats.weekend_days, 98);
    }

    proptest! {
        #[test]
        fn stats_partition_the_year(year in 1i32..=9999) {
            let stats = compute_stats(year);
            prop_assert_eq!(stats.work_days + stats.weekend_days + stats.holiday_days, stats.total_days);
            let leap = NaiveDate::from_ymd_opt(year, 2, 29).is_some();
            prop_assert_eq!(stats.total_days, if leap { 366 } else { 365 });
            prop_assert_eq!(stats.holiday_days, 14);
        }

        #[test]
        fn classification_is_exclusive(ordinal in 0i64..3_000_000) {
            let day = date(1, 1, 1) + chrono::Duration::days(ordinal);
            let classified = classify(day);
            prop_assert_eq!(classified.holiday.is_some(), classified.kind == DayKind::Holiday);
            if classified.kind == DayKind::Weekend {
                prop_assert!(is_weekend(day));
            }
        }
    }
}
