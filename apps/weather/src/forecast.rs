//! Daily reduction of the 3-hour forecast feed.

use crate::models::{ForecastDay, ForecastPoint};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;

/// Days returned by [`pick_daily_forecast`].
pub const FORECAST_DAYS: usize = 5;

/// Collapse samples into one entry per UTC date.
///
/// Each date is represented by the sample closest to noon and carries the
/// date-wide high and low. On a tie the sample that came first in `points`
/// wins, whatever its time of day. Dates come out ascending, at most
/// [`FORECAST_DAYS`] of them. Samples without a usable timestamp are skipped.
pub fn pick_daily_forecast(points: &[ForecastPoint]) -> Vec<ForecastDay> {
    let mut by_date: BTreeMap<NaiveDate, Vec<(NaiveDateTime, &ForecastPoint)>> = BTreeMap::new();
    for point in points {
        match point.timestamp() {
            Some(ts) => by_date.entry(ts.date()).or_default().push((ts, point)),
            None => tracing::warn!(dt = ?point.dt, dt_txt = ?point.dt_txt, "skipping forecast point without timestamp"),
        }
    }

    by_date
        .into_iter()
        .take(FORECAST_DAYS)
        .filter_map(|(date, samples)| summarize(date, &samples))
        .collect()
}

fn summarize(date: NaiveDate, samples: &[(NaiveDateTime, &ForecastPoint)]) -> Option<ForecastDay> {
    let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0)?);

    let mut best = samples.first()?;
    let mut best_diff = (best.0 - noon).abs();
    for sample in &samples[1..] {
        let diff = (sample.0 - noon).abs();
        if diff < best_diff {
            best = sample;
            best_diff = diff;
        }
    }

    let high = samples
        .iter()
        .map(|(_, p)| p.main.temp_max)
        .fold(f64::NEG_INFINITY, f64::max);
    let low = samples
        .iter()
        .map(|(_, p)| p.main.temp_min)
        .fold(f64::INFINITY, f64::min);

    let (timestamp, point) = *best;
    let condition = point.condition();
    Some(ForecastDay {
        date,
        timestamp,
        icon: condition.map(|c| c.icon.clone()).filter(|icon| !icon.is_empty()),
        description: condition.map(|c| c.description.clone()).unwrap_or_default(),
        high,
        low,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, PointReadings};
    use proptest::prelude::*;

    fn point(dt_txt: &str, min: f64, max: f64, description: &str) -> ForecastPoint {
        ForecastPoint {
            dt: None,
            dt_txt: Some(dt_txt.to_string()),
            main: PointReadings { temp_min: min, temp_max: max },
            weather: vec![Condition {
                description: description.to_string(),
                icon: "01d".to_string(),
            }],
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(pick_daily_forecast(&[]).is_empty());
    }

    #[test]
    fn test_one_date_collapses() {
        let points: Vec<ForecastPoint> = (0..8)
            .map(|i| {
                let t = i as f64;
                point(&format!("2024-03-01 {:02}:00:00", i * 3), t - 1.0, t + 10.0, &format!("slot {}", i))
            })
            .collect();
        let days = pick_daily_forecast(&points);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].high, 17.0);
        assert_eq!(days[0].low, -1.0);
        assert_eq!(days[0].description, "slot 4");
        assert_eq!(days[0].timestamp.to_string(), "2024-03-01 12:00:00");
    }

    #[test]
    fn test_tie_keeps_first() {
        let points = vec![
            point("2024-03-01 09:00:00", 0.0, 1.0, "morning"),
            point("2024-03-01 15:00:00", 0.0, 1.0, "afternoon"),
        ];
        assert_eq!(pick_daily_forecast(&points)[0].description, "morning");
    }

    #[test]
    fn test_tie_follows_input_order() {
        let points = vec![
            point("2024-03-01 15:00:00", 0.0, 1.0, "afternoon"),
            point("2024-03-01 09:00:00", 0.0, 1.0, "morning"),
        ];
        let days = pick_daily_forecast(&points);
        assert_eq!(days[0].description, "afternoon");
        assert_eq!(days[0].timestamp.to_string(), "2024-03-01 15:00:00");
    }

    #[test]
    fn test_six_dates_truncated_and_sorted() {
        let points: Vec<ForecastPoint> = (1..=6)
            .rev()
            .map(|d| point(&format!("2024-03-{:02} 12:00:00", d), 0.0, d as f64, "x"))
            .collect();
        let days = pick_daily_forecast(&points);
        let dates: Vec<String> = days.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(
            dates,
            ["2024-03-01", "2024-03-02", "2024-03-03", "2024-03-04", "2024-03-05"]
        );
    }

    #[test]
    fn test_points_without_timestamp_skipped() {
        let broken = point("not a date", 0.0, 1.0, "x");
        let days = pick_daily_forecast(&[broken, point("2024-03-02 12:00:00", 0.0, 1.0, "ok")]);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].description, "ok");
    }

    #[test]
    fn test_missing_condition() {
        let mut p = point("2024-03-02 12:00:00", 0.0, 1.0, "x");
        p.weather.clear();
        let days = pick_daily_forecast(&[p]);
        assert_eq!(days[0].icon, None);
        assert_eq!(days[0].description, "");
    }

    proptest! {
        #[test]
        fn prop_days_sorted_bounded(samples in prop::collection::vec((0u32..10, 0u32..8, -40i32..40, 0i32..15), 0..60)) {
            let points: Vec<ForecastPoint> = samples
                .iter()
                .map(|(day, slot, low, spread)| {
                    point(
                        &format!("2024-05-{:02} {:02}:00:00", day + 1, slot * 3),
                        *low as f64,
                        (*low + *spread) as f64,
                        "p",
                    )
                })
                .collect();
            let days = pick_daily_forecast(&points);
            prop_assert!(days.len() <= FORECAST_DAYS);
            prop_assert!(days.windows(2).all(|w| w[0].date < w[1].date));
            for day in &days {
                prop_assert!(day.high >= day.low);
                prop_assert_eq!(day.timestamp.date(), day.date);
            }
        }
    }
}
