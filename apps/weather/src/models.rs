//! OpenWeather response shapes and derived types.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Measurement system passed to the provider as `units`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    pub fn temperature_label(&self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }

    pub fn wind_label(&self) -> &'static str {
        match self {
            Self::Metric => "m/s",
            Self::Imperial => "mph",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Metric => Self::Imperial,
            Self::Imperial => Self::Metric,
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" => Ok(Self::Metric),
            "imperial" => Ok(Self::Imperial),
            other => Err(format!("unknown units: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub pressure: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: Option<String>,
}

/// Body of `/data/2.5/weather`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentWeather {
    pub name: String,
    #[serde(default)]
    pub sys: Sys,
    pub main: CurrentReadings,
    pub wind: Wind,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

impl CurrentWeather {
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PointReadings {
    pub temp_min: f64,
    pub temp_max: f64,
}

/// One 3-hour sample of the forecast feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastPoint {
    /// Epoch seconds
    #[serde(default)]
    pub dt: Option<i64>,
    /// `YYYY-MM-DD HH:MM:SS`, UTC
    #[serde(default)]
    pub dt_txt: Option<String>,
    pub main: PointReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

impl ForecastPoint {
    /// Sample time in UTC, from `dt_txt` or else `dt`.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.dt_txt
            .as_deref()
            .and_then(|s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok())
            .or_else(|| {
                self.dt
                    .and_then(|secs| DateTime::from_timestamp(secs, 0))
                    .map(|t| t.naive_utc())
            })
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

/// Body of `/data/2.5/forecast`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastPoint>,
}

/// One calendar date of the forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    /// Time of the representative sample
    pub timestamp: NaiveDateTime,
    pub icon: Option<String>,
    pub description: String,
    pub high: f64,
    pub low: f64,
}

/// Everything one successful lookup produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub current: CurrentWeather,
    pub days: Vec<ForecastDay>,
    pub units: Units,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_prefers_dt_txt() {
        let point: ForecastPoint = serde_json::from_str(
            r#"{"dt": 0, "dt_txt": "2024-03-01 15:00:00", "main": {"temp_min": 1.0, "temp_max": 2.0}}"#,
        )
        .unwrap();
        assert_eq!(point.timestamp().unwrap().to_string(), "2024-03-01 15:00:00");
    }

    #[test]
    fn test_timestamp_falls_back_to_dt() {
        let point: ForecastPoint =
            serde_json::from_str(r#"{"dt": 1709305200, "main": {"temp_min": 1.0, "temp_max": 2.0}}"#).unwrap();
        assert_eq!(point.timestamp().unwrap().to_string(), "2024-03-01 15:00:00");
    }

    #[test]
    fn test_current_without_optional_fields() {
        let current: CurrentWeather = serde_json::from_str(
            r#"{"name": "Oslo", "main": {"temp": 1.5, "feels_like": -2.0, "humidity": 80, "pressure": 1012}, "wind": {"speed": 3.1}}"#,
        )
        .unwrap();
        assert_eq!(current.sys.country, None);
        assert!(current.condition().is_none());
        assert_eq!(current.main.humidity, 80.0);
    }

    #[test]
    fn test_units() {
        assert_eq!("Imperial".parse::<Units>().unwrap(), Units::Imperial);
        assert!("kelvin".parse::<Units>().is_err());
        assert_eq!(Units::Metric.toggled().wind_label(), "mph");
        assert_eq!(Units::Metric.to_string(), "metric");
    }
}
