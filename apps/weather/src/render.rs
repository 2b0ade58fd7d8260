//! Formatting a report into display strings.

use crate::models::{CurrentWeather, ForecastDay, Units};

/// A formatted report, ready to lay out.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherView {
    /// `City, CC`
    pub title: String,
    pub subtitle: String,
    /// `Day` or `Night`
    pub badge: &'static str,
    pub icon: &'static str,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub pressure: String,
    pub forecast: Vec<ForecastCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub weekday: String,
    pub date: String,
    pub icon: &'static str,
    pub high: String,
    pub low: String,
    pub description: String,
}

pub fn render(current: &CurrentWeather, days: &[ForecastDay], units: Units) -> WeatherView {
    let unit = units.temperature_label();
    let condition = current.condition();
    let description = condition
        .map(|c| c.description.as_str())
        .filter(|d| !d.is_empty())
        .unwrap_or("—");
    let icon = condition
        .map(|c| c.icon.as_str())
        .filter(|i| !i.is_empty())
        .unwrap_or("01d");

    let mut title = escape_text(&current.name);
    if let Some(country) = current.sys.country.as_deref().filter(|c| !c.is_empty()) {
        title.push_str(", ");
        title.push_str(&escape_text(country));
    }

    WeatherView {
        title,
        subtitle: format!("Updated now • {}", escape_text(description)),
        badge: if is_daytime(icon) { "Day" } else { "Night" },
        icon: icon_glyph(icon),
        temperature: format!("{}{}", round_half_up(current.main.temp), unit),
        feels_like: format!("{}{}", round_half_up(current.main.feels_like), unit),
        humidity: format!("{}%", current.main.humidity),
        wind: format!("{} {}", current.wind.speed, units.wind_label()),
        pressure: format!("{} hPa", current.main.pressure),
        forecast: days.iter().map(|day| forecast_card(day, unit)).collect(),
    }
}

fn forecast_card(day: &ForecastDay, unit: &str) -> ForecastCard {
    ForecastCard {
        weekday: day.timestamp.format("%a").to_string(),
        date: day.timestamp.format("%b %-d").to_string(),
        icon: day.icon.as_deref().map(icon_glyph).unwrap_or(" "),
        high: format!("{}{}", round_half_up(day.high), unit),
        low: format!("{}{}", round_half_up(day.low), unit),
        description: escape_text(&day.description),
    }
}

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Replace control characters so provider text cannot drive the terminal.
pub fn escape_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { char::REPLACEMENT_CHARACTER } else { c })
        .collect()
}

/// Icon codes end in `d` by day and `n` by night.
pub fn is_daytime(icon: &str) -> bool {
    icon.ends_with('d')
}

/// A one-cell stand-in for the provider's icon image.
pub fn icon_glyph(icon: &str) -> &'static str {
    match icon.get(..2) {
        Some("01") if is_daytime(icon) => "☀",
        Some("01") => "☾",
        Some("02") => "⛅",
        Some("03") | Some("04") => "☁",
        Some("09") | Some("10") => "☂",
        Some("11") => "⚡",
        Some("13") => "❄",
        Some("50") => "≡",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{forecast_json, CURRENT_JSON};
    use crate::forecast::pick_daily_forecast;
    use crate::models::ForecastResponse;

    fn sample(units: Units) -> WeatherView {
        let current: CurrentWeather = serde_json::from_str(CURRENT_JSON).unwrap();
        let forecast: ForecastResponse = serde_json::from_str(&forecast_json()).unwrap();
        render(&current, &pick_daily_forecast(&forecast.list), units)
    }

    #[test]
    fn test_current_block() {
        let view = sample(Units::Metric);
        assert_eq!(view.title, "London, GB");
        assert_eq!(view.subtitle, "Updated now • light rain");
        assert_eq!(view.badge, "Day");
        assert_eq!(view.icon, "☂");
        assert_eq!(view.temperature, "13°C");
        assert_eq!(view.feels_like, "11°C");
        assert_eq!(view.humidity, "81%");
        assert_eq!(view.wind, "4.12 m/s");
        assert_eq!(view.pressure, "1012 hPa");
    }

    #[test]
    fn test_forecast_cards() {
        let view = sample(Units::Imperial);
        let lines: Vec<String> = view
            .forecast
            .iter()
            .map(|c| format!("{} {} {} {} {} {}", c.weekday, c.date, c.icon, c.high, c.low, c.description))
            .collect();
        insta::assert_snapshot!(lines.join("\n"), @r"
        Fri Mar 1 ☀ 8°F -2°F day 1 at 12
        Sat Mar 2 ☀ 9°F -1°F day 2 at 12
        Sun Mar 3 ☀ 10°F 0°F day 3 at 12
        Mon Mar 4 ☀ 11°F 1°F day 4 at 12
        Tue Mar 5 ☀ 12°F 2°F day 5 at 12
        ");
    }

    #[test]
    fn test_night_and_missing_fields() {
        let current: CurrentWeather = serde_json::from_str(
            r#"{"name": "Reykjavik", "sys": {"country": ""}, "main": {"temp": -0.5, "feels_like": -3.5, "humidity": 90, "pressure": 998}, "wind": {"speed": 7}, "weather": [{"description": "", "icon": "01n"}]}"#,
        )
        .unwrap();
        let view = render(&current, &[], Units::Metric);
        assert_eq!(view.title, "Reykjavik");
        assert_eq!(view.subtitle, "Updated now • —");
        assert_eq!(view.badge, "Night");
        assert_eq!(view.icon, "☾");
        assert_eq!(view.temperature, "0°C");
        assert_eq!(view.feels_like, "-3°C");
        assert_eq!(view.wind, "7 m/s");
        assert!(view.forecast.is_empty());
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("Paris"), "Paris");
        assert_eq!(escape_text("a\x1b[2Jb"), "a\u{fffd}[2Jb");
        assert_eq!(escape_text("<b>&</b>"), "<b>&</b>");
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(11.49), 11);
    }

    #[test]
    fn test_icon_glyphs() {
        assert_eq!(icon_glyph("04n"), "☁");
        assert_eq!(icon_glyph("13d"), "❄");
        assert_eq!(icon_glyph(""), "?");
    }
}
