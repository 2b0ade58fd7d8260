//! OpenWeather HTTP client.

use crate::forecast::pick_daily_forecast;
use crate::models::{CurrentWeather, ForecastResponse, Report, Units};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Please enter a city name.")]
    EmptyCity,

    #[error("Missing API key. Set api_key in config.toml or OPENWEATHER_API_KEY.")]
    MissingApiKey,

    /// Non-success status, with the provider's message when it sent one
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Request timed out after {}", timeout_label(.0))]
    Timeout(Duration),

    #[error("Request was cancelled")]
    Cancelled,
}

pub type WeatherResult<T> = Result<T, WeatherError>;

/// `10 s`, `2.5 s` or `200 ms`.
fn timeout_label(timeout: &Duration) -> String {
    if timeout.as_millis() < 1_000 {
        format!("{} ms", timeout.as_millis())
    } else if timeout.subsec_millis() == 0 {
        format!("{} s", timeout.as_secs())
    } else {
        format!("{:.1} s", timeout.as_secs_f64())
    }
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl WeatherClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> WeatherResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("weather-widget/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(WeatherError::Network)?;
        Ok(Self::with_http(http, base_url, api_key, timeout))
    }

    pub fn with_http(http: reqwest::Client, base_url: &str, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Input checks done before any request goes out.
    pub fn check(&self, city: &str) -> WeatherResult<()> {
        if city.trim().is_empty() {
            return Err(WeatherError::EmptyCity);
        }
        if self.api_key.is_none() {
            return Err(WeatherError::MissingApiKey);
        }
        Ok(())
    }

    /// Fetch current conditions and the forecast together.
    ///
    /// Both requests run concurrently and both must succeed; the first
    /// failure drops the other. The pair is bounded by the client timeout.
    pub async fn fetch_current_and_forecast(&self, city: &str, units: Units) -> WeatherResult<Report> {
        self.check(city)?;
        let city = city.trim();

        let both = async {
            tokio::try_join!(
                self.get_json::<CurrentWeather>("weather", city, units),
                self.get_json::<ForecastResponse>("forecast", city, units),
            )
        };
        let (current, forecast) = tokio::time::timeout(self.timeout, both)
            .await
            .map_err(|_| WeatherError::Timeout(self.timeout))??;

        let days = pick_daily_forecast(&forecast.list);
        tracing::debug!(city, points = forecast.list.len(), days = days.len(), "forecast reduced");
        Ok(Report { current, days, units })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, city: &str, units: Units) -> WeatherResult<T> {
        let url = format!("{}/data/2.5/{}", self.base_url, endpoint);
        let api_key = self.api_key.as_deref().unwrap_or_default();

        let response = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", api_key), ("units", units.as_str())])
            .send()
            .await
            .map_err(WeatherError::Network)?;

        let status = response.status();
        let body = response.text().await.map_err(WeatherError::Network)?;
        if !status.is_success() {
            let message = provider_message(&body)
                .unwrap_or_else(|| format!("Request failed ({})", status.as_u16()));
            tracing::warn!(endpoint, status = status.as_u16(), %message, "provider returned an error");
            return Err(WeatherError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| WeatherError::Decode(e.to_string()))
    }
}

/// The `message` field of an error body, if any.
fn provider_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value.get("message")?.as_str()?.trim();
    (!message.is_empty()).then(|| message.to_string())
}
