use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    error::{Result, WeatherError},
    model::{Forecast, ForecastEntry},
};

use super::ForecastProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct OpenWeatherConfig {
    /// Base URL without the trailing `/forecast`.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// 5-day / 3-hour forecast from OpenWeather.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    config: OpenWeatherConfig,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: OpenWeatherConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ProviderUnavailable(e.to_string()))?;

        Ok(Self { config, http })
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast", self.config.base_url.trim_end_matches('/'))
    }

    fn request_error(&self, err: reqwest::Error) -> WeatherError {
        if err.is_timeout() {
            WeatherError::ProviderTimeout(self.config.timeout_secs)
        } else {
            WeatherError::ProviderUnavailable(format!("request to OpenWeather failed: {err}"))
        }
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    #[instrument(skip(self, api_key))]
    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        api_key: &str,
    ) -> Result<Forecast> {
        let lat = latitude.to_string();
        let lon = longitude.to_string();

        let res = self
            .http
            .get(self.forecast_url())
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", api_key),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| self.request_error(e))?;
        debug!(%status, bytes = body.len(), "OpenWeather answered");

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let parsed: OwForecastResponse = serde_json::from_str(&body).map_err(|e| {
            WeatherError::ProviderBadResponse(format!("failed to parse OpenWeather JSON: {e}"))
        })?;

        parsed.into_forecast()
    }
}

fn status_error(status: StatusCode, body: &str) -> WeatherError {
    let detail = format!("OpenWeather returned status {status}: {}", truncate_body(body));

    if status == StatusCode::UNAUTHORIZED {
        WeatherError::ProviderBadResponse(format!(
            "{detail}\nHint: run `weather --set-api-key <key>` with a valid OpenWeather key."
        ))
    } else if status.is_server_error() {
        WeatherError::ProviderUnavailable(detail)
    } else {
        WeatherError::ProviderBadResponse(detail)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u16,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwPrecipitation {
    #[serde(rename = "3h")]
    three_hours: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
    rain: Option<OwPrecipitation>,
    snow: Option<OwPrecipitation>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

impl OwForecastResponse {
    fn into_forecast(self) -> Result<Forecast> {
        let entries = self
            .list
            .into_iter()
            .map(OwForecastEntry::into_entry)
            .collect::<Result<Vec<_>>>()?;

        Ok(Forecast {
            location_name: self.city.name,
            country: self.city.country,
            entries,
        })
    }
}

impl OwForecastEntry {
    fn into_entry(self) -> Result<ForecastEntry> {
        let time = DateTime::<Utc>::from_timestamp(self.dt, 0).ok_or_else(|| {
            WeatherError::ProviderBadResponse(format!("invalid timestamp {}", self.dt))
        })?;

        let (condition_code, description) = self
            .weather
            .into_iter()
            .next()
            .map(|w| (w.id, w.description))
            .unwrap_or_else(|| (0, "unknown".to_string()));

        Ok(ForecastEntry {
            time,
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            humidity_pct: self.main.humidity,
            wind_speed_mps: self.wind.speed,
            condition_code,
            description,
            rain_mm: self.rain.and_then(|p| p.three_hours),
            snow_mm: self.snow.and_then(|p| p.three_hours),
        })
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
