use chrono::{DateTime, Utc};

/// Multi-point forecast for one place, as returned by a [`crate::ForecastProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub location_name: String,
    pub country: String,
    pub entries: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    /// OpenWeather condition id, e.g. 800 for clear sky.
    pub condition_code: u16,
    pub description: String,
    pub rain_mm: Option<f64>,
    pub snow_mm: Option<f64>,
}
