use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::Result, model::Forecast};

pub mod openweather;

/// Source of forecast data for a coordinate pair.
///
/// The dispatcher only sees this trait, so tests can swap the network client out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, latitude: f64, longitude: f64, api_key: &str)
    -> Result<Forecast>;
}
