//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - The persisted configuration (saved locations + preferences) and its JSON store
//! - The location registry that keeps location names unique
//! - Command resolution from raw arguments and dispatch of the resolved command
//! - Abstraction over forecast providers, plus text rendering of the results
//!
//! It is used by `weather-cli`, but the resolver and dispatcher can be driven
//! from anywhere that can supply a [`ConfigStore`] and a [`ForecastProvider`].

pub mod ascii;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod render;
pub mod units;

pub use command::{Command, resolve};
pub use config::{ConfigStore, Configuration, Location, Preferences, TemperatureUnit};
pub use dispatch::Dispatcher;
pub use error::{Result, WeatherError};
pub use location::LocationRegistry;
pub use model::{Forecast, ForecastEntry};
pub use provider::{
    ForecastProvider,
    openweather::{OpenWeatherConfig, OpenWeatherProvider},
};
