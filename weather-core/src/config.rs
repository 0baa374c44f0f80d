use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{debug, info, instrument};

use crate::error::{Result, WeatherError};

pub const DEFAULT_FORECAST_INTERVAL_HOURS: u32 = 24;

/// A saved, named coordinate pair. The name is the identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemperatureUnit {
    type Err = WeatherError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_uppercase().as_str() {
            "C" => Ok(TemperatureUnit::Celsius),
            "F" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(WeatherError::InvalidUnit(value.to_string())),
        }
    }
}

/// User preferences, stored flat next to the location list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,

    #[serde(rename = "forecast_interval", default = "default_interval")]
    pub forecast_interval_hours: u32,

    /// Empty until the user runs `--set-api-key`.
    #[serde(default)]
    pub api_key: String,
}

const fn default_interval() -> u32 {
    DEFAULT_FORECAST_INTERVAL_HOURS
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            temperature_unit: TemperatureUnit::Celsius,
            forecast_interval_hours: DEFAULT_FORECAST_INTERVAL_HOURS,
            api_key: String::new(),
        }
    }
}

/// The persisted aggregate.
///
/// On disk:
/// ```json
/// {
///   "locations": [{ "name": "Tokyo", "latitude": 35.6895, "longitude": 139.6917 }],
///   "temperature_unit": "C",
///   "forecast_interval": 24,
///   "api_key": ""
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub locations: Vec<Location>,

    #[serde(flatten)]
    pub preferences: Preferences,
}

impl Configuration {
    pub fn find_location(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|loc| loc.name == name)
    }

    fn duplicate_name(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.locations
            .iter()
            .map(|loc| loc.name.as_str())
            .find(|name| !seen.insert(*name))
    }
}

/// JSON file backing a [`Configuration`].
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load config from disk. On first run the defaults are written out before being returned.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Configuration> {
        if !self.path.exists() {
            info!("no config file yet, writing defaults");
            let cfg = Configuration::default();
            self.save(&cfg)?;
            return Ok(cfg);
        }

        let contents =
            fs::read_to_string(&self.path).map_err(|source| WeatherError::StoreUnreadable {
                path: self.path.clone(),
                source,
            })?;

        let cfg: Configuration =
            serde_json::from_str(&contents).map_err(|e| self.corrupt(e.to_string()))?;

        if let Some(name) = cfg.duplicate_name() {
            return Err(self.corrupt(format!("location '{name}' is listed more than once")));
        }
        if cfg.preferences.forecast_interval_hours == 0 {
            return Err(self.corrupt("forecast_interval must be at least 1 hour"));
        }
        if cfg.locations.iter().any(|loc| loc.name.trim().is_empty()) {
            return Err(self.corrupt("a location has an empty name"));
        }

        debug!(locations = cfg.locations.len(), "config loaded");
        Ok(cfg)
    }

    /// Overwrite the file with `config`. Goes through a sibling temp file so a failed
    /// write never leaves half a document behind.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn save(&self, config: &Configuration) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.unwritable(source))?;
        }

        let json = serde_json::to_string_pretty(config)
            .map_err(|e| self.unwritable(io::Error::other(e)))?;

        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(|source| self.unwritable(source))?;
        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(self.unwritable(source));
        }

        debug!("config saved");
        Ok(())
    }

    /// Apply `change` to a copy of `config`, persist the copy, then commit it in memory.
    /// If either step fails, `config` and the file keep their previous content.
    pub fn mutate<T>(
        &self,
        config: &mut Configuration,
        change: impl FnOnce(&mut Configuration) -> Result<T>,
    ) -> Result<T> {
        let mut next = config.clone();
        let out = change(&mut next)?;
        self.save(&next)?;
        *config = next;
        Ok(out)
    }

    fn tmp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "config.json".to_string());
        self.path.with_file_name(format!(".{file_name}.tmp"))
    }

    fn corrupt(&self, reason: impl Into<String>) -> WeatherError {
        WeatherError::StoreCorrupt {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }

    fn unwritable(&self, source: io::Error) -> WeatherError {
        WeatherError::StoreUnwritable {
            path: self.path.clone(),
            source,
        }
    }
}
