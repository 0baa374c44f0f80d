use tracing::{info, instrument};

use crate::{
    command::Command,
    config::{ConfigStore, Configuration},
    error::Result,
    location::LocationRegistry,
    provider::ForecastProvider,
    render,
};

/// Applies one resolved [`Command`] against the loaded configuration.
///
/// Returns the text to show the user. Mutating commands are persisted before
/// this returns; on error nothing has changed on disk or in memory.
#[derive(Debug)]
pub struct Dispatcher<'a> {
    config: &'a mut Configuration,
    store: &'a ConfigStore,
    provider: &'a dyn ForecastProvider,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        config: &'a mut Configuration,
        store: &'a ConfigStore,
        provider: &'a dyn ForecastProvider,
    ) -> Self {
        Self {
            config,
            store,
            provider,
        }
    }

    #[instrument(skip_all, fields(command = %command))]
    pub async fn dispatch(&mut self, command: Command) -> Result<String> {
        match command {
            Command::GetWeather { location } => self.get_weather(&location).await,

            Command::AddLocation {
                name,
                latitude,
                longitude,
            } => {
                self.registry().add(&name, latitude, longitude)?;
                Ok(format!("Location '{name}' added successfully."))
            }

            Command::RemoveLocation { name } => {
                self.registry().remove(&name)?;
                Ok(format!("Location '{name}' removed successfully."))
            }

            Command::SetUnit(unit) => {
                self.store.mutate(self.config, |cfg| {
                    cfg.preferences.temperature_unit = unit;
                    Ok(())
                })?;
                Ok(format!("Temperature unit set to {unit}."))
            }

            Command::SetInterval { hours } => {
                self.store.mutate(self.config, |cfg| {
                    cfg.preferences.forecast_interval_hours = hours;
                    Ok(())
                })?;
                Ok(format!("Forecast interval set to {hours} hours."))
            }

            Command::ListLocations => Ok(render::locations(self.registry().list())),

            Command::SetApiKey { key } => {
                self.store.mutate(self.config, |cfg| {
                    cfg.preferences.api_key = key;
                    Ok(())
                })?;
                Ok("API key has been set successfully.".to_string())
            }

            Command::Help => Ok(render::help()),
        }
    }

    async fn get_weather(&mut self, name: &str) -> Result<String> {
        let location = self.registry().get(name)?;
        info!(location = %location.name, "fetching forecast");

        let forecast = self
            .provider
            .fetch_forecast(
                location.latitude,
                location.longitude,
                &self.config.preferences.api_key,
            )
            .await?;

        Ok(render::forecast(&forecast, &self.config.preferences))
    }

    fn registry(&mut self) -> LocationRegistry<'_> {
        LocationRegistry::new(self.config, self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        command::resolve,
        config::{Location, TemperatureUnit},
        error::WeatherError,
        model::{Forecast, ForecastEntry},
        provider::MockForecastProvider,
    };
    use chrono::{TimeZone, Utc};
    use std::fs;
    use tempfile::TempDir;

    struct Harness {
        _dir: TempDir,
        store: ConfigStore,
        config: Configuration,
    }

    impl Harness {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let store = ConfigStore::new(dir.path().join("config.json"));
            let config = store.load().unwrap();
            Self {
                _dir: dir,
                store,
                config,
            }
        }

        fn with_tokyo() -> Self {
            let mut h = Self::new();
            h.config.locations.push(Location::new("Tokyo", 35.6895, 139.6917));
            h.config.preferences.api_key = "KEY".into();
            h.store.save(&h.config).unwrap();
            h
        }

        async fn run(&mut self, provider: &MockForecastProvider, tokens: &[&str]) -> Result<String> {
            let command = resolve(tokens.iter().copied())?;
            Dispatcher::new(&mut self.config, &self.store, provider)
                .dispatch(command)
                .await
        }

        fn on_disk(&self) -> Configuration {
            self.store.load().unwrap()
        }
    }

    fn no_network() -> MockForecastProvider {
        let mut provider = MockForecastProvider::new();
        provider.expect_fetch_forecast().never();
        provider
    }

    fn sample_forecast() -> Forecast {
        Forecast {
            location_name: "Tokyo".into(),
            country: "JP".into(),
            entries: vec![ForecastEntry {
                time: Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap(),
                temperature_c: 25.0,
                feels_like_c: 26.0,
                humidity_pct: 70,
                wind_speed_mps: 4.0,
                condition_code: 800,
                description: "clear sky".into(),
                rain_mm: None,
                snow_mm: None,
            }],
        }
    }

    #[tokio::test]
    async fn get_weather_fetches_saved_coordinates_and_renders() {
        let mut h = Harness::with_tokyo();
        let mut provider = MockForecastProvider::new();
        provider
            .expect_fetch_forecast()
            .withf(|lat, lon, key| *lat == 35.6895 && *lon == 139.6917 && key == "KEY")
            .times(1)
            .returning(|_, _, _| Ok(sample_forecast()));

        let out = h.run(&provider, &["Tokyo"]).await.unwrap();

        assert!(out.starts_with("Weather forecast for Tokyo, JP"));
        assert!(out.contains("Temperature: 25.0°C"));
    }

    #[tokio::test]
    async fn get_weather_uses_preferred_unit() {
        let mut h = Harness::with_tokyo();
        h.config.preferences.temperature_unit = TemperatureUnit::Fahrenheit;
        let mut provider = MockForecastProvider::new();
        provider
            .expect_fetch_forecast()
            .returning(|_, _, _| Ok(sample_forecast()));

        let out = h.run(&provider, &["Tokyo"]).await.unwrap();
        assert!(out.contains("Temperature: 77.0°F"));
    }

    #[tokio::test]
    async fn get_weather_for_unknown_location_never_calls_provider() {
        let mut h = Harness::with_tokyo();

        let err = h.run(&no_network(), &["Tokyo", "Bay"]).await.unwrap_err();
        assert!(matches!(err, WeatherError::LocationNotFound(name) if name == "Tokyo Bay"));
    }

    #[tokio::test]
    async fn provider_errors_pass_through() {
        let mut h = Harness::with_tokyo();
        let mut provider = MockForecastProvider::new();
        provider
            .expect_fetch_forecast()
            .returning(|_, _, _| Err(WeatherError::ProviderTimeout(10)));

        let err = h.run(&provider, &["Tokyo"]).await.unwrap_err();
        assert!(matches!(err, WeatherError::ProviderTimeout(10)));
    }

    #[tokio::test]
    async fn add_location_persists() {
        let mut h = Harness::new();

        let out = h
            .run(&no_network(), &["-i", "35.6895", "139.6917", "Tokyo"])
            .await
            .unwrap();

        assert_eq!(out, "Location 'Tokyo' added successfully.");
        assert_eq!(
            h.on_disk().locations,
            vec![Location::new("Tokyo", 35.6895, 139.6917)]
        );
    }

    #[tokio::test]
    async fn duplicate_add_fails_and_keeps_file() {
        let mut h = Harness::with_tokyo();
        let before = fs::read_to_string(h.store.path()).unwrap();

        let err = h
            .run(&no_network(), &["-i", "0", "0", "Tokyo"])
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::DuplicateLocation(_)));
        assert_eq!(fs::read_to_string(h.store.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn remove_location_persists() {
        let mut h = Harness::with_tokyo();

        let out = h.run(&no_network(), &["-r", "Tokyo"]).await.unwrap();

        assert_eq!(out, "Location 'Tokyo' removed successfully.");
        assert!(h.on_disk().locations.is_empty());
    }

    #[tokio::test]
    async fn remove_missing_location_fails() {
        let mut h = Harness::with_tokyo();

        let err = h.run(&no_network(), &["-r", "Nowhere"]).await.unwrap_err();

        assert!(matches!(err, WeatherError::LocationNotFound(_)));
        assert_eq!(h.config.locations.len(), 1);
        assert_eq!(h.on_disk().locations[0].name, "Tokyo");
    }

    #[tokio::test]
    async fn preference_commands_persist() {
        let mut h = Harness::new();
        let provider = no_network();

        assert_eq!(
            h.run(&provider, &["--unit", "f"]).await.unwrap(),
            "Temperature unit set to F."
        );
        assert_eq!(
            h.run(&provider, &["--interval", "12"]).await.unwrap(),
            "Forecast interval set to 12 hours."
        );
        assert_eq!(
            h.run(&provider, &["--set-api-key", "abc123"]).await.unwrap(),
            "API key has been set successfully."
        );

        let prefs = h.on_disk().preferences;
        assert_eq!(prefs.temperature_unit, TemperatureUnit::Fahrenheit);
        assert_eq!(prefs.forecast_interval_hours, 12);
        assert_eq!(prefs.api_key, "abc123");
    }

    #[tokio::test]
    async fn list_renders_saved_locations() {
        let mut h = Harness::with_tokyo();

        let out = h.run(&no_network(), &["--list"]).await.unwrap();
        assert_eq!(out, "Saved Locations:\n- Tokyo (Lat: 35.6895, Lon: 139.6917)");
    }

    #[tokio::test]
    async fn help_never_mutates() {
        let mut h = Harness::with_tokyo();
        let before = fs::read_to_string(h.store.path()).unwrap();
        let config_before = h.config.clone();

        let out = h.run(&no_network(), &[]).await.unwrap();

        assert!(out.contains("Weather CLI Application Usage:"));
        assert_eq!(h.config, config_before);
        assert_eq!(fs::read_to_string(h.store.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn failed_save_reports_error_and_keeps_memory() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let store = ConfigStore::new(blocker.join("config.json"));
        let mut config = Configuration::default();
        let provider = no_network();

        let err = Dispatcher::new(&mut config, &store, &provider)
            .dispatch(Command::SetUnit(TemperatureUnit::Fahrenheit))
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::StoreUnwritable { .. }));
        assert_eq!(config.preferences.temperature_unit, TemperatureUnit::Celsius);
    }
}
