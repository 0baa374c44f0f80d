use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::{env, path::PathBuf};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use weather_core::{ConfigStore, Dispatcher, OpenWeatherConfig, OpenWeatherProvider, resolve};

/// Full path of the JSON config file; overrides the platform config directory.
pub const CONFIG_ENV: &str = "WEATHER_CLI_CONFIG";
/// OpenWeather base URL override.
pub const API_URL_ENV: &str = "WEATHER_CLI_API_URL";
/// `tracing` filter directives, e.g. `WEATHER_LOG=debug`.
pub const LOG_ENV: &str = "WEATHER_LOG";

/// Logs go to stderr so stdout only carries command output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// One invocation: the store it works on and the provider it fetches from.
#[derive(Debug)]
pub struct App {
    store: ConfigStore,
    provider: OpenWeatherProvider,
}

impl App {
    pub fn from_env() -> Result<Self> {
        let store = ConfigStore::new(config_file_path()?);

        let mut provider_config = OpenWeatherConfig::default();
        if let Some(url) = env::var(API_URL_ENV).ok().filter(|url| !url.is_empty()) {
            provider_config.base_url = url;
        }
        let provider = OpenWeatherProvider::new(provider_config)
            .context("Failed to set up the forecast client")?;

        Ok(Self { store, provider })
    }

    pub async fn run(self, tokens: Vec<String>) -> Result<()> {
        let mut config = self
            .store
            .load()
            .context("Failed to load configuration")?;

        let command = resolve(tokens).context("Failed to parse arguments")?;
        let name = command.name();
        debug!(
            command = name,
            mutating = command.is_mutating(),
            store = %self.store.path().display(),
            "dispatching"
        );

        let output = Dispatcher::new(&mut config, &self.store, &self.provider)
            .dispatch(command)
            .await
            .with_context(|| format!("Failed to run {name}"))?;

        println!("{output}");
        Ok(())
    }
}

/// Path to the config file.
fn config_file_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

    Ok(dirs.config_dir().join("config.json"))
}
