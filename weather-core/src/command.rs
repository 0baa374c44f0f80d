//! Turning raw argument tokens into a single validated [`Command`].
//!
//! Command-selecting flags are mutually exclusive in intent. When several are
//! given anyway, the first one in this order wins:
//!
//! 1. `-i <lat> <lon> <name>` (add location)
//! 2. `-r <name>` (remove location)
//! 3. `--unit <C|F>`
//! 4. `--interval <hours>`
//! 5. `--list`
//! 6. `--help`
//! 7. `--set-api-key <key>`
//! 8. otherwise the positional tokens name a location to fetch
//!
//! Positional tokens given next to any flag other than `-i` are ignored. A flag
//! given twice keeps its last value. The values of `-r`, `--unit` and
//! `--set-api-key` are taken verbatim, even when they start with `-`.

use clap::{Parser, error::ErrorKind};
use std::fmt;

use crate::{
    config::TemperatureUnit,
    error::{Result, WeatherError},
};

/// A fully resolved user intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    GetWeather {
        location: String,
    },
    AddLocation {
        name: String,
        latitude: f64,
        longitude: f64,
    },
    RemoveLocation {
        name: String,
    },
    SetUnit(TemperatureUnit),
    SetInterval {
        hours: u32,
    },
    ListLocations,
    SetApiKey {
        key: String,
    },
    Help,
}

impl Command {
    /// Short name used in logs and error context.
    pub fn name(&self) -> &'static str {
        match self {
            Command::GetWeather { .. } => "get-weather",
            Command::AddLocation { .. } => "add-location",
            Command::RemoveLocation { .. } => "remove-location",
            Command::SetUnit(_) => "set-unit",
            Command::SetInterval { .. } => "set-interval",
            Command::ListLocations => "list-locations",
            Command::SetApiKey { .. } => "set-api-key",
            Command::Help => "help",
        }
    }

    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::AddLocation { .. }
                | Command::RemoveLocation { .. }
                | Command::SetUnit(_)
                | Command::SetInterval { .. }
                | Command::SetApiKey { .. }
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw option layer. Usage text lives in [`crate::render::HELP`], so clap's own help is off.
#[derive(Debug, Parser)]
#[command(name = "weather", no_binary_name = true, disable_help_flag = true)]
struct RawArgs {
    #[arg(short = 'i', overrides_with = "add")]
    add: bool,

    #[arg(
        short = 'r',
        value_name = "NAME",
        allow_hyphen_values = true,
        overrides_with = "remove"
    )]
    remove: Option<String>,

    #[arg(
        long,
        value_name = "C|F",
        allow_hyphen_values = true,
        overrides_with = "unit"
    )]
    unit: Option<String>,

    #[arg(
        long,
        value_name = "HOURS",
        allow_negative_numbers = true,
        overrides_with = "interval"
    )]
    interval: Option<i64>,

    #[arg(long, overrides_with = "list")]
    list: bool,

    #[arg(long, overrides_with = "help")]
    help: bool,

    /// Opaque; taken verbatim even when it starts with `-`.
    #[arg(
        long = "set-api-key",
        value_name = "KEY",
        allow_hyphen_values = true,
        overrides_with = "set_api_key"
    )]
    set_api_key: Option<String>,

    /// `<lat> <lon> <name>` after `-i`, otherwise the words of a location name.
    #[arg(value_name = "ARGS", allow_negative_numbers = true)]
    positional: Vec<String>,
}

/// Resolve `tokens` (program name excluded) into a command.
///
/// Pure: the same tokens always produce the same result.
pub fn resolve<I, T>(tokens: I) -> Result<Command>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
    if tokens.is_empty() {
        return Ok(Command::Help);
    }

    let raw = RawArgs::try_parse_from(&tokens).map_err(|err| syntax_error(&err, &tokens))?;
    classify(raw)
}

fn classify(raw: RawArgs) -> Result<Command> {
    if raw.add {
        return add_location(&raw.positional);
    }
    if let Some(name) = raw.remove {
        return Ok(Command::RemoveLocation {
            name: non_empty("location name", name)?,
        });
    }
    if let Some(unit) = raw.unit {
        return unit.parse().map(Command::SetUnit);
    }
    if let Some(hours) = raw.interval {
        return interval(hours);
    }
    if raw.list {
        return Ok(Command::ListLocations);
    }
    if raw.help {
        return Ok(Command::Help);
    }
    if let Some(key) = raw.set_api_key {
        return Ok(Command::SetApiKey {
            key: non_empty("api key", key)?,
        });
    }

    if raw.positional.is_empty() {
        return Err(WeatherError::invalid_argument(
            "location",
            "location required for getting weather",
        ));
    }
    Ok(Command::GetWeather {
        location: raw.positional.join(" "),
    })
}

fn add_location(args: &[String]) -> Result<Command> {
    let [lat, lon, name] = args else {
        return Err(WeatherError::invalid_argument(
            "add-location arguments",
            format!(
                "expected exactly 3 values, got {}. Use: -i <latitude> <longitude> <name>",
                args.len()
            ),
        ));
    };

    Ok(Command::AddLocation {
        latitude: coordinate("latitude", lat, 90.0)?,
        longitude: coordinate("longitude", lon, 180.0)?,
        name: non_empty("location name", name.clone())?,
    })
}

fn coordinate(field: &'static str, raw: &str, limit: f64) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| WeatherError::invalid_argument(field, format!("'{raw}' is not a number")))?;

    if !value.is_finite() || value.abs() > limit {
        return Err(WeatherError::invalid_argument(
            field,
            format!("{raw} is outside [-{limit}, {limit}]"),
        ));
    }
    Ok(value)
}

fn interval(hours: i64) -> Result<Command> {
    match u32::try_from(hours) {
        Ok(hours) if hours > 0 => Ok(Command::SetInterval { hours }),
        _ => Err(WeatherError::InvalidInterval(hours)),
    }
}

fn non_empty(field: &'static str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(WeatherError::invalid_argument(field, "must not be empty"));
    }
    Ok(value)
}

fn syntax_error(err: &clap::Error, tokens: &[String]) -> WeatherError {
    if err.kind() == ErrorKind::UnknownArgument {
        let token = tokens
            .iter()
            .find(|t| t.starts_with('-') && t.parse::<f64>().is_err() && !is_known_flag(t))
            .cloned()
            .unwrap_or_default();
        return WeatherError::UnknownCommand(token);
    }

    // First line only; the rest is clap's usage block.
    let message = err.to_string();
    let first = message.lines().next().unwrap_or_default();
    WeatherError::ArgumentSyntax(first.trim_start_matches("error: ").to_string())
}

fn is_known_flag(token: &str) -> bool {
    let flag = token.split('=').next().unwrap_or(token);
    matches!(
        flag,
        "-i" | "-r" | "--unit" | "--interval" | "--list" | "--help" | "--set-api-key"
    )
}
