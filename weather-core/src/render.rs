//! Plain-text output for forecasts, saved locations and usage.

use chrono::{Duration, Local};

use crate::{
    ascii,
    config::{Location, Preferences, TemperatureUnit},
    model::{Forecast, ForecastEntry},
    units,
};

const SEPARATOR_WIDTH: usize = 40;

pub const HELP: &str = "\
Weather CLI Application Usage:
  weather <location>                        Get weather for a saved location
  weather -i <latitude> <longitude> <name>  Add a new location
  weather -r <name>                         Remove a location
  weather --unit <C|F>                      Set temperature unit
  weather --interval <hours>                Set forecast interval
  weather --list                            List saved locations
  weather --set-api-key <api_key>           Set the OpenWeather API key
  weather --help                            Show this help message";

pub fn help() -> String {
    HELP.to_string()
}

/// Render every entry that falls within the preferred interval, counted from the first entry.
pub fn forecast(data: &Forecast, prefs: &Preferences) -> String {
    let mut lines = vec![heading(data), String::new()];

    let Some(first) = data.entries.first() else {
        lines.push("No forecast data available.".to_string());
        return lines.join("\n");
    };

    // Past chrono's range every entry is in the window.
    let horizon = first
        .time
        .checked_add_signed(Duration::hours(i64::from(prefs.forecast_interval_hours)));
    let in_window = |e: &&ForecastEntry| horizon.is_none_or(|end| e.time < end);

    for entry in data.entries.iter().take_while(in_window) {
        entry_lines(entry, prefs.temperature_unit, &mut lines);
    }

    lines.join("\n")
}

fn heading(data: &Forecast) -> String {
    if data.country.is_empty() {
        format!("Weather forecast for {}", data.location_name)
    } else {
        format!("Weather forecast for {}, {}", data.location_name, data.country)
    }
}

fn entry_lines(entry: &ForecastEntry, unit: TemperatureUnit, lines: &mut Vec<String>) {
    let temp = units::convert(entry.temperature_c, TemperatureUnit::Celsius, unit);
    let feels_like = units::convert(entry.feels_like_c, TemperatureUnit::Celsius, unit);

    lines.push(format!(
        "Date: {}",
        entry.time.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
    ));
    lines.push(format!(
        "Temperature: {temp:.1}°{unit} (Feels like: {feels_like:.1}°{unit})"
    ));
    lines.push(format!("Humidity: {}%", entry.humidity_pct));
    lines.push(format!("Wind: {:.1} m/s", entry.wind_speed_mps));
    lines.push(format!("Weather: {}", entry.description));
    lines.push(ascii::glyph(entry.condition_code).trim_matches('\n').to_string());

    if let Some(rain) = entry.rain_mm.filter(|mm| *mm > 0.0) {
        lines.push(format!("Rain: {rain:.1} mm"));
    }
    if let Some(snow) = entry.snow_mm.filter(|mm| *mm > 0.0) {
        lines.push(format!("Snow: {snow:.1} mm"));
    }

    lines.push("-".repeat(SEPARATOR_WIDTH));
}

pub fn locations(locations: &[Location]) -> String {
    if locations.is_empty() {
        return "No saved locations. Add one with: weather -i <latitude> <longitude> <name>"
            .to_string();
    }

    let mut lines = vec!["Saved Locations:".to_string()];
    lines.extend(locations.iter().map(|loc| {
        format!(
            "- {} (Lat: {:.4}, Lon: {:.4})",
            loc.name, loc.latitude, loc.longitude
        )
    }));
    lines.join("\n")
}
