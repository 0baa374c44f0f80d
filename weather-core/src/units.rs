//! Temperature conversion. Provider data is always Celsius.

use crate::config::TemperatureUnit;

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Convert between units, rounding the result to one decimal place.
pub fn convert(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    let converted = match (from, to) {
        (TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit) => celsius_to_fahrenheit(value),
        (TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius) => fahrenheit_to_celsius(value),
        _ => value,
    };
    round_one_decimal(converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freezing_and_boiling_points() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(fahrenheit_to_celsius(32.0), 0.0);
        assert_eq!(fahrenheit_to_celsius(-40.0), -40.0);
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round_one_decimal(21.345), 21.3);
        assert_eq!(round_one_decimal(21.35), 21.4);
        assert_eq!(round_one_decimal(-3.25), -3.3);
    }

    #[test]
    fn convert_rounds_even_without_unit_change() {
        assert_eq!(convert(20.04, TemperatureUnit::Celsius, TemperatureUnit::Celsius), 20.0);
        assert_eq!(convert(25.0, TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit), 77.0);
        assert_eq!(convert(98.6, TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius), 37.0);
    }
}
