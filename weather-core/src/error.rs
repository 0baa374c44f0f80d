use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WeatherError>;

/// Every way a single invocation can fail. None of these are retried.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Option parsing rejected the token sequence.
    #[error("{0}")]
    ArgumentSyntax(String),

    /// A recognised command was given a missing or malformed value.
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    #[error("invalid temperature unit '{0}'. Use C or F")]
    InvalidUnit(String),

    #[error("invalid forecast interval '{0}'. Must be a positive number of hours")]
    InvalidInterval(i64),

    #[error("location with name '{0}' already exists")]
    DuplicateLocation(String),

    #[error("location '{0}' not found")]
    LocationNotFound(String),

    #[error("config file {} is corrupt: {reason}", path.display())]
    StoreCorrupt { path: PathBuf, reason: String },

    #[error("cannot write config file {}", path.display())]
    StoreUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read config file {}", path.display())]
    StoreUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown command '{0}'. Run with --help to see the supported commands")]
    UnknownCommand(String),

    #[error("forecast provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("forecast provider did not answer within {0} seconds")]
    ProviderTimeout(u64),

    #[error("forecast provider returned a bad response: {0}")]
    ProviderBadResponse(String),
}

impl WeatherError {
    pub(crate) fn invalid_argument(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_names_the_field() {
        let err = WeatherError::invalid_argument("latitude", "'abc' is not a number");
        assert_eq!(err.to_string(), "invalid latitude: 'abc' is not a number");
    }

    #[test]
    fn store_errors_name_the_file() {
        let err = WeatherError::StoreCorrupt {
            path: PathBuf::from("/tmp/config.json"),
            reason: "expected value at line 1 column 1".into(),
        };
        assert!(err.to_string().contains("/tmp/config.json"));
    }
}
