use std::result::Result as StdResult;

use thiserror::Error;

/// Error type shared by the data source, configuration and parsing layers.
///
/// The aggregation functions themselves never fail; malformed records are
/// screened out and reported instead.
#[derive(Debug, Error)]
pub enum EstateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Data source error: {0}")]
    Source(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unknown period: {0}")]
    UnknownPeriod(String),
    #[error("Unknown transaction type: {0}")]
    UnknownKind(String),
}

pub type Result<T> = StdResult<T, EstateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_with_context() {
        let err: EstateError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json").into();
        assert!(err.to_string().starts_with("IO error"));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn unknown_period_names_the_input() {
        let err = EstateError::UnknownPeriod("fortnight".into());
        assert_eq!(err.to_string(), "Unknown period: fortnight");
    }
}
