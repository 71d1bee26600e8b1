//! Domain error types
//!
//! This module defines the error hierarchy for the extractor. Errors raised by
//! the extraction core keep third-party types out of their public shape so
//! callers can match on them without depending on `reqwest` or `serde_json`.

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type
///
/// Wraps the specific error families raised by validation, transport,
/// projection and cursor bookkeeping, plus the ambient I/O and
/// configuration failures of the surrounding tool.
#[derive(Debug, Error)]
pub enum ChompError {
    /// Source configuration failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Fetch collaborator errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Row projection errors
    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    /// Internal cursor bookkeeping errors
    #[error("Cursor error: {0}")]
    Cursor(#[from] CursorError),

    /// End date precedes start date
    #[error("end_date {end} is before start_date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Configuration file errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Output sink errors
    #[error("Output error: {0}")]
    Output(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Source configuration validation errors
///
/// The display text of each variant is stable: callers and tests rely on
/// `"missing api_kind"`, `"invalid start_date"` and so on verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required key is absent
    #[error("missing {0}")]
    MissingKey(&'static str),

    /// A key holds a value outside its enumerated set
    #[error("unsupported {0}")]
    InvalidEnum(&'static str),

    /// A date key does not hold a `YYYY-MM-DD` date
    #[error("invalid {0}")]
    InvalidDateFormat(&'static str),
}

/// Errors surfaced by the fetch collaborator
///
/// Any of these leaves the batch cursor untouched, so calling
/// `get_next_batch()` again retries the same page window.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not reach the server
    #[error("Failed to connect: {0}")]
    ConnectionFailed(String),

    /// Server answered with a non-2xx status
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Response body is not the expected JSON shape
    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    /// Request URL or headers could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors raised while projecting day records into rows
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    /// A configured field is absent from a day's metrics
    #[error("metric '{field}' missing for {date}")]
    MissingField { date: NaiveDate, field: String },

    /// The source configuration carries no `fields` list
    #[error("no fields configured for projection")]
    FieldsNotConfigured,
}

/// Batch cursor consistency errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// `advance` was called after every page had been fetched
    #[error("cannot advance past page {pages_total} of {pages_total}")]
    Exhausted { pages_total: u32 },
}

impl From<std::io::Error> for ChompError {
    fn from(err: std::io::Error) -> Self {
        ChompError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ChompError {
    fn from(err: serde_json::Error) -> Self {
        ChompError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ChompError {
    fn from(err: toml::de::Error) -> Self {
        ChompError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for ChompError {
    fn from(err: csv::Error) -> Self {
        ChompError::Output(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::MissingKey("api_kind").to_string(),
            "missing api_kind"
        );
        assert_eq!(
            ValidationError::InvalidEnum("api_kind").to_string(),
            "unsupported api_kind"
        );
        assert_eq!(
            ValidationError::InvalidDateFormat("end_date").to_string(),
            "invalid end_date"
        );
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: ChompError = ValidationError::MissingKey("start_date").into();
        assert_eq!(err.to_string(), "missing start_date");
    }

    #[test]
    fn test_transport_error_conversion() {
        let err: ChompError = TransportError::Status {
            status: 401,
            body: "unauthorized".to_string(),
        }
        .into();
        assert!(matches!(err, ChompError::Transport(_)));
        assert_eq!(
            err.to_string(),
            "Transport error: Unexpected status 401: unauthorized"
        );
    }

    #[test]
    fn test_projection_error_display() {
        let err = ProjectionError::MissingField {
            date: NaiveDate::from_ymd_opt(2018, 7, 21).unwrap(),
            field: "invalid_emails".to_string(),
        };
        assert_eq!(err.to_string(), "metric 'invalid_emails' missing for 2018-07-21");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: ChompError = io_err.into();
        assert!(matches!(err, ChompError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: ChompError = toml_err.into();
        assert!(matches!(err, ChompError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_chomp_error_implements_std_error() {
        let err = ChompError::Output("disk full".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
