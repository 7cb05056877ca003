//! Core error types for planline-core.
//!
//! The layout engine never fails; these errors cover the layers around it:
//! loading configuration and ingesting upstream records.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for planline-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Record ingestion errors
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML decoding errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Errors raised while turning upstream records into timeline items.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    /// A date string could not be parsed into an instant
    #[error("Invalid date '{value}': expected RFC 3339 or YYYY-MM-DD")]
    InvalidDate { value: String },

    /// A required field is absent from the record
    #[error("Record {record} is missing '{field}'")]
    MissingField { record: String, field: &'static str },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_error_converts_into_core_error() {
        let err: CoreError = FeedError::InvalidDate {
            value: "not-a-date".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Feed(_)));
        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn missing_field_message_names_record_and_field() {
        let err = FeedError::MissingField {
            record: "Task-7".into(),
            field: "dueDate",
        };
        assert_eq!(err.to_string(), "Record Task-7 is missing 'dueDate'");
    }
}
