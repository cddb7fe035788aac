//! Core error types for LeakCheck.
//!
//! Validation errors raised by the query and result types, and
//! configuration errors.

use thiserror::Error;

/// Errors raised while validating identifiers, query kinds and results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The submitted identifier is empty once surrounding whitespace is trimmed.
    #[error("enter data to check")]
    EmptyInput,

    /// The query kind is not one of `email`, `phone` or `login`.
    #[error("invalid type '{value}': must be email, phone, or login")]
    InvalidKind {
        /// The rejected kind string
        value: String,
    },

    /// A result violates the safe-iff-empty invariant.
    #[error("inconsistent lookup result: {reason}")]
    InconsistentResult {
        /// What was inconsistent
        reason: String,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
