//! Error types for lookups and session submissions.

use leakcheck_core::ValidationError;
use thiserror::Error;

/// Errors a lookup backend can report.
///
/// All variants are recoverable: the session returns to a re-submittable
/// state and the user sees [`LookupError::user_message`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Backend could not be reached or answered with a server error
    #[error("lookup backend unavailable ({backend}): {message}")]
    BackendUnavailable {
        /// Backend identifier
        backend: String,
        /// Error message
        message: String,
    },

    /// Backend did not answer in time
    #[error("lookup timed out after {seconds}s")]
    Timeout {
        /// Timeout duration in seconds
        seconds: u64,
    },

    /// Backend refused the request because of rate limiting
    #[error("rate limit exceeded for {backend}")]
    RateLimited {
        /// Backend identifier
        backend: String,
        /// Seconds until a retry is allowed, if the backend said so
        retry_after_secs: Option<u64>,
    },

    /// Backend rejected the request as malformed
    #[error("lookup rejected by {backend}: {message}")]
    Rejected {
        /// Backend identifier
        backend: String,
        /// Error message from the backend
        message: String,
    },

    /// Backend answered with something that is not a valid result
    #[error("invalid response from {backend}: {message}")]
    InvalidResponse {
        /// Backend identifier
        backend: String,
        /// Error message
        message: String,
    },

    /// Breach store query failed
    #[error("breach store error: {0}")]
    Store(String),

    /// Lookup was cancelled before it resolved
    #[error("lookup cancelled")]
    Cancelled,
}

impl LookupError {
    /// Copy suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::BackendUnavailable { .. } | Self::Store(_) => {
                "The lookup service is unavailable. Please try again later.".to_string()
            }
            Self::Timeout { .. } => "The lookup took too long. Please try again.".to_string(),
            Self::RateLimited {
                retry_after_secs: Some(secs),
                ..
            } => format!("Too many lookups. Please try again in {secs} seconds."),
            Self::RateLimited { .. } => "Too many lookups. Please try again later.".to_string(),
            Self::Rejected { message, .. } => message.clone(),
            Self::InvalidResponse { .. } => {
                "The lookup service returned an unexpected answer.".to_string()
            }
            Self::Cancelled => "The lookup was cancelled.".to_string(),
        }
    }
}

/// Reasons a submission is refused before any lookup starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Input failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A lookup is already in flight for this session
    #[error("a lookup is already pending")]
    AlreadyPending,
}

/// Result type alias for lookup operations.
pub type Result<T> = std::result::Result<T, LookupError>;
