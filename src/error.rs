//! Venice error types

use std::time::Duration;

/// Venice client error types
#[derive(Debug, thiserror::Error)]
pub enum VeniceError {
    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    // Request-level errors (no chunk has been produced yet)
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("request failed ({status}): {body}")]
    RequestFailed { status: u16, body: String },

    #[error("rate limited, retry after {retry_after:?}: {body}")]
    RateLimited {
        retry_after: Option<Duration>,
        body: String,
    },

    #[error("response had no body")]
    EmptyBody,

    // Streaming errors
    /// The byte stream failed after the response started. Any chunks already
    /// yielded are valid partial output.
    #[error("stream interrupted: {0}")]
    TransportInterrupted(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl VeniceError {
    /// Whether re-issuing the request might succeed.
    ///
    /// Mid-stream interruptions are not transient here: retries re-issue the
    /// call, they never resume a partially consumed stream.
    pub fn is_transient(&self) -> bool {
        match self {
            VeniceError::Http(_) | VeniceError::RateLimited { .. } | VeniceError::EmptyBody => {
                true
            }
            VeniceError::RequestFailed { status, .. } => *status == 408 || *status >= 500,
            _ => false,
        }
    }

    /// Server-provided delay hint, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            VeniceError::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// True when the failure happened before any output was produced.
    ///
    /// Callers use this to choose between "no response" messaging and
    /// "partial response, then cut off".
    pub fn produced_no_response(&self) -> bool {
        !matches!(self, VeniceError::TransportInterrupted(_))
    }
}

/// Result type alias for Venice operations
pub type Result<T> = std::result::Result<T, VeniceError>;
