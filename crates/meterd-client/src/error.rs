//! Client error types.

use meterd_core::FieldError;

/// Errors that can occur when using the meterd client.
///
/// Mirrors the server's outcome taxonomy: catching a specific kind here has
/// the same semantic meaning as the server-side classification that
/// produced it.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No response within the request deadline.
    #[error("request timed out")]
    RequestTimeout,

    /// Transport-level connectivity failure.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a 5xx status.
    #[error("invalid server response: HTTP {status}")]
    InvalidServerResponse {
        /// The HTTP status code.
        status: u16,
    },

    /// The server rejected the request due to rate limiting.
    #[error("rate limited")]
    RateLimited,

    /// The submission failed field-level validation.
    #[error("validation failed: {message}")]
    Validation {
        /// Error message from the server.
        message: String,
        /// Field-level details.
        details: Vec<FieldError>,
    },

    /// The referenced resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A usage record with this idempotency key already exists.
    #[error("duplicate usage record: {request_id}")]
    Duplicate {
        /// The idempotency key that collided.
        request_id: String,
    },

    /// Unclassified API error, carrying the raw status.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// Response body could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether a retry could plausibly change the outcome.
    ///
    /// Terminal classifications (validation, conflict, not-found) are never
    /// transient: retrying a request that already produced a duplicate-key
    /// conflict cannot change the result and would mask the real signal.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RequestTimeout
                | Self::Network(_)
                | Self::InvalidServerResponse { .. }
                | Self::RateLimited
        )
    }
}
