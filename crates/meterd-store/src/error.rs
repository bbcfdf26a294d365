//! Error types for meterd storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The entity kind that was looked up.
        entity: &'static str,
        /// The identifier that did not match.
        id: String,
    },

    /// A usage record with this request id already exists.
    #[error("duplicate usage record: {request_id}")]
    DuplicateRequest {
        /// The idempotency key that collided.
        request_id: String,
    },

    /// Any other database failure; the cause is retained for logging.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
