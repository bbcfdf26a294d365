//! Wire types for the meterd API.

use serde::{Deserialize, Serialize};

/// Customer creation request body.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCustomerRequest {
    /// Display name.
    pub name: String,
}

/// Success envelope: `{status, statusCode, data}`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Error envelope as returned by the service.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    /// The structured error payload.
    pub error: ApiErrorBody,
}

/// Structured error payload.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Code-specific details (field list, offending key, ...).
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
