//! API error types and responses.
//!
//! [`ApiError`] is the outcome classifier: every failure the service can
//! produce maps to a fixed status/code/body. All error bodies share the
//! shape `{status: "error", statusCode, error: {code, message, details?}}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use meterd_core::FieldError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request body failed field-level validation.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Request body was malformed (not parseable as the expected shape).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A usage record with this idempotency key already exists.
    #[error("duplicate usage record: {request_id}")]
    Duplicate {
        /// The idempotency key that collided.
        request_id: String,
    },

    /// Internal server error; the cause is logged, never sent to the caller.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    status: &'static str,
    status_code: u16,
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Invalid usage submission".to_string(),
                serde_json::to_value(errors).ok(),
            ),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            Self::Duplicate { request_id } => (
                StatusCode::CONFLICT,
                "DUPLICATE_RECORD",
                format!("Usage record already exists for request {request_id}"),
                Some(serde_json::json!({ "requestId": request_id })),
            ),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            status: "error",
            status_code: status.as_u16(),
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<meterd_store::StoreError> for ApiError {
    fn from(err: meterd_store::StoreError) -> Self {
        match err {
            meterd_store::StoreError::NotFound { entity, id } => {
                Self::NotFound(format!("{entity} not found: {id}"))
            }
            meterd_store::StoreError::DuplicateRequest { request_id } => {
                Self::Duplicate { request_id }
            }
            meterd_store::StoreError::Database(cause) => Self::Internal(cause.to_string()),
        }
    }
}
