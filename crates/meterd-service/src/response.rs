//! Success response envelope.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// JSON success envelope: `{status: "success", statusCode, data}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSuccess<T> {
    status: &'static str,
    status_code: u16,
    data: T,
}

impl<T: Serialize> ApiSuccess<T> {
    /// Wrap `data` with the given status code.
    #[must_use]
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status: "success",
            status_code: status_code.as_u16(),
            data,
        }
    }
}

/// Build a `201 Created` envelope response.
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<ApiSuccess<T>>) {
    (
        StatusCode::CREATED,
        Json(ApiSuccess::new(StatusCode::CREATED, data)),
    )
}
