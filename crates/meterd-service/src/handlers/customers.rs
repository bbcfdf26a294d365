//! Customer handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use meterd_core::{Customer, FieldError};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::response::{self, ApiSuccess};
use crate::state::AppState;

/// Customer creation request.
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    /// Display name.
    pub name: String,
}

/// Create a customer.
pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<ApiSuccess<Customer>>), ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::Validation(vec![FieldError::new(
            "name",
            "must not be blank",
        )]));
    }

    let customer = state.store.create_customer(body.name.trim()).await?;

    tracing::info!(customer_id = %customer.id, "Customer registered");

    Ok(response::created(customer))
}
