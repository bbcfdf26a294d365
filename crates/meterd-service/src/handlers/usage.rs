//! Usage submission handler.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use meterd_core::{derive_request_id, to_service_code, NewUsageRecord, UsageRecord, UsageSubmission};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::response::{self, ApiSuccess};
use crate::state::AppState;

/// Record a usage submission.
///
/// The pipeline runs strictly in order, each failure terminal:
/// validate, resolve the customer, normalize the service label, derive the
/// idempotency key, insert. The insert is a single attempt; a duplicate key
/// surfaces as 409 and any other storage failure as 500. No retries here —
/// a retried write is exactly the duplicate the key derivation makes safe
/// for the client to perform.
pub async fn record_usage(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<UsageSubmission>,
) -> Result<(StatusCode, Json<ApiSuccess<UsageRecord>>), ApiError> {
    let customer_id = body.validate().map_err(ApiError::Validation)?;

    let customer = state
        .store
        .get_customer(&customer_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("customer not found: {customer_id}")))?;

    let service_code = to_service_code(&body.service);

    // The key is derived from the raw customer reference as submitted, not
    // the parsed form.
    let request_id = derive_request_id(
        &body.customer_id,
        &body.service,
        &service_code,
        body.units_consumed,
        body.price_per_unit,
    );

    tracing::debug!(
        customer_id = %customer.id,
        service_code = %service_code,
        request_id = %request_id,
        "Processing usage submission"
    );

    let record = state
        .store
        .create_usage_record(&NewUsageRecord {
            customer_id: customer.id,
            service: body.service.clone(),
            service_code,
            units_consumed: body.units_consumed,
            price_per_unit: body.price_per_unit,
            request_id,
        })
        .await?;

    tracing::info!(
        record_id = %record.id,
        customer_id = %record.customer_id,
        request_id = %record.request_id,
        "Usage recorded"
    );

    Ok(response::created(record))
}
