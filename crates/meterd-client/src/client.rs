//! Meterd HTTP client implementation.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use meterd_core::{Customer, FieldError, UsageRecord, UsageSubmission};

use crate::error::ClientError;
use crate::types::{ApiErrorResponse, CreateCustomerRequest, Envelope};

/// Meterd API client.
///
/// Provides methods for creating customers and recording usage, with bounded
/// retry and exponential backoff around transient failures.
#[derive(Debug, Clone)]
pub struct MeterClient {
    client: Client,
    base_url: String,
    max_retries: u32,
    initial_backoff_ms: u64,
    max_backoff_ms: u64,
}

impl MeterClient {
    /// Create a new meterd client with default options.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the meterd service (e.g., `"http://meterd:8080"`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new meterd client with custom options.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    #[must_use]
    pub fn with_options(base_url: impl Into<String>, options: ClientOptions) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_retries: options.max_retries,
            initial_backoff_ms: options.initial_backoff_ms,
            max_backoff_ms: options.max_backoff_ms,
        }
    }

    /// Create a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create_customer(&self, name: impl Into<String>) -> Result<Customer, ClientError> {
        let request = CreateCustomerRequest { name: name.into() };
        self.post_with_retry("/customers", &request).await
    }

    /// Record a usage submission.
    ///
    /// Identical submissions derive the same idempotency key server-side, so
    /// retrying this call can never create a second record; a resubmission
    /// of an already-recorded payload fails with [`ClientError::Duplicate`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn record_usage(
        &self,
        submission: &UsageSubmission,
    ) -> Result<UsageRecord, ClientError> {
        self.post_with_retry("/usage", submission).await
    }

    /// POST a body and retry transient failures with exponential backoff.
    async fn post_with_retry<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        let mut attempt: u32 = 0;
        let mut backoff_ms = self.initial_backoff_ms;

        loop {
            match self.post_once(&url, body).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::debug!(
                        url = %url,
                        attempt = %attempt,
                        backoff_ms = %backoff_ms,
                        error = %e,
                        "Transient failure, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms = (backoff_ms * 2).min(self.max_backoff_ms);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Perform a single POST attempt and classify the outcome.
    async fn post_once<B, T>(&self, url: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(classify_transport_error)?;

        if status.is_success() {
            let envelope: Envelope<T> = serde_json::from_str(&text)?;
            return Ok(envelope.data);
        }

        Err(classify_error_response(status, &text))
    }
}

/// Classify an error on the transport itself (no usable response received).
fn classify_transport_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::RequestTimeout
    } else {
        ClientError::Network(err.to_string())
    }
}

/// Classify a non-success response into the client taxonomy.
///
/// Order matters: server-side status first, then rate limiting, then the
/// structured client-error body, falling back to an unclassified error
/// carrying the raw status.
fn classify_error_response(status: StatusCode, body: &str) -> ClientError {
    if status.is_server_error() {
        return ClientError::InvalidServerResponse {
            status: status.as_u16(),
        };
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return ClientError::RateLimited;
    }

    let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(body) else {
        return ClientError::Api {
            code: "unknown".to_string(),
            message: format!("HTTP {status}"),
            status: status.as_u16(),
        };
    };

    let code = api_error.error.code;
    let message = api_error.error.message;
    let details = api_error.error.details;

    match code.as_str() {
        "DUPLICATE_RECORD" => {
            let request_id = details
                .as_ref()
                .and_then(|d| d.get("requestId"))
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string();
            ClientError::Duplicate { request_id }
        }
        "VALIDATION_ERROR" => {
            let details = details
                .and_then(|d| serde_json::from_value::<Vec<FieldError>>(d).ok())
                .unwrap_or_default();
            ClientError::Validation { message, details }
        }
        "NOT_FOUND" => ClientError::NotFound(message),
        _ => ClientError::Api {
            code,
            message,
            status: status.as_u16(),
        },
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// Maximum additional attempts after the first failure (default: 3).
    pub max_retries: u32,
    /// Initial backoff between attempts, doubling each retry (default: 100ms).
    pub initial_backoff_ms: u64,
    /// Upper bound on the backoff interval (default: 5000ms).
    pub max_backoff_ms: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            max_retries: 3,
            initial_backoff_ms: 100,
            max_backoff_ms: 5000,
        }
    }
}
