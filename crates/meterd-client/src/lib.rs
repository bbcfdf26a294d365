//! Meterd Client SDK.
//!
//! This crate provides a client library for services to submit usage to the
//! meterd API. Calls are wrapped in a bounded retry loop: transient failures
//! (timeouts, connectivity errors, rate limiting, 5xx responses) are retried
//! with exponential backoff, while terminal outcomes (validation failure,
//! conflict, not-found) surface immediately as typed errors mirroring the
//! server's taxonomy.
//!
//! # Example
//!
//! ```no_run
//! use meterd_client::MeterClient;
//! use meterd_core::UsageSubmission;
//!
//! # async fn example() -> Result<(), meterd_client::ClientError> {
//! let client = MeterClient::new("http://meterd.internal:8080");
//!
//! let customer = client.create_customer("Acme Corp").await?;
//!
//! let record = client
//!     .record_usage(&UsageSubmission {
//!         customer_id: customer.id.to_string(),
//!         service: "CDN Storage".to_string(),
//!         units_consumed: 15,
//!         price_per_unit: 0.02,
//!     })
//!     .await?;
//!
//! println!("Recorded usage under key {}", record.request_id);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, MeterClient};
pub use error::ClientError;
pub use types::{ApiErrorBody, ApiErrorResponse, CreateCustomerRequest};
