//! Meterd HTTP API service.
//!
//! This crate provides the HTTP API for the meterd usage ledger:
//!
//! - Customer creation
//! - Usage submission with deterministic idempotency
//! - Liveness probe
//!
//! Every submission flows through a fixed pipeline: validate, resolve the
//! customer, normalize the service label, derive the idempotency key, then a
//! single insert. Storage outcomes are reclassified into the wire error
//! contract by [`ApiError`]. No retries happen server-side; retrying belongs
//! to the client, where the derived key already makes it safe.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers need async for consistency

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use extract::ApiJson;
pub use routes::create_router;
pub use state::AppState;
