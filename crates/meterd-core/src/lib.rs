//! Core types and utilities for the meterd usage ledger.
//!
//! This crate provides the foundational types used throughout meterd:
//!
//! - **Identifiers**: `CustomerId`, `RecordId`
//! - **Customers**: `Customer`
//! - **Usage**: `UsageSubmission`, `NewUsageRecord`, `UsageRecord`, `FieldError`
//! - **Idempotency**: `RequestId`, `derive_request_id`, `to_service_code`
//!
//! # Idempotency
//!
//! A usage submission is fingerprinted by a deterministic SHA-256 digest of
//! its business fields (customer reference, service label, service code,
//! units, price). Time of submission is deliberately excluded so that a
//! retried or resubmitted request maps to the same [`RequestId`] and is
//! rejected by the ledger's unique index instead of being stored twice.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod customer;
pub mod idempotency;
pub mod ids;
pub mod usage;

pub use customer::Customer;
pub use idempotency::{derive_request_id, to_service_code, RequestId};
pub use ids::{CustomerId, IdError, RecordId};
pub use usage::{FieldError, NewUsageRecord, UsageRecord, UsageSubmission};
