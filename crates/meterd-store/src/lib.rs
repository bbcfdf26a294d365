//! Storage layer for the meterd usage ledger.
//!
//! This crate provides durable, uniquely-keyed persistence for customers and
//! usage records. The correctness-critical piece is the unique index on
//! `usage_records.request_id`: concurrent submissions carrying the same
//! idempotency key race at the storage layer, and the constraint admits
//! exactly one writer. The losing insert is reclassified as
//! [`StoreError::DuplicateRequest`] so callers can distinguish "already
//! recorded" from "storage broken".
//!
//! Two backends are provided:
//!
//! - [`PgStore`]: PostgreSQL via sqlx, the production backend.
//! - [`MemStore`]: in-memory implementation enforcing the same invariants,
//!   for tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod mem;
pub mod pg;
pub mod schema;

pub use error::{Result, StoreError};
pub use mem::MemStore;
pub use pg::PgStore;

use async_trait::async_trait;
use meterd_core::{Customer, CustomerId, NewUsageRecord, UsageRecord};

/// The storage trait defining all ledger operations.
///
/// Abstracts the storage layer so the service can run against PostgreSQL in
/// production and an in-memory implementation in tests.
#[async_trait]
pub trait Store: Send + Sync {
    /// Create a customer with the given display name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn create_customer(&self, name: &str) -> Result<Customer>;

    /// Get a customer by id.
    ///
    /// Absence is a normal outcome: a missing row yields `Ok(None)`, not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_customer(&self, id: &CustomerId) -> Result<Option<Customer>>;

    /// Insert a usage record keyed by its idempotency key.
    ///
    /// This is a single insert attempt with no existence pre-check; a
    /// check-then-insert would reintroduce the duplicate race this layer
    /// exists to prevent. Uniqueness is enforced by the storage engine.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateRequest`] if a record with the same request
    ///   id already exists.
    /// - [`StoreError::Database`] for any other storage failure.
    async fn create_usage_record(&self, new: &NewUsageRecord) -> Result<UsageRecord>;
}
