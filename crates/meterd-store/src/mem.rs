//! In-memory storage backend for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use meterd_core::{Customer, CustomerId, NewUsageRecord, RecordId, UsageRecord};

use crate::error::{Result, StoreError};
use crate::Store;

/// In-memory ledger store.
///
/// Enforces the same invariants as the PostgreSQL schema: the request-id
/// unique index and the customer foreign key. The write lock gives inserts
/// the same single-winner semantics the database constraint provides.
#[derive(Debug, Default)]
pub struct MemStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    customers: HashMap<CustomerId, Customer>,
    records_by_request_id: HashMap<String, UsageRecord>,
}

impl MemStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted usage records.
    pub async fn usage_record_count(&self) -> usize {
        self.inner.read().await.records_by_request_id.len()
    }
}

#[async_trait]
impl Store for MemStore {
    async fn create_customer(&self, name: &str) -> Result<Customer> {
        let customer = Customer::new(name);
        self.inner
            .write()
            .await
            .customers
            .insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn get_customer(&self, id: &CustomerId) -> Result<Option<Customer>> {
        Ok(self.inner.read().await.customers.get(id).cloned())
    }

    async fn create_usage_record(&self, new: &NewUsageRecord) -> Result<UsageRecord> {
        let mut inner = self.inner.write().await;

        if inner
            .records_by_request_id
            .contains_key(new.request_id.as_str())
        {
            return Err(StoreError::DuplicateRequest {
                request_id: new.request_id.to_string(),
            });
        }

        // Mirrors the foreign-key constraint on usage_records.customer_id.
        if !inner.customers.contains_key(&new.customer_id) {
            return Err(StoreError::NotFound {
                entity: "customer",
                id: new.customer_id.to_string(),
            });
        }

        let record = UsageRecord {
            id: RecordId::generate(),
            customer_id: new.customer_id,
            service: new.service.clone(),
            service_code: new.service_code.clone(),
            units_consumed: new.units_consumed,
            price_per_unit: new.price_per_unit,
            request_id: new.request_id.clone(),
            created_at: Utc::now(),
        };

        inner
            .records_by_request_id
            .insert(record.request_id.to_string(), record.clone());
        Ok(record)
    }
}
