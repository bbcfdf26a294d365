//! PostgreSQL storage backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use meterd_core::{Customer, CustomerId, NewUsageRecord, RecordId, RequestId, UsageRecord};

use crate::error::{Result, StoreError};
use crate::schema;
use crate::Store;

/// SQLSTATE class for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Maximum connections in the pool.
const MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL-backed ledger store.
///
/// Owns the connection pool: created at service start, released at shutdown.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to the database at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection pool cannot be established.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool (used when the caller manages pool options).
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the schema, creating tables if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if any DDL statement fails.
    pub async fn ensure_schema(&self) -> Result<()> {
        for statement in schema::all_statements() {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::debug!("Schema ensured");
        Ok(())
    }
}

/// Raw `customers` row.
#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: uuid::Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: CustomerId::from_uuid(row.id),
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Raw `usage_records` row.
#[derive(sqlx::FromRow)]
struct UsageRecordRow {
    id: uuid::Uuid,
    customer_id: uuid::Uuid,
    service: String,
    service_code: String,
    units_consumed: i64,
    price_per_unit: f64,
    request_id: String,
    created_at: DateTime<Utc>,
}

impl From<UsageRecordRow> for UsageRecord {
    fn from(row: UsageRecordRow) -> Self {
        Self {
            id: RecordId::from_uuid(row.id),
            customer_id: CustomerId::from_uuid(row.customer_id),
            service: row.service,
            service_code: row.service_code,
            units_consumed: row.units_consumed,
            price_per_unit: row.price_per_unit,
            request_id: RequestId::from_hex(row.request_id),
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_customer(&self, name: &str) -> Result<Customer> {
        let customer = Customer::new(name);

        sqlx::query(
            "INSERT INTO customers (id, name, created_at, updated_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(customer.id.as_uuid())
        .bind(&customer.name)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    async fn get_customer(&self, id: &CustomerId) -> Result<Option<Customer>> {
        let row: Option<CustomerRow> = sqlx::query_as(
            "SELECT id, name, created_at, updated_at FROM customers WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn create_usage_record(&self, new: &NewUsageRecord) -> Result<UsageRecord> {
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

        sqlx::query(
            "INSERT INTO usage_records \
             (id, customer_id, service, service_code, units_consumed, price_per_unit, request_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(record.id.as_uuid())
        .bind(record.customer_id.as_uuid())
        .bind(&record.service)
        .bind(&record.service_code)
        .bind(record.units_consumed)
        .bind(record.price_per_unit)
        .bind(record.request_id.as_str())
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_insert_error(e, &record.request_id))?;

        tracing::info!(
            record_id = %record.id,
            customer_id = %record.customer_id,
            request_id = %record.request_id,
            "Usage record created"
        );
        Ok(record)
    }
}

/// Reclassify an insert failure.
///
/// Only a unique violation on the `request_id` constraint itself becomes
/// `DuplicateRequest`; a unique or foreign-key violation on any other column
/// stays a generic database error.
fn classify_insert_error(err: sqlx::Error, request_id: &RequestId) -> StoreError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
            && db_err.constraint() == Some(schema::REQUEST_ID_CONSTRAINT)
        {
            return StoreError::DuplicateRequest {
                request_id: request_id.to_string(),
            };
        }
    }
    StoreError::Database(err)
}
