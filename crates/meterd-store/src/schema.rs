//! Database schema definitions.
//!
//! `usage_records.request_id` holds the idempotency key and carries the
//! at-most-once invariant via its named unique constraint. The constraint
//! name matters: insert-error classification matches it exactly so that a
//! unique violation on some other column is never mistaken for a duplicate
//! submission.

/// Name of the unique constraint on `usage_records.request_id`.
pub const REQUEST_ID_CONSTRAINT: &str = "usage_records_request_id_key";

/// DDL for the `customers` table.
pub const CREATE_CUSTOMERS: &str = "\
CREATE TABLE IF NOT EXISTS customers (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)";

/// DDL for the `usage_records` table.
pub const CREATE_USAGE_RECORDS: &str = "\
CREATE TABLE IF NOT EXISTS usage_records (
    id UUID PRIMARY KEY,
    customer_id UUID NOT NULL REFERENCES customers(id),
    service TEXT NOT NULL,
    service_code TEXT NOT NULL,
    units_consumed BIGINT NOT NULL CHECK (units_consumed > 0),
    price_per_unit DOUBLE PRECISION NOT NULL CHECK (price_per_unit > 0),
    request_id TEXT NOT NULL CONSTRAINT usage_records_request_id_key UNIQUE,
    created_at TIMESTAMPTZ NOT NULL
)";

/// All DDL statements in creation order.
#[must_use]
pub fn all_statements() -> Vec<&'static str> {
    vec![CREATE_CUSTOMERS, CREATE_USAGE_RECORDS]
}
