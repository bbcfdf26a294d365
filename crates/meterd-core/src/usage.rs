//! Usage submission and record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::idempotency::RequestId;
use crate::ids::{CustomerId, RecordId};

/// A persisted usage record.
///
/// Created exactly once per distinct request id; never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    /// Generated record identifier.
    pub id: RecordId,
    /// The customer this usage belongs to.
    pub customer_id: CustomerId,
    /// Service label, stored verbatim for display.
    pub service: String,
    /// Normalized service code derived from the label.
    pub service_code: String,
    /// Units consumed (always > 0).
    pub units_consumed: i64,
    /// Price per unit (always > 0).
    pub price_per_unit: f64,
    /// Idempotency key; globally unique across all records.
    pub request_id: RequestId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a usage record into the ledger.
///
/// The ledger generates the record id and timestamp at insert time.
#[derive(Debug, Clone)]
pub struct NewUsageRecord {
    /// The customer being charged.
    pub customer_id: CustomerId,
    /// Service label as submitted.
    pub service: String,
    /// Normalized service code.
    pub service_code: String,
    /// Units consumed.
    pub units_consumed: i64,
    /// Price per unit.
    pub price_per_unit: f64,
    /// Derived idempotency key.
    pub request_id: RequestId,
}

/// A field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// The offending field, in wire (camelCase) form.
    pub field: String,
    /// Human-readable description of the constraint.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A raw usage submission as received on the wire.
///
/// The customer reference is kept as the raw string it arrived as: key
/// derivation uses it verbatim, while validation checks it parses as a
/// [`CustomerId`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSubmission {
    /// Reference to an existing customer.
    pub customer_id: String,
    /// Free-text service label.
    pub service: String,
    /// Positive integer units consumed.
    pub units_consumed: i64,
    /// Positive price per unit.
    pub price_per_unit: f64,
}

impl UsageSubmission {
    /// Validate field constraints and parse the customer reference.
    ///
    /// Returns every violated constraint rather than stopping at the first,
    /// so callers can surface a complete field-level error list.
    ///
    /// # Errors
    ///
    /// Returns the list of field errors if any constraint is violated.
    pub fn validate(&self) -> Result<CustomerId, Vec<FieldError>> {
        let mut errors = Vec::new();

        let customer_id = match CustomerId::from_str(&self.customer_id) {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push(FieldError::new(
                    "customerId",
                    "must be a valid customer identifier",
                ));
                None
            }
        };

        if self.service.trim().is_empty() {
            errors.push(FieldError::new("service", "must not be blank"));
        }

        if self.units_consumed <= 0 {
            errors.push(FieldError::new(
                "unitsConsumed",
                "must be a positive integer",
            ));
        }

        if !(self.price_per_unit.is_finite() && self.price_per_unit > 0.0) {
            errors.push(FieldError::new("pricePerUnit", "must be greater than zero"));
        }

        match customer_id {
            Some(id) if errors.is_empty() => Ok(id),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> UsageSubmission {
        UsageSubmission {
            customer_id: CustomerId::generate().to_string(),
            service: "CDN Storage".to_string(),
            units_consumed: 15,
            price_per_unit: 0.02,
        }
    }

    #[test]
    fn valid_submission_passes() {
        let sub = submission();
        let id = sub.validate().unwrap();
        assert_eq!(id.to_string(), sub.customer_id);
    }

    #[test]
    fn malformed_customer_id_fails() {
        let sub = UsageSubmission {
            customer_id: "not-a-uuid".to_string(),
            ..submission()
        };
        let errors = sub.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "customerId");
    }

    #[test]
    fn non_positive_units_fail() {
        for units in [0, -3] {
            let sub = UsageSubmission {
                units_consumed: units,
                ..submission()
            };
            let errors = sub.validate().unwrap_err();
            assert!(errors.iter().any(|e| e.field == "unitsConsumed"));
        }
    }

    #[test]
    fn non_positive_price_fails() {
        for price in [0.0, -0.5, f64::NAN] {
            let sub = UsageSubmission {
                price_per_unit: price,
                ..submission()
            };
            let errors = sub.validate().unwrap_err();
            assert!(errors.iter().any(|e| e.field == "pricePerUnit"));
        }
    }

    #[test]
    fn blank_service_fails() {
        let sub = UsageSubmission {
            service: "   ".to_string(),
            ..submission()
        };
        let errors = sub.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "service"));
    }

    #[test]
    fn all_violations_reported_together() {
        let sub = UsageSubmission {
            customer_id: "bogus".to_string(),
            service: String::new(),
            units_consumed: 0,
            price_per_unit: -1.0,
        };
        let errors = sub.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn usage_record_serializes_camel_case() {
        let record = UsageRecord {
            id: RecordId::generate(),
            customer_id: CustomerId::generate(),
            service: "CDN Storage".to_string(),
            service_code: "CDN_STORAGE".to_string(),
            units_consumed: 15,
            price_per_unit: 0.02,
            request_id: RequestId::from_hex("ab".repeat(32)),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("requestId").is_some());
        assert!(json.get("unitsConsumed").is_some());
        assert!(json.get("pricePerUnit").is_some());
        assert!(json.get("serviceCode").is_some());
    }
}
