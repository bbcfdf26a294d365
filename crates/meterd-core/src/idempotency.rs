//! Idempotency-key derivation and service-code normalization.
//!
//! The request id is a deterministic fingerprint of a submission's business
//! fields. Submission time is never part of the input, so a retried or
//! duplicated request always derives the same id and collides on the
//! ledger's unique index instead of creating a second record.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Delimiter between fields in the canonical digest input.
const FIELD_DELIMITER: char = '|';

/// A deterministic idempotency key: 64 lowercase hex characters (SHA-256).
///
/// At most one persisted usage record may exist per key, ever.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Wrap an already-derived key (e.g. one echoed back by the server).
    #[must_use]
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RequestId> for String {
    fn from(id: RequestId) -> Self {
        id.0
    }
}

/// Normalize a service label into a service code.
///
/// Uppercases the label, collapses every maximal run of non-alphanumeric
/// characters into a single underscore, and strips leading/trailing
/// underscores. Empty input yields an empty string.
///
/// Formatting-only differences in the label (extra whitespace, punctuation)
/// collapse to the same code, while the label itself is stored verbatim for
/// display.
#[must_use]
pub fn to_service_code(label: &str) -> String {
    let mut code = String::with_capacity(label.len());
    let mut pending_separator = false;

    for ch in label.to_uppercase().chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !code.is_empty() {
                code.push('_');
            }
            pending_separator = false;
            code.push(ch);
        } else {
            pending_separator = true;
        }
    }

    code
}

/// Derive the idempotency key for a usage submission.
///
/// Pure and deterministic: the five fields are joined in a fixed order with
/// a fixed delimiter and hashed with SHA-256. The customer reference is used
/// raw, exactly as the caller supplied it.
#[must_use]
pub fn derive_request_id(
    customer_ref: &str,
    service: &str,
    service_code: &str,
    units_consumed: i64,
    price_per_unit: f64,
) -> RequestId {
    let canonical = format!(
        "{customer_ref}{FIELD_DELIMITER}{service}{FIELD_DELIMITER}{service_code}{FIELD_DELIMITER}{units_consumed}{FIELD_DELIMITER}{price_per_unit}"
    );

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    RequestId(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_code_basic() {
        assert_eq!(to_service_code("Database Hosting"), "DATABASE_HOSTING");
    }

    #[test]
    fn service_code_collapses_punctuation_runs() {
        assert_eq!(to_service_code(" !Database Hosting! "), "DATABASE_HOSTING");
        assert_eq!(to_service_code("cdn -- storage"), "CDN_STORAGE");
    }

    #[test]
    fn service_code_empty_input() {
        assert_eq!(to_service_code(""), "");
        assert_eq!(to_service_code("   !!!   "), "");
    }

    #[test]
    fn service_code_idempotent() {
        for label in ["Database Hosting", " !Database Hosting! ", "a-b_c", ""] {
            let once = to_service_code(label);
            assert_eq!(to_service_code(&once), once);
        }
    }

    #[test]
    fn derive_is_deterministic() {
        let a = derive_request_id("cust-1", "CDN Storage", "CDN_STORAGE", 15, 0.02);
        let b = derive_request_id("cust-1", "CDN Storage", "CDN_STORAGE", 15, 0.02);
        assert_eq!(a, b);
    }

    #[test]
    fn derive_produces_64_char_lowercase_hex() {
        let id = derive_request_id("cust-1", "CDN Storage", "CDN_STORAGE", 15, 0.02);
        assert_eq!(id.as_str().len(), 64);
        assert!(id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn derive_differs_when_any_field_differs() {
        let base = derive_request_id("cust-1", "CDN Storage", "CDN_STORAGE", 15, 0.02);

        assert_ne!(
            base,
            derive_request_id("cust-2", "CDN Storage", "CDN_STORAGE", 15, 0.02)
        );
        assert_ne!(
            base,
            derive_request_id("cust-1", "CDN storage", "CDN_STORAGE", 15, 0.02)
        );
        assert_ne!(
            base,
            derive_request_id("cust-1", "CDN Storage", "CDN_STORAGE", 16, 0.02)
        );
        assert_ne!(
            base,
            derive_request_id("cust-1", "CDN Storage", "CDN_STORAGE", 15, 0.03)
        );
    }

    #[test]
    fn derive_ignores_time() {
        // Nothing time-dependent feeds the digest; two derivations separated
        // by real time must agree.
        let first = derive_request_id("cust-1", "Compute", "COMPUTE", 1, 1.0);
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = derive_request_id("cust-1", "Compute", "COMPUTE", 1, 1.0);
        assert_eq!(first, second);
    }
}
