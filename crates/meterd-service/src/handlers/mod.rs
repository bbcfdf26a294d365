//! HTTP request handlers.

pub mod customers;
pub mod health;
pub mod usage;
