//! Common test utilities for meterd integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;

use meterd_service::{create_router, AppState, ServiceConfig};
use meterd_store::{MemStore, Store};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Direct handle on the backing store, for storage-level assertions.
    pub store: Arc<MemStore>,
}

impl TestHarness {
    /// Create a new test harness with a fresh in-memory store.
    pub fn new() -> Self {
        let store = Arc::new(MemStore::new());

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            database_url: "postgres://unused".into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(Arc::clone(&store) as Arc<dyn Store>, config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, store }
    }

    /// Create a customer through the API and return its id.
    pub async fn create_customer(&self, name: &str) -> String {
        let response = self
            .server
            .post("/customers")
            .json(&serde_json::json!({ "name": name }))
            .await;

        assert_eq!(response.status_code().as_u16(), 201);
        let body: serde_json::Value = response.json();
        body["data"]["id"].as_str().expect("customer id").to_string()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
