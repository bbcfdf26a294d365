//! Customer creation integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

#[tokio::test]
async fn create_customer_success() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/customers")
        .json(&json!({ "name": "Acme Corp" }))
        .await;

    assert_eq!(response.status_code().as_u16(), 201);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["data"]["name"], "Acme Corp");
    assert!(body["data"]["id"].as_str().is_some());
    assert!(body["data"]["createdAt"].as_str().is_some());
}

#[tokio::test]
async fn blank_name_rejected() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/customers")
        .json(&json!({ "name": "   " }))
        .await;

    assert_eq!(response.status_code().as_u16(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_body_rejected() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/customers")
        .json(&json!({ "label": "Acme Corp" }))
        .await;

    assert_eq!(response.status_code().as_u16(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "error");
}
