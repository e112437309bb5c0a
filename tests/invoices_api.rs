//! End-to-end tests for the invoices endpoints, run against the
//! in-memory store through the full router.

use axum::http::StatusCode;
use axum_test::TestServer;
use biztime::prelude::*;
use chrono::Utc;
use serde_json::{Value, json};
use std::sync::Arc;

fn create_test_server() -> TestServer {
    let state = AppState::from_store(Arc::new(InMemoryStore::new()));
    TestServer::new(build_router(state))
}

/// Create the company most tests bill against.
async fn seed_company(server: &TestServer) {
    server
        .post("/companies")
        .json(&json!({ "name": "Apple Inc", "description": "Maker of iPhones" }))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_list_invoices_empty() {
    let server = create_test_server();

    let response = server.get("/invoices").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body, json!({ "invoices": [] }));
}

#[tokio::test]
async fn test_create_invoice_defaults() {
    let server = create_test_server();
    seed_company(&server).await;

    let response = server
        .post("/invoices")
        .json(&json!({ "comp_code": "apple-inc", "amt": 100 }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    let invoice = &body["invoice"];
    assert_eq!(invoice["id"], 1);
    assert_eq!(invoice["comp_code"], "apple-inc");
    assert_eq!(invoice["amt"], json!(100.0));
    assert_eq!(invoice["paid"], false);
    assert_eq!(invoice["paid_date"], Value::Null);
    assert_eq!(invoice["add_date"], Utc::now().date_naive().to_string());
}

#[tokio::test]
async fn test_create_invoice_zero_amount_is_422() {
    let server = create_test_server();
    seed_company(&server).await;

    // Zero falls on the rejected side of the amount check.
    let response = server
        .post("/invoices")
        .json(&json!({ "comp_code": "apple-inc", "amt": 0 }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let response = server
        .post("/invoices")
        .json(&json!({ "comp_code": "apple-inc", "amt": 0.01 }))
        .await;
    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_invoice_missing_comp_code_is_422() {
    let server = create_test_server();

    let response = server.post("/invoices").json(&json!({ "amt": 100 })).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert_eq!(body["error"]["status"], 422);
}

#[tokio::test]
async fn test_get_invoice_embeds_company() {
    let server = create_test_server();
    seed_company(&server).await;
    server
        .post("/invoices")
        .json(&json!({ "comp_code": "apple-inc", "amt": 250 }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.get("/invoices/1").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let invoice = &body["invoice"];
    assert_eq!(invoice["id"], 1);
    assert_eq!(invoice["amt"], json!(250.0));
    assert_eq!(
        invoice["company"],
        json!({
            "code": "apple-inc",
            "name": "Apple Inc",
            "description": "Maker of iPhones"
        })
    );
    // The bare foreign key is replaced by the embedded company.
    assert!(invoice.get("comp_code").is_none());
}

#[tokio::test]
async fn test_get_unknown_invoice_is_404() {
    let server = create_test_server();

    let response = server.get("/invoices/99").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"]["status"], 404);
}

#[tokio::test]
async fn test_update_invoice_paid_sets_paid_date() {
    let server = create_test_server();
    seed_company(&server).await;
    server
        .post("/invoices")
        .json(&json!({ "comp_code": "apple-inc", "amt": 100 }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .put("/invoices/1")
        .json(&json!({ "amt": 600, "paid": true }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let invoice = &body["invoice"];
    assert_eq!(invoice["amt"], json!(600.0));
    assert_eq!(invoice["paid"], true);
    assert_eq!(invoice["paid_date"], Utc::now().date_naive().to_string());
}

#[tokio::test]
async fn test_update_invoice_unpaid_clears_paid_date() {
    let server = create_test_server();
    seed_company(&server).await;
    server
        .post("/invoices")
        .json(&json!({ "comp_code": "apple-inc", "amt": 100 }))
        .await
        .assert_status(StatusCode::CREATED);

    server
        .put("/invoices/1")
        .json(&json!({ "amt": 100, "paid": true }))
        .await
        .assert_status_ok();

    // Un-paying clears the date even though it was previously set.
    let response = server
        .put("/invoices/1")
        .json(&json!({ "amt": 100, "paid": false }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["invoice"]["paid"], false);
    assert_eq!(body["invoice"]["paid_date"], Value::Null);
}

#[tokio::test]
async fn test_update_invoice_requires_boolean_paid() {
    let server = create_test_server();
    seed_company(&server).await;
    server
        .post("/invoices")
        .json(&json!({ "comp_code": "apple-inc", "amt": 100 }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.put("/invoices/1").json(&json!({ "amt": 600 })).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_invoice_zero_amount_is_422() {
    let server = create_test_server();
    seed_company(&server).await;
    server
        .post("/invoices")
        .json(&json!({ "comp_code": "apple-inc", "amt": 100 }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .put("/invoices/1")
        .json(&json!({ "amt": 0, "paid": true }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_unknown_invoice_is_404() {
    let server = create_test_server();

    let response = server
        .put("/invoices/99")
        .json(&json!({ "amt": 600, "paid": true }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_invoice_then_get_is_404() {
    let server = create_test_server();
    seed_company(&server).await;
    server
        .post("/invoices")
        .json(&json!({ "comp_code": "apple-inc", "amt": 100 }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.delete("/invoices/1").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body, json!({ "status": "deleted" }));

    server.get("/invoices/1").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_invoice_is_404() {
    let server = create_test_server();

    let response = server.delete("/invoices/99").await;
    response.assert_status(StatusCode::NOT_FOUND);
}
