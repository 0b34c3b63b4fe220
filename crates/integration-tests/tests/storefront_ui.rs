//! Integration tests for UI state, notifications and request ids.

#![allow(clippy::unwrap_used)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use boutique_integration_tests::TestApp;
use boutique_storefront::middleware::REQUEST_ID_HEADER;
use serde_json::{Value, json};

#[tokio::test]
async fn test_cart_drawer() {
    let app = TestApp::new();

    let ui: Value = app.get("/ui").await.json();
    assert_eq!(ui["cart_open"], false);

    let ui: Value = app.post("/ui/cart/toggle").await.json();
    assert_eq!(ui["cart_open"], true);

    let ui: Value = app.post("/ui/cart/open").await.json();
    assert_eq!(ui["cart_open"], true);

    let ui: Value = app.post("/ui/cart/close").await.json();
    assert_eq!(ui["cart_open"], false);
}

#[tokio::test]
async fn test_notification_hide_keeps_message() {
    let app = TestApp::new();

    let initial: Value = app.get("/notification").await.json();
    assert_eq!(initial["open"], false);

    app.post_json("/cart/add", json!({"product_id": 1})).await;
    let hidden: Value = app.post("/notification/hide").await.json();
    assert_eq!(hidden["open"], false);
    assert_eq!(hidden["message"], "Product added to cart");
}

#[tokio::test(start_paused = true)]
async fn test_notification_auto_dismisses() {
    let app = TestApp::new();
    app.post_json("/cart/add", json!({"product_id": 1})).await;
    assert!(app.state.notifications().is_open());

    tokio::time::sleep(std::time::Duration::from_millis(3001)).await;
    tokio::task::yield_now().await;
    assert!(!app.state.notifications().is_open());
}

#[tokio::test]
async fn test_request_id_generated() {
    let app = TestApp::new();
    let resp = app.get("/health").await;
    let id = resp.headers.get(REQUEST_ID_HEADER).unwrap();
    assert!(!id.is_empty());
}

#[tokio::test]
async fn test_request_id_echoed() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/health")
        .header(REQUEST_ID_HEADER, "abc-123")
        .body(Body::empty())
        .unwrap();

    let resp = app.request(request).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.headers.get(REQUEST_ID_HEADER).unwrap(), "abc-123");
}
