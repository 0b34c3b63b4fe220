//! Integration tests for catalog browsing.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use boutique_integration_tests::TestApp;
use serde_json::{Value, json};

fn ids(products: &Value) -> Vec<i64> {
    products
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let resp = app.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.text(), "ok");
}

#[tokio::test]
async fn test_products_default_to_all() {
    let app = TestApp::new();
    let resp = app.get("/products").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(ids(&resp.json()), vec![1, 2, 5, 9, 10]);
}

#[tokio::test]
async fn test_products_filtered_by_category() {
    let app = TestApp::new();

    let electronics: Value = app.get("/products?category=electronics").await.json();
    assert_eq!(ids(&electronics), vec![9, 10]);

    let men: Value = app.get("/products?category=men%20clothing").await.json();
    assert_eq!(ids(&men), vec![1, 2]);

    let none: Value = app.get("/products?category=shoes").await.json();
    assert!(none.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_product_detail_reflects_shopper_state() {
    let app = TestApp::new();

    let before: Value = app.get("/products/5").await.json();
    assert_eq!(before["title"], "Dragon Bracelet");
    assert_eq!(before["price"], "695");
    assert_eq!(before["in_wishlist"], false);
    assert_eq!(before["cart_quantity"], 0);

    app.post_json("/cart/add", json!({"product_id": 5, "quantity": 2})).await;
    app.post_json("/wishlist/toggle", json!({"product_id": 5})).await;

    let after: Value = app.get("/products/5").await.json();
    assert_eq!(after["in_wishlist"], true);
    assert_eq!(after["cart_quantity"], 2);
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let app = TestApp::new();
    let resp = app.get("/products/404").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_categories_menu() {
    let app = TestApp::new();
    let categories: Value = app.get("/categories").await.json();
    let keys: Vec<&str> = categories
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["key"].as_str().unwrap())
        .collect();
    assert_eq!(
        keys,
        vec!["all", "men clothing", "women clothing", "jewelery", "electronics"]
    );
}
