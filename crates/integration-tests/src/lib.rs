//! Integration tests for Boutique.
//!
//! The storefront router is driven in-process with
//! [`tower::ServiceExt::oneshot`], so no server or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p boutique-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_catalog` - Product listing, detail and categories
//! - `storefront_cart` - Cart operations, totals and checkout
//! - `storefront_wishlist` - Wishlist toggling and moving to the cart
//! - `storefront_ui` - Cart drawer, notifications and request ids

#![allow(clippy::unwrap_used)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use boutique_storefront::{
    catalog::Catalog,
    config::StorefrontConfig,
    routes,
    state::AppState,
    storage::{MemoryStore, Storage},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;

/// Catalog used by every test: three categories, five products.
pub const FIXTURE_CATALOG: &str = r#"{"products": [
    {"id": 1, "title": "Fjallraven Backpack", "price": 109.95, "image": "https://example.com/1.jpg", "category": "men clothing"},
    {"id": 2, "title": "Slim Fit T-Shirt", "price": "22.30", "image": "https://example.com/2.jpg", "category": "men clothing"},
    {"id": 5, "title": "Dragon Bracelet", "price": 695, "image": "https://example.com/5.jpg", "category": "jewelery"},
    {"id": 9, "title": "Portable Hard Drive", "price": 64, "image": "https://example.com/9.jpg", "category": "electronics"},
    {"id": 10, "title": "SSD 1TB", "price": 109, "image": "https://example.com/10.jpg", "category": "electronics"}
]}"#;

/// A storefront application under test.
pub struct TestApp {
    pub state: AppState,
    router: Router,
}

/// Status, headers and body of a response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl TestApp {
    /// Build an app over a fresh in-memory store.
    pub fn new() -> Self {
        Self::with_storage(Storage::new(MemoryStore::new()))
    }

    /// Build an app over the given storage, hydrating from it.
    pub fn with_storage(storage: Storage) -> Self {
        let state = AppState::builder()
            .config(StorefrontConfig::default())
            .catalog(Catalog::from_json_str(FIXTURE_CATALOG).unwrap())
            .storage(storage)
            .build()
            .unwrap();
        let router = routes::app(state.clone());
        Self { state, router }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str) -> TestResponse {
        self.send(Method::POST, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.request(request).await
    }

    /// Send a prebuilt request.
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
