//! HTTP route handlers for storefront.
//!
//! All bodies are JSON. Mutating endpoints return the resulting state.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Health check
//!
//! # Catalog
//! GET  /products?category=<key>    - Product listing (default: all)
//! GET  /products/{id}              - Product detail
//! GET  /categories                 - Category menu
//!
//! # Cart
//! GET  /cart                       - Entries and totals
//! POST /cart/add                   - Add product {product_id, quantity?}
//! POST /cart/update                - Set quantity {product_id, quantity}
//! POST /cart/remove                - Remove entry {product_id}
//! POST /cart/clear                 - Empty cart
//! POST /cart/checkout              - Complete checkout
//!
//! # Wishlist
//! GET  /wishlist                   - Wishlisted products
//! POST /wishlist/toggle            - Add or remove {product_id}
//! POST /wishlist/remove            - Remove {product_id}
//! POST /wishlist/clear             - Empty wishlist
//! POST /wishlist/add-to-cart       - Add one unit to cart {product_id}
//! POST /wishlist/add-all-to-cart   - Add every entry to cart
//!
//! # UI
//! GET  /ui                         - Cart drawer visibility
//! POST /ui/cart/open|close|toggle  - Change cart drawer visibility
//! GET  /notification               - Current notification
//! POST /notification/hide          - Dismiss notification
//! ```

pub mod cart;
pub mod notification;
pub mod products;
pub mod ui;
pub mod wishlist;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::{make_request_span, request_id_middleware};
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/checkout", post(cart::checkout))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/toggle", post(wishlist::toggle))
        .route("/remove", post(wishlist::remove))
        .route("/clear", post(wishlist::clear))
        .route("/add-to-cart", post(wishlist::add_to_cart))
        .route("/add-all-to-cart", post(wishlist::add_all_to_cart))
}

/// Create the UI routes router.
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(ui::show))
        .route("/cart/open", post(ui::open_cart))
        .route("/cart/close", post(ui::close_cart))
        .route("/cart/toggle", post(ui::toggle_cart))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/products", product_routes())
        .route("/categories", get(products::categories))
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .nest("/ui", ui_routes())
        .route("/notification", get(notification::show))
        .route("/notification/hide", post(notification::hide))
}

/// Build the full application: routes, state and middleware.
pub fn app(state: AppState) -> Router {
    routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(middleware::from_fn(request_id_middleware))
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
