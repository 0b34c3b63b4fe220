//! Cart route handlers.
//!
//! Every mutating handler returns the resulting cart with its totals.

use axum::{Json, extract::State};
use boutique_core::{ProductId, Severity};
use serde::Deserialize;
use tracing::instrument;

use super::products::find_product;
use crate::error::{Result, add_breadcrumb};
use crate::state::{AppState, CartSummary};

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: ProductId,
    /// New absolute quantity; below one removes the entry.
    pub quantity: i64,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

/// Show the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartSummary> {
    Json(state.cart().summary())
}

/// Add a catalog product to the cart.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddToCartRequest>,
) -> Result<Json<CartSummary>> {
    let product = find_product(&state, body.product_id)?;
    let quantity = body.quantity.unwrap_or(1);

    state.cart().add_items(product, quantity)?;
    let product_id = body.product_id.to_string();
    add_breadcrumb(
        "cart",
        "Added product",
        Some(&[("product_id", product_id.as_str())]),
    );
    state
        .notifications()
        .show("Product added to cart", Severity::Success);

    Ok(Json(state.cart().summary()))
}

/// Set the quantity of a cart entry.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<UpdateCartRequest>,
) -> Result<Json<CartSummary>> {
    state
        .cart()
        .update_quantity(body.product_id, body.quantity)?;
    Ok(Json(state.cart().summary()))
}

/// Remove a cart entry.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(body): Json<RemoveFromCartRequest>,
) -> Json<CartSummary> {
    state.cart().remove_item(body.product_id);
    state
        .notifications()
        .show("Product removed from cart", Severity::Success);
    Json(state.cart().summary())
}

/// Empty the cart and close the drawer.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartSummary> {
    state.cart().clear();
    state.ui().close_cart();
    state.notifications().show("Cart cleared", Severity::Success);
    Json(state.cart().summary())
}

/// Complete checkout.
///
/// There is no payment step; the cart is emptied and the drawer closed.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Json<CartSummary> {
    let summary = state.cart().summary();
    tracing::info!(
        total = %summary.total,
        total_items = summary.total_items,
        "Checkout completed"
    );

    state.cart().clear();
    state.ui().close_cart();
    state
        .notifications()
        .show("Checkout completed successfully!", Severity::Success);
    Json(state.cart().summary())
}
