//! Wishlist route handlers.

use axum::{Json, extract::State};
use boutique_core::{Product, ProductId, Severity};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::products::find_product;
use crate::error::Result;
use crate::state::{AppState, CartSummary, WishlistToggle};

/// Request body naming a single product.
#[derive(Debug, Deserialize)]
pub struct WishlistProductRequest {
    pub product_id: ProductId,
}

/// Toggle response: what happened and the resulting wishlist.
#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub outcome: WishlistToggle,
    pub wishlist: Vec<Product>,
}

/// Show the wishlist.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.wishlist().entries())
}

/// Add or remove a catalog product.
#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    Json(body): Json<WishlistProductRequest>,
) -> Result<Json<ToggleResponse>> {
    let product = find_product(&state, body.product_id)?;
    let outcome = state.wishlist().toggle(product);

    let message = match outcome {
        WishlistToggle::Added => "Product added to wishlist",
        WishlistToggle::Removed => "Product removed from wishlist",
    };
    state.notifications().show(message, Severity::Success);

    Ok(Json(ToggleResponse {
        outcome,
        wishlist: state.wishlist().entries(),
    }))
}

/// Remove a product from the wishlist.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(body): Json<WishlistProductRequest>,
) -> Json<Vec<Product>> {
    state.wishlist().remove(body.product_id);
    state
        .notifications()
        .show("Product removed from wishlist", Severity::Success);
    Json(state.wishlist().entries())
}

/// Empty the wishlist.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<Vec<Product>> {
    state.wishlist().clear();
    Json(state.wishlist().entries())
}

/// Add one unit of a wishlisted product to the cart.
///
/// The product stays on the wishlist.
#[instrument(skip(state))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(body): Json<WishlistProductRequest>,
) -> Result<Json<CartSummary>> {
    let product = state
        .wishlist()
        .entries()
        .into_iter()
        .find(|product| product.id == body.product_id)
        .map_or_else(|| find_product(&state, body.product_id), Ok)?;

    state.cart().add_item(product)?;
    state
        .notifications()
        .show("Product added to cart", Severity::Success);
    Ok(Json(state.cart().summary()))
}

/// Add one unit of every wishlisted product to the cart.
#[instrument(skip(state))]
pub async fn add_all_to_cart(State(state): State<AppState>) -> Result<Json<CartSummary>> {
    for product in state.wishlist().entries() {
        state.cart().add_item(product)?;
    }
    state.notifications().show(
        "All products have been added to the cart",
        Severity::Success,
    );
    Ok(Json(state.cart().summary()))
}
