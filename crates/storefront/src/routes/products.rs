//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use boutique_core::{ALL_CATEGORIES, Product, ProductId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::catalog::{CATEGORIES, Category};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
}

/// A product with the shopper's relation to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub in_wishlist: bool,
    /// Units of this product in the cart, zero when absent.
    pub cart_quantity: u32,
}

impl ProductView {
    fn new(state: &AppState, product: &Product) -> Self {
        Self {
            product: product.clone(),
            in_wishlist: state.wishlist().contains(product.id),
            cart_quantity: state.cart().quantity_of(product.id).unwrap_or(0),
        }
    }
}

/// List products, optionally filtered by category.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Json<Vec<ProductView>> {
    let category = query.category.as_deref().unwrap_or(ALL_CATEGORIES);
    let products = state
        .catalog()
        .filter(category)
        .into_iter()
        .map(|product| ProductView::new(&state, product))
        .collect();
    Json(products)
}

/// Show a single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductView>> {
    let product = state
        .catalog()
        .get(id)
        .ok_or_else(|| AppError::unknown_product(id))?;
    Ok(Json(ProductView::new(&state, product)))
}

/// The category menu.
pub async fn categories() -> Json<&'static [Category]> {
    Json(CATEGORIES)
}

/// Look up a catalog product by id.
pub(crate) fn find_product(state: &AppState, id: ProductId) -> Result<Product> {
    state
        .catalog()
        .get(id)
        .cloned()
        .ok_or_else(|| AppError::unknown_product(id))
}
