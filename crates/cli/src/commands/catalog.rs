//! Catalog commands.

use super::{CommandError, Shop, product_lines};

/// List products in `category`.
pub fn list(shop: &Shop, category: &str) -> Result<String, CommandError> {
    let catalog = shop.catalog()?;
    let products = catalog.filter(category);
    if products.is_empty() {
        return Ok(format!("No products found in category '{category}'"));
    }
    Ok(product_lines(products).join("\n"))
}
