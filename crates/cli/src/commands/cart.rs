//! Cart commands.

use boutique_core::ProductId;
use boutique_storefront::state::{Cart, CartSummary};

use super::{CommandError, Shop};

/// Render cart entries and totals.
fn render(summary: &CartSummary) -> String {
    if summary.entries.is_empty() {
        return "Cart is empty".to_string();
    }

    let mut lines: Vec<String> = summary
        .entries
        .iter()
        .map(|entry| {
            format!(
                "{:>4}  {:>3} x {:>8}  {}",
                entry.product.id, entry.quantity, entry.product.price, entry.product.title
            )
        })
        .collect();
    lines.push(format!(
        "Total: {:.2} ({} items)",
        summary.total, summary.total_items
    ));
    lines.join("\n")
}

fn done(cart: &Cart) -> String {
    render(&cart.summary())
}

pub fn show(shop: &Shop) -> Result<String, CommandError> {
    Ok(done(&shop.cart()?))
}

/// Add `quantity` units of a catalog product.
pub fn add(shop: &Shop, product_id: ProductId, quantity: u32) -> Result<String, CommandError> {
    let product = shop.product(product_id)?;
    let cart = shop.cart()?;
    cart.add_items(product, quantity)?;
    tracing::info!(%product_id, quantity, "Added to cart");
    Ok(done(&cart))
}

/// Set the quantity of an entry.
pub fn set(shop: &Shop, product_id: ProductId, quantity: i64) -> Result<String, CommandError> {
    let cart = shop.cart()?;
    cart.update_quantity(product_id, quantity)?;
    Ok(done(&cart))
}

pub fn remove(shop: &Shop, product_id: ProductId) -> Result<String, CommandError> {
    let cart = shop.cart()?;
    cart.remove_item(product_id);
    Ok(done(&cart))
}

pub fn clear(shop: &Shop) -> Result<String, CommandError> {
    let cart = shop.cart()?;
    cart.clear();
    Ok(done(&cart))
}
