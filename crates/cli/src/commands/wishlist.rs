//! Wishlist commands.

use boutique_core::ProductId;
use boutique_storefront::state::{Wishlist, WishlistToggle};

use super::{CommandError, Shop, product_lines};

fn render(wishlist: &Wishlist) -> String {
    let entries = wishlist.entries();
    if entries.is_empty() {
        return "Wishlist is empty".to_string();
    }
    product_lines(&entries).join("\n")
}

pub fn show(shop: &Shop) -> Result<String, CommandError> {
    Ok(render(&shop.wishlist()?))
}

/// Add a catalog product, or remove it if already wishlisted.
pub fn toggle(shop: &Shop, product_id: ProductId) -> Result<String, CommandError> {
    let product = shop.product(product_id)?;
    let wishlist = shop.wishlist()?;
    let verb = match wishlist.toggle(product) {
        WishlistToggle::Added => "Added",
        WishlistToggle::Removed => "Removed",
    };
    Ok(format!("{verb} product {product_id}\n{}", render(&wishlist)))
}

pub fn clear(shop: &Shop) -> Result<String, CommandError> {
    let wishlist = shop.wishlist()?;
    wishlist.clear();
    Ok(render(&wishlist))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::test_support::shop;

    #[test]
    fn test_toggle_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let shop = shop(dir.path());

        let added = toggle(&shop, ProductId::new(5)).unwrap();
        assert!(added.starts_with("Added product 5"));
        assert!(show(&shop).unwrap().contains("Bracelet"));

        let removed = toggle(&shop, ProductId::new(5)).unwrap();
        assert!(removed.starts_with("Removed product 5"));
        assert_eq!(show(&shop).unwrap(), "Wishlist is empty");
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let shop = shop(dir.path());
        toggle(&shop, ProductId::new(1)).unwrap();
        toggle(&shop, ProductId::new(9)).unwrap();
        assert_eq!(clear(&shop).unwrap(), "Wishlist is empty");
    }
}
