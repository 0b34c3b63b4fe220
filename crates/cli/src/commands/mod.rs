//! CLI command implementations.
//!
//! Each command returns the text to print so it can be tested without
//! capturing stdout.

pub mod cart;
pub mod catalog;
pub mod wishlist;

use std::path::PathBuf;

use boutique_core::{Product, ProductId};
use boutique_storefront::catalog::{Catalog, CatalogError};
use boutique_storefront::state::{Cart, CartError, Wishlist};
use boutique_storefront::storage::{FileStore, Storage, StorageError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Storage directory could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart change was rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Product id is not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),
}

/// Paths to the shopper's storage and the catalog.
///
/// Storage is opened and the catalog read only by commands that need them.
#[derive(Debug, Clone)]
pub struct Shop {
    storage_dir: PathBuf,
    catalog_path: PathBuf,
}

impl Shop {
    pub const fn new(storage_dir: PathBuf, catalog_path: PathBuf) -> Self {
        Self {
            storage_dir,
            catalog_path,
        }
    }

    fn storage(&self) -> Result<Storage, CommandError> {
        Ok(Storage::new(FileStore::open(&self.storage_dir)?))
    }

    fn catalog(&self) -> Result<Catalog, CommandError> {
        Ok(Catalog::load(&self.catalog_path)?)
    }

    fn cart(&self) -> Result<Cart, CommandError> {
        Ok(Cart::hydrate(self.storage()?))
    }

    fn wishlist(&self) -> Result<Wishlist, CommandError> {
        Ok(Wishlist::hydrate(self.storage()?))
    }

    fn product(&self, id: ProductId) -> Result<Product, CommandError> {
        self.catalog()?
            .get(id)
            .cloned()
            .ok_or(CommandError::UnknownProduct(id))
    }
}

/// One product per line: id, price, title.
fn product_lines<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<String> {
    products
        .into_iter()
        .map(|p| format!("{:>4}  {:>8}  {}", p.id, p.price, p.title))
        .collect()
}
