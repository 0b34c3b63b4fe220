//! Product catalog and category filtering.
//!
//! The catalog is supplied as a JSON document of the form
//! `{"products": [...]}` and is read-only for the lifetime of the process.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use boutique_core::{ALL_CATEGORIES, Product, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate product id in catalog: {0}")]
    DuplicateId(ProductId),
}

/// A category shown in the storefront menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub key: &'static str,
    pub label: &'static str,
}

/// The storefront category menu, in display order.
pub const CATEGORIES: &[Category] = &[
    Category {
        key: ALL_CATEGORIES,
        label: "All Products",
    },
    Category {
        key: "men clothing",
        label: "Men Clothing",
    },
    Category {
        key: "women clothing",
        label: "Women Clothing",
    },
    Category {
        key: "jewelery",
        label: "Jewelery",
    },
    Category {
        key: "electronics",
        label: "Electronics",
    },
];

/// Products whose category equals `category`, in their original order.
///
/// The `"all"` key returns every product.
#[must_use]
pub fn filter_by_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| product.in_category(category))
        .collect()
}

#[derive(Deserialize)]
struct CatalogDocument {
    products: Vec<Product>,
}

/// The loaded product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a product list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an identifier.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        if let Some(duplicate) = products.iter().find(|p| !seen.insert(p.id)) {
            return Err(CatalogError::DuplicateId(duplicate.id));
        }
        Ok(Self { products })
    }

    /// Parse a catalog document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the document is malformed or has duplicate ids.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::new(document.products)
    }

    /// Read and parse a catalog document from disk.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Products in `category`; see [`filter_by_category`].
    #[must_use]
    pub fn filter(&self, category: &str) -> Vec<&Product> {
        filter_by_category(&self.products, category)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
