//! Shopper state containers and the application state that owns them.
//!
//! Each container is constructed exactly once by [`AppStateBuilder`] and
//! reached through the cloneable [`AppState`] handle. Nothing is looked up
//! from globals.

pub mod cart;
pub mod notification;
pub mod ui;
pub mod wishlist;

use std::sync::Arc;

use thiserror::Error;

pub use cart::{Cart, CartEntry, CartError, CartSummary};
pub use notification::{Notification, Notifications};
pub use ui::{UiState, UiVisibility};
pub use wishlist::{Wishlist, WishlistToggle};

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::storage::Storage;

/// A required provider was not supplied to the builder.
///
/// This is a wiring mistake, not a runtime condition.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} provider is required but was not supplied")]
    Missing(&'static str),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog and the shopper's state containers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    storage: Storage,
    ui: UiState,
    notifications: Notifications,
    wishlist: Wishlist,
    cart: Cart,
}

impl AppState {
    /// Start building application state.
    #[must_use]
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::default()
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.inner.storage
    }

    #[must_use]
    pub fn ui(&self) -> &UiState {
        &self.inner.ui
    }

    #[must_use]
    pub fn notifications(&self) -> &Notifications {
        &self.inner.notifications
    }

    #[must_use]
    pub fn wishlist(&self) -> &Wishlist {
        &self.inner.wishlist
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.inner.cart
    }
}

/// Builder for [`AppState`].
///
/// Configuration and catalog are required. Storage is optional; without it
/// shopper state is kept in memory only.
#[derive(Default)]
pub struct AppStateBuilder {
    config: Option<StorefrontConfig>,
    catalog: Option<Catalog>,
    storage: Option<Storage>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn config(mut self, config: StorefrontConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    #[must_use]
    pub fn storage(mut self, storage: Storage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Construct every container, hydrating cart and wishlist from storage.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Missing` if the configuration or catalog was
    /// not supplied.
    pub fn build(self) -> Result<AppState, ProviderError> {
        let config = self.config.ok_or(ProviderError::Missing("config"))?;
        let catalog = self.catalog.ok_or(ProviderError::Missing("catalog"))?;
        let storage = self.storage.unwrap_or_else(|| {
            tracing::warn!("No storage configured, shopper state will not persist");
            Storage::unavailable()
        });

        let notifications = Notifications::new(config.notification_duration);
        let wishlist = Wishlist::hydrate(storage.clone());
        let cart = Cart::hydrate(storage.clone());

        Ok(AppState {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                storage,
                ui: UiState::new(),
                notifications,
                wishlist,
                cart,
            }),
        })
    }
}
