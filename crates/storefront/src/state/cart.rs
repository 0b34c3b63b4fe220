//! Cart state container.
//!
//! An ordered list of entries, unique by product identifier, each with a
//! quantity of at least one. Totals are computed from the entries on every
//! read. Every mutating call persists the resulting list under [`CART_KEY`].
//!
//! A mutation that would push a quantity past `u32::MAX` or the total past
//! the largest `Decimal` is rejected with [`CartError`] and leaves the cart
//! unchanged, so the totals can always be computed.

use boutique_core::{Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

use crate::storage::{CART_KEY, Storage};

/// A rejected cart mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("quantity {0} is out of range")]
    QuantityOutOfRange(i64),

    #[error("cart total would exceed the largest representable amount")]
    TotalOverflow,
}

/// A product in the cart with its quantity.
///
/// Serialized as the product fields plus `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartEntry {
    /// Price times quantity, or `None` if it does not fit in a `Decimal`.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.product.price.checked_times(self.quantity)
    }
}

/// Cart contents with derived totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub entries: Vec<CartEntry>,
    pub total: Decimal,
    pub total_items: u64,
}

/// Cart state container.
#[derive(Debug)]
pub struct Cart {
    entries: watch::Sender<Vec<CartEntry>>,
    storage: Storage,
}

impl Cart {
    /// Create a cart hydrated from `storage`.
    ///
    /// A missing, empty or unreadable stored list starts an empty cart.
    /// Stored entries with a zero quantity are dropped and repeated product
    /// identifiers are merged into the first occurrence. A stored list whose
    /// merged quantities or total are out of range is discarded.
    #[must_use]
    pub fn hydrate(storage: Storage) -> Self {
        let stored: Vec<CartEntry> = storage.get(CART_KEY, Vec::new());
        let entries = merge_stored(stored).unwrap_or_else(|| {
            tracing::warn!("Discarding stored cart with out-of-range quantities");
            Vec::new()
        });
        tracing::debug!(entries = entries.len(), "Hydrated cart");

        let (entries, _) = watch::channel(entries);
        Self { entries, storage }
    }

    /// Add one unit of `product`.
    ///
    /// # Errors
    ///
    /// See [`add_items`](Self::add_items).
    pub fn add_item(&self, product: Product) -> Result<(), CartError> {
        self.add_items(product, 1)
    }

    /// Add `quantity` units of `product`.
    ///
    /// An existing entry has its quantity increased; otherwise a new entry is
    /// appended. A zero `quantity` counts as one.
    ///
    /// # Errors
    ///
    /// Returns `CartError::QuantityOutOfRange` if the entry's quantity would
    /// exceed `u32::MAX`, and `CartError::TotalOverflow` if the cart total
    /// would no longer fit in a `Decimal`. The cart is unchanged either way.
    pub fn add_items(&self, product: Product, quantity: u32) -> Result<(), CartError> {
        let quantity = quantity.max(1);
        self.try_mutate(|entries| {
            match entries.iter_mut().find(|entry| entry.product.id == product.id) {
                Some(entry) => {
                    let current = entry.quantity;
                    entry.quantity = current.checked_add(quantity).ok_or_else(|| {
                        CartError::QuantityOutOfRange(i64::from(current) + i64::from(quantity))
                    })?;
                }
                None => entries.push(CartEntry { product, quantity }),
            }
            Ok(true)
        })
    }

    /// Remove the entry for `product_id`, if present.
    pub fn remove_item(&self, product_id: ProductId) {
        self.mutate(|entries| remove_entry(entries, product_id));
    }

    /// Set the quantity for `product_id` to exactly `new_quantity`.
    ///
    /// A quantity below one removes the entry. Unknown identifiers are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns `CartError::QuantityOutOfRange` if `new_quantity` exceeds
    /// `u32::MAX`, and `CartError::TotalOverflow` if the cart total would no
    /// longer fit in a `Decimal`. The cart is unchanged either way.
    pub fn update_quantity(
        &self,
        product_id: ProductId,
        new_quantity: i64,
    ) -> Result<(), CartError> {
        if new_quantity < 1 {
            self.remove_item(product_id);
            return Ok(());
        }
        let quantity = u32::try_from(new_quantity)
            .map_err(|_| CartError::QuantityOutOfRange(new_quantity))?;

        self.try_mutate(|entries| {
            let Some(entry) = entries.iter_mut().find(|entry| entry.product.id == product_id) else {
                return Ok(false);
            };
            let changed = entry.quantity != quantity;
            entry.quantity = quantity;
            Ok(changed)
        })
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.mutate(|entries| {
            let changed = !entries.is_empty();
            entries.clear();
            changed
        });
    }

    /// Sum of price times quantity over all entries.
    #[must_use]
    pub fn total(&self) -> Decimal {
        total_of(&self.entries.borrow())
    }

    /// Sum of quantities over all entries.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        items_of(&self.entries.borrow())
    }

    /// Quantity of `product_id` in the cart, if present.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.entries
            .borrow()
            .iter()
            .find(|entry| entry.product.id == product_id)
            .map(|entry| entry.quantity)
    }

    /// Snapshot of the entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<CartEntry> {
        self.entries.borrow().clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Entries and totals taken from a single snapshot.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        let entries = self.entries();
        CartSummary {
            total: total_of(&entries),
            total_items: items_of(&entries),
            entries,
        }
    }

    /// Subscribe to cart changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartEntry>> {
        self.entries.subscribe()
    }

    /// Apply `change` and persist the result while still holding the lock,
    /// so stored snapshots follow mutation order.
    ///
    /// Only for changes that cannot grow the total.
    fn mutate(&self, change: impl FnOnce(&mut Vec<CartEntry>) -> bool) {
        let storage = &self.storage;
        self.entries.send_if_modified(|entries| {
            let changed = change(entries);
            storage.set(CART_KEY, &*entries);
            changed
        });
    }

    /// Like [`mutate`](Self::mutate), but rolls back and reports the error
    /// when `change` fails or leaves a total that does not fit.
    fn try_mutate(
        &self,
        change: impl FnOnce(&mut Vec<CartEntry>) -> Result<bool, CartError>,
    ) -> Result<(), CartError> {
        let storage = &self.storage;
        let mut outcome = Ok(());
        self.entries.send_if_modified(|entries| {
            let previous = entries.clone();
            let result = change(entries).and_then(|changed| {
                if changed && checked_total(entries).is_none() {
                    return Err(CartError::TotalOverflow);
                }
                Ok(changed)
            });

            match result {
                Ok(changed) => {
                    storage.set(CART_KEY, &*entries);
                    changed
                }
                Err(e) => {
                    *entries = previous;
                    outcome = Err(e);
                    false
                }
            }
        });
        outcome
    }
}

fn remove_entry(entries: &mut Vec<CartEntry>, product_id: ProductId) -> bool {
    let before = entries.len();
    entries.retain(|entry| entry.product.id != product_id);
    entries.len() != before
}

fn checked_total(entries: &[CartEntry]) -> Option<Decimal> {
    entries
        .iter()
        .try_fold(Decimal::ZERO, |total, entry| total.checked_add(entry.line_total()?))
}

/// Total of entries already known to be in range.
fn total_of(entries: &[CartEntry]) -> Decimal {
    checked_total(entries).unwrap_or(Decimal::MAX)
}

fn items_of(entries: &[CartEntry]) -> u64 {
    entries.iter().map(|entry| u64::from(entry.quantity)).sum()
}

/// Drop empty entries and merge repeated identifiers, or `None` if the
/// result is out of range.
fn merge_stored(stored: Vec<CartEntry>) -> Option<Vec<CartEntry>> {
    let mut entries: Vec<CartEntry> = Vec::with_capacity(stored.len());
    for entry in stored.into_iter().filter(|entry| entry.quantity > 0) {
        match entries.iter_mut().find(|e| e.product.id == entry.product.id) {
            Some(existing) => existing.quantity = existing.quantity.checked_add(entry.quantity)?,
            None => entries.push(entry),
        }
    }
    checked_total(&entries)?;
    Some(entries)
}
