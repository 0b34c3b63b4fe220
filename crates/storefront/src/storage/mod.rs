//! Persistent key-value storage for shopper state.
//!
//! [`Storage`] is the adapter the state containers talk to. It serializes
//! values to JSON and never fails: reads that cannot be satisfied fall back to
//! the caller's default and writes that cannot be completed are logged and
//! dropped. Losing persistence degrades the session to in-memory state, it
//! never breaks a cart operation.
//!
//! Backends implement [`KeyValueStore`]:
//! - [`MemoryStore`] - process memory, with an optional byte quota
//! - [`FileStore`] - one JSON document per key in a directory

mod file;
mod memory;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage key for the cart collection.
pub const CART_KEY: &str = "cart";

/// Storage key for the wishlist collection.
pub const WISHLIST_KEY: &str = "wishlist";

/// Errors raised by storage backends.
///
/// These never escape [`Storage`]; they exist so backends can report what
/// went wrong for logging.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// A raw text key-value backend.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the delete.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// JSON storage adapter over an optional backend.
///
/// Cheaply cloneable; clones share the same backend.
#[derive(Clone, Default)]
pub struct Storage {
    backend: Option<Arc<dyn KeyValueStore>>,
}

impl Storage {
    /// Create a storage adapter over `backend`.
    #[must_use]
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Some(Arc::new(backend)),
        }
    }

    /// Create an adapter with no backend.
    ///
    /// Reads return their defaults and writes are discarded.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { backend: None }
    }

    /// Whether a backend is attached.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Read and deserialize the value under `key`.
    ///
    /// Returns `default` when there is no backend, the key is missing or
    /// empty, or the stored text does not deserialize as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(backend) = &self.backend else {
            return default;
        };

        let raw = match backend.get_item(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return default,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read from storage");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding unreadable stored value");
                default
            }
        }
    }

    /// Serialize `value` and store it under `key`.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let Some(backend) = &self.backend else {
            return;
        };

        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to serialize value for storage");
                return;
            }
        };

        if let Err(e) = backend.set_item(key, &raw) {
            tracing::warn!(key, error = %e, "Failed to write to storage");
        }
    }

    /// Delete the value under `key`.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn remove(&self, key: &str) {
        let Some(backend) = &self.backend else {
            return;
        };

        if let Err(e) = backend.remove_item(key) {
            tracing::warn!(key, error = %e, "Failed to remove from storage");
        }
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("available", &self.is_available())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// A backend whose every call fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("broken".to_string()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("broken".to_string()))
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("broken".to_string()))
        }
    }

    #[test]
    fn test_get_missing_key_returns_default() {
        let storage = Storage::new(MemoryStore::new());
        assert_eq!(storage.get("missing", vec![1, 2]), vec![1, 2]);
    }

    #[test]
    fn test_set_then_get() {
        let storage = Storage::new(MemoryStore::new());
        storage.set("numbers", &[3, 1, 2]);
        assert_eq!(storage.get::<Vec<i32>>("numbers", Vec::new()), vec![3, 1, 2]);
    }

    #[test]
    fn test_corrupt_value_returns_default() {
        let store = MemoryStore::new();
        store.set_item("cart", "{not json").unwrap();
        let storage = Storage::new(store);
        assert_eq!(storage.get::<Vec<i32>>("cart", Vec::new()), Vec::<i32>::new());
    }

    #[test]
    fn test_wrong_shape_returns_default() {
        let store = MemoryStore::new();
        store.set_item("cart", r#"{"id": 1}"#).unwrap();
        let storage = Storage::new(store);
        assert_eq!(storage.get::<Vec<i32>>("cart", vec![9]), vec![9]);
    }

    #[test]
    fn test_empty_value_returns_default() {
        let store = MemoryStore::new();
        store.set_item("cart", "").unwrap();
        let storage = Storage::new(store);
        assert_eq!(storage.get("cart", 5_u8), 5);
    }

    #[test]
    fn test_remove() {
        let storage = Storage::new(MemoryStore::new());
        storage.set("flag", &true);
        storage.remove("flag");
        assert!(!storage.get("flag", false));
    }

    #[test]
    fn test_unavailable_behaves_as_empty() {
        let storage = Storage::unavailable();
        assert!(!storage.is_available());
        storage.set("numbers", &[1]);
        storage.remove("numbers");
        assert_eq!(storage.get::<Vec<i32>>("numbers", Vec::new()), Vec::<i32>::new());
    }

    #[test]
    fn test_failing_backend_never_raises() {
        let storage = Storage::new(BrokenStore);
        storage.set("numbers", &[1]);
        storage.remove("numbers");
        assert_eq!(storage.get("numbers", vec![7]), vec![7]);
    }

    #[test]
    fn test_clones_share_backend() {
        let storage = Storage::new(MemoryStore::new());
        let clone = storage.clone();
        storage.set("greeting", "hello");
        assert_eq!(clone.get("greeting", String::new()), "hello");
    }
}
