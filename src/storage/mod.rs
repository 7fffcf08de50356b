//! Key-value persistence for drafts and history
//!
//! [`KeyValueStore`] is the string-keyed, string-valued store the rest of the
//! crate persists through. [`Persistence`] layers typed JSON helpers on top
//! and never propagates failures: saves report a boolean, loads degrade to
//! `None`, clears are best-effort.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

pub mod memory;
pub mod sled_store;
pub mod types;

pub use memory::MemoryStore;
pub use sled_store::SledStore;
pub use types::{HistoryEntry, StoredSession};

/// String-keyed, string-valued synchronous store
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Typed JSON adapter over a [`KeyValueStore`]
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use teachassist::storage::{MemoryStore, Persistence};
///
/// let persistence = Persistence::new(Arc::new(MemoryStore::new()));
/// assert!(persistence.save("numbers", &vec![1, 2, 3]));
/// assert_eq!(persistence.load::<Vec<i32>>("numbers"), Some(vec![1, 2, 3]));
/// persistence.clear("numbers");
/// assert_eq!(persistence.load::<Vec<i32>>("numbers"), None);
/// ```
#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn KeyValueStore>,
}

impl Persistence {
    /// Wrap a store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Serialize `value` as JSON and store it under `key`
    ///
    /// Returns `false` if serialization or the write failed; the failure is
    /// logged, never returned.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize value for {}: {}", key, e);
                return false;
            }
        };

        match self.store.set(key, &json) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to save {}: {}", key, e);
                false
            }
        }
    }

    /// Load and deserialize the value under `key`
    ///
    /// Missing keys, corrupt JSON, and read failures all yield `None`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Discarding corrupt value for {}: {}", key, e);
                None
            }
        }
    }

    /// Delete the value under `key`, ignoring failures
    pub fn clear(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            tracing::warn!("Failed to clear {}: {}", key, e);
        }
    }
}
