//! String-keyed persistent storage capability.
//!
//! The client keeps its session in a browser-style key-value store. This
//! module only describes that store; the real backing (local storage, a
//! file, a keychain) lives outside the crate.

use std::cell::RefCell;
use std::collections::HashMap;

/// External key-value storage holding the persisted session entries.
///
/// All operations take `&self`: the store is shared between the navigation
/// guard and the response interceptor on a single event thread.
pub trait Storage {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Removes `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// In-memory [`Storage`] backed by a `HashMap`.
///
/// # Example
///
/// ```
/// use ride_guard::{MemoryStorage, Storage};
///
/// let storage = MemoryStorage::new();
/// storage.set("authToken", "abc");
/// assert_eq!(storage.get("authToken").as_deref(), Some("abc"));
///
/// storage.remove("authToken");
/// storage.remove("authToken");
/// assert!(storage.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

impl<T: Storage + ?Sized> Storage for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}
