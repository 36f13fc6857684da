//! Durable client storage abstraction.
//!
//! The console persists a handful of string values (token, tenant context,
//! remember-me preference) under fixed key names. Implementations decide
//! where those values live.

use crate::error::Result;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

/// String-keyed, string-valued durable storage.
///
/// Removing a key that does not exist is not an error.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any prior value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`.
    fn remove(&self, key: &str) -> Result<()>;

    /// Stores several values in one go.
    ///
    /// The default implementation writes them one by one; durable backends
    /// override it to make the batch a single write.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Removes several keys in one go.
    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

/// Process-local store, used by tests and by callers that do not want
/// persistence.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            entries: RwLock::new(map),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("token").unwrap(), None);

        store.set("token", "abc").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("abc"));

        store.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let store = InMemoryKeyValueStore::new();
        assert!(store.remove("nothing").is_ok());
    }

    #[test]
    fn test_batch_helpers() {
        let store = InMemoryKeyValueStore::with_entries([("keep", "1")]);
        store.set_many(&[("a", "x"), ("b", "y")]).unwrap();
        assert_eq!(store.len(), 3);

        store.remove_many(&["a", "b"]).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("keep").unwrap().as_deref(), Some("1"));
    }
}
