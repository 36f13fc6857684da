//! Durable `KeyValueStore` backed by a single TOML file.

use super::atomic_toml::AtomicTomlFile;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tenantdesk_core::Result;
use tenantdesk_core::storage::KeyValueStore;
use tracing::debug;

type Entries = BTreeMap<String, String>;

/// Stores every key as a top-level string in one TOML file.
///
/// Reads go to disk each time so two processes sharing the file (e.g. a
/// `login` followed by a separate `tenants list`) see each other's writes.
pub struct FileKeyValueStore {
    file: AtomicTomlFile<Entries>,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path).private(),
        }
    }

    fn read_all(&self) -> Result<Entries> {
        Ok(self.file.load()?.unwrap_or_default())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_many(&[(key, value)])
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.remove_many(&[key])
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        self.file.update(|stored| {
            for (key, value) in entries {
                stored.insert((*key).to_string(), (*value).to_string());
            }
            Ok(())
        })?;
        debug!(path = %self.file.path().display(), count = entries.len(), "Stored keys");
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        if !self.file.path().exists() {
            return Ok(());
        }
        self.file.update(|stored| {
            for key in keys {
                stored.remove(*key);
            }
            Ok(())
        })?;
        debug!(path = %self.file.path().display(), count = keys.len(), "Removed keys");
        Ok(())
    }
}
