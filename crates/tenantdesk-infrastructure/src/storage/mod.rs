//! Durable storage for the console's client-side state.

mod atomic_toml;
mod file_kv_store;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
pub use file_kv_store::FileKeyValueStore;
