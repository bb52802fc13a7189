//! Persistent key-value storage.
//!
//! The engines only ever see [`KeyValueStore`]: a synchronous, string-keyed
//! store of JSON documents. A missing key is a normal condition and maps to
//! the caller's empty default.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Storage key of the persisted cart.
pub const CART_KEY: &str = "cart";
/// Storage key of the persisted wishlist.
pub const WISHLIST_KEY: &str = "wishlist";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("stored value under '{key}' is not valid: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("storage lock poisoned")]
    LockPoisoned,
}

pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Returns `Ok(None)` when nothing has been written under `key` yet.
    fn read(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Replaces the whole document stored under `key`.
    fn write(&self, key: &str, value: &Value) -> Result<(), StorageError>;
}

/// Reads and decodes `key`, falling back to `T::default()` when absent.
pub fn load_or_default<T>(store: &dyn KeyValueStore, key: &str) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    match store.read(key)? {
        Some(value) => serde_json::from_value(value).map_err(|source| StorageError::Corrupt { key: key.to_string(), source }),
        None => Ok(T::default()),
    }
}

/// Encodes `data` and writes it under `key`.
pub fn save<T: Serialize>(store: &dyn KeyValueStore, key: &str, data: &T) -> Result<(), StorageError> {
    let value = serde_json::to_value(data)?;
    store.write(key, &value)
}
