//! MemoryStore - HashMap-backed store for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use super::{KeyValueStore, StorageError};

/// Clones share the same underlying map, so a second engine built from a
/// clone sees exactly what the first one persisted.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    storage: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let storage = self.storage.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(storage.get(key).cloned())
    }

    fn write(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        let mut storage = self.storage.write().map_err(|_| StorageError::LockPoisoned)?;
        storage.insert(key.to_string(), value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clones_share_state() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.write("k", &json!([1])).unwrap();
        assert_eq!(b.read("k").unwrap(), Some(json!([1])));
        assert_eq!(b.read("missing").unwrap(), None);
    }
}
