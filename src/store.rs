//! Durable key/value storage for cart state.
//!
//! Backends only move bytes. The typed `load`/`save`/`remove` helpers encode
//! with CBOR and absorb every failure: an unreadable or corrupt value is a
//! miss, a failed write is logged and dropped.
use super::error::StoreError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

pub trait KeyedStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_raw(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError>;
    fn delete_raw(&self, key: &str) -> Result<(), StoreError>;

    /// Value stored under `key`, or `None` if absent or undecodable
    fn load<T>(&self, key: &str) -> Option<T>
    where
        T: for<'b> minicbor::Decode<'b, ()>,
    {
        let bytes = match self.get_raw(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read stored value, treating as absent");
                return None;
            }
        };

        match minicbor::decode::<T>(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding corrupt stored value");
                None
            }
        }
    }

    fn save<T>(&self, key: &str, value: &T)
    where
        T: minicbor::Encode<()>,
    {
        let bytes = match minicbor::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(key, error = %e, "failed to encode value, not persisted");
                return;
            }
        };

        if let Err(e) = self.put_raw(key, bytes) {
            tracing::error!(key, error = %e, "failed to persist value");
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.delete_raw(key) {
            tracing::error!(key, error = %e, "failed to remove stored value");
        }
    }
}

/// sled-backed store. Clones share the same database.
#[derive(Debug, Clone)]
pub struct SledStore {
    instance: Arc<sled::Db>,
}

impl SledStore {
    pub fn new(instance: Arc<sled::Db>) -> Self {
        Self { instance }
    }
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let db = sled::open(path)?;
        Ok(Self::new(Arc::new(db)))
    }
    pub fn db(&self) -> &sled::Db {
        &self.instance
    }
}

impl KeyedStore for SledStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.instance.get(key.as_bytes())?.map(|value| value.to_vec()))
    }
    fn put_raw(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        self.instance.insert(key.as_bytes(), bytes)?;
        Ok(())
    }
    fn delete_raw(&self, key: &str) -> Result<(), StoreError> {
        self.instance.remove(key.as_bytes())?;
        Ok(())
    }
}

/// In-process store. Clones share the same entries, like tabs sharing browser storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyedStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }
    fn put_raw(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        self.entries.borrow_mut().insert(key.to_string(), bytes);
        Ok(())
    }
    fn delete_raw(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
