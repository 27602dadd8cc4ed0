//! In-memory ordered store.
//!
//! Backs the whole application state. Checkpoints are full copies of the
//! map, which keeps transaction rollback trivial for chain state that fits
//! in memory.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{KvStore, StoreError};

type Map = BTreeMap<Vec<u8>, Vec<u8>>;

/// Saved copy of a [`MemoryStore`], restored with [`MemoryStore::revert`].
#[derive(Clone, Debug)]
pub struct Checkpoint(Map);

/// A thread-safe, ordered, in-memory [`KvStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<Map>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Map>, StoreError> {
        self.entries
            .read()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Map>, StoreError> {
        self.entries
            .write()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }

    /// Capture the current contents.
    pub fn checkpoint(&self) -> Result<Checkpoint, StoreError> {
        Ok(Checkpoint(self.read()?.clone()))
    }

    /// Replace the contents with a previously captured checkpoint.
    pub fn revert(&self, checkpoint: Checkpoint) -> Result<(), StoreError> {
        let mut entries = self.write()?;
        tracing::debug!(
            discarded = entries.len(),
            restored = checkpoint.0.len(),
            "reverting memory store"
        );
        *entries = checkpoint.0;
        Ok(())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.is_empty())
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.read()?.get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.write()?.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), StoreError> {
        self.write()?.remove(key);
        Ok(())
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        let entries = self.read()?;
        Ok(entries
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
