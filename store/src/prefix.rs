//! Namespaced, typed views over a shared [`KvStore`].

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{KvStore, StoreError};

/// Encode a value the way every keeper persists it.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    bincode::serialize(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Decode a value written by [`encode`].
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// A view of a backend where every key is prefixed with `<namespace>/`.
///
/// Cloning is cheap; clones share the backend.
#[derive(Clone)]
pub struct PrefixStore {
    inner: Arc<dyn KvStore>,
    prefix: Vec<u8>,
}

impl PrefixStore {
    pub fn new(inner: Arc<dyn KvStore>, namespace: &str) -> Self {
        let mut prefix = namespace.as_bytes().to_vec();
        prefix.push(b'/');
        Self { inner, prefix }
    }

    fn full_key(&self, key: &[u8]) -> Vec<u8> {
        let mut full = Vec::with_capacity(self.prefix.len() + key.len());
        full.extend_from_slice(&self.prefix);
        full.extend_from_slice(key);
        full
    }

    pub fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.get(&self.full_key(key))
    }

    pub fn put_raw(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.inner.put(&self.full_key(key), value)
    }

    pub fn delete(&self, key: &[u8]) -> Result<(), StoreError> {
        self.inner.delete(&self.full_key(key))
    }

    pub fn has(&self, key: &[u8]) -> Result<bool, StoreError> {
        self.inner.has(&self.full_key(key))
    }

    pub fn get_value<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>, StoreError> {
        self.get_raw(key)?.map(|bytes| decode(&bytes)).transpose()
    }

    pub fn put_value<T: Serialize>(&self, key: &[u8], value: &T) -> Result<(), StoreError> {
        self.put_raw(key, &encode(value)?)
    }

    /// Raw entries under `prefix`, with the namespace stripped from the keys.
    pub fn scan_raw(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        let skip = self.prefix.len();
        Ok(self
            .inner
            .scan_prefix(&self.full_key(prefix))?
            .into_iter()
            .map(|(k, v)| (k[skip..].to_vec(), v))
            .collect())
    }

    /// Decoded values under `prefix`, in key order.
    pub fn scan_values<T: DeserializeOwned>(&self, prefix: &[u8]) -> Result<Vec<T>, StoreError> {
        self.scan_raw(prefix)?
            .iter()
            .map(|(_, v)| decode(v))
            .collect()
    }
}

/// Concatenate key parts.
pub fn key(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}
