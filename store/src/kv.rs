//! The key-value store trait.

use crate::StoreError;

/// An ordered byte-keyed store.
///
/// Implementations must be safe to share between keepers, so every method
/// takes `&self` and mutability is interior.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    fn delete(&self, key: &[u8]) -> Result<(), StoreError>;

    /// Every entry whose key starts with `prefix`, in ascending key order.
    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError>;

    fn has(&self, key: &[u8]) -> Result<bool, StoreError> {
        self.get(key).map(|v| v.is_some())
    }
}
