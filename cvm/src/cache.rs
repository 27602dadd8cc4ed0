//! Write-buffering cache over a backing state.

use std::collections::BTreeMap;

use shentu_types::AccAddress;

use crate::error::CvmError;
use crate::state::{StateReader, StateWriter};
use crate::types::{Account, ContractMeta, Word256};

/// Buffers writes over a backing state until [`CallFrame::sync`].
///
/// Reads see buffered writes first. Nothing reaches the backing state until
/// the frame is synced, so dropping a frame discards its writes.
pub struct CallFrame<S> {
    backend: S,
    accounts: BTreeMap<AccAddress, Account>,
    storage: BTreeMap<(AccAddress, Word256), Vec<u8>>,
    address_meta: BTreeMap<AccAddress, Vec<ContractMeta>>,
    metadata: BTreeMap<Word256, String>,
}

impl<S: StateReader> CallFrame<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            accounts: BTreeMap::new(),
            storage: BTreeMap::new(),
            address_meta: BTreeMap::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Number of buffered writes.
    pub fn pending(&self) -> usize {
        self.accounts.len() + self.storage.len() + self.address_meta.len() + self.metadata.len()
    }

    /// Flush buffered writes into `state`, accounts and storage in
    /// address then key order, and empty the buffers.
    pub fn sync<W: StateWriter + ?Sized>(&mut self, state: &mut W) -> Result<(), CvmError> {
        let writes = self.pending();
        for account in std::mem::take(&mut self.accounts).values() {
            state.update_account(account)?;
        }
        for ((address, key), value) in std::mem::take(&mut self.storage) {
            state.set_storage(&address, &key, &value)?;
        }
        for (address, meta) in std::mem::take(&mut self.address_meta) {
            state.set_address_meta(&address, &meta)?;
        }
        for (hash, metadata) in std::mem::take(&mut self.metadata) {
            state.set_metadata(&hash, &metadata)?;
        }
        tracing::trace!(writes, "call frame synced");
        Ok(())
    }
}

impl<S: StateReader> StateReader for CallFrame<S> {
    fn account(&self, address: &AccAddress) -> Result<Option<Account>, CvmError> {
        match self.accounts.get(address) {
            Some(account) => Ok(Some(account.clone())),
            None => self.backend.account(address),
        }
    }

    fn storage(&self, address: &AccAddress, key: &Word256) -> Result<Vec<u8>, CvmError> {
        match self.storage.get(&(*address, *key)) {
            Some(value) => Ok(value.clone()),
            None => self.backend.storage(address, key),
        }
    }

    fn address_meta(&self, address: &AccAddress) -> Result<Vec<ContractMeta>, CvmError> {
        match self.address_meta.get(address) {
            Some(meta) => Ok(meta.clone()),
            None => self.backend.address_meta(address),
        }
    }

    fn metadata(&self, hash: &Word256) -> Result<Option<String>, CvmError> {
        match self.metadata.get(hash) {
            Some(metadata) => Ok(Some(metadata.clone())),
            None => self.backend.metadata(hash),
        }
    }
}

impl<S: StateReader> StateWriter for CallFrame<S> {
    fn update_account(&mut self, account: &Account) -> Result<(), CvmError> {
        self.accounts.insert(account.address, account.clone());
        Ok(())
    }

    fn set_storage(
        &mut self,
        address: &AccAddress,
        key: &Word256,
        value: &[u8],
    ) -> Result<(), CvmError> {
        // Empty values are buffered too so the clear reaches the backend.
        self.storage.insert((*address, *key), value.to_vec());
        Ok(())
    }

    fn set_address_meta(
        &mut self,
        address: &AccAddress,
        meta: &[ContractMeta],
    ) -> Result<(), CvmError> {
        self.address_meta.insert(*address, meta.to_vec());
        Ok(())
    }

    fn set_metadata(&mut self, hash: &Word256, metadata: &str) -> Result<(), CvmError> {
        self.metadata.insert(*hash, metadata.to_string());
        Ok(())
    }
}
