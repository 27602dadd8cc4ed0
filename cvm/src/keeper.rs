//! CVM keeper.

use std::sync::Arc;

use shentu_bank::BankKeeper;
use shentu_store::prefix::key;
use shentu_store::{KvStore, PrefixStore};
use shentu_types::{AccAddress, MICRO_CTK_DENOM};

use crate::error::CvmError;
use crate::permission::AccountPermissions;
use crate::state::{StateReader, StateWriter, GLOBAL_PERMISSIONS_ADDRESS};
use crate::types::{Account, Contract, ContractMeta, Metadata, StorageEntry, Word256};
use crate::MODULE_NAME;

const GAS_RATE_KEY: &[u8] = b"gas_rate";
const ABI_PREFIX: &[u8] = b"abi/";
const ACCOUNT_PREFIX: &[u8] = b"acc/";
const STORAGE_PREFIX: &[u8] = b"sto/";
const ADDRESS_META_PREFIX: &[u8] = b"addrmeta/";
const METADATA_PREFIX: &[u8] = b"metadata/";

const DEFAULT_GAS_RATE: u64 = 1;

fn account_key(address: &AccAddress) -> Vec<u8> {
    key(&[ACCOUNT_PREFIX, address.as_bytes()])
}

fn storage_key(address: &AccAddress, slot: &Word256) -> Vec<u8> {
    key(&[STORAGE_PREFIX, address.as_bytes(), slot.as_bytes()])
}

#[derive(Clone)]
pub struct CvmKeeper {
    store: PrefixStore,
    bank_keeper: BankKeeper,
}

impl CvmKeeper {
    pub fn new(backend: Arc<dyn KvStore>, bank_keeper: BankKeeper) -> Self {
        Self {
            store: PrefixStore::new(backend, MODULE_NAME),
            bank_keeper,
        }
    }

    /// A state view that reads and writes this keeper directly.
    pub fn state(&self) -> KeeperState {
        KeeperState {
            keeper: self.clone(),
        }
    }

    pub fn gas_rate(&self) -> Result<u64, CvmError> {
        Ok(self
            .store
            .get_value(GAS_RATE_KEY)?
            .unwrap_or(DEFAULT_GAS_RATE))
    }

    pub fn set_gas_rate(&self, rate: u64) -> Result<(), CvmError> {
        Ok(self.store.put_value(GAS_RATE_KEY, &rate)?)
    }

    pub fn abi(&self, address: &AccAddress) -> Result<Option<String>, CvmError> {
        Ok(self
            .store
            .get_value(&key(&[ABI_PREFIX, address.as_bytes()]))?)
    }

    pub fn set_abi(&self, address: &AccAddress, abi: &str) -> Result<(), CvmError> {
        Ok(self
            .store
            .put_value(&key(&[ABI_PREFIX, address.as_bytes()]), &abi.to_string())?)
    }

    /// Every non-empty storage slot of `address`, in key order.
    pub fn storage_entries(&self, address: &AccAddress) -> Result<Vec<StorageEntry>, CvmError> {
        let prefix = key(&[STORAGE_PREFIX, address.as_bytes()]);
        let skip = prefix.len();
        let mut entries = Vec::new();
        for (k, v) in self.store.scan_raw(&prefix)? {
            let mut slot = [0u8; 32];
            let raw = k.get(skip..).filter(|r| r.len() == 32).ok_or_else(|| {
                shentu_store::StoreError::Corruption(format!("bad storage key under {address}"))
            })?;
            slot.copy_from_slice(raw);
            entries.push(StorageEntry {
                key: Word256::new(slot),
                value: shentu_store::prefix::decode(&v)?,
            });
        }
        Ok(entries)
    }

    /// Every account holding code, with its ABI, storage and metadata links.
    pub fn contracts(&self) -> Result<Vec<Contract>, CvmError> {
        let mut contracts = Vec::new();
        for account in self.store.scan_values::<Account>(ACCOUNT_PREFIX)? {
            if !account.is_contract() {
                continue;
            }
            contracts.push(Contract {
                address: account.address,
                abi: self.abi(&account.address)?,
                storage: self.storage_entries(&account.address)?,
                meta: self.state().address_meta(&account.address)?,
                code: account.code,
            });
        }
        Ok(contracts)
    }

    /// Every stored metadata document, in hash order.
    pub fn metas(&self) -> Result<Vec<Metadata>, CvmError> {
        let skip = METADATA_PREFIX.len();
        let mut metas = Vec::new();
        for (k, v) in self.store.scan_raw(METADATA_PREFIX)? {
            let mut hash = [0u8; 32];
            let raw = k.get(skip..).filter(|r| r.len() == 32).ok_or_else(|| {
                shentu_store::StoreError::Corruption("bad metadata key".to_string())
            })?;
            hash.copy_from_slice(raw);
            metas.push(Metadata {
                hash: Word256::new(hash),
                metadata: shentu_store::prefix::decode(&v)?,
            });
        }
        Ok(metas)
    }

    /// Create the account at the zero address carrying the global default permissions.
    pub fn register_global_permission_account(&self) -> Result<(), CvmError> {
        let account = Account {
            address: GLOBAL_PERMISSIONS_ADDRESS,
            permissions: AccountPermissions::global_default(),
            ..Account::default()
        };
        self.state().update_account(&account)?;
        tracing::debug!("global permission account registered");
        Ok(())
    }
}

/// [`StateReader`]/[`StateWriter`] backed by the keeper's store.
///
/// Balances are the bank's uctk balances; everything else is CVM state.
#[derive(Clone)]
pub struct KeeperState {
    keeper: CvmKeeper,
}

impl StateReader for KeeperState {
    fn account(&self, address: &AccAddress) -> Result<Option<Account>, CvmError> {
        let balance = self.keeper.bank_keeper.balance(address, MICRO_CTK_DENOM)?;
        match self.keeper.store.get_value::<Account>(&account_key(address))? {
            Some(mut account) => {
                account.balance = balance;
                Ok(Some(account))
            }
            // A funded bank account is a VM account without code.
            None if balance > 0 => Ok(Some(Account {
                address: *address,
                balance,
                ..Account::default()
            })),
            None => Ok(None),
        }
    }

    fn storage(&self, address: &AccAddress, slot: &Word256) -> Result<Vec<u8>, CvmError> {
        Ok(self
            .keeper
            .store
            .get_value(&storage_key(address, slot))?
            .unwrap_or_default())
    }

    fn address_meta(&self, address: &AccAddress) -> Result<Vec<ContractMeta>, CvmError> {
        Ok(self
            .keeper
            .store
            .get_value(&key(&[ADDRESS_META_PREFIX, address.as_bytes()]))?
            .unwrap_or_default())
    }

    fn metadata(&self, hash: &Word256) -> Result<Option<String>, CvmError> {
        Ok(self
            .keeper
            .store
            .get_value(&key(&[METADATA_PREFIX, hash.as_bytes()]))?)
    }
}

impl StateWriter for KeeperState {
    fn update_account(&mut self, account: &Account) -> Result<(), CvmError> {
        let bank = &self.keeper.bank_keeper;
        if bank.balance(&account.address, MICRO_CTK_DENOM)? != account.balance {
            bank.set_balance(&account.address, MICRO_CTK_DENOM, account.balance)?;
        }
        let stored = Account {
            balance: 0,
            ..account.clone()
        };
        Ok(self
            .keeper
            .store
            .put_value(&account_key(&account.address), &stored)?)
    }

    fn set_storage(
        &mut self,
        address: &AccAddress,
        slot: &Word256,
        value: &[u8],
    ) -> Result<(), CvmError> {
        let k = storage_key(address, slot);
        if value.is_empty() {
            self.keeper.store.delete(&k)?;
        } else {
            self.keeper.store.put_value(&k, &value.to_vec())?;
        }
        Ok(())
    }

    fn set_address_meta(
        &mut self,
        address: &AccAddress,
        meta: &[ContractMeta],
    ) -> Result<(), CvmError> {
        Ok(self
            .keeper
            .store
            .put_value(&key(&[ADDRESS_META_PREFIX, address.as_bytes()]), &meta.to_vec())?)
    }

    fn set_metadata(&mut self, hash: &Word256, metadata: &str) -> Result<(), CvmError> {
        Ok(self
            .keeper
            .store
            .put_value(&key(&[METADATA_PREFIX, hash.as_bytes()]), &metadata.to_string())?)
    }
}
