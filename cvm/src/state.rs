//! Read and write access to VM state.

use shentu_types::AccAddress;

use crate::error::CvmError;
use crate::permission::{BasePermissions, PermFlags};
use crate::types::{Account, ContractMeta, Word256};

/// Address of the account holding the global default permissions.
pub const GLOBAL_PERMISSIONS_ADDRESS: AccAddress = AccAddress::ZERO;

pub trait StateReader {
    fn account(&self, address: &AccAddress) -> Result<Option<Account>, CvmError>;

    /// Value of a storage slot; empty when unset.
    fn storage(&self, address: &AccAddress, key: &Word256) -> Result<Vec<u8>, CvmError>;

    fn address_meta(&self, address: &AccAddress) -> Result<Vec<ContractMeta>, CvmError>;

    fn metadata(&self, hash: &Word256) -> Result<Option<String>, CvmError>;

    /// Permissions of the global-permissions account, or none if it is missing.
    fn global_permissions(&self) -> Result<BasePermissions, CvmError> {
        Ok(self
            .account(&GLOBAL_PERMISSIONS_ADDRESS)?
            .map(|a| a.permissions.base)
            .unwrap_or_default())
    }

    /// Whether `address` holds `flag`, falling back to the global permissions.
    fn has_permission(&self, address: &AccAddress, flag: PermFlags) -> Result<bool, CvmError> {
        let global = self.global_permissions()?;
        Ok(match self.account(address)? {
            Some(account) => account.permissions.has(flag, &global),
            None => global.get(flag).unwrap_or(false),
        })
    }
}

pub trait StateWriter: StateReader {
    fn update_account(&mut self, account: &Account) -> Result<(), CvmError>;

    /// Write a storage slot; an empty value clears it.
    fn set_storage(&mut self, address: &AccAddress, key: &Word256, value: &[u8])
        -> Result<(), CvmError>;

    fn set_address_meta(
        &mut self,
        address: &AccAddress,
        meta: &[ContractMeta],
    ) -> Result<(), CvmError>;

    fn set_metadata(&mut self, hash: &Word256, metadata: &str) -> Result<(), CvmError>;
}
