//! CVM genesis import/export.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::cache::CallFrame;
use crate::error::CvmError;
use crate::keeper::CvmKeeper;
use crate::permission::{AccountPermissions, BasePermissions, PermFlags};
use crate::state::{StateReader, StateWriter};
use crate::types::{Account, Contract, Metadata};

fn default_gas_rate() -> u64 {
    1
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    #[serde(default = "default_gas_rate")]
    pub gas_rate: u64,
    #[serde(default)]
    pub contracts: Vec<Contract>,
    #[serde(default)]
    pub metadata: Vec<Metadata>,
}

impl Default for GenesisState {
    fn default() -> Self {
        Self {
            gas_rate: default_gas_rate(),
            contracts: Vec::new(),
            metadata: Vec::new(),
        }
    }
}

pub fn validate_genesis(genesis: &GenesisState) -> Result<(), CvmError> {
    if genesis.gas_rate == 0 {
        return Err(CvmError::InvalidGenesis("gas rate must be positive".to_string()));
    }
    let mut seen = HashSet::new();
    for contract in &genesis.contracts {
        // A contract is an account holding code.
        if contract.code.is_empty() {
            return Err(CvmError::InvalidGenesis(format!(
                "contract {} has no code",
                contract.address
            )));
        }
        if !seen.insert(contract.address) {
            return Err(CvmError::InvalidGenesis(format!(
                "duplicate contract {}",
                contract.address
            )));
        }
    }
    Ok(())
}

/// Import contracts and metadata.
///
/// Contract accounts keep whatever balance the bank already holds for their
/// address, so bank genesis must run first.
pub fn init_genesis(keeper: &CvmKeeper, genesis: &GenesisState) -> Result<(), CvmError> {
    validate_genesis(genesis)?;
    keeper.set_gas_rate(genesis.gas_rate)?;

    let mut state = keeper.state();
    let mut frame = CallFrame::new(keeper.state());

    for contract in &genesis.contracts {
        if let Some(abi) = &contract.abi {
            keeper.set_abi(&contract.address, abi)?;
        }

        for entry in &contract.storage {
            state.set_storage(&contract.address, &entry.key, &entry.value)?;
        }

        if !contract.meta.is_empty() {
            state.set_address_meta(&contract.address, &contract.meta)?;
        }

        let balance = state
            .account(&contract.address)?
            .map(|existing| existing.balance)
            .unwrap_or(0);
        frame.update_account(&Account {
            address: contract.address,
            balance,
            code: contract.code.clone(),
            permissions: AccountPermissions {
                base: BasePermissions {
                    perms: PermFlags::CALL | PermFlags::CREATE_CONTRACT,
                    set_bit: PermFlags::NONE,
                },
                roles: Vec::new(),
            },
            contract_meta: contract.meta.clone(),
        })?;
    }
    frame.sync(&mut state)?;

    for metadata in &genesis.metadata {
        state.set_metadata(&metadata.hash, &metadata.metadata)?;
    }

    keeper.register_global_permission_account()?;
    tracing::info!(
        contracts = genesis.contracts.len(),
        metadata = genesis.metadata.len(),
        gas_rate = genesis.gas_rate,
        "cvm genesis imported"
    );
    Ok(())
}

pub fn export_genesis(keeper: &CvmKeeper) -> Result<GenesisState, CvmError> {
    Ok(GenesisState {
        gas_rate: keeper.gas_rate()?,
        contracts: keeper.contracts()?,
        metadata: keeper.metas()?,
    })
}
