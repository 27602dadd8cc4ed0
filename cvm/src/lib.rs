//! Contract VM state for the Shentu chain.
//!
//! The VM itself runs elsewhere; this crate owns what it persists. Contract
//! accounts (code, permissions, metadata links), per-contract storage, ABIs,
//! and the gas rate live here, while account balances stay in the bank and
//! are read through it in uctk.
//!
//! Writes made while executing go through a [`CallFrame`] and reach the
//! keeper only when the frame is synced.

pub mod cache;
pub mod error;
pub mod genesis;
pub mod keeper;
pub mod permission;
pub mod state;
pub mod types;

pub use cache::CallFrame;
pub use error::CvmError;
pub use genesis::GenesisState;
pub use keeper::{CvmKeeper, KeeperState};
pub use permission::{AccountPermissions, BasePermissions, PermFlags};
pub use state::{StateReader, StateWriter};
pub use types::{Account, Contract, ContractMeta, Metadata, StorageEntry, Word256};

pub const MODULE_NAME: &str = "cvm";
