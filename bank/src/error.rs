use shentu_types::{AccAddress, TypesError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BankError {
    #[error("insufficient funds: {address} has {have}, needs {need}")]
    InsufficientFunds {
        address: AccAddress,
        have: String,
        need: String,
    },

    #[error("{0} is a module account and cannot use plain sends")]
    ModuleAccount(AccAddress),

    #[error("invalid coins: {0}")]
    InvalidCoins(#[from] TypesError),

    #[error("amount overflow for denom {0}")]
    Overflow(String),

    #[error("duplicate genesis balance for {0}")]
    DuplicateBalance(AccAddress),

    #[error("store error: {0}")]
    Store(#[from] shentu_store::StoreError),
}
