use shentu_types::AccAddress;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CvmError {
    #[error("invalid cvm genesis: {0}")]
    InvalidGenesis(String),

    #[error("account {0} not found")]
    AccountNotFound(AccAddress),

    #[error(transparent)]
    Bank(#[from] shentu_bank::BankError),

    #[error("store error: {0}")]
    Store(#[from] shentu_store::StoreError),
}
