use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovError {
    #[error("unknown proposal {0}")]
    UnknownProposal(u64),

    #[error("inactive proposal {0}")]
    InactiveProposal(u64),

    #[error("insufficient initial deposits amount: {initial}, minimum: {minimum}")]
    InsufficientInitialDeposit { initial: u128, minimum: u128 },

    #[error("invalid proposal content: {0}")]
    InvalidProposalContent(String),

    #[error("invalid governance genesis: {0}")]
    InvalidGenesis(String),

    #[error("unrecognized gov message type: {0}")]
    UnknownRequest(String),

    #[error("invalid message: {0}")]
    InvalidMessage(String),

    #[error(transparent)]
    Cert(#[from] shentu_cert::CertError),

    #[error(transparent)]
    Upgrade(#[from] shentu_upgrade::UpgradeError),

    #[error(transparent)]
    Bank(#[from] shentu_bank::BankError),

    #[error(transparent)]
    Types(#[from] shentu_types::TypesError),

    #[error("store error: {0}")]
    Store(#[from] shentu_store::StoreError),
}
