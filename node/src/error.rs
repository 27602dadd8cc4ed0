use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("bank error: {0}")]
    Bank(#[from] shentu_bank::BankError),

    #[error("cert error: {0}")]
    Cert(#[from] shentu_cert::CertError),

    #[error("upgrade error: {0}")]
    Upgrade(#[from] shentu_upgrade::UpgradeError),

    #[error("governance error: {0}")]
    Governance(#[from] shentu_governance::GovError),

    #[error("cvm error: {0}")]
    Cvm(#[from] shentu_cvm::CvmError),

    #[error("store error: {0}")]
    Store(#[from] shentu_store::StoreError),

    #[error("invalid genesis: {0}")]
    Genesis(String),

    #[error("tx decode error: {0}")]
    TxDecode(String),

    #[error("unknown request: {0}")]
    UnknownRequest(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("no block in progress")]
    NoBlock,

    #[error("block {0} is still in progress")]
    BlockInProgress(u64),

    #[error("block height {got} does not follow {last}")]
    HeightMismatch { last: u64, got: u64 },

    #[error("block {height} is above halt height {halt_height}")]
    Halted { height: u64, halt_height: u64 },

    #[error("config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
