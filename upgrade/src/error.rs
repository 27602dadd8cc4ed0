use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpgradeError {
    #[error("invalid upgrade plan: {0}")]
    InvalidPlan(String),

    #[error("upgrade cannot be scheduled in the past")]
    PlanInPast,

    #[error("upgrade with name {0} has already been completed")]
    AlreadyCompleted(String),

    #[error("UPGRADE \"{name}\" NEEDED at height {height}")]
    UpgradeNeeded { name: String, height: u64 },

    #[error("binary updated before upgrade \"{0}\" was due")]
    PrematureUpgrade(String),

    #[error("upgrade handler for {name} failed: {reason}")]
    HandlerFailed { name: String, reason: String },

    #[error("store error: {0}")]
    Store(#[from] shentu_store::StoreError),
}
