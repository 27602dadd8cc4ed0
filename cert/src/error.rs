use shentu_types::AccAddress;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CertError {
    #[error("{0} is not a certifier")]
    UnqualifiedCertifier(AccAddress),

    #[error("certifier already added")]
    CertifierAlreadyExists,

    #[error("certifier alias has been used by other certifiers")]
    RepeatedAlias,

    #[error("cannot remove the only certifier")]
    OnlyOneCertifier,

    #[error("invalid certifier proposal: {0}")]
    InvalidProposal(String),

    #[error("store error: {0}")]
    Store(#[from] shentu_store::StoreError),
}
