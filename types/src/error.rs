//! Errors raised while parsing or validating fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid denom: {0}")]
    InvalidDenom(String),

    #[error("invalid coins: {0}")]
    InvalidCoins(String),
}
