//! Token balances for the Shentu chain.
//!
//! Holds per-account balances, the total supply of every denom, and the
//! module accounts (such as the governance deposit escrow) that other
//! keepers move coins into and out of.

pub mod error;
pub mod genesis;
pub mod keeper;
pub mod msgs;

pub use error::BankError;
pub use genesis::{Balance, BankGenesis};
pub use keeper::BankKeeper;
pub use msgs::{handle_msg_send, MsgSend};

/// Store namespace of the bank keeper.
pub const MODULE_NAME: &str = "bank";
