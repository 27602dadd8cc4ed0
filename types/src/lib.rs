//! Fundamental types for the Shentu chain.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses, coins, timestamps, transaction hashes, events and the execution context.

pub mod address;
pub mod coin;
pub mod context;
pub mod error;
pub mod event;
pub mod hash;
pub mod result;
pub mod time;

pub use address::AccAddress;
pub use coin::{Coin, Coins, MICRO_CTK_DENOM};
pub use context::Context;
pub use error::TypesError;
pub use event::{Attribute, Event, EventManager};
pub use hash::TxHash;
pub use result::HandlerResult;
pub use time::Timestamp;
