//! The Shentu node application.
//!
//! [`ShentuApp`] wires the bank, cert, upgrade, governance and CVM keepers
//! over one shared store and drives them through the block lifecycle:
//! `init_chain` once, then `begin_block`, `deliver_tx` for each transaction
//! and `end_block` for every height. Each transaction applies atomically.

pub mod app;
pub mod config;
pub mod error;
pub mod genesis;
pub mod logging;
pub mod tracing_spans;
pub mod tx;

pub use app::{Block, BlockResult, ShentuApp};
pub use config::NodeConfig;
pub use error::NodeError;
pub use genesis::{AppGenesis, AppState};
pub use logging::{init_logging, LogFormat};
pub use tx::{decode_tx, Msg, RawMsg, Tx, TxResponse};
