//! Execution context handed to handlers, keepers and block hooks.

use crate::event::EventManager;
use crate::hash::TxHash;
use crate::time::Timestamp;

/// Per-block (and per-transaction) execution context.
#[derive(Clone, Debug, Default)]
pub struct Context {
    pub chain_id: String,
    pub height: u64,
    pub time: Timestamp,
    /// Raw bytes of the transaction being delivered (empty outside a tx).
    pub tx_bytes: Vec<u8>,
    pub events: EventManager,
}

impl Context {
    pub fn new(chain_id: impl Into<String>, height: u64, time: Timestamp) -> Self {
        Self {
            chain_id: chain_id.into(),
            height,
            time,
            tx_bytes: Vec::new(),
            events: EventManager::new(),
        }
    }

    /// A context for delivering one transaction in the current block.
    pub fn with_tx_bytes(&self, tx_bytes: Vec<u8>) -> Self {
        Self {
            chain_id: self.chain_id.clone(),
            height: self.height,
            time: self.time,
            tx_bytes,
            events: EventManager::new(),
        }
    }

    pub fn tx_hash(&self) -> TxHash {
        TxHash::of(&self.tx_bytes)
    }
}
