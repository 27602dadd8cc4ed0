//! [`tracing::Span`] constructors for block and transaction processing.
//!
//! Consistent span names and fields make a replay easy to filter and
//! correlate in the JSON log output.

use tracing::{info_span, Span};

/// Span covering begin-block, every transaction and end-block of one block.
pub fn block_span(chain_id: &str, height: u64) -> Span {
    info_span!("block", chain_id = %chain_id, height = height)
}

/// Span covering delivery of a single transaction.
pub fn tx_span(tx_hash: &str) -> Span {
    info_span!("tx", hash = %tx_hash)
}

/// Span covering one message inside a transaction.
pub fn msg_span(index: usize, msg_type: &str) -> Span {
    info_span!("msg", index = index, msg_type = %msg_type)
}
