//! Transaction hash type.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// A 32-byte transaction hash: SHA-256 of the raw transaction bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHash([u8; 32]);

impl TxHash {
    /// Hash raw transaction bytes.
    pub fn of(tx_bytes: &[u8]) -> Self {
        Self(Sha256::digest(tx_bytes).into())
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_of_empty_input() {
        assert_eq!(
            TxHash::of(b"").to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn different_bytes_hash_differently() {
        assert_ne!(TxHash::of(b"a"), TxHash::of(b"b"));
        assert_eq!(TxHash::of(b"a").to_string().len(), 64);
    }
}
