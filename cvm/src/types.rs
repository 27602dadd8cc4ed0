//! Contract VM value types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use shentu_types::AccAddress;

use crate::permission::AccountPermissions;

/// A 32-byte VM word, written as 64 hex digits.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word256([u8; 32]);

impl Word256 {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Left-pad a big-endian value shorter than a word.
    pub fn left_padded(bytes: &[u8]) -> Self {
        let mut word = [0u8; 32];
        let take = bytes.len().min(32);
        word[32 - take..].copy_from_slice(&bytes[bytes.len() - take..]);
        Self(word)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for Word256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Word256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word256({self})")
    }
}

impl Serialize for Word256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        hex::serde::serialize(self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Word256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        hex::serde::deserialize(deserializer).map(Self)
    }
}

/// Links deployed code to the metadata describing it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMeta {
    pub code_hash: Word256,
    pub metadata_hash: Word256,
}

/// Metadata document (usually compiler output) keyed by its hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub hash: Word256,
    pub metadata: String,
}

/// One storage slot of a contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEntry {
    pub key: Word256,
    #[serde(with = "hex::serde")]
    pub value: Vec<u8>,
}

/// A VM account. `balance` mirrors the bank's uctk balance of `address`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: AccAddress,
    #[serde(default)]
    pub balance: u128,
    #[serde(default, with = "hex::serde")]
    pub code: Vec<u8>,
    #[serde(default)]
    pub permissions: AccountPermissions,
    #[serde(default)]
    pub contract_meta: Vec<ContractMeta>,
}

impl Account {
    pub fn is_contract(&self) -> bool {
        !self.code.is_empty()
    }
}

/// A deployed contract as it appears in genesis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub address: AccAddress,
    #[serde(with = "hex::serde")]
    pub code: Vec<u8>,
    #[serde(default)]
    pub abi: Option<String>,
    #[serde(default)]
    pub storage: Vec<StorageEntry>,
    #[serde(default)]
    pub meta: Vec<ContractMeta>,
}
