//! Account address type with `certik1` prefix.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// A 20-byte account address.
///
/// The text form is `certik1` followed by the 40 lowercase hex digits of the
/// raw bytes. The same bytes identify an account in the bank and a contract
/// in the CVM.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccAddress([u8; 20]);

impl AccAddress {
    /// The human-readable prefix of every account address.
    pub const PREFIX: &'static str = "certik1";

    /// Length of the raw address in bytes.
    pub const LEN: usize = 20;

    pub const ZERO: Self = Self([0u8; 20]);

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Parse the `certik1…` text form.
    pub fn parse(s: &str) -> Result<Self, TypesError> {
        let body = s
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| TypesError::InvalidAddress(s.to_string()))?;
        if body.len() != Self::LEN * 2 || body.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(TypesError::InvalidAddress(s.to_string()));
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(body, &mut bytes)
            .map_err(|_| TypesError::InvalidAddress(s.to_string()))?;
        Ok(Self(bytes))
    }

    /// Derive the address of a module account from its name.
    pub fn from_module_name(name: &str) -> Self {
        let digest = Sha256::digest(name.as_bytes());
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest[..20]);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for AccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, hex::encode(self.0))
    }
}

impl fmt::Debug for AccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccAddress({})", self)
    }
}

impl FromStr for AccAddress {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for AccAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_form_round_trips() {
        let addr = AccAddress::new([0xAB; 20]);
        let text = addr.to_string();
        assert!(text.starts_with("certik1"));
        assert_eq!(text.len(), 7 + 40);
        assert_eq!(AccAddress::parse(&text).unwrap(), addr);
    }

    #[test]
    fn rejects_wrong_prefix_and_length() {
        assert!(AccAddress::parse("cosmos1abcd").is_err());
        assert!(AccAddress::parse("certik1abcd").is_err());
        let upper = format!("certik1{}", "AB".repeat(20));
        assert!(AccAddress::parse(&upper).is_err());
        let not_hex = format!("certik1{}", "zz".repeat(20));
        assert!(AccAddress::parse(&not_hex).is_err());
    }

    #[test]
    fn module_addresses_are_deterministic_and_distinct() {
        let gov = AccAddress::from_module_name("gov");
        assert_eq!(gov, AccAddress::from_module_name("gov"));
        assert_ne!(gov, AccAddress::from_module_name("cvm"));
        assert!(!gov.is_zero());
    }

    #[test]
    fn json_uses_text_form() {
        let addr = AccAddress::new([1; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", addr));
        let back: AccAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
