//! Coin and coin-set types.
//!
//! Amounts are fixed-point integers (u128) in the smallest unit of a denom.
//! A [`Coins`] set is kept sorted by denom with no duplicate denoms and no
//! zero amounts, so equality and comparison are structural.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;

/// The staking and fee denom of the chain (1 CTK = 10^6 uctk).
pub const MICRO_CTK_DENOM: &str = "uctk";

/// A single amount of one denom.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    /// Shorthand for an amount of [`MICRO_CTK_DENOM`].
    pub fn uctk(amount: u128) -> Self {
        Self::new(MICRO_CTK_DENOM, amount)
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Check a denom: 3-16 chars, a lowercase letter first, then lowercase letters or digits.
pub fn validate_denom(denom: &str) -> Result<(), TypesError> {
    let bytes = denom.as_bytes();
    let ok = (3..=16).contains(&bytes.len())
        && bytes[0].is_ascii_lowercase()
        && bytes[1..]
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit());
    if ok {
        Ok(())
    } else {
        Err(TypesError::InvalidDenom(denom.to_string()))
    }
}

/// A sorted set of coins.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coins(Vec<Coin>);

impl Coins {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Build a coin set, sorting by denom and dropping zero amounts.
    ///
    /// Fails on an invalid denom or a denom listed twice.
    pub fn new(coins: Vec<Coin>) -> Result<Self, TypesError> {
        let mut coins: Vec<Coin> = coins.into_iter().filter(|c| c.amount > 0).collect();
        for c in &coins {
            validate_denom(&c.denom)?;
        }
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        if coins.windows(2).any(|w| w[0].denom == w[1].denom) {
            return Err(TypesError::InvalidCoins("duplicate denom".to_string()));
        }
        Ok(Self(coins))
    }

    /// A set holding a single coin (empty when the amount is zero).
    pub fn from_coin(coin: Coin) -> Self {
        if coin.amount == 0 {
            Self::empty()
        } else {
            Self(vec![coin])
        }
    }

    /// Validate a set that came from the outside (e.g. deserialized).
    pub fn validate(&self) -> Result<(), TypesError> {
        for c in &self.0 {
            validate_denom(&c.denom)?;
            if c.amount == 0 {
                return Err(TypesError::InvalidCoins(format!("zero amount for {}", c.denom)));
            }
        }
        if self.0.windows(2).any(|w| w[0].denom >= w[1].denom) {
            return Err(TypesError::InvalidCoins(
                "coins must be sorted by denom without duplicates".to_string(),
            ));
        }
        Ok(())
    }

    pub fn amount_of(&self, denom: &str) -> u128 {
        self.0
            .binary_search_by(|c| c.denom.as_str().cmp(denom))
            .map(|i| self.0[i].amount)
            .unwrap_or(0)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.0.iter()
    }

    pub fn denoms(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|c| c.denom.as_str())
    }

    /// Sum of two sets. Returns `None` on overflow.
    pub fn checked_add(&self, other: &Coins) -> Option<Coins> {
        let mut out = self.0.clone();
        for c in &other.0 {
            match out.binary_search_by(|x| x.denom.cmp(&c.denom)) {
                Ok(i) => out[i].amount = out[i].amount.checked_add(c.amount)?,
                Err(i) => out.insert(i, c.clone()),
            }
        }
        Some(Coins(out))
    }

    /// Difference of two sets. Returns `None` if any denom would go negative.
    pub fn checked_sub(&self, other: &Coins) -> Option<Coins> {
        let mut out = self.0.clone();
        for c in &other.0 {
            let i = out.binary_search_by(|x| x.denom.cmp(&c.denom)).ok()?;
            out[i].amount = out[i].amount.checked_sub(c.amount)?;
        }
        out.retain(|c| c.amount > 0);
        Some(Coins(out))
    }

    /// True when every denom in `other` is covered by at least as much in `self`.
    pub fn is_all_gte(&self, other: &Coins) -> bool {
        other.0.iter().all(|c| self.amount_of(&c.denom) >= c.amount)
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
