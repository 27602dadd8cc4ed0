//! Bank genesis import/export.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use shentu_types::{AccAddress, Coins};

use crate::error::BankError;
use crate::keeper::BankKeeper;

/// Initial coins of one account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub address: AccAddress,
    pub coins: Coins,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankGenesis {
    #[serde(default)]
    pub balances: Vec<Balance>,
}

impl BankGenesis {
    pub fn validate(&self) -> Result<(), BankError> {
        let mut seen = HashSet::new();
        for balance in &self.balances {
            balance.coins.validate()?;
            if !seen.insert(balance.address) {
                return Err(BankError::DuplicateBalance(balance.address));
            }
        }
        Ok(())
    }
}

pub fn init_genesis(keeper: &BankKeeper, genesis: &BankGenesis) -> Result<(), BankError> {
    genesis.validate()?;
    for balance in &genesis.balances {
        for coin in &balance.coins {
            keeper.set_balance(&balance.address, &coin.denom, coin.amount)?;
        }
    }
    tracing::info!(accounts = genesis.balances.len(), "bank genesis imported");
    Ok(())
}

pub fn export_genesis(keeper: &BankKeeper) -> Result<BankGenesis, BankError> {
    let balances = keeper
        .accounts()?
        .into_iter()
        .map(|address| {
            keeper
                .balances(&address)
                .map(|coins| Balance { address, coins })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(BankGenesis { balances })
}
