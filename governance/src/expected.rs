//! Collaborators governance needs from other modules.

use shentu_bank::BankKeeper;
use shentu_types::{AccAddress, MICRO_CTK_DENOM};

use crate::error::GovError;

/// Source of voting power for the tally.
pub trait StakingKeeper: Send + Sync {
    fn voting_power(&self, voter: &AccAddress) -> Result<u128, GovError>;

    fn total_voting_power(&self) -> Result<u128, GovError>;
}

/// Balance-weighted voting: one uctk, one vote.
impl StakingKeeper for BankKeeper {
    fn voting_power(&self, voter: &AccAddress) -> Result<u128, GovError> {
        Ok(self.balance(voter, MICRO_CTK_DENOM)?)
    }

    fn total_voting_power(&self) -> Result<u128, GovError> {
        Ok(self.supply_of(MICRO_CTK_DENOM)?)
    }
}
