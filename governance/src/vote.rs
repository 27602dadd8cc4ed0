//! Votes, deposits and tally results.

use serde::{Deserialize, Serialize};
use std::fmt;

use shentu_types::{AccAddress, Coins};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteOption {
    Yes,
    Abstain,
    No,
    NoWithVeto,
}

impl fmt::Display for VoteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Yes => "Yes",
            Self::Abstain => "Abstain",
            Self::No => "No",
            Self::NoWithVeto => "NoWithVeto",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub proposal_id: u64,
    pub voter: AccAddress,
    pub option: VoteOption,
}

/// Coins escrowed by one depositor on one proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub proposal_id: u64,
    pub depositor: AccAddress,
    pub amount: Coins,
}

/// Voting power behind each option.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyResult {
    pub yes: u128,
    pub abstain: u128,
    pub no: u128,
    pub no_with_veto: u128,
}

impl TallyResult {
    pub fn add(&mut self, option: VoteOption, power: u128) {
        let slot = match option {
            VoteOption::Yes => &mut self.yes,
            VoteOption::Abstain => &mut self.abstain,
            VoteOption::No => &mut self.no,
            VoteOption::NoWithVeto => &mut self.no_with_veto,
        };
        *slot = slot.saturating_add(power);
    }

    pub fn total(&self) -> u128 {
        self.yes
            .saturating_add(self.abstain)
            .saturating_add(self.no)
            .saturating_add(self.no_with_veto)
    }
}
