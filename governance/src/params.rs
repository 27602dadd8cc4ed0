//! Governance parameters.
//!
//! Thresholds are basis points (10_000 = 100%) so the tally stays in
//! integer arithmetic.

use serde::{Deserialize, Serialize};

use shentu_types::{Coin, Coins};

use crate::error::GovError;

/// 1 CTK in uctk.
const CTK: u128 = 1_000_000;
const DAY_SECS: u64 = 24 * 3600;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositParams {
    /// Total deposit that moves a proposal into the voting period.
    pub min_deposit: Coins,
    /// Deposit a non-council proposer must attach when submitting.
    pub min_initial_deposit: Coins,
    /// How long a proposal may wait for deposits before it is dropped.
    pub max_deposit_period_secs: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingParams {
    pub voting_period_secs: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyParams {
    /// Minimum share of total voting power that must vote.
    pub quorum_bps: u32,
    /// Share of non-abstaining power voting Yes needed to pass.
    pub threshold_bps: u32,
    /// Share of NoWithVeto power that vetoes the proposal.
    pub veto_bps: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovParams {
    pub deposit: DepositParams,
    pub voting: VotingParams,
    pub tally: TallyParams,
}

impl Default for GovParams {
    fn default() -> Self {
        Self {
            deposit: DepositParams {
                min_deposit: Coins::from_coin(Coin::uctk(512 * CTK)),
                // Current bar for initial deposits is 0 CTK.
                min_initial_deposit: Coins::empty(),
                max_deposit_period_secs: 14 * DAY_SECS,
            },
            voting: VotingParams {
                voting_period_secs: 14 * DAY_SECS,
            },
            tally: TallyParams {
                quorum_bps: 3340,
                threshold_bps: 5000,
                veto_bps: 3340,
            },
        }
    }
}

impl GovParams {
    pub fn validate(&self) -> Result<(), GovError> {
        self.deposit.min_deposit.validate()?;
        self.deposit.min_initial_deposit.validate()?;
        if self.deposit.min_deposit.is_zero() {
            return Err(GovError::InvalidGenesis("min deposit must be positive".to_string()));
        }
        if self.deposit.max_deposit_period_secs == 0 || self.voting.voting_period_secs == 0 {
            return Err(GovError::InvalidGenesis("periods must be positive".to_string()));
        }
        let t = &self.tally;
        for (name, bps) in [
            ("quorum", t.quorum_bps),
            ("threshold", t.threshold_bps),
            ("veto", t.veto_bps),
        ] {
            if bps > 10_000 {
                return Err(GovError::InvalidGenesis(format!(
                    "{name} must not exceed 10000 basis points, got {bps}"
                )));
            }
        }
        if t.threshold_bps == 0 || t.veto_bps == 0 {
            return Err(GovError::InvalidGenesis(
                "threshold and veto must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
