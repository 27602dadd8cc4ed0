//! Governance genesis import/export.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use shentu_bank::BankKeeper;
use shentu_types::Coins;

use crate::error::GovError;
use crate::keeper::GovKeeper;
use crate::params::GovParams;
use crate::proposal::{Proposal, ProposalStatus};
use crate::vote::{Deposit, Vote};
use crate::MODULE_NAME;

fn default_starting_proposal_id() -> u64 {
    1
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovGenesis {
    #[serde(default = "default_starting_proposal_id")]
    pub starting_proposal_id: u64,
    #[serde(default)]
    pub deposits: Vec<Deposit>,
    #[serde(default)]
    pub votes: Vec<Vote>,
    #[serde(default)]
    pub proposals: Vec<Proposal>,
    #[serde(default)]
    pub params: GovParams,
}

impl Default for GovGenesis {
    fn default() -> Self {
        Self {
            starting_proposal_id: default_starting_proposal_id(),
            deposits: Vec::new(),
            votes: Vec::new(),
            proposals: Vec::new(),
            params: GovParams::default(),
        }
    }
}

impl GovGenesis {
    /// Check the state is self-consistent.
    ///
    /// Deposits may only sit on proposals still collecting deposits or votes,
    /// and must add up to each such proposal's `total_deposit`. Votes may only
    /// sit on proposals in their voting period.
    pub fn validate(&self) -> Result<(), GovError> {
        self.params.validate()?;
        if self.starting_proposal_id == 0 {
            return Err(GovError::InvalidGenesis(
                "starting proposal id must be positive".to_string(),
            ));
        }

        let mut statuses = BTreeMap::new();
        for proposal in &self.proposals {
            if proposal.id >= self.starting_proposal_id {
                return Err(GovError::InvalidGenesis(format!(
                    "proposal {} is not below starting proposal id {}",
                    proposal.id, self.starting_proposal_id
                )));
            }
            if statuses.insert(proposal.id, proposal.status).is_some() {
                return Err(GovError::InvalidGenesis(format!(
                    "duplicate proposal {}",
                    proposal.id
                )));
            }
        }

        let mut deposited: BTreeMap<u64, Coins> = BTreeMap::new();
        for deposit in &self.deposits {
            deposit.amount.validate()?;
            match statuses.get(&deposit.proposal_id) {
                Some(ProposalStatus::DepositPeriod | ProposalStatus::VotingPeriod) => {}
                Some(status) => {
                    return Err(GovError::InvalidGenesis(format!(
                        "deposit on proposal {} which is already {status:?}",
                        deposit.proposal_id
                    )))
                }
                None => {
                    return Err(GovError::InvalidGenesis(format!(
                        "deposit on unknown proposal {}",
                        deposit.proposal_id
                    )))
                }
            }
            let sum = deposited.entry(deposit.proposal_id).or_default();
            *sum = sum
                .checked_add(&deposit.amount)
                .ok_or_else(|| GovError::InvalidGenesis("deposit total overflows".to_string()))?;
        }

        for vote in &self.votes {
            match statuses.get(&vote.proposal_id) {
                Some(ProposalStatus::VotingPeriod) => {}
                Some(_) => {
                    return Err(GovError::InvalidGenesis(format!(
                        "vote on proposal {} which is not in its voting period",
                        vote.proposal_id
                    )))
                }
                None => {
                    return Err(GovError::InvalidGenesis(format!(
                        "vote on unknown proposal {}",
                        vote.proposal_id
                    )))
                }
            }
        }

        for proposal in &self.proposals {
            if !matches!(
                proposal.status,
                ProposalStatus::DepositPeriod | ProposalStatus::VotingPeriod
            ) {
                continue;
            }
            let sum = deposited.remove(&proposal.id).unwrap_or_default();
            if sum != proposal.total_deposit {
                return Err(GovError::InvalidGenesis(format!(
                    "proposal {} records total deposit {} but its deposits sum to {sum}",
                    proposal.id, proposal.total_deposit
                )));
            }
        }
        Ok(())
    }
}

/// Import governance state.
///
/// The `gov` module account must already hold exactly the sum of the
/// imported deposits, so bank genesis runs first.
pub fn init_genesis(keeper: &GovKeeper, genesis: &GovGenesis) -> Result<(), GovError> {
    genesis.validate()?;
    keeper.set_next_proposal_id(genesis.starting_proposal_id)?;
    keeper.set_params(&genesis.params)?;

    let mut total_deposits = Coins::empty();
    for deposit in &genesis.deposits {
        keeper.set_deposit(deposit)?;
        total_deposits = total_deposits
            .checked_add(&deposit.amount)
            .ok_or_else(|| GovError::InvalidGenesis("deposit total overflows".to_string()))?;
    }

    for vote in &genesis.votes {
        keeper.set_vote(vote)?;
    }

    for proposal in &genesis.proposals {
        match proposal.status {
            ProposalStatus::DepositPeriod => {
                keeper.insert_inactive_queue(proposal.deposit_end_time, proposal.id)?
            }
            ProposalStatus::VotingPeriod => {
                let end = proposal.voting_end_time.ok_or_else(|| {
                    GovError::InvalidGenesis(format!(
                        "proposal {} is in voting period without an end time",
                        proposal.id
                    ))
                })?;
                keeper.insert_active_queue(end, proposal.id)?
            }
            ProposalStatus::Passed | ProposalStatus::Rejected | ProposalStatus::Failed => {}
        }
        keeper.set_proposal(proposal)?;
    }

    let escrow = BankKeeper::module_address(MODULE_NAME);
    let held = keeper.bank_keeper.balances(&escrow)?;
    if held != total_deposits {
        return Err(GovError::InvalidGenesis(format!(
            "expected gov module account to hold {total_deposits}, it holds {held}"
        )));
    }

    tracing::info!(
        proposals = genesis.proposals.len(),
        deposits = genesis.deposits.len(),
        votes = genesis.votes.len(),
        "governance genesis imported"
    );
    Ok(())
}

pub fn export_genesis(keeper: &GovKeeper) -> Result<GovGenesis, GovError> {
    Ok(GovGenesis {
        starting_proposal_id: keeper.next_proposal_id()?,
        deposits: keeper.all_deposits()?,
        votes: keeper.all_votes()?,
        proposals: keeper.proposals()?,
        params: keeper.params()?,
    })
}
