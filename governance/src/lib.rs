//! On-chain governance for the Shentu chain.
//!
//! Lifecycle: DepositPeriod → VotingPeriod → Passed | Rejected | Failed.
//! A proposal enters the voting period once its deposits reach the minimum
//! deposit, or immediately when its proposer is a council member
//! (a certifier). Proposals left in the deposit period past their deadline
//! are dropped and their deposits burned.
//!
//! Certifier-update proposals may only be submitted by certifiers, and
//! software-upgrade proposals are checked against the upgrade keeper before
//! they are accepted.

pub mod abci;
pub mod error;
pub mod events;
pub mod expected;
pub mod genesis;
pub mod handler;
pub mod keeper;
pub mod msgs;
pub mod params;
pub mod proposal;
pub mod proposal_handler;
pub mod tally;
pub mod vote;

pub use abci::end_blocker;
pub use error::GovError;
pub use expected::StakingKeeper;
pub use genesis::GovGenesis;
pub use handler::handle;
pub use keeper::GovKeeper;
pub use msgs::{GovMsg, MsgDeposit, MsgSubmitProposal, MsgVote};
pub use params::{DepositParams, GovParams, TallyParams, VotingParams};
pub use proposal::{proposal_id_bytes, Proposal, ProposalContent, ProposalStatus};
pub use vote::{Deposit, TallyResult, Vote, VoteOption};

/// Store namespace and module-account name of governance.
pub const MODULE_NAME: &str = "gov";
