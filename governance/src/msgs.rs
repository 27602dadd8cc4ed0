//! Governance messages.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use shentu_types::{AccAddress, Coins};

use crate::error::GovError;
use crate::proposal::ProposalContent;
use crate::vote::VoteOption;

/// Route under which governance messages are registered.
pub const ROUTE: &str = "gov";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgDeposit {
    pub proposal_id: u64,
    pub depositor: AccAddress,
    pub amount: Coins,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSubmitProposal {
    pub content: ProposalContent,
    #[serde(default)]
    pub initial_deposit: Coins,
    pub proposer: AccAddress,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgVote {
    pub proposal_id: u64,
    pub voter: AccAddress,
    pub option: VoteOption,
}

/// Every message the governance handler accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GovMsg {
    Deposit(MsgDeposit),
    SubmitProposal(MsgSubmitProposal),
    Vote(MsgVote),
}

fn decode<T: DeserializeOwned>(name: &str, value: serde_json::Value) -> Result<T, GovError> {
    serde_json::from_value(value)
        .map_err(|e| GovError::InvalidMessage(format!("{ROUTE}/{name}: {e}")))
}

impl GovMsg {
    /// Decode a message from its type name (the part after `gov/`) and JSON body.
    pub fn from_json(name: &str, value: serde_json::Value) -> Result<Self, GovError> {
        match name {
            "MsgDeposit" => decode(name, value).map(Self::Deposit),
            "MsgSubmitProposal" => decode(name, value).map(Self::SubmitProposal),
            "MsgVote" => decode(name, value).map(Self::Vote),
            other => Err(GovError::UnknownRequest(format!("{ROUTE}/{other}"))),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Deposit(_) => "MsgDeposit",
            Self::SubmitProposal(_) => "MsgSubmitProposal",
            Self::Vote(_) => "MsgVote",
        }
    }

    /// The account that must sign this message.
    pub fn signer(&self) -> AccAddress {
        match self {
            Self::Deposit(m) => m.depositor,
            Self::SubmitProposal(m) => m.proposer,
            Self::Vote(m) => m.voter,
        }
    }

    /// Stateless checks run before the handler.
    pub fn validate_basic(&self) -> Result<(), GovError> {
        match self {
            Self::Deposit(m) => {
                m.amount.validate()?;
                if m.amount.is_zero() {
                    return Err(GovError::InvalidMessage("deposit amount is empty".to_string()));
                }
            }
            Self::SubmitProposal(m) => {
                m.initial_deposit.validate()?;
                m.content.validate_basic()?;
            }
            Self::Vote(_) => {}
        }
        Ok(())
    }
}
