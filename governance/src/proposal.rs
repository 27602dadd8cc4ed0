//! Governance proposals and their lifecycle.

use serde::{Deserialize, Serialize};

use shentu_cert::CertifierUpdateProposal;
use shentu_types::{AccAddress, Coins, Timestamp};
use shentu_upgrade::{CancelSoftwareUpgradeProposal, SoftwareUpgradeProposal};

use crate::error::GovError;
use crate::vote::TallyResult;

const MAX_TITLE_LEN: usize = 140;
const MAX_DESCRIPTION_LEN: usize = 5000;

/// Big-endian encoding of a proposal id, returned as message data and used in store keys.
pub fn proposal_id_bytes(id: u64) -> [u8; 8] {
    id.to_be_bytes()
}

/// What a proposal does once passed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalContent {
    /// Signalling only; passing it changes no state.
    Text { title: String, description: String },
    CertifierUpdate(CertifierUpdateProposal),
    SoftwareUpgrade(SoftwareUpgradeProposal),
    CancelSoftwareUpgrade(CancelSoftwareUpgradeProposal),
}

impl ProposalContent {
    pub fn proposal_type(&self) -> &'static str {
        match self {
            Self::Text { .. } => "Text",
            Self::CertifierUpdate(_) => "CertifierUpdate",
            Self::SoftwareUpgrade(_) => "SoftwareUpgrade",
            Self::CancelSoftwareUpgrade(_) => "CancelSoftwareUpgrade",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Text { title, .. } => title,
            Self::CertifierUpdate(p) => &p.title,
            Self::SoftwareUpgrade(p) => &p.title,
            Self::CancelSoftwareUpgrade(p) => &p.title,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Text { description, .. } => description,
            Self::CertifierUpdate(p) => &p.description,
            Self::SoftwareUpgrade(p) => &p.description,
            Self::CancelSoftwareUpgrade(p) => &p.description,
        }
    }

    pub fn validate_basic(&self) -> Result<(), GovError> {
        let title = self.title();
        if title.trim().is_empty() {
            return Err(GovError::InvalidProposalContent(
                "proposal title cannot be blank".to_string(),
            ));
        }
        if title.len() > MAX_TITLE_LEN {
            return Err(GovError::InvalidProposalContent(format!(
                "proposal title is longer than max length of {MAX_TITLE_LEN}"
            )));
        }
        if self.description().trim().is_empty() {
            return Err(GovError::InvalidProposalContent(
                "proposal description cannot be blank".to_string(),
            ));
        }
        if self.description().len() > MAX_DESCRIPTION_LEN {
            return Err(GovError::InvalidProposalContent(format!(
                "proposal description is longer than max length of {MAX_DESCRIPTION_LEN}"
            )));
        }
        match self {
            Self::CertifierUpdate(p) => p.validate_basic()?,
            Self::SoftwareUpgrade(p) => p.validate_basic()?,
            Self::Text { .. } | Self::CancelSoftwareUpgrade(_) => {}
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Collecting deposits.
    DepositPeriod,
    /// Open for votes.
    VotingPeriod,
    Passed,
    Rejected,
    /// Passed the vote but its content could not be applied.
    Failed,
}

impl ProposalStatus {
    /// Whether the proposal still accepts deposits.
    pub fn accepts_deposits(&self) -> bool {
        matches!(self, Self::DepositPeriod | Self::VotingPeriod)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: u64,
    pub content: ProposalContent,
    pub status: ProposalStatus,
    pub final_tally: TallyResult,
    pub submit_time: Timestamp,
    pub deposit_end_time: Timestamp,
    pub total_deposit: Coins,
    pub voting_start_time: Option<Timestamp>,
    pub voting_end_time: Option<Timestamp>,
    pub proposer: AccAddress,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(title: &str, description: &str) -> ProposalContent {
        ProposalContent::Text {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn id_bytes_are_big_endian() {
        assert_eq!(proposal_id_bytes(1), [0, 0, 0, 0, 0, 0, 0, 1]);
        assert!(proposal_id_bytes(2) > proposal_id_bytes(1));
    }

    #[test]
    fn text_validation() {
        assert!(text("t", "d").validate_basic().is_ok());
        assert!(text("", "d").validate_basic().is_err());
        assert!(text("t", " ").validate_basic().is_err());
        assert!(text(&"x".repeat(141), "d").validate_basic().is_err());
        assert_eq!(text("t", "d").proposal_type(), "Text");
    }
}
