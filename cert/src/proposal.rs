//! Governance proposal changing certifier membership.

use serde::{Deserialize, Serialize};

use shentu_types::AccAddress;

use crate::error::CertError;
use crate::keeper::{CertKeeper, Certifier};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddOrRemove {
    Add,
    Remove,
}

/// Add a certifier to, or remove one from, the council.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertifierUpdateProposal {
    pub title: String,
    pub description: String,
    pub certifier: AccAddress,
    #[serde(default)]
    pub alias: String,
    pub proposer: AccAddress,
    pub add_or_remove: AddOrRemove,
}

impl CertifierUpdateProposal {
    pub fn validate_basic(&self) -> Result<(), CertError> {
        if self.certifier.is_zero() {
            return Err(CertError::InvalidProposal(
                "certifier address is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply a passed proposal.
    pub fn execute(&self, keeper: &CertKeeper) -> Result<(), CertError> {
        match self.add_or_remove {
            AddOrRemove::Add => {
                if keeper.is_certifier(&self.certifier)? {
                    return Err(CertError::CertifierAlreadyExists);
                }
                keeper.set_certifier(&Certifier {
                    address: self.certifier,
                    alias: self.alias.clone(),
                    proposer: self.proposer,
                    description: self.description.clone(),
                })
            }
            AddOrRemove::Remove => keeper.delete_certifier(&self.certifier),
        }
    }
}
