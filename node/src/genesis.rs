//! Application genesis: the chain id, start time and every module's state.

use serde::{Deserialize, Serialize};
use std::path::Path;

use shentu_bank::BankGenesis;
use shentu_cert::CertGenesis;
use shentu_cvm::GenesisState as CvmGenesis;
use shentu_governance::GovGenesis;
use shentu_types::Timestamp;

use crate::NodeError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub bank: BankGenesis,
    #[serde(default)]
    pub cert: CertGenesis,
    #[serde(default)]
    pub gov: GovGenesis,
    #[serde(default)]
    pub cvm: CvmGenesis,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppGenesis {
    pub chain_id: String,
    #[serde(default)]
    pub genesis_time: Timestamp,
    #[serde(default)]
    pub app_state: AppState,
}

impl AppGenesis {
    /// Empty state for `chain_id` with every module at its defaults.
    pub fn new(chain_id: impl Into<String>, genesis_time: Timestamp) -> Self {
        Self {
            chain_id: chain_id.into(),
            genesis_time,
            app_state: AppState::default(),
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(s: &str) -> Result<Self, NodeError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json_string(&self) -> Result<String, NodeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json_file(&self, path: impl AsRef<Path>) -> Result<(), NodeError> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Stateless checks of every module's genesis.
    pub fn validate(&self) -> Result<(), NodeError> {
        if self.chain_id.trim().is_empty() {
            return Err(NodeError::Genesis("chain id cannot be blank".to_string()));
        }
        self.app_state.bank.validate()?;
        self.app_state.gov.validate()?;
        shentu_cvm::genesis::validate_genesis(&self.app_state.cvm)?;
        Ok(())
    }
}
