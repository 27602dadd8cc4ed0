//! Governance proposals that schedule or cancel an upgrade.

use serde::{Deserialize, Serialize};

use shentu_types::Context;

use crate::error::UpgradeError;
use crate::keeper::UpgradeKeeper;
use crate::plan::Plan;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareUpgradeProposal {
    pub title: String,
    pub description: String,
    pub plan: Plan,
}

impl SoftwareUpgradeProposal {
    pub fn validate_basic(&self) -> Result<(), UpgradeError> {
        self.plan.validate_basic()
    }

    pub fn execute(&self, ctx: &Context, keeper: &UpgradeKeeper) -> Result<(), UpgradeError> {
        keeper.schedule_upgrade(ctx, &self.plan)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelSoftwareUpgradeProposal {
    pub title: String,
    pub description: String,
}

impl CancelSoftwareUpgradeProposal {
    pub fn execute(&self, keeper: &UpgradeKeeper) -> Result<(), UpgradeError> {
        tracing::info!("scheduled upgrade cancelled by governance");
        keeper.clear_upgrade_plan()
    }
}
