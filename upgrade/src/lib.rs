//! Coordinated software upgrades.
//!
//! A governance proposal schedules an upgrade [`Plan`] at a future height or
//! time. When the plan comes due, `begin_block` runs the handler registered
//! under the plan's name; a binary without that handler must stop instead of
//! producing blocks with the old logic.

pub mod error;
pub mod keeper;
pub mod plan;
pub mod proposal;

pub use error::UpgradeError;
pub use keeper::{UpgradeHandler, UpgradeKeeper};
pub use plan::Plan;
pub use proposal::{CancelSoftwareUpgradeProposal, SoftwareUpgradeProposal};

pub const MODULE_NAME: &str = "upgrade";
