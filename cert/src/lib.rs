//! Certifier registry.
//!
//! Certifiers form the chain's council: they are the only accounts allowed
//! to propose certifier membership changes, and their governance proposals
//! skip the deposit period.

pub mod error;
pub mod genesis;
pub mod keeper;
pub mod proposal;

pub use error::CertError;
pub use genesis::CertGenesis;
pub use keeper::{CertKeeper, Certifier};
pub use proposal::{AddOrRemove, CertifierUpdateProposal};

pub const MODULE_NAME: &str = "cert";
