//! Certifier genesis import/export.

use serde::{Deserialize, Serialize};

use crate::error::CertError;
use crate::keeper::{CertKeeper, Certifier};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertGenesis {
    #[serde(default)]
    pub certifiers: Vec<Certifier>,
}

pub fn init_genesis(keeper: &CertKeeper, genesis: &CertGenesis) -> Result<(), CertError> {
    for certifier in &genesis.certifiers {
        if keeper.is_certifier(&certifier.address)? {
            return Err(CertError::CertifierAlreadyExists);
        }
        keeper.set_certifier(certifier)?;
    }
    Ok(())
}

pub fn export_genesis(keeper: &CertKeeper) -> Result<CertGenesis, CertError> {
    Ok(CertGenesis {
        certifiers: keeper.certifiers()?,
    })
}
