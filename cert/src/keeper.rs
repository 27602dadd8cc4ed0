//! Certifier keeper.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use shentu_store::prefix::key;
use shentu_store::{KvStore, PrefixStore};
use shentu_types::AccAddress;

use crate::error::CertError;
use crate::MODULE_NAME;

const CERTIFIER_PREFIX: &[u8] = b"certifier/";
const ALIAS_PREFIX: &[u8] = b"alias/";

/// A registered certifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certifier {
    pub address: AccAddress,
    #[serde(default)]
    pub alias: String,
    /// Who proposed this certifier (the zero address for genesis certifiers).
    #[serde(default)]
    pub proposer: AccAddress,
    #[serde(default)]
    pub description: String,
}

fn certifier_key(address: &AccAddress) -> Vec<u8> {
    key(&[CERTIFIER_PREFIX, address.as_bytes()])
}

fn alias_key(alias: &str) -> Vec<u8> {
    key(&[ALIAS_PREFIX, alias.as_bytes()])
}

#[derive(Clone)]
pub struct CertKeeper {
    store: PrefixStore,
}

impl CertKeeper {
    pub fn new(backend: Arc<dyn KvStore>) -> Self {
        Self {
            store: PrefixStore::new(backend, MODULE_NAME),
        }
    }

    pub fn is_certifier(&self, address: &AccAddress) -> Result<bool, CertError> {
        Ok(self.store.has(&certifier_key(address))?)
    }

    pub fn has_certifier_alias(&self, alias: &str) -> Result<bool, CertError> {
        Ok(self.store.has(&alias_key(alias))?)
    }

    pub fn certifier(&self, address: &AccAddress) -> Result<Option<Certifier>, CertError> {
        Ok(self.store.get_value(&certifier_key(address))?)
    }

    pub fn certifier_by_alias(&self, alias: &str) -> Result<Option<Certifier>, CertError> {
        match self.store.get_value::<AccAddress>(&alias_key(alias))? {
            Some(address) => self.certifier(&address),
            None => Ok(None),
        }
    }

    /// All certifiers in address order.
    pub fn certifiers(&self) -> Result<Vec<Certifier>, CertError> {
        Ok(self.store.scan_values(CERTIFIER_PREFIX)?)
    }

    /// Insert or replace a certifier, keeping the alias index in step.
    pub fn set_certifier(&self, certifier: &Certifier) -> Result<(), CertError> {
        if !certifier.alias.is_empty() {
            if let Some(owner) = self.store.get_value::<AccAddress>(&alias_key(&certifier.alias))? {
                if owner != certifier.address {
                    return Err(CertError::RepeatedAlias);
                }
            }
        }
        if let Some(previous) = self.certifier(&certifier.address)? {
            if !previous.alias.is_empty() && previous.alias != certifier.alias {
                self.store.delete(&alias_key(&previous.alias))?;
            }
        }
        self.store
            .put_value(&certifier_key(&certifier.address), certifier)?;
        if !certifier.alias.is_empty() {
            self.store
                .put_value(&alias_key(&certifier.alias), &certifier.address)?;
        }
        tracing::info!(address = %certifier.address, alias = %certifier.alias, "certifier set");
        Ok(())
    }

    /// Remove a certifier. The last remaining certifier cannot be removed.
    pub fn delete_certifier(&self, address: &AccAddress) -> Result<(), CertError> {
        let certifier = self
            .certifier(address)?
            .ok_or(CertError::UnqualifiedCertifier(*address))?;
        if self.certifiers()?.len() <= 1 {
            return Err(CertError::OnlyOneCertifier);
        }
        if !certifier.alias.is_empty() {
            self.store.delete(&alias_key(&certifier.alias))?;
        }
        self.store.delete(&certifier_key(address))?;
        tracing::info!(%address, "certifier removed");
        Ok(())
    }
}
