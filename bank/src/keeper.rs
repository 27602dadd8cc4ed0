//! Bank keeper: balances and supply.

use std::collections::BTreeSet;
use std::sync::Arc;

use shentu_store::prefix::key;
use shentu_store::{KvStore, PrefixStore};
use shentu_types::{AccAddress, Coin, Coins};

use crate::error::BankError;
use crate::MODULE_NAME;

const BALANCE_PREFIX: &[u8] = b"bal/";
const SUPPLY_PREFIX: &[u8] = b"supply/";

fn balance_key(address: &AccAddress, denom: &str) -> Vec<u8> {
    key(&[BALANCE_PREFIX, address.as_bytes(), denom.as_bytes()])
}

fn supply_key(denom: &str) -> Vec<u8> {
    key(&[SUPPLY_PREFIX, denom.as_bytes()])
}

/// Owns every balance and the per-denom supply.
#[derive(Clone)]
pub struct BankKeeper {
    store: PrefixStore,
    module_accounts: Arc<BTreeSet<AccAddress>>,
}

impl BankKeeper {
    pub fn new(backend: Arc<dyn KvStore>) -> Self {
        Self {
            store: PrefixStore::new(backend, MODULE_NAME),
            module_accounts: Arc::default(),
        }
    }

    /// Register module accounts. Their coins move only through the
    /// `*_module` methods, never through [`BankKeeper::send`].
    pub fn with_module_accounts<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut accounts = (*self.module_accounts).clone();
        accounts.extend(names.into_iter().map(Self::module_address));
        self.module_accounts = Arc::new(accounts);
        self
    }

    pub fn is_module_account(&self, address: &AccAddress) -> bool {
        self.module_accounts.contains(address)
    }

    /// Address of the module account named `name`.
    pub fn module_address(name: &str) -> AccAddress {
        AccAddress::from_module_name(name)
    }

    pub fn balance(&self, address: &AccAddress, denom: &str) -> Result<u128, BankError> {
        Ok(self
            .store
            .get_value::<u128>(&balance_key(address, denom))?
            .unwrap_or(0))
    }

    /// Every non-zero balance of `address`.
    pub fn balances(&self, address: &AccAddress) -> Result<Coins, BankError> {
        let prefix = key(&[BALANCE_PREFIX, address.as_bytes()]);
        let skip = prefix.len();
        let mut coins = Vec::new();
        for (k, v) in self.store.scan_raw(&prefix)? {
            let denom = String::from_utf8_lossy(&k[skip..]).into_owned();
            let amount: u128 = shentu_store::prefix::decode(&v)?;
            coins.push(Coin::new(denom, amount));
        }
        Ok(Coins::new(coins)?)
    }

    pub fn supply_of(&self, denom: &str) -> Result<u128, BankError> {
        Ok(self.store.get_value::<u128>(&supply_key(denom))?.unwrap_or(0))
    }

    /// Overwrite one balance, adjusting the supply of the denom by the difference.
    pub fn set_balance(
        &self,
        address: &AccAddress,
        denom: &str,
        amount: u128,
    ) -> Result<(), BankError> {
        let old = self.balance(address, denom)?;
        let supply = self.supply_of(denom)?;
        let supply = if amount >= old {
            supply
                .checked_add(amount - old)
                .ok_or_else(|| BankError::Overflow(denom.to_string()))?
        } else {
            supply.saturating_sub(old - amount)
        };
        self.write_balance(address, denom, amount)?;
        self.write_supply(denom, supply)
    }

    fn write_balance(&self, address: &AccAddress, denom: &str, amount: u128) -> Result<(), BankError> {
        let k = balance_key(address, denom);
        if amount == 0 {
            self.store.delete(&k)?;
        } else {
            self.store.put_value(&k, &amount)?;
        }
        Ok(())
    }

    fn write_supply(&self, denom: &str, amount: u128) -> Result<(), BankError> {
        let k = supply_key(denom);
        if amount == 0 {
            self.store.delete(&k)?;
        } else {
            self.store.put_value(&k, &amount)?;
        }
        Ok(())
    }

    fn subtract(&self, address: &AccAddress, amount: &Coins) -> Result<(), BankError> {
        let have = self.balances(address)?;
        if !have.is_all_gte(amount) {
            return Err(BankError::InsufficientFunds {
                address: *address,
                have: have.to_string(),
                need: amount.to_string(),
            });
        }
        for coin in amount {
            let current = self.balance(address, &coin.denom)?;
            self.write_balance(address, &coin.denom, current - coin.amount)?;
        }
        Ok(())
    }

    fn add(&self, address: &AccAddress, amount: &Coins) -> Result<(), BankError> {
        for coin in amount {
            let current = self.balance(address, &coin.denom)?;
            let next = current
                .checked_add(coin.amount)
                .ok_or_else(|| BankError::Overflow(coin.denom.clone()))?;
            self.write_balance(address, &coin.denom, next)?;
        }
        Ok(())
    }

    /// Move coins between two user accounts. Supply is unchanged.
    ///
    /// Registered module accounts can neither send nor receive here.
    pub fn send(&self, from: &AccAddress, to: &AccAddress, amount: &Coins) -> Result<(), BankError> {
        for address in [from, to] {
            if self.is_module_account(address) {
                return Err(BankError::ModuleAccount(*address));
            }
        }
        self.transfer(from, to, amount)
    }

    fn transfer(&self, from: &AccAddress, to: &AccAddress, amount: &Coins) -> Result<(), BankError> {
        amount.validate()?;
        self.subtract(from, amount)?;
        self.add(to, amount)?;
        tracing::trace!(%from, %to, %amount, "coins sent");
        Ok(())
    }

    pub fn send_to_module(
        &self,
        from: &AccAddress,
        module: &str,
        amount: &Coins,
    ) -> Result<(), BankError> {
        self.transfer(from, &Self::module_address(module), amount)
    }

    pub fn send_from_module(
        &self,
        module: &str,
        to: &AccAddress,
        amount: &Coins,
    ) -> Result<(), BankError> {
        self.transfer(&Self::module_address(module), to, amount)
    }

    /// Destroy coins held by a module account, reducing supply.
    pub fn burn_from_module(&self, module: &str, amount: &Coins) -> Result<(), BankError> {
        amount.validate()?;
        self.subtract(&Self::module_address(module), amount)?;
        for coin in amount {
            let supply = self.supply_of(&coin.denom)?;
            self.write_supply(&coin.denom, supply.saturating_sub(coin.amount))?;
        }
        tracing::debug!(module, %amount, "coins burned");
        Ok(())
    }

    /// Every account holding a non-zero balance, in address order.
    pub fn accounts(&self) -> Result<Vec<AccAddress>, BankError> {
        let skip = BALANCE_PREFIX.len();
        let mut out: Vec<AccAddress> = Vec::new();
        for (k, _) in self.store.scan_raw(BALANCE_PREFIX)? {
            let mut raw = [0u8; AccAddress::LEN];
            raw.copy_from_slice(&k[skip..skip + AccAddress::LEN]);
            let address = AccAddress::new(raw);
            if out.last() != Some(&address) {
                out.push(address);
            }
        }
        Ok(out)
    }
}
