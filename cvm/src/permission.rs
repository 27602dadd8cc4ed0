//! Account permissions.
//!
//! Every account carries a [`BasePermissions`] pair: `perms` holds flag
//! values and `set_bit` records which of those values are explicitly set.
//! An unset flag falls back to the global-permissions account, which lives
//! at the zero address.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// A set of permission flags.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermFlags(u64);

impl PermFlags {
    pub const NONE: Self = Self(0);
    pub const ROOT: Self = Self(1 << 0);
    pub const SEND: Self = Self(1 << 1);
    pub const CALL: Self = Self(1 << 2);
    pub const CREATE_CONTRACT: Self = Self(1 << 3);
    pub const CREATE_ACCOUNT: Self = Self(1 << 4);
    pub const BOND: Self = Self(1 << 5);
    pub const NAME: Self = Self(1 << 6);
    pub const PROPOSAL: Self = Self(1 << 7);
    pub const INPUT: Self = Self(1 << 8);
    pub const BATCH: Self = Self(1 << 9);
    pub const IDENTIFY: Self = Self(1 << 10);

    /// Every defined flag.
    pub const ALL: Self = Self((1 << 11) - 1);
    /// Every flag except `ROOT`.
    pub const DEFAULT: Self = Self(Self::ALL.0 & !Self::ROOT.0);

    /// Keep only defined flags.
    pub const fn from_bits_truncate(bits: u64) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for PermFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Debug for PermFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PermFlags({:#013b})", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BasePermissions {
    pub perms: PermFlags,
    pub set_bit: PermFlags,
}

impl BasePermissions {
    /// Permissions with every flag in `perms` granted and every other flag denied.
    pub fn explicit(perms: PermFlags) -> Self {
        Self {
            perms,
            set_bit: PermFlags::ALL,
        }
    }

    /// The explicit value of `flag`, or `None` when it is not set.
    pub fn get(&self, flag: PermFlags) -> Option<bool> {
        if !self.set_bit.contains(flag) {
            return None;
        }
        Some(self.perms.contains(flag))
    }

    pub fn set(&mut self, flag: PermFlags, value: bool) {
        self.set_bit = self.set_bit.union(flag);
        self.perms = if value {
            self.perms.union(flag)
        } else {
            self.perms.difference(flag)
        };
    }

    /// Forget `flag`, so it resolves from the global permissions again.
    pub fn unset(&mut self, flag: PermFlags) {
        self.set_bit = self.set_bit.difference(flag);
        self.perms = self.perms.difference(flag);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountPermissions {
    pub base: BasePermissions,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl AccountPermissions {
    /// Permissions every account falls back to: [`PermFlags::DEFAULT`], all set.
    pub fn global_default() -> Self {
        Self {
            base: BasePermissions::explicit(PermFlags::DEFAULT),
            roles: Vec::new(),
        }
    }

    /// Resolve `flag` against this account, then `global`. Unset in both means denied.
    pub fn has(&self, flag: PermFlags, global: &BasePermissions) -> bool {
        self.base
            .get(flag)
            .or_else(|| global.get(flag))
            .unwrap_or(false)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Returns false if the role was already held.
    pub fn add_role(&mut self, role: &str) -> bool {
        if self.has_role(role) {
            return false;
        }
        self.roles.push(role.to_string());
        true
    }

    /// Returns false if the role was not held.
    pub fn remove_role(&mut self, role: &str) -> bool {
        let before = self.roles.len();
        self.roles.retain(|r| r != role);
        self.roles.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_excludes_root() {
        assert!(!PermFlags::DEFAULT.contains(PermFlags::ROOT));
        assert!(PermFlags::DEFAULT.contains(PermFlags::CALL | PermFlags::IDENTIFY));
        assert_eq!(PermFlags::ALL.bits(), 0x7ff);
    }

    #[test]
    fn unset_flag_falls_back_to_global() {
        let global = BasePermissions::explicit(PermFlags::DEFAULT);
        let contract = AccountPermissions {
            base: BasePermissions {
                perms: PermFlags::CALL | PermFlags::CREATE_CONTRACT,
                set_bit: PermFlags::NONE,
            },
            roles: Vec::new(),
        };
        assert!(contract.has(PermFlags::SEND, &global));
        assert!(!contract.has(PermFlags::ROOT, &global));
    }

    #[test]
    fn explicit_denial_overrides_global() {
        let global = BasePermissions::explicit(PermFlags::DEFAULT);
        let mut perms = AccountPermissions::default();
        perms.base.set(PermFlags::SEND, false);
        assert!(!perms.has(PermFlags::SEND, &global));
        perms.base.unset(PermFlags::SEND);
        assert!(perms.has(PermFlags::SEND, &global));
    }

    #[test]
    fn roles_are_a_set() {
        let mut perms = AccountPermissions::default();
        assert!(perms.add_role("auditor"));
        assert!(!perms.add_role("auditor"));
        assert!(perms.has_role("auditor"));
        assert!(perms.remove_role("auditor"));
        assert!(!perms.remove_role("auditor"));
    }

    fn flag() -> impl Strategy<Value = PermFlags> {
        (0u32..11).prop_map(|shift| PermFlags::from_bits_truncate(1 << shift))
    }

    fn base() -> impl Strategy<Value = BasePermissions> {
        (0u64..0x800, 0u64..0x800).prop_map(|(perms, set_bit)| BasePermissions {
            perms: PermFlags::from_bits_truncate(perms),
            set_bit: PermFlags::from_bits_truncate(set_bit),
        })
    }

    proptest! {
        /// An explicitly set flag never consults the global account.
        #[test]
        fn set_flags_ignore_global(account in base(), global in base(), f in flag()) {
            let perms = AccountPermissions { base: account, roles: Vec::new() };
            if account.set_bit.contains(f) {
                prop_assert_eq!(perms.has(f, &global), account.perms.contains(f));
            } else {
                prop_assert_eq!(perms.has(f, &global), global.get(f).unwrap_or(false));
            }
        }

        /// `set` then `get` returns the written value.
        #[test]
        fn set_then_get(mut account in base(), f in flag(), value in any::<bool>()) {
            account.set(f, value);
            prop_assert_eq!(account.get(f), Some(value));
        }
    }
}
