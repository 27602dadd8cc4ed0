//! Upgrade plans.

use serde::{Deserialize, Serialize};

use shentu_types::{Context, Timestamp};

use crate::error::UpgradeError;

/// When and under which name the chain switches to new software.
///
/// Exactly one of `time` and `height` triggers the plan; `height == 0` means
/// the height trigger is unset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    #[serde(default)]
    pub time: Option<Timestamp>,
    #[serde(default)]
    pub height: u64,
    #[serde(default)]
    pub info: String,
}

impl Plan {
    pub fn validate_basic(&self) -> Result<(), UpgradeError> {
        if self.name.trim().is_empty() {
            return Err(UpgradeError::InvalidPlan("name cannot be empty".to_string()));
        }
        match (self.time, self.height) {
            (Some(t), _) if t.as_secs() == 0 => Err(UpgradeError::InvalidPlan(
                "time must be after the epoch".to_string(),
            )),
            (Some(_), h) if h > 0 => Err(UpgradeError::InvalidPlan(
                "cannot set both time and height".to_string(),
            )),
            (None, 0) => Err(UpgradeError::InvalidPlan(
                "must set either time or height".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Whether the plan has come due in `ctx`.
    pub fn should_execute(&self, ctx: &Context) -> bool {
        match self.time {
            Some(t) => ctx.time >= t,
            None => self.height > 0 && ctx.height >= self.height,
        }
    }

    /// Whether the trigger lies strictly after the current block.
    pub fn is_in_future(&self, ctx: &Context) -> bool {
        match self.time {
            Some(t) => t > ctx.time,
            None => self.height > ctx.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_height(h: u64) -> Plan {
        Plan {
            name: "v2".to_string(),
            time: None,
            height: h,
            info: String::new(),
        }
    }

    #[test]
    fn validate_basic_requires_exactly_one_trigger() {
        assert!(at_height(10).validate_basic().is_ok());
        assert!(at_height(0).validate_basic().is_err());

        let mut both = at_height(10);
        both.time = Some(Timestamp::new(100));
        assert!(both.validate_basic().is_err());

        let mut by_time = at_height(0);
        by_time.time = Some(Timestamp::new(100));
        assert!(by_time.validate_basic().is_ok());

        let mut unnamed = at_height(10);
        unnamed.name = " ".to_string();
        assert!(unnamed.validate_basic().is_err());
    }

    #[test]
    fn due_and_future_checks() {
        let ctx = Context::new("test", 10, Timestamp::new(1_000));
        assert!(at_height(10).should_execute(&ctx));
        assert!(!at_height(11).should_execute(&ctx));
        assert!(at_height(11).is_in_future(&ctx));
        assert!(!at_height(10).is_in_future(&ctx));

        let mut timed = at_height(0);
        timed.time = Some(Timestamp::new(1_000));
        assert!(timed.should_execute(&ctx));
        assert!(!timed.is_in_future(&ctx));
    }
}
