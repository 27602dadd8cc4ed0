//! Upgrade keeper: plan validation, scheduling and execution.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use shentu_store::prefix::key;
use shentu_store::{KvStore, PrefixStore};
use shentu_types::{Context, Event};

use crate::error::UpgradeError;
use crate::plan::Plan;
use crate::MODULE_NAME;

const PLAN_KEY: &[u8] = b"plan";
const DONE_PREFIX: &[u8] = b"done/";

pub const EVENT_TYPE_UPGRADE: &str = "upgrade";
pub const ATTRIBUTE_KEY_NAME: &str = "name";
pub const ATTRIBUTE_KEY_HEIGHT: &str = "height";

/// Migration run when a plan of the same name comes due.
pub type UpgradeHandler = Arc<dyn Fn(&Context, &Plan) -> Result<(), String> + Send + Sync>;

fn done_key(name: &str) -> Vec<u8> {
    key(&[DONE_PREFIX, name.as_bytes()])
}

#[derive(Clone)]
pub struct UpgradeKeeper {
    store: PrefixStore,
    handlers: HashMap<String, UpgradeHandler>,
}

impl fmt::Debug for UpgradeKeeper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpgradeKeeper")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl UpgradeKeeper {
    pub fn new(backend: Arc<dyn KvStore>) -> Self {
        Self {
            store: PrefixStore::new(backend, MODULE_NAME),
            handlers: HashMap::new(),
        }
    }

    /// Register the migration for the upgrade named `name`.
    pub fn set_upgrade_handler(&mut self, name: impl Into<String>, handler: UpgradeHandler) {
        self.handlers.insert(name.into(), handler);
    }

    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Height at which the named upgrade was applied, 0 if never.
    pub fn done_height(&self, name: &str) -> Result<u64, UpgradeError> {
        Ok(self.store.get_value::<u64>(&done_key(name))?.unwrap_or(0))
    }

    fn set_done(&self, name: &str, height: u64) -> Result<(), UpgradeError> {
        Ok(self.store.put_value(&done_key(name), &height)?)
    }

    /// Check a plan is well formed, lies in the future and was not applied before.
    pub fn validate_plan(&self, ctx: &Context, plan: &Plan) -> Result<(), UpgradeError> {
        plan.validate_basic()?;
        if !plan.is_in_future(ctx) {
            return Err(UpgradeError::PlanInPast);
        }
        if self.done_height(&plan.name)? != 0 {
            return Err(UpgradeError::AlreadyCompleted(plan.name.clone()));
        }
        Ok(())
    }

    /// Schedule a plan, replacing any previously scheduled one.
    pub fn schedule_upgrade(&self, ctx: &Context, plan: &Plan) -> Result<(), UpgradeError> {
        self.validate_plan(ctx, plan)?;
        if let Some(previous) = self.upgrade_plan()? {
            tracing::warn!(previous = %previous.name, next = %plan.name, "replacing scheduled upgrade");
        }
        self.store.put_value(PLAN_KEY, plan)?;
        tracing::info!(name = %plan.name, height = plan.height, "upgrade scheduled");
        Ok(())
    }

    pub fn upgrade_plan(&self) -> Result<Option<Plan>, UpgradeError> {
        Ok(self.store.get_value(PLAN_KEY)?)
    }

    pub fn clear_upgrade_plan(&self) -> Result<(), UpgradeError> {
        Ok(self.store.delete(PLAN_KEY)?)
    }

    /// Run the scheduled plan if it is due.
    ///
    /// Returns the applied plan. Fails when the plan is due but this binary
    /// has no handler for it, or when a handler exists for a plan that is
    /// not due yet.
    pub fn begin_block(&self, ctx: &mut Context) -> Result<Option<Plan>, UpgradeError> {
        let plan = match self.upgrade_plan()? {
            Some(plan) => plan,
            None => return Ok(None),
        };

        if !plan.should_execute(ctx) {
            if self.has_handler(&plan.name) {
                return Err(UpgradeError::PrematureUpgrade(plan.name));
            }
            return Ok(None);
        }

        let handler = match self.handlers.get(&plan.name) {
            Some(h) => h.clone(),
            None => {
                tracing::error!(name = %plan.name, height = ctx.height, "upgrade needed");
                return Err(UpgradeError::UpgradeNeeded {
                    name: plan.name,
                    height: ctx.height,
                });
            }
        };

        handler(ctx, &plan).map_err(|reason| UpgradeError::HandlerFailed {
            name: plan.name.clone(),
            reason,
        })?;
        self.set_done(&plan.name, ctx.height)?;
        self.clear_upgrade_plan()?;
        ctx.events.emit(
            Event::new(EVENT_TYPE_UPGRADE)
                .with(ATTRIBUTE_KEY_NAME, plan.name.clone())
                .with(ATTRIBUTE_KEY_HEIGHT, ctx.height.to_string()),
        );
        tracing::info!(name = %plan.name, height = ctx.height, "upgrade applied");
        Ok(Some(plan))
    }
}
