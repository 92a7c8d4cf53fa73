use std::fmt;

use serde::{Deserialize, Serialize};
use studio_types::OrgId;

use crate::config::GateConfig;
use crate::error::GateError;

/// A privileged ledger action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    CreateWand,
    SellWand,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateWand => write!(f, "create wands"),
            Self::SellWand => write!(f, "sell wands"),
        }
    }
}

/// Checks callers against the privileged organization.
#[derive(Clone, Debug)]
pub struct AccessGate {
    config: GateConfig,
}

impl AccessGate {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    /// The current configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Allow `action` only when `caller` is the privileged organization.
    pub fn authorize(&self, caller: &OrgId, action: Action) -> Result<(), GateError> {
        if *caller == self.config.privileged_org {
            return Ok(());
        }
        tracing::warn!(%caller, %action, "access denied");
        Err(GateError::Unauthorized {
            action,
            caller: caller.clone(),
            privileged: self.config.privileged_org.clone(),
        })
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new(GateConfig::default())
    }
}
