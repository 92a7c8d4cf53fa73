use serde::{Deserialize, Serialize};
use studio_types::OrgId;

/// Organization allowed to produce and sell wands unless configured otherwise.
pub const DEFAULT_PRIVILEGED_ORG: &str = "org0-example-com";

/// Configuration for the access gate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// The single organization permitted to run privileged actions.
    pub privileged_org: OrgId,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            privileged_org: OrgId::from(DEFAULT_PRIVILEGED_ORG),
        }
    }
}

impl GateConfig {
    pub fn with_privileged_org(org: impl Into<OrgId>) -> Self {
        Self {
            privileged_org: org.into(),
        }
    }
}
