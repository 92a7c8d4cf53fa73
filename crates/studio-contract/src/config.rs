use std::path::Path;

use serde::{Deserialize, Serialize};
use studio_gate::GateConfig;
use studio_types::KeyScheme;

use crate::error::{ContractError, ContractResult};

/// Deployment configuration for the contract.
///
/// ```toml
/// key_scheme = "delimited"
///
/// [gate]
/// privileged_org = "org0-example-com"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    pub gate: GateConfig,
    /// How material keys are derived from `(name, origin)`.
    pub key_scheme: KeyScheme,
}

impl ContractConfig {
    /// Parse a configuration document. Missing fields take their defaults.
    pub fn from_toml_str(raw: &str) -> ContractResult<Self> {
        toml::from_str(raw).map_err(|e| ContractError::Config(e.to_string()))
    }

    /// Read and parse the configuration file at `path`.
    pub fn load(path: &Path) -> ContractResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ContractError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(
            path = %path.display(),
            privileged_org = %config.gate.privileged_org,
            key_scheme = ?config.key_scheme,
            "loaded contract configuration"
        );
        Ok(config)
    }
}
