use studio_gate::AccessGate;
use studio_identity::CreatorSource;
use studio_store::StateStore;

use crate::config::ContractConfig;
use crate::error::{ContractError, ContractResult};
use crate::operation::InvocationContext;
use crate::registry::OperationRegistry;
use crate::response::Response;

/// Dispatches host invocations to registered operations.
pub struct StudioContract {
    config: ContractConfig,
    gate: AccessGate,
    registry: OperationRegistry,
}

impl StudioContract {
    /// A contract serving the five ledger operations under `config`.
    pub fn new(config: ContractConfig) -> Self {
        Self::with_registry(config, OperationRegistry::with_default_operations())
    }

    pub fn with_registry(config: ContractConfig, registry: OperationRegistry) -> Self {
        let gate = AccessGate::new(config.gate.clone());
        Self {
            config,
            gate,
            registry,
        }
    }

    /// The current configuration.
    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Run `function` and return its payload or error.
    pub fn try_invoke(
        &self,
        store: &dyn StateStore,
        creator: &dyn CreatorSource,
        function: &str,
        args: &[String],
    ) -> ContractResult<Vec<u8>> {
        let operation = self
            .registry
            .get(function)
            .ok_or_else(|| ContractError::UnknownOperation(function.to_string()))?;
        let ctx = InvocationContext {
            store,
            creator,
            gate: &self.gate,
            key_scheme: self.config.key_scheme,
        };
        operation.execute(&ctx, args)
    }

    /// Run `function` and wrap the outcome in a [`Response`].
    pub fn invoke(
        &self,
        store: &dyn StateStore,
        creator: &dyn CreatorSource,
        function: &str,
        args: &[String],
    ) -> Response {
        tracing::debug!(function, args = args.len(), "invoke");
        match self.try_invoke(store, creator, function, args) {
            Ok(payload) => Response::success(payload),
            Err(e) => {
                tracing::debug!(function, code = e.code(), error = %e, "invocation failed");
                Response::error(e.to_string())
            }
        }
    }
}

impl Default for StudioContract {
    fn default() -> Self {
        Self::new(ContractConfig::default())
    }
}
