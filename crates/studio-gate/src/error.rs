use studio_types::OrgId;

use crate::gate::Action;

/// Errors produced by the access gate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    /// The caller's organization may not perform the action.
    #[error("only {privileged} may {action}; caller organization: {caller}")]
    Unauthorized {
        action: Action,
        caller: OrgId,
        privileged: OrgId,
    },
}
