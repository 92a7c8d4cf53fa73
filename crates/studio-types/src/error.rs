use thiserror::Error;

use crate::record::RecordKind;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} contains the reserved key delimiter")]
    ReservedCharacter { field: &'static str },

    #[error("record kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        expected: RecordKind,
        found: RecordKind,
    },

    #[error("serialization error: {0}")]
    Serialization(String),
}
