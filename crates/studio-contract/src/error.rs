use studio_ledger::LedgerError;
use thiserror::Error;

/// Errors surfaced at the invocation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("transaction commit failed: {0}")]
    Commit(String),
}

impl ContractError {
    /// Stable taxonomy code for the error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownOperation(_) => "UnknownOperation",
            Self::Config(_) => "InvalidArgument",
            Self::Serialization(_) | Self::Commit(_) => "PersistError",
            Self::Ledger(e) => match e {
                LedgerError::InvalidArgument(_) => "InvalidArgument",
                LedgerError::MaterialNotFound { .. } | LedgerError::WandNotFound(_) => "NotFound",
                LedgerError::InsufficientStock { .. } => "InsufficientStock",
                LedgerError::IndexOutOfRange { .. } => "IndexOutOfRange",
                LedgerError::AlreadySold { .. } => "AlreadySold",
                LedgerError::Decode { .. } | LedgerError::Read { .. } | LedgerError::Scan(_) => {
                    "DecodeError"
                }
                LedgerError::Persist { .. } => "PersistError",
                LedgerError::Unauthorized(_) => "Unauthorized",
                LedgerError::Identity(_) => "IdentityDecodeError",
            },
        }
    }
}

pub type ContractResult<T> = Result<T, ContractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_taxonomy() {
        assert_eq!(
            ContractError::UnknownOperation("x".into()).code(),
            "UnknownOperation"
        );
        assert_eq!(
            ContractError::from(LedgerError::WandNotFound("elm".into())).code(),
            "NotFound"
        );
        assert_eq!(
            ContractError::from(LedgerError::AlreadySold {
                wand: "elm".into(),
                index: 0,
            })
            .code(),
            "AlreadySold"
        );
    }

    #[test]
    fn ledger_message_passes_through() {
        let e = ContractError::from(LedgerError::WandNotFound("elm".into()));
        assert_eq!(e.to_string(), "wand 'elm' not found");
    }
}
