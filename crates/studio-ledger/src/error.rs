use studio_gate::GateError;
use studio_identity::IdentityError;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("material {name} from {origin} not found")]
    MaterialNotFound { name: String, origin: String },

    #[error("wand '{0}' not found")]
    WandNotFound(String),

    #[error("insufficient stock of {material} from {origin}: available {available}, required {required}")]
    InsufficientStock {
        material: String,
        origin: String,
        available: i64,
        required: i64,
    },

    #[error("production index {index} out of range for wand '{wand}' with {len} entries")]
    IndexOutOfRange { wand: String, index: i64, len: usize },

    #[error("production {index} of wand '{wand}' was already sold")]
    AlreadySold { wand: String, index: usize },

    #[error("failed to decode record at {key}: {reason}")]
    Decode { key: String, reason: String },

    #[error("failed to read {key}: {reason}")]
    Read { key: String, reason: String },

    #[error("failed to persist {key}: {reason}")]
    Persist { key: String, reason: String },

    #[error("range scan failed: {0}")]
    Scan(String),

    #[error(transparent)]
    Unauthorized(#[from] GateError),

    #[error(transparent)]
    Identity(#[from] IdentityError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
