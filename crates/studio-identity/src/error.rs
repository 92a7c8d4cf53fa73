use thiserror::Error;

/// Errors raised while resolving the caller's identity.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The host could not supply the creator blob.
    #[error("failed to read transaction creator: {0}")]
    CreatorUnavailable(String),

    /// The creator blob is not a valid serialized identity.
    #[error("failed to decode creator identity: {0}")]
    Malformed(String),
}

pub type IdentityResult<T> = Result<T, IdentityError>;
