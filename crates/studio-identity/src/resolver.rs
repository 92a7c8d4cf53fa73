use studio_types::OrgId;

use crate::error::IdentityResult;
use crate::wire::SerializedIdentity;

/// Source of the raw creator blob for the current transaction.
///
/// The host runtime implements this; tests use [`StaticCreator`].
pub trait CreatorSource: Send + Sync {
    fn creator(&self) -> IdentityResult<Vec<u8>>;
}

/// A creator blob fixed at construction.
#[derive(Clone, Debug, Default)]
pub struct StaticCreator(Vec<u8>);

impl StaticCreator {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// A creator belonging to `mspid`, with an empty certificate.
    pub fn for_org(mspid: &str) -> Self {
        Self(SerializedIdentity::new(mspid, Vec::new()).to_creator_bytes())
    }
}

impl CreatorSource for StaticCreator {
    fn creator(&self) -> IdentityResult<Vec<u8>> {
        Ok(self.0.clone())
    }
}

/// Resolves the organization of the transaction creator.
pub struct IdentityResolver<'a> {
    source: &'a dyn CreatorSource,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(source: &'a dyn CreatorSource) -> Self {
        Self { source }
    }

    /// Read the creator blob and extract its organization identifier.
    pub fn resolve_caller_org(&self) -> IdentityResult<OrgId> {
        let creator = self.source.creator()?;
        let identity = SerializedIdentity::decode_creator(&creator)?;
        tracing::debug!(org = %identity.mspid, "resolved caller organization");
        Ok(OrgId::new(identity.mspid))
    }
}
