//! Caller identity resolution for the studio ledger.
//!
//! The host runtime hands every transaction an opaque creator blob: a
//! protobuf-encoded [`SerializedIdentity`] carrying the creator's
//! organization (MSP) id and certificate bytes. [`IdentityResolver`] decodes
//! that blob into an [`OrgId`](studio_types::OrgId).

pub mod error;
pub mod resolver;
pub mod wire;

pub use error::{IdentityError, IdentityResult};
pub use resolver::{CreatorSource, IdentityResolver, StaticCreator};
pub use wire::SerializedIdentity;
