//! Wire format of a serialized creator identity.

use prost::Message;

use crate::error::{IdentityError, IdentityResult};

/// Creator identity as transmitted by the host: the MSP id of the issuing
/// organization and the PEM certificate of the signer.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SerializedIdentity {
    #[prost(string, tag = "1")]
    pub mspid: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "2")]
    pub id_bytes: ::prost::alloc::vec::Vec<u8>,
}

impl SerializedIdentity {
    pub fn new(mspid: impl Into<String>, id_bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            mspid: mspid.into(),
            id_bytes: id_bytes.into(),
        }
    }

    /// Decode a creator blob.
    pub fn decode_creator(bytes: &[u8]) -> IdentityResult<Self> {
        Self::decode(bytes).map_err(|e| IdentityError::Malformed(e.to_string()))
    }

    /// Encode into a creator blob.
    pub fn to_creator_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }
}
