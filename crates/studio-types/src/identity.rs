use std::fmt;

use serde::{Deserialize, Serialize};

/// Organization identifier (MSP id) of a transaction creator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgId(String);

impl OrgId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrgId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for OrgId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_serde_are_plain_strings() {
        let org = OrgId::from("org0-example-com");
        assert_eq!(org.to_string(), "org0-example-com");
        assert_eq!(
            serde_json::to_string(&org).unwrap(),
            "\"org0-example-com\""
        );
    }
}
