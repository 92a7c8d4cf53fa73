//! Composite ledger keys for materials.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Separator placed between name and origin by [`KeyScheme::Delimited`].
pub const KEY_DELIMITER: char = '\u{0}';

/// How a material's `(name, origin)` identity maps to a ledger key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyScheme {
    /// `name ∥ U+0000 ∥ origin`. Distinct pairs never share a key.
    #[default]
    Delimited,
    /// Raw `name ∥ origin`. Compatible with ledgers written without a
    /// delimiter; `("ab", "c")` and `("a", "bc")` share a key.
    Concatenated,
}

impl KeyScheme {
    /// Check that `name` may be used as a wand key.
    ///
    /// Wands are keyed by bare name, so under [`KeyScheme::Delimited`] a name
    /// containing [`KEY_DELIMITER`] could equal a material key.
    pub fn check_wand_name(self, name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::EmptyField { field: "wand name" });
        }
        if self == Self::Delimited && name.contains(KEY_DELIMITER) {
            return Err(TypeError::ReservedCharacter { field: "wand name" });
        }
        Ok(())
    }
}

/// Ledger key of a material record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialKey(String);

impl MaterialKey {
    /// Build the key for `(name, origin)` under `scheme`.
    ///
    /// Both parts must be non-empty. Under [`KeyScheme::Delimited`] neither
    /// may contain [`KEY_DELIMITER`].
    pub fn new(name: &str, origin: &str, scheme: KeyScheme) -> Result<Self, TypeError> {
        if name.is_empty() {
            return Err(TypeError::EmptyField { field: "material name" });
        }
        if origin.is_empty() {
            return Err(TypeError::EmptyField { field: "material origin" });
        }
        match scheme {
            KeyScheme::Delimited => {
                if name.contains(KEY_DELIMITER) {
                    return Err(TypeError::ReservedCharacter { field: "material name" });
                }
                if origin.contains(KEY_DELIMITER) {
                    return Err(TypeError::ReservedCharacter { field: "material origin" });
                }
                Ok(Self(format!("{name}{KEY_DELIMITER}{origin}")))
            }
            KeyScheme::Concatenated => Ok(Self(format!("{name}{origin}"))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaterialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_debug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn concatenated_matches_legacy_layout() {
        let key = MaterialKey::new("wood", "forest", KeyScheme::Concatenated).unwrap();
        assert_eq!(key.as_str(), "woodforest");
    }

    #[test]
    fn concatenated_pairs_can_collide() {
        let a = MaterialKey::new("ab", "c", KeyScheme::Concatenated).unwrap();
        let b = MaterialKey::new("a", "bc", KeyScheme::Concatenated).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn delimited_pairs_do_not_collide() {
        let a = MaterialKey::new("ab", "c", KeyScheme::Delimited).unwrap();
        let b = MaterialKey::new("a", "bc", KeyScheme::Delimited).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_parts_rejected() {
        assert_eq!(
            MaterialKey::new("", "forest", KeyScheme::Delimited),
            Err(TypeError::EmptyField { field: "material name" })
        );
        assert_eq!(
            MaterialKey::new("wood", "", KeyScheme::Concatenated),
            Err(TypeError::EmptyField { field: "material origin" })
        );
    }

    #[test]
    fn delimiter_rejected_in_parts() {
        assert!(matches!(
            MaterialKey::new("wo\u{0}od", "forest", KeyScheme::Delimited),
            Err(TypeError::ReservedCharacter { .. })
        ));
    }

    #[test]
    fn wand_names_cannot_mimic_material_keys() {
        let material = MaterialKey::new("wood", "forest", KeyScheme::Delimited).unwrap();
        assert_eq!(
            KeyScheme::Delimited.check_wand_name(material.as_str()),
            Err(TypeError::ReservedCharacter { field: "wand name" })
        );
        assert_eq!(
            KeyScheme::Delimited.check_wand_name(""),
            Err(TypeError::EmptyField { field: "wand name" })
        );
        assert!(KeyScheme::Delimited.check_wand_name("elm-wand").is_ok());
        assert!(KeyScheme::Concatenated.check_wand_name("wood\u{0}forest").is_ok());
    }

    #[test]
    fn default_scheme_is_delimited() {
        assert_eq!(KeyScheme::default(), KeyScheme::Delimited);
        let parsed: KeyScheme = serde_json::from_str("\"concatenated\"").unwrap();
        assert_eq!(parsed, KeyScheme::Concatenated);
    }

    proptest! {
        #[test]
        fn delimited_keys_are_injective(
            a in "[a-z]{1,6}", b in "[a-z]{1,6}",
            c in "[a-z]{1,6}", d in "[a-z]{1,6}",
        ) {
            let k1 = MaterialKey::new(&a, &b, KeyScheme::Delimited).unwrap();
            let k2 = MaterialKey::new(&c, &d, KeyScheme::Delimited).unwrap();
            prop_assert_eq!(k1 == k2, a == c && b == d);
        }
    }
}
