use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

// ---------------------------------------------------------------------------
// RecordKind
// ---------------------------------------------------------------------------

/// Discriminator stored in every ledger record.
///
/// Materials and wands share one flat keyspace, so range scans rely on this
/// tag to tell the record types apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Material,
    Wand,
}

impl RecordKind {
    /// Read only the discriminator of an encoded record.
    ///
    /// Returns `None` when the bytes are not a JSON object or carry no
    /// recognized `objectType`.
    pub fn peek(bytes: &[u8]) -> Option<RecordKind> {
        #[derive(Deserialize)]
        struct Envelope {
            #[serde(rename = "objectType")]
            kind: Option<serde_json::Value>,
        }
        let envelope: Envelope = serde_json::from_slice(bytes).ok()?;
        serde_json::from_value(envelope.kind?).ok()
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Material => write!(f, "Material"),
            Self::Wand => write!(f, "Wand"),
        }
    }
}

/// A typed record persisted as JSON in the ledger.
pub trait Record: Serialize + DeserializeOwned {
    /// The discriminator every record of this type must carry.
    const KIND: RecordKind;

    /// The discriminator this instance actually carries.
    fn kind(&self) -> RecordKind;

    /// Encode the record into its ledger representation.
    fn to_bytes(&self) -> Result<Vec<u8>, TypeError> {
        serde_json::to_vec(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// Decode a record and check that it carries the expected discriminator.
    fn from_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
        let record: Self =
            serde_json::from_slice(bytes).map_err(|e| TypeError::Serialization(e.to_string()))?;
        if record.kind() != Self::KIND {
            return Err(TypeError::KindMismatch {
                expected: Self::KIND,
                found: record.kind(),
            });
        }
        Ok(record)
    }
}

// ---------------------------------------------------------------------------
// Material
// ---------------------------------------------------------------------------

/// A stock of one raw input.
///
/// `(name, origin)` is the composite identity. The same struct doubles as
/// the point-in-time snapshot embedded in a [`Production`], where
/// `quantity` is the amount consumed rather than the amount in stock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub origin: String,
    pub quantity: i64,
    #[serde(rename = "objectType")]
    pub kind: RecordKind,
}

impl Material {
    /// Create a material record with the given quantity.
    pub fn new(name: impl Into<String>, origin: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            origin: origin.into(),
            quantity,
            kind: RecordKind::Material,
        }
    }

    /// A zero-quantity scaffold for a material that is not yet in the ledger.
    pub fn empty(name: impl Into<String>, origin: impl Into<String>) -> Self {
        Self::new(name, origin, 0)
    }
}

impl Record for Material {
    const KIND: RecordKind = RecordKind::Material;

    fn kind(&self) -> RecordKind {
        self.kind
    }
}

// ---------------------------------------------------------------------------
// Production
// ---------------------------------------------------------------------------

/// One manufacturing event, embedded inside a [`Wand`].
///
/// `available` starts `true` and moves to `false` exactly once, on sale. It
/// is stored under the field name `bool`, which existing ledgers use;
/// `available` is accepted on decode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Production {
    pub materials: Vec<Material>,
    #[serde(rename = "bool", alias = "available")]
    pub available: bool,
}

impl Production {
    /// A freshly produced, unsold entry.
    pub fn new(materials: Vec<Material>) -> Self {
        Self {
            materials,
            available: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Wand
// ---------------------------------------------------------------------------

/// A finished-goods line keyed by its name.
///
/// `quantity` counts the unsold entries of `production_history` as long as
/// every mutation goes through [`Wand::record_production`] and a sale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wand {
    pub name: String,
    #[serde(rename = "productionHistory", default)]
    pub production_history: Vec<Production>,
    pub quantity: i64,
    #[serde(rename = "objectType")]
    pub kind: RecordKind,
}

impl Wand {
    /// A new product line with no productions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            production_history: Vec::new(),
            quantity: 0,
            kind: RecordKind::Wand,
        }
    }

    /// Append a production and count it as available.
    ///
    /// Returns the index of the new history entry, or `None` without
    /// touching the wand if the quantity would overflow.
    pub fn record_production(&mut self, materials: Vec<Material>) -> Option<usize> {
        self.quantity = self.quantity.checked_add(1)?;
        self.production_history.push(Production::new(materials));
        Some(self.production_history.len() - 1)
    }

    /// Number of history entries still available for sale.
    pub fn available_count(&self) -> usize {
        self.production_history
            .iter()
            .filter(|p| p.available)
            .count()
    }
}

impl Record for Wand {
    const KIND: RecordKind = RecordKind::Wand;

    fn kind(&self) -> RecordKind {
        self.kind
    }
}
