use studio_store::StateStore;
use studio_types::{KeyScheme, Material, MaterialKey, Record};

use crate::error::{LedgerError, LedgerResult};
use crate::parse_int;

/// A parsed `addMaterial` request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replenishment {
    pub name: String,
    pub origin: String,
    pub delta: i64,
}

impl Replenishment {
    /// Parse `[name, origin, quantity]`.
    pub fn from_args(args: &[String]) -> LedgerResult<Self> {
        let [name, origin, quantity] = args else {
            return Err(LedgerError::InvalidArgument(format!(
                "expected 3 arguments (name, origin, quantity), got {}",
                args.len()
            )));
        };
        Ok(Self {
            name: name.clone(),
            origin: origin.clone(),
            delta: parse_int("quantity", quantity)?,
        })
    }
}

/// Reads and writes [`Material`] records under their composite key.
pub struct MaterialLedger<'a> {
    store: &'a dyn StateStore,
    scheme: KeyScheme,
}

impl<'a> MaterialLedger<'a> {
    pub fn new(store: &'a dyn StateStore, scheme: KeyScheme) -> Self {
        Self { store, scheme }
    }

    /// Composite key for `(name, origin)`.
    pub fn key(&self, name: &str, origin: &str) -> LedgerResult<MaterialKey> {
        MaterialKey::new(name, origin, self.scheme)
            .map_err(|e| LedgerError::InvalidArgument(e.to_string()))
    }

    /// Read the record stored under `key`, if any.
    pub fn load(&self, key: &MaterialKey) -> LedgerResult<Option<Material>> {
        let bytes = self
            .store
            .get_state(key.as_str())
            .map_err(|e| LedgerError::Read {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        bytes
            .map(|b| {
                Material::from_bytes(&b).map_err(|e| LedgerError::Decode {
                    key: key.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    /// Write `material` under `key`.
    pub fn store_at(&self, key: &MaterialKey, material: &Material) -> LedgerResult<()> {
        let persist_err = |reason: String| LedgerError::Persist {
            key: key.to_string(),
            reason,
        };
        let bytes = material.to_bytes().map_err(|e| persist_err(e.to_string()))?;
        self.store
            .put_state(key.as_str(), &bytes)
            .map_err(|e| persist_err(e.to_string()))
    }

    /// The material `(name, origin)`, or `None` if the ledger has no record.
    pub fn find_material(&self, name: &str, origin: &str) -> LedgerResult<Option<Material>> {
        let key = self.key(name, origin)?;
        self.load(&key)
    }

    /// The material `(name, origin)`. An absent record yields a zero-quantity
    /// scaffold; materials come into existence on first reference.
    pub fn get_material(&self, name: &str, origin: &str) -> LedgerResult<Material> {
        Ok(self
            .find_material(name, origin)?
            .unwrap_or_else(|| Material::empty(name, origin)))
    }

    /// Persist `material` under the key derived from its own name and origin.
    pub fn put_material(&self, material: &Material) -> LedgerResult<()> {
        let key = self.key(&material.name, &material.origin)?;
        self.store_at(&key, material)
    }

    /// Add `delta` to the stock of `(name, origin)`, creating it if absent.
    ///
    /// Negative deltas are accepted; stock is not clamped at zero.
    pub fn add_material(&self, name: &str, origin: &str, delta: i64) -> LedgerResult<Material> {
        let key = self.key(name, origin)?;
        let mut material = self
            .load(&key)?
            .unwrap_or_else(|| Material::empty(name, origin));
        material.quantity = material.quantity.checked_add(delta).ok_or_else(|| {
            LedgerError::InvalidArgument(format!(
                "quantity overflow adding {delta} to {}",
                material.quantity
            ))
        })?;
        self.store_at(&key, &material)?;
        tracing::info!(
            material = %material.name,
            origin = %material.origin,
            delta,
            quantity = material.quantity,
            "material replenished"
        );
        Ok(material)
    }

    /// Apply a parsed `addMaterial` request.
    pub fn replenish(&self, request: &Replenishment) -> LedgerResult<Material> {
        self.add_material(&request.name, &request.origin, request.delta)
    }
}
