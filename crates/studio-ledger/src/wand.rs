use studio_store::StateStore;
use studio_types::{Record, Wand};

use crate::error::{LedgerError, LedgerResult};

/// Reads and writes [`Wand`] records keyed by wand name.
pub struct WandLedger<'a> {
    store: &'a dyn StateStore,
}

impl<'a> WandLedger<'a> {
    pub fn new(store: &'a dyn StateStore) -> Self {
        Self { store }
    }

    /// The wand named `name`, or `None` if the ledger has no record.
    pub fn find_wand(&self, name: &str) -> LedgerResult<Option<Wand>> {
        let bytes = self.store.get_state(name).map_err(|e| LedgerError::Read {
            key: name.to_string(),
            reason: e.to_string(),
        })?;
        bytes
            .map(|b| {
                Wand::from_bytes(&b).map_err(|e| LedgerError::Decode {
                    key: name.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    /// Persist `wand` under its name.
    pub fn put_wand(&self, wand: &Wand) -> LedgerResult<()> {
        let persist_err = |reason: String| LedgerError::Persist {
            key: wand.name.clone(),
            reason,
        };
        let bytes = wand.to_bytes().map_err(|e| persist_err(e.to_string()))?;
        self.store
            .put_state(&wand.name, &bytes)
            .map_err(|e| persist_err(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_store::InMemoryStateStore;
    use studio_types::Material;

    #[test]
    fn missing_wand_is_none() {
        let store = InMemoryStateStore::new();
        assert!(WandLedger::new(&store).find_wand("elm").unwrap().is_none());
    }

    #[test]
    fn put_and_find() {
        let store = InMemoryStateStore::new();
        let ledger = WandLedger::new(&store);
        let mut wand = Wand::new("elm");
        wand.record_production(vec![Material::new("wood", "forest", 1)]);
        ledger.put_wand(&wand).unwrap();
        assert_eq!(ledger.find_wand("elm").unwrap(), Some(wand));
    }

    #[test]
    fn material_under_wand_key_is_decode_error() {
        let store = InMemoryStateStore::new();
        let bytes = Material::new("el", "m", 1).to_bytes().unwrap();
        store.put_state("elm", &bytes).unwrap();
        assert!(matches!(
            WandLedger::new(&store).find_wand("elm"),
            Err(LedgerError::Decode { .. })
        ));
    }
}
