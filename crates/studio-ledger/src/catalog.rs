use studio_store::StateStore;
use studio_types::{Material, Record, RecordKind, Wand};

use crate::error::{LedgerError, LedgerResult};

/// Full-keyspace listings of one record kind.
///
/// Materials and wands share a keyspace; a listing scans every key and keeps
/// only entries carrying its discriminator. Entries of another kind and
/// entries that fail to decode are skipped, never reported.
pub struct Catalog<'a> {
    store: &'a dyn StateStore,
}

impl<'a> Catalog<'a> {
    pub fn new(store: &'a dyn StateStore) -> Self {
        Self { store }
    }

    /// Every material in the ledger, in key order.
    pub fn list_materials(&self) -> LedgerResult<Vec<Material>> {
        self.scan::<Material>()
    }

    /// Every wand in the ledger, in key order.
    pub fn list_wands(&self) -> LedgerResult<Vec<Wand>> {
        self.scan::<Wand>()
    }

    fn scan<T: Record>(&self) -> LedgerResult<Vec<T>> {
        let mut iter = self
            .store
            .state_by_range("", "")
            .map_err(|e| LedgerError::Scan(e.to_string()))?;

        let kind = T::KIND;
        let mut records = Vec::new();
        let mut skipped = 0usize;
        loop {
            let entry = match iter.next_entry() {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    let _ = iter.close();
                    return Err(LedgerError::Scan(e.to_string()));
                }
            };
            if RecordKind::peek(&entry.value) != Some(kind) {
                skipped += 1;
                continue;
            }
            match T::from_bytes(&entry.value) {
                Ok(record) => records.push(record),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(
                        key = %entry.key,
                        %kind,
                        error = %e,
                        "skipping undecodable record"
                    );
                }
            }
        }
        iter.close().map_err(|e| LedgerError::Scan(e.to_string()))?;

        tracing::debug!(%kind, found = records.len(), skipped, "catalog scan complete");
        Ok(records)
    }
}
