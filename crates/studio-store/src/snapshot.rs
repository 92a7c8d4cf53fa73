//! On-disk snapshots of a state store.
//!
//! A snapshot is a JSON document mapping keys to hex-encoded values. It lets
//! a local run carry ledger state from one transaction to the next.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::memory::InMemoryStateStore;
use crate::traits::KeyValue;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable image of every key in a store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub version: u32,
    /// Key to hex-encoded value.
    pub entries: BTreeMap<String, String>,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

impl StateSnapshot {
    /// Capture the full contents of `store`.
    pub fn capture(store: &InMemoryStateStore) -> Self {
        let entries = store
            .entries()
            .into_iter()
            .map(|kv| (kv.key, hex::encode(kv.value)))
            .collect();
        Self {
            version: SNAPSHOT_VERSION,
            entries,
        }
    }

    /// Rebuild a store from this snapshot.
    pub fn restore(&self) -> StoreResult<InMemoryStateStore> {
        if self.version != SNAPSHOT_VERSION {
            return Err(StoreError::InvalidSnapshot(format!(
                "unsupported version {}",
                self.version
            )));
        }
        let mut entries = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            let bytes = hex::decode(value)
                .map_err(|e| StoreError::InvalidSnapshot(format!("key {key:?}: {e}")))?;
            entries.push(KeyValue::new(key.clone(), bytes));
        }
        Ok(InMemoryStateStore::from_entries(entries))
    }

    /// Read a snapshot file. A missing file yields an empty snapshot.
    pub fn load(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no snapshot on disk, starting empty");
            return Ok(Self::default());
        }
        let raw = std::fs::read(path)?;
        serde_json::from_slice(&raw).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Write the snapshot atomically: a temp file in the same directory is
    /// renamed over `path`.
    pub fn save(&self, path: &Path) -> StoreResult<()> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::StateStore;

    #[test]
    fn capture_and_restore() {
        let store = InMemoryStateStore::new();
        store.put_state("wood\u{0}forest", b"{\"quantity\":7}").unwrap();
        store.put_state("elm-wand", &[0xff, 0x00]).unwrap();

        let snapshot = StateSnapshot::capture(&store);
        assert_eq!(snapshot.entries.len(), 2);
        assert_eq!(snapshot.entries["elm-wand"], "ff00");

        let restored = snapshot.restore().unwrap();
        assert_eq!(restored.entries(), store.entries());
    }

    #[test]
    fn save_and_load_through_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = InMemoryStateStore::new();
        store.put_state("k", b"v").unwrap();
        StateSnapshot::capture(&store).save(&path).unwrap();

        let loaded = StateSnapshot::load(&path).unwrap();
        let restored = loaded.restore().unwrap();
        assert_eq!(restored.get_state("k").unwrap(), Some(b"v".to_vec()));
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = StateSnapshot::load(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.entries.is_empty());
        assert!(loaded.restore().unwrap().is_empty());
    }

    #[test]
    fn bad_hex_is_rejected() {
        let mut snapshot = StateSnapshot::default();
        snapshot.entries.insert("k".into(), "zz".into());
        assert!(matches!(
            snapshot.restore(),
            Err(StoreError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let snapshot = StateSnapshot {
            version: 99,
            entries: BTreeMap::new(),
        };
        assert!(matches!(
            snapshot.restore(),
            Err(StoreError::InvalidSnapshot(_))
        ));
    }
}
