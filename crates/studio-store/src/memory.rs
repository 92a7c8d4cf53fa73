use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::{StoreError, StoreResult};
use crate::traits::{in_range, KeyValue, StateIterator, StateStore};

/// In-memory, `BTreeMap`-based state store.
///
/// Intended for tests, local runs, and embedding. Values are cloned on
/// read/write. The store tracks how many range iterators are open so callers
/// can check that scans are released.
pub struct InMemoryStateStore {
    state: RwLock<BTreeMap<String, Vec<u8>>>,
    open_iterators: Arc<AtomicUsize>,
    read_only: AtomicBool,
    scan_fault_at: AtomicUsize,
}

impl InMemoryStateStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(BTreeMap::new()),
            open_iterators: Arc::new(AtomicUsize::new(0)),
            read_only: AtomicBool::new(false),
            scan_fault_at: AtomicUsize::new(usize::MAX),
        }
    }

    /// Create a store pre-populated with `entries`.
    pub fn from_entries(entries: impl IntoIterator<Item = KeyValue>) -> Self {
        let store = Self::new();
        {
            let mut map = store.state.write().expect("lock poisoned");
            for kv in entries {
                map.insert(kv.key, kv.value);
            }
        }
        store
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.state.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.state.read().expect("lock poisoned").is_empty()
    }

    /// All entries in key order.
    pub fn entries(&self) -> Vec<KeyValue> {
        self.state
            .read()
            .expect("lock poisoned")
            .iter()
            .map(|(k, v)| KeyValue::new(k.clone(), v.clone()))
            .collect()
    }

    /// Number of range iterators opened and not yet closed or dropped.
    pub fn open_iterators(&self) -> usize {
        self.open_iterators.load(Ordering::SeqCst)
    }

    /// Refuse (or accept again) all writes with [`StoreError::ReadOnly`].
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Make every subsequent scan fail once it has yielded `after` entries.
    pub fn inject_scan_fault(&self, after: usize) {
        self.scan_fault_at.store(after, Ordering::SeqCst);
    }

    /// Remove a previously injected scan fault.
    pub fn clear_scan_fault(&self) {
        self.scan_fault_at.store(usize::MAX, Ordering::SeqCst);
    }
}

impl Default for InMemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for InMemoryStateStore {
    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let map = self.state.read().expect("lock poisoned");
        Ok(map.get(key).cloned())
    }

    fn put_state(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StoreError::ReadOnly);
        }
        let mut map = self.state.write().expect("lock poisoned");
        map.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> StoreResult<Box<dyn StateIterator + '_>> {
        let entries: Vec<KeyValue> = {
            let map = self.state.read().expect("lock poisoned");
            map.iter()
                .filter(|(k, _)| in_range(k, start, end))
                .map(|(k, v)| KeyValue::new(k.clone(), v.clone()))
                .collect()
        };
        let fault_at = match self.scan_fault_at.load(Ordering::SeqCst) {
            usize::MAX => None,
            n => Some(n),
        };
        self.open_iterators.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(start, end, count = entries.len(), "opened range scan");
        Ok(Box::new(SnapshotIterator {
            entries: entries.into_iter(),
            yielded: 0,
            fault_at,
            open: Some(Arc::clone(&self.open_iterators)),
        }))
    }
}

impl std::fmt::Debug for InMemoryStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStateStore")
            .field("key_count", &self.len())
            .field("open_iterators", &self.open_iterators())
            .finish()
    }
}

/// Iterator over a point-in-time copy of the scanned range.
struct SnapshotIterator {
    entries: std::vec::IntoIter<KeyValue>,
    yielded: usize,
    fault_at: Option<usize>,
    open: Option<Arc<AtomicUsize>>,
}

impl StateIterator for SnapshotIterator {
    fn next_entry(&mut self) -> StoreResult<Option<KeyValue>> {
        if self.open.is_none() {
            return Err(StoreError::IteratorClosed);
        }
        if self.fault_at == Some(self.yielded) {
            return Err(StoreError::Backend(format!(
                "injected scan fault after {} entries",
                self.yielded
            )));
        }
        let next = self.entries.next();
        if next.is_some() {
            self.yielded += 1;
        }
        Ok(next)
    }

    fn close(&mut self) -> StoreResult<()> {
        if let Some(counter) = self.open.take() {
            counter.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

impl Drop for SnapshotIterator {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
