//! Staged write-sets with commit/discard semantics.
//!
//! The host runtime commits a transaction's writes only when the invocation
//! succeeds. [`StagedTransaction`] reproduces that contract over any
//! [`StateStore`]: writes land in a private write-set, reads see the
//! write-set first, and nothing reaches the base store until
//! [`StagedTransaction::commit`].

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::iter::Peekable;
use std::sync::RwLock;

use crate::error::StoreResult;
use crate::traits::{in_range, KeyValue, StateIterator, StateStore};

/// A write-set layered over a base store.
pub struct StagedTransaction<'a, S: StateStore + ?Sized> {
    base: &'a S,
    writes: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl<'a, S: StateStore + ?Sized> StagedTransaction<'a, S> {
    /// Begin a transaction over `base`.
    pub fn begin(base: &'a S) -> Self {
        Self {
            base,
            writes: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of keys written so far.
    pub fn pending_writes(&self) -> usize {
        self.writes.read().expect("lock poisoned").len()
    }

    /// Keys written so far, in key order.
    pub fn written_keys(&self) -> Vec<String> {
        self.writes
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    /// Apply the write-set to the base store. Returns the number of keys
    /// written.
    pub fn commit(self) -> StoreResult<usize> {
        let writes = self.writes.into_inner().expect("lock poisoned");
        let count = writes.len();
        for (key, value) in &writes {
            self.base.put_state(key, value)?;
        }
        tracing::debug!(count, "committed write-set");
        Ok(count)
    }

    /// Drop the write-set without touching the base store.
    pub fn discard(self) {
        let count = self.pending_writes();
        tracing::debug!(count, "discarded write-set");
    }
}

impl<S: StateStore + ?Sized> StateStore for StagedTransaction<'_, S> {
    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        if let Some(value) = self.writes.read().expect("lock poisoned").get(key) {
            return Ok(Some(value.clone()));
        }
        self.base.get_state(key)
    }

    fn put_state(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.writes
            .write()
            .expect("lock poisoned")
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> StoreResult<Box<dyn StateIterator + '_>> {
        let staged: Vec<KeyValue> = self
            .writes
            .read()
            .expect("lock poisoned")
            .iter()
            .filter(|(k, _)| in_range(k, start, end))
            .map(|(k, v)| KeyValue::new(k.clone(), v.clone()))
            .collect();
        let base = self.base.state_by_range(start, end)?;
        Ok(Box::new(MergedIterator {
            base,
            base_next: None,
            base_done: false,
            staged: staged.into_iter().peekable(),
        }))
    }
}

/// Merges a base scan with staged writes; staged values shadow base values
/// under the same key.
struct MergedIterator<'a> {
    base: Box<dyn StateIterator + 'a>,
    base_next: Option<KeyValue>,
    base_done: bool,
    staged: Peekable<std::vec::IntoIter<KeyValue>>,
}

impl MergedIterator<'_> {
    fn fill_base(&mut self) -> StoreResult<()> {
        if self.base_next.is_none() && !self.base_done {
            match self.base.next_entry()? {
                Some(kv) => self.base_next = Some(kv),
                None => self.base_done = true,
            }
        }
        Ok(())
    }
}

impl StateIterator for MergedIterator<'_> {
    fn next_entry(&mut self) -> StoreResult<Option<KeyValue>> {
        self.fill_base()?;
        let order = match (self.base_next.as_ref(), self.staged.peek()) {
            (None, None) => return Ok(None),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(b), Some(s)) => b.key.cmp(&s.key),
        };
        match order {
            Ordering::Less => Ok(self.base_next.take()),
            Ordering::Greater => Ok(self.staged.next()),
            Ordering::Equal => {
                // Shadowed by the write-set.
                self.base_next = None;
                Ok(self.staged.next())
            }
        }
    }

    fn close(&mut self) -> StoreResult<()> {
        self.base.close()
    }
}
