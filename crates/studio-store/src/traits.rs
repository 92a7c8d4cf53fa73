use crate::error::StoreResult;

/// One entry yielded by a range scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Cursor over the result of [`StateStore::state_by_range`].
///
/// An iterator pins a backend resource. Callers must call [`close`] once
/// done; implementations also release on drop so early-exit paths do not
/// leak.
///
/// [`close`]: StateIterator::close
pub trait StateIterator {
    /// Advance the cursor. Returns `Ok(None)` once the range is exhausted.
    fn next_entry(&mut self) -> StoreResult<Option<KeyValue>>;

    /// Release the backend resource. Closing twice is a no-op.
    fn close(&mut self) -> StoreResult<()>;
}

/// Key-value ledger state as seen from inside one transaction.
///
/// All implementations must satisfy these invariants:
/// - `get_state` returns `Ok(None)` for absent keys, never an error.
/// - Range scans yield keys in ascending byte order.
/// - The store never interprets values; it is a pure key-value store.
pub trait StateStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Write (create or replace) the value under `key`.
    fn put_state(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Open a scan over keys in `[start, end)`.
    ///
    /// An empty `start` begins at the first key; an empty `end` runs to the
    /// last key, so `("", "")` scans the whole keyspace.
    fn state_by_range(&self, start: &str, end: &str)
        -> StoreResult<Box<dyn StateIterator + '_>>;
}

/// Returns `true` if `key` lies in the half-open range `[start, end)` where
/// an empty `end` means unbounded.
pub(crate) fn in_range(key: &str, start: &str, end: &str) -> bool {
    key >= start && (end.is_empty() || key < end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bounds_cover_everything() {
        assert!(in_range("", "", ""));
        assert!(in_range("zzz", "", ""));
    }

    #[test]
    fn end_is_exclusive() {
        assert!(in_range("a", "a", "b"));
        assert!(!in_range("b", "a", "b"));
        assert!(!in_range("0", "a", ""));
    }
}
