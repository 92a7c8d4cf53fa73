//! Key-value state storage for the studio ledger.
//!
//! The ledger itself is an external collaborator: the host runtime owns the
//! persisted bytes and commits or discards a transaction's writes as a unit.
//! This crate defines that boundary and the doubles used to stand in for it.
//!
//! # Storage Backends
//!
//! All backends implement the [`StateStore`] trait:
//!
//! - [`InMemoryStateStore`] -- `BTreeMap`-based store for tests and embedding
//! - [`StagedTransaction`] -- write-set overlay over another store, applied
//!   on [`StagedTransaction::commit`] and discarded on drop
//!
//! # Design Rules
//!
//! 1. Keys are UTF-8 strings; values are opaque bytes.
//! 2. Range scans yield entries in ascending key order.
//! 3. A range iterator holds a backend resource until it is closed or dropped.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod snapshot;
pub mod traits;
pub mod transaction;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStateStore;
pub use snapshot::StateSnapshot;
pub use traits::{KeyValue, StateIterator, StateStore};
pub use transaction::StagedTransaction;
