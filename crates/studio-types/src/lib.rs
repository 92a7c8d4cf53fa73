//! Foundation types for the studio ledger.
//!
//! This crate provides the record and identity types shared by every other
//! studio crate. Records are transient materializations of ledger values:
//! the ledger owns the persisted bytes, these structs only live for the
//! duration of one transaction.
//!
//! # Key Types
//!
//! - [`Material`] -- stock of one raw input, keyed by `(name, origin)`
//! - [`Wand`] -- finished-goods line with an append-only production history
//! - [`Production`] -- one manufacturing event embedded in a wand
//! - [`RecordKind`] -- discriminator separating record types in one keyspace
//! - [`MaterialKey`] / [`KeyScheme`] -- composite ledger key for materials
//! - [`OrgId`] -- organization identifier of a transaction creator

pub mod error;
pub mod identity;
pub mod key;
pub mod record;

pub use error::TypeError;
pub use identity::OrgId;
pub use key::{KeyScheme, MaterialKey, KEY_DELIMITER};
pub use record::{Material, Production, Record, RecordKind, Wand};
