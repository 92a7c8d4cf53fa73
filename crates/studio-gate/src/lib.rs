//! Access gate for the studio ledger.
//!
//! Production and sale are privileged: only callers from the configured
//! organization may run them. Replenishment and listing are open to every
//! caller and never pass through the gate.
//!
//! # Quick Start
//!
//! ```rust
//! use studio_gate::{AccessGate, Action, GateConfig};
//! use studio_types::OrgId;
//!
//! let gate = AccessGate::new(GateConfig::default());
//! assert!(gate.authorize(&OrgId::from("org0-example-com"), Action::CreateWand).is_ok());
//! assert!(gate.authorize(&OrgId::from("org1-example-com"), Action::SellWand).is_err());
//! ```

pub mod config;
pub mod error;
pub mod gate;

pub use config::{GateConfig, DEFAULT_PRIVILEGED_ORG};
pub use error::GateError;
pub use gate::{AccessGate, Action};
