//! Core ledger logic for the studio.
//!
//! This crate is the heart of the studio ledger. It provides:
//! - `MaterialLedger` / `WandLedger` accessors over a [`StateStore`](studio_store::StateStore)
//! - `Catalog` range-scan listings filtered by record discriminator
//! - `ProductionEngine`: validate-then-commit production that never
//!   partially consumes materials
//! - `SaleEngine`: one-way availability toggle on a production entry
//! - `InventoryAuditor`: quantity/availability invariant checks
//!
//! Engines never roll back their own writes. A failed operation leaves its
//! partial write-set to the surrounding transaction, which discards it.

pub mod audit;
pub mod catalog;
pub mod error;
pub mod material;
pub mod production;
pub mod sale;
pub mod wand;

pub use audit::{AuditReport, InventoryAuditor, Violation, ViolationKind};
pub use catalog::Catalog;
pub use error::{LedgerError, LedgerResult};
pub use material::{MaterialLedger, Replenishment};
pub use production::{
    MaterialLine, ProductionEngine, ProductionOrder, ProductionReceipt, StagedProduction,
};
pub use sale::{SaleEngine, SaleOrder};
pub use wand::WandLedger;

/// Parse a base-10 signed integer argument.
pub(crate) fn parse_int(field: &str, raw: &str) -> LedgerResult<i64> {
    raw.parse::<i64>().map_err(|_| {
        LedgerError::InvalidArgument(format!("{field} must be an integer, got {raw:?}"))
    })
}
