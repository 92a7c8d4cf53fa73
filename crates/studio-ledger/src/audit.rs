use crate::catalog::Catalog;
use crate::error::LedgerError;

/// Result of an inventory audit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditReport {
    pub materials_checked: usize,
    pub wands_checked: usize,
    pub violations: Vec<Violation>,
}

impl AuditReport {
    /// Returns `true` if no violation was found.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific inconsistency found during an audit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// Wand name, or `name/origin` for a material.
    pub subject: String,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    /// A wand's quantity differs from its count of available entries.
    QuantityMismatch,
    /// A wand's quantity is below zero.
    NegativeWandQuantity,
    /// A material's stock is below zero.
    NegativeStock,
}

/// Read-only consistency checker over the whole ledger.
pub struct InventoryAuditor<'a> {
    catalog: Catalog<'a>,
}

impl<'a> InventoryAuditor<'a> {
    pub fn new(catalog: Catalog<'a>) -> Self {
        Self { catalog }
    }

    /// Check every wand and material.
    pub fn audit(&self) -> Result<AuditReport, LedgerError> {
        let materials = self.catalog.list_materials()?;
        let wands = self.catalog.list_wands()?;
        let mut violations = Vec::new();

        for material in &materials {
            if material.quantity < 0 {
                violations.push(Violation {
                    subject: format!("{}/{}", material.name, material.origin),
                    kind: ViolationKind::NegativeStock,
                    description: format!("stock is {}", material.quantity),
                });
            }
        }

        for wand in &wands {
            if wand.quantity < 0 {
                violations.push(Violation {
                    subject: wand.name.clone(),
                    kind: ViolationKind::NegativeWandQuantity,
                    description: format!("quantity is {}", wand.quantity),
                });
            }
            let available = wand.available_count();
            if i64::try_from(available).ok() != Some(wand.quantity) {
                violations.push(Violation {
                    subject: wand.name.clone(),
                    kind: ViolationKind::QuantityMismatch,
                    description: format!(
                        "quantity {} but {available} of {} entries available",
                        wand.quantity,
                        wand.production_history.len()
                    ),
                });
            }
        }

        if !violations.is_empty() {
            tracing::warn!(violations = violations.len(), "inventory audit found violations");
        }
        Ok(AuditReport {
            materials_checked: materials.len(),
            wands_checked: wands.len(),
            violations,
        })
    }
}
