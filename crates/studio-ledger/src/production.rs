//! Atomic wand production.
//!
//! Production runs in two phases. [`ProductionEngine::validate`] reads every
//! requested material and checks stock without writing anything, producing
//! a [`StagedProduction`]. [`ProductionEngine::commit`] then appends the
//! production entry and debits the materials. Commit is only reachable with
//! a staged production, so a shortfall on any line leaves every material
//! untouched.

use studio_gate::{AccessGate, Action};
use studio_identity::IdentityResolver;
use studio_store::StateStore;
use studio_types::{KeyScheme, Material, MaterialKey, Wand};

use crate::error::{LedgerError, LedgerResult};
use crate::material::MaterialLedger;
use crate::parse_int;
use crate::wand::WandLedger;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// One `(name, origin, quantity)` triple of a production request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialLine {
    pub name: String,
    pub origin: String,
    pub quantity: i64,
}

/// A parsed `createWand` request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductionOrder {
    pub wand_name: String,
    pub lines: Vec<MaterialLine>,
}

impl ProductionOrder {
    /// Parse `[wandName, (materialName, origin, quantity)+]`.
    pub fn from_args(args: &[String]) -> LedgerResult<Self> {
        let Some((wand_name, rest)) = args.split_first().filter(|(_, rest)| rest.len() >= 3)
        else {
            return Err(LedgerError::InvalidArgument(format!(
                "expected at least 4 arguments (wand name, material name, origin, quantity), got {}",
                args.len()
            )));
        };
        if rest.len() % 3 != 0 {
            return Err(LedgerError::InvalidArgument(
                "material arguments must come in triples (name, origin, quantity)".into(),
            ));
        }
        if wand_name.is_empty() {
            return Err(LedgerError::InvalidArgument("wand name must not be empty".into()));
        }
        let lines = rest
            .chunks_exact(3)
            .map(|triple| {
                Ok(MaterialLine {
                    name: triple[0].clone(),
                    origin: triple[1].clone(),
                    quantity: parse_int("material quantity", &triple[2])?,
                })
            })
            .collect::<LedgerResult<Vec<_>>>()?;
        Ok(Self {
            wand_name: wand_name.clone(),
            lines,
        })
    }
}

// ---------------------------------------------------------------------------
// Staging
// ---------------------------------------------------------------------------

/// A production that passed validation and is ready to commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagedProduction {
    wand_name: String,
    /// Consumed quantities, one per request line, in request order.
    snapshots: Vec<Material>,
    /// Total debit per distinct material key, in first-seen order.
    debits: Vec<(MaterialKey, i64)>,
}

impl StagedProduction {
    pub fn wand_name(&self) -> &str {
        &self.wand_name
    }

    pub fn snapshots(&self) -> &[Material] {
        &self.snapshots
    }
}

/// Result of a committed production.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductionReceipt {
    /// The wand as persisted.
    pub wand: Wand,
    /// Index of the new entry in the wand's production history.
    pub index: usize,
    /// Material records as persisted after the debit.
    pub debited: Vec<Material>,
}

// ---------------------------------------------------------------------------
// ProductionEngine
// ---------------------------------------------------------------------------

/// Turns materials into wands.
pub struct ProductionEngine<'a> {
    materials: MaterialLedger<'a>,
    wands: WandLedger<'a>,
    scheme: KeyScheme,
}

impl<'a> ProductionEngine<'a> {
    pub fn new(store: &'a dyn StateStore, scheme: KeyScheme) -> Self {
        Self {
            materials: MaterialLedger::new(store, scheme),
            wands: WandLedger::new(store),
            scheme,
        }
    }

    /// Handle a `createWand` invocation: authorize the caller, parse the
    /// arguments, then validate and commit.
    pub fn create_wand(
        &self,
        identity: &IdentityResolver<'_>,
        gate: &AccessGate,
        args: &[String],
    ) -> LedgerResult<ProductionReceipt> {
        let caller = identity.resolve_caller_org()?;
        gate.authorize(&caller, Action::CreateWand)?;
        let order = ProductionOrder::from_args(args)?;
        self.produce(&order)
    }

    /// Validate and commit `order`.
    pub fn produce(&self, order: &ProductionOrder) -> LedgerResult<ProductionReceipt> {
        let staged = self.validate(order)?;
        self.commit(staged)
    }

    /// Check every line against current stock. Performs no writes.
    ///
    /// Lines naming the same material are summed before comparison, so the
    /// request as a whole never needs more than is in stock.
    pub fn validate(&self, order: &ProductionOrder) -> LedgerResult<StagedProduction> {
        self.scheme
            .check_wand_name(&order.wand_name)
            .map_err(|e| LedgerError::InvalidArgument(e.to_string()))?;

        let mut snapshots = Vec::with_capacity(order.lines.len());
        let mut debits: Vec<(MaterialKey, i64)> = Vec::new();

        for line in &order.lines {
            let key = self.materials.key(&line.name, &line.origin)?;
            let stock = self
                .materials
                .load(&key)?
                .ok_or_else(|| LedgerError::MaterialNotFound {
                    name: line.name.clone(),
                    origin: line.origin.clone(),
                })?;

            let required = match debits.iter_mut().find(|(k, _)| *k == key) {
                Some((_, total)) => {
                    *total = total.checked_add(line.quantity).ok_or_else(|| {
                        LedgerError::InvalidArgument(format!(
                            "total quantity of {} overflows",
                            line.name
                        ))
                    })?;
                    *total
                }
                None => {
                    debits.push((key, line.quantity));
                    line.quantity
                }
            };

            if stock.quantity < required {
                return Err(LedgerError::InsufficientStock {
                    material: stock.name,
                    origin: line.origin.clone(),
                    available: stock.quantity,
                    required,
                });
            }

            snapshots.push(Material::new(stock.name, line.origin.clone(), line.quantity));
        }

        tracing::debug!(
            wand = %order.wand_name,
            lines = order.lines.len(),
            materials = debits.len(),
            "production validated"
        );
        Ok(StagedProduction {
            wand_name: order.wand_name.clone(),
            snapshots,
            debits,
        })
    }

    /// Append the production entry and debit every staged material.
    pub fn commit(&self, staged: StagedProduction) -> LedgerResult<ProductionReceipt> {
        let StagedProduction {
            wand_name,
            snapshots,
            debits,
        } = staged;

        let mut wand = self
            .wands
            .find_wand(&wand_name)?
            .unwrap_or_else(|| Wand::new(wand_name.clone()));
        let index = wand.record_production(snapshots).ok_or_else(|| {
            LedgerError::InvalidArgument(format!("quantity of wand '{}' overflows", wand.name))
        })?;

        let mut debited = Vec::with_capacity(debits.len());
        for (key, amount) in &debits {
            let mut material = self.materials.load(key)?.ok_or_else(|| LedgerError::Read {
                key: key.to_string(),
                reason: "material vanished after validation".into(),
            })?;
            material.quantity = material.quantity.checked_sub(*amount).ok_or_else(|| {
                LedgerError::InvalidArgument(format!("debit of {amount} overflows stock"))
            })?;
            self.materials.store_at(key, &material)?;
            debited.push(material);
        }

        self.wands.put_wand(&wand)?;
        tracing::info!(
            wand = %wand.name,
            index,
            quantity = wand.quantity,
            materials = debited.len(),
            "wand produced"
        );
        Ok(ProductionReceipt {
            wand,
            index,
            debited,
        })
    }
}
