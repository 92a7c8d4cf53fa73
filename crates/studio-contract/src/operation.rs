//! The five invocable operations.

use serde::Serialize;
use studio_gate::AccessGate;
use studio_identity::{CreatorSource, IdentityResolver};
use studio_ledger::{Catalog, MaterialLedger, ProductionEngine, Replenishment, SaleEngine};
use studio_store::StateStore;
use studio_types::KeyScheme;

use crate::error::{ContractError, ContractResult};

// ---------------------------------------------------------------------------
// InvocationContext
// ---------------------------------------------------------------------------

/// Everything an operation may touch during one invocation.
pub struct InvocationContext<'a> {
    /// The transaction's view of the ledger.
    pub store: &'a dyn StateStore,
    /// Source of the transaction creator's identity.
    pub creator: &'a dyn CreatorSource,
    pub gate: &'a AccessGate,
    pub key_scheme: KeyScheme,
}

impl InvocationContext<'_> {
    fn identity(&self) -> IdentityResolver<'_> {
        IdentityResolver::new(self.creator)
    }
}

// ---------------------------------------------------------------------------
// Operation trait
// ---------------------------------------------------------------------------

/// A named entry point of the contract.
///
/// Object-safe and `Send + Sync` so operations can live in a
/// [`OperationRegistry`](crate::OperationRegistry).
pub trait Operation: Send + Sync {
    /// Name the host invokes this operation by (e.g. `"addMaterial"`).
    fn name(&self) -> &str;

    /// Run the operation and return its success payload.
    fn execute(&self, ctx: &InvocationContext<'_>, args: &[String]) -> ContractResult<Vec<u8>>;
}

fn to_json<T: Serialize>(value: &T) -> ContractResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| ContractError::Serialization(e.to_string()))
}

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

/// `addMaterial(name, origin, quantity)`. Open to every caller.
pub struct AddMaterial;

impl Operation for AddMaterial {
    fn name(&self) -> &str {
        "addMaterial"
    }

    fn execute(&self, ctx: &InvocationContext<'_>, args: &[String]) -> ContractResult<Vec<u8>> {
        let request = Replenishment::from_args(args)?;
        MaterialLedger::new(ctx.store, ctx.key_scheme).replenish(&request)?;
        Ok(Vec::new())
    }
}

/// `listMaterials()`: JSON array of every material. Arguments are ignored.
pub struct ListMaterials;

impl Operation for ListMaterials {
    fn name(&self) -> &str {
        "listMaterials"
    }

    fn execute(&self, ctx: &InvocationContext<'_>, _args: &[String]) -> ContractResult<Vec<u8>> {
        to_json(&Catalog::new(ctx.store).list_materials()?)
    }
}

// ---------------------------------------------------------------------------
// Wands
// ---------------------------------------------------------------------------

/// `createWand(wandName, (name, origin, quantity)+)`. Privileged.
pub struct CreateWand;

impl Operation for CreateWand {
    fn name(&self) -> &str {
        "createWand"
    }

    fn execute(&self, ctx: &InvocationContext<'_>, args: &[String]) -> ContractResult<Vec<u8>> {
        let receipt = ProductionEngine::new(ctx.store, ctx.key_scheme).create_wand(
            &ctx.identity(),
            ctx.gate,
            args,
        )?;
        Ok(format!("Wand '{}' created or updated successfully.", receipt.wand.name).into_bytes())
    }
}

/// `sellWand(wandName, productionIndex)`. Privileged.
pub struct SellWand;

impl Operation for SellWand {
    fn name(&self) -> &str {
        "sellWand"
    }

    fn execute(&self, ctx: &InvocationContext<'_>, args: &[String]) -> ContractResult<Vec<u8>> {
        SaleEngine::new(ctx.store, ctx.key_scheme).sell_wand(&ctx.identity(), ctx.gate, args)?;
        Ok(b"Wand sold successfully".to_vec())
    }
}

/// `listWands()`: JSON array of every wand. Arguments are ignored.
pub struct ListWands;

impl Operation for ListWands {
    fn name(&self) -> &str {
        "listWands"
    }

    fn execute(&self, ctx: &InvocationContext<'_>, _args: &[String]) -> ContractResult<Vec<u8>> {
        to_json(&Catalog::new(ctx.store).list_wands()?)
    }
}
