use studio_gate::{AccessGate, Action};
use studio_identity::IdentityResolver;
use studio_store::StateStore;
use studio_types::{KeyScheme, Wand};

use crate::error::{LedgerError, LedgerResult};
use crate::parse_int;
use crate::wand::WandLedger;

/// A parsed `sellWand` request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaleOrder {
    pub wand_name: String,
    pub index: i64,
}

impl SaleOrder {
    /// Parse `[wandName, productionIndex]`.
    pub fn from_args(args: &[String]) -> LedgerResult<Self> {
        let [wand_name, index] = args else {
            return Err(LedgerError::InvalidArgument(format!(
                "expected 2 arguments (wand name, production index), got {}",
                args.len()
            )));
        };
        Ok(Self {
            wand_name: wand_name.clone(),
            index: parse_int("production index", index)?,
        })
    }
}

/// Marks individual production entries as sold.
pub struct SaleEngine<'a> {
    wands: WandLedger<'a>,
    scheme: KeyScheme,
}

impl<'a> SaleEngine<'a> {
    pub fn new(store: &'a dyn StateStore, scheme: KeyScheme) -> Self {
        Self {
            wands: WandLedger::new(store),
            scheme,
        }
    }

    /// Handle a `sellWand` invocation: authorize the caller, parse the
    /// arguments, then sell.
    pub fn sell_wand(
        &self,
        identity: &IdentityResolver<'_>,
        gate: &AccessGate,
        args: &[String],
    ) -> LedgerResult<Wand> {
        let caller = identity.resolve_caller_org()?;
        gate.authorize(&caller, Action::SellWand)?;
        let order = SaleOrder::from_args(args)?;
        self.sell(&order)
    }

    /// Flip entry `order.index` of the wand to sold and decrement its
    /// quantity. Entries are never removed from the history.
    pub fn sell(&self, order: &SaleOrder) -> LedgerResult<Wand> {
        self.scheme
            .check_wand_name(&order.wand_name)
            .map_err(|e| LedgerError::InvalidArgument(e.to_string()))?;
        let mut wand = self
            .wands
            .find_wand(&order.wand_name)?
            .ok_or_else(|| LedgerError::WandNotFound(order.wand_name.clone()))?;

        let len = wand.production_history.len();
        let index = usize::try_from(order.index)
            .ok()
            .filter(|i| *i < len)
            .ok_or_else(|| LedgerError::IndexOutOfRange {
                wand: wand.name.clone(),
                index: order.index,
                len,
            })?;

        let entry = &mut wand.production_history[index];
        if !entry.available {
            return Err(LedgerError::AlreadySold {
                wand: wand.name.clone(),
                index,
            });
        }
        entry.available = false;
        wand.quantity = wand.quantity.checked_sub(1).ok_or_else(|| {
            LedgerError::InvalidArgument(format!("quantity of wand '{}' underflows", wand.name))
        })?;

        self.wands.put_wand(&wand)?;
        tracing::info!(
            wand = %wand.name,
            index,
            remaining = wand.quantity,
            "wand sold"
        );
        Ok(wand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_identity::StaticCreator;
    use studio_store::InMemoryStateStore;
    use studio_types::Material;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn with_wand(productions: usize) -> InMemoryStateStore {
        let store = InMemoryStateStore::new();
        let mut wand = Wand::new("elm");
        for _ in 0..productions {
            wand.record_production(vec![Material::new("wood", "forest", 1)]);
        }
        WandLedger::new(&store).put_wand(&wand).unwrap();
        store
    }

    fn order(index: i64) -> SaleOrder {
        SaleOrder {
            wand_name: "elm".into(),
            index,
        }
    }

    #[test]
    fn order_parses_two_args() {
        assert_eq!(SaleOrder::from_args(&args(&["elm", "0"])).unwrap(), order(0));
        for bad in [&["elm"][..], &["elm", "0", "1"][..], &["elm", "first"][..]] {
            assert!(matches!(
                SaleOrder::from_args(&args(bad)),
                Err(LedgerError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn sell_flips_entry_and_decrements() {
        let store = with_wand(2);
        let wand = SaleEngine::new(&store, KeyScheme::Delimited).sell(&order(1)).unwrap();
        assert_eq!(wand.quantity, 1);
        assert!(wand.production_history[0].available);
        assert!(!wand.production_history[1].available);
        assert_eq!(wand.production_history.len(), 2);
        assert_eq!(
            WandLedger::new(&store).find_wand("elm").unwrap(),
            Some(wand)
        );
    }

    #[test]
    fn double_sale_is_rejected() {
        let store = with_wand(1);
        let engine = SaleEngine::new(&store, KeyScheme::Delimited);
        engine.sell(&order(0)).unwrap();
        let before = store.entries();
        assert_eq!(
            engine.sell(&order(0)),
            Err(LedgerError::AlreadySold {
                wand: "elm".into(),
                index: 0,
            })
        );
        assert_eq!(store.entries(), before);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let store = with_wand(2);
        let engine = SaleEngine::new(&store, KeyScheme::Delimited);
        for index in [2, 99, -1] {
            assert_eq!(
                engine.sell(&order(index)),
                Err(LedgerError::IndexOutOfRange {
                    wand: "elm".into(),
                    index,
                    len: 2,
                })
            );
        }
    }

    #[test]
    fn floor_wand_quantity_is_rejected() {
        let store = InMemoryStateStore::new();
        let mut wand = Wand::new("elm");
        wand.record_production(vec![Material::new("wood", "forest", 1)]);
        wand.quantity = i64::MIN;
        WandLedger::new(&store).put_wand(&wand).unwrap();
        let before = store.entries();

        assert!(matches!(
            SaleEngine::new(&store, KeyScheme::Delimited).sell(&order(0)),
            Err(LedgerError::InvalidArgument(_))
        ));
        assert_eq!(store.entries(), before);
    }

    #[test]
    fn material_key_is_not_a_wand_name() {
        let store = InMemoryStateStore::new();
        let order = SaleOrder {
            wand_name: "wood\u{0}forest".into(),
            index: 0,
        };
        assert!(matches!(
            SaleEngine::new(&store, KeyScheme::Delimited).sell(&order),
            Err(LedgerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn missing_wand_is_not_found() {
        let store = InMemoryStateStore::new();
        assert_eq!(
            SaleEngine::new(&store, KeyScheme::Delimited).sell(&order(0)),
            Err(LedgerError::WandNotFound("elm".into()))
        );
    }

    #[test]
    fn sell_wand_requires_privileged_org() {
        let store = with_wand(1);
        let before = store.entries();
        let creator = StaticCreator::for_org("org1-example-com");
        let result = SaleEngine::new(&store, KeyScheme::Delimited).sell_wand(
            &IdentityResolver::new(&creator),
            &AccessGate::default(),
            &args(&["elm", "0"]),
        );
        assert!(matches!(result, Err(LedgerError::Unauthorized(_))));
        assert_eq!(store.entries(), before);
    }

    #[test]
    fn sell_wand_as_privileged_org() {
        let store = with_wand(1);
        let creator = StaticCreator::for_org("org0-example-com");
        let wand = SaleEngine::new(&store, KeyScheme::Delimited)
            .sell_wand(
                &IdentityResolver::new(&creator),
                &AccessGate::default(),
                &args(&["elm", "0"]),
            )
            .unwrap();
        assert_eq!(wand.quantity, 0);
        assert_eq!(wand.available_count(), 0);
    }
}
