//! Invocation surface for the studio ledger.
//!
//! The host calls the contract with an operation name and positional string
//! arguments. [`StudioContract`] looks the name up in an
//! [`OperationRegistry`] and runs the matching [`Operation`] against the
//! transaction's state store, returning a [`Response`].
//!
//! | Operation       | Arguments                                   | Payload            |
//! |-----------------|---------------------------------------------|--------------------|
//! | `addMaterial`   | name, origin, quantity                      | none               |
//! | `listMaterials` | none                                        | JSON array         |
//! | `createWand`    | wandName, then (name, origin, quantity)+    | confirmation text  |
//! | `sellWand`      | wandName, productionIndex                   | confirmation text  |
//! | `listWands`     | none                                        | JSON array         |
//!
//! [`MockStub`] plays the host for tests and the CLI.

pub mod config;
pub mod contract;
pub mod error;
pub mod operation;
pub mod registry;
pub mod response;
pub mod stub;

pub use config::ContractConfig;
pub use contract::StudioContract;
pub use error::{ContractError, ContractResult};
pub use operation::{
    AddMaterial, CreateWand, InvocationContext, ListMaterials, ListWands, Operation, SellWand,
};
pub use registry::OperationRegistry;
pub use response::Response;
pub use stub::MockStub;

#[cfg(test)]
mod tests {
    use super::*;
    use studio_gate::GateConfig;
    use studio_types::{KeyScheme, Material, Wand};

    const PRIVILEGED: &str = "org0-example-com";
    const OTHER: &str = "org1-example-com";

    fn materials(stub: &MockStub, contract: &StudioContract) -> Vec<Material> {
        let r = stub.invoke::<&str>(contract, "listMaterials", &[]);
        assert!(r.is_ok(), "{}", r.message);
        serde_json::from_slice(&r.payload).unwrap()
    }

    fn wands(stub: &MockStub, contract: &StudioContract) -> Vec<Wand> {
        let r = stub.invoke::<&str>(contract, "listWands", &[]);
        assert!(r.is_ok(), "{}", r.message);
        serde_json::from_slice(&r.payload).unwrap()
    }

    fn stock(stub: &MockStub, contract: &StudioContract, name: &str) -> i64 {
        materials(stub, contract)
            .into_iter()
            .find(|m| m.name == name)
            .map(|m| m.quantity)
            .unwrap()
    }

    // -----------------------------------------------------------------------
    // End-to-end
    // -----------------------------------------------------------------------

    #[test]
    fn elm_wand_lifecycle() {
        let contract = StudioContract::default();
        let stub = MockStub::for_org(PRIVILEGED);

        let r = stub.invoke(&contract, "addMaterial", &["wood", "forest", "10"]);
        assert!(r.is_ok(), "{}", r.message);
        assert!(r.payload.is_empty());

        let r = stub.invoke(&contract, "createWand", &["elm-wand", "wood", "forest", "3"]);
        assert!(r.is_ok(), "{}", r.message);
        assert_eq!(r.payload_str(), "Wand 'elm-wand' created or updated successfully.");

        assert_eq!(stock(&stub, &contract, "wood"), 7);
        let listed = wands(&stub, &contract);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].quantity, 1);
        assert_eq!(listed[0].production_history.len(), 1);
        assert!(listed[0].production_history[0].available);

        let r = stub.invoke(&contract, "sellWand", &["elm-wand", "0"]);
        assert!(r.is_ok(), "{}", r.message);
        assert_eq!(r.payload_str(), "Wand sold successfully");
        let listed = wands(&stub, &contract);
        assert_eq!(listed[0].quantity, 0);
        assert!(!listed[0].production_history[0].available);

        let before = stub.state().entries();
        let r = stub.invoke(&contract, "sellWand", &["elm-wand", "0"]);
        assert!(!r.is_ok());
        assert!(r.message.contains("already sold"), "{}", r.message);
        assert_eq!(stub.state().entries(), before);
    }

    #[test]
    fn failed_production_commits_nothing() {
        let contract = StudioContract::default();
        let stub = MockStub::for_org(PRIVILEGED);
        stub.invoke(&contract, "addMaterial", &["wood", "forest", "10"]);
        stub.invoke(&contract, "addMaterial", &["silver", "mine", "1"]);
        let before = stub.state().entries();

        let r = stub.invoke(
            &contract,
            "createWand",
            &["elm-wand", "wood", "forest", "3", "silver", "mine", "2"],
        );
        assert_eq!(r.status, response::ERROR);
        assert!(r.message.contains("insufficient stock"), "{}", r.message);
        assert_eq!(stub.state().entries(), before);
        assert!(wands(&stub, &contract).is_empty());
    }

    #[test]
    fn repeated_productions_accumulate() {
        let contract = StudioContract::default();
        let stub = MockStub::for_org(PRIVILEGED);
        stub.invoke(&contract, "addMaterial", &["wood", "forest", "100"]);
        for _ in 0..4 {
            let r = stub.invoke(&contract, "createWand", &["oak", "wood", "forest", "5"]);
            assert!(r.is_ok(), "{}", r.message);
        }
        let oak = &wands(&stub, &contract)[0];
        assert_eq!(oak.quantity, 4);
        assert_eq!(oak.production_history.len(), 4);
        assert!(oak.production_history.iter().all(|p| p.available));
        assert_eq!(stock(&stub, &contract, "wood"), 80);
    }

    // -----------------------------------------------------------------------
    // Authorization
    // -----------------------------------------------------------------------

    #[test]
    fn non_privileged_org_is_rejected() {
        let contract = StudioContract::default();
        let mut stub = MockStub::for_org(PRIVILEGED);
        stub.invoke(&contract, "addMaterial", &["wood", "forest", "10"]);
        stub.invoke(&contract, "createWand", &["elm-wand", "wood", "forest", "3"]);

        stub.set_org(OTHER);
        let before = stub.state().entries();
        for (function, args) in [
            ("createWand", &["elm-wand", "wood", "forest", "1"][..]),
            ("sellWand", &["elm-wand", "0"][..]),
        ] {
            let r = stub.invoke(&contract, function, args);
            assert!(!r.is_ok());
            assert!(r.message.contains(OTHER), "{}", r.message);
        }
        assert_eq!(stub.state().entries(), before);

        // Replenishment and listings stay open.
        assert!(stub.invoke(&contract, "addMaterial", &["wood", "forest", "1"]).is_ok());
        assert_eq!(wands(&stub, &contract).len(), 1);
    }

    #[test]
    fn empty_msp_id_is_unauthorized() {
        let contract = StudioContract::default();
        let store = studio_store::InMemoryStateStore::new();
        let creator = studio_identity::StaticCreator::for_org("");
        for (function, args) in [
            ("createWand", &["elm", "wood", "forest", "1"][..]),
            ("sellWand", &["elm", "0"][..]),
        ] {
            let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
            let err = contract
                .try_invoke(&store, &creator, function, &args)
                .unwrap_err();
            assert_eq!(err.code(), "Unauthorized", "{function}: {err}");
        }
        assert!(store.is_empty());
    }

    #[test]
    fn privileged_org_is_configurable() {
        let config = ContractConfig {
            gate: GateConfig::with_privileged_org(OTHER),
            key_scheme: KeyScheme::Delimited,
        };
        let contract = StudioContract::new(config);
        let stub = MockStub::for_org(OTHER);
        stub.invoke(&contract, "addMaterial", &["wood", "forest", "10"]);
        let r = stub.invoke(&contract, "createWand", &["elm-wand", "wood", "forest", "3"]);
        assert!(r.is_ok(), "{}", r.message);
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    #[test]
    fn unknown_operation() {
        let contract = StudioContract::default();
        let stub = MockStub::for_org(PRIVILEGED);
        let r = stub.invoke::<&str>(&contract, "burnWand", &[]);
        assert_eq!(r.status, response::ERROR);
        assert_eq!(r.message, "unknown operation: burnWand");
    }

    #[test]
    fn try_invoke_exposes_error_code() {
        let contract = StudioContract::default();
        let store = studio_store::InMemoryStateStore::new();
        let creator = studio_identity::StaticCreator::for_org(PRIVILEGED);
        let err = contract
            .try_invoke(&store, &creator, "sellWand", &["ghost".into(), "0".into()])
            .unwrap_err();
        assert_eq!(err.code(), "NotFound");
        let err = contract
            .try_invoke(&store, &creator, "addMaterial", &["wood".into()])
            .unwrap_err();
        assert_eq!(err.code(), "InvalidArgument");
    }

    #[test]
    fn listings_on_empty_ledger() {
        let contract = StudioContract::default();
        let stub = MockStub::for_org(OTHER);
        let r = stub.invoke::<&str>(&contract, "listMaterials", &[]);
        assert_eq!(r.payload_str(), "[]");
        let r = stub.invoke::<&str>(&contract, "listWands", &[]);
        assert_eq!(r.payload_str(), "[]");
    }

    #[test]
    fn listings_ignore_arguments() {
        let contract = StudioContract::default();
        let stub = MockStub::for_org(PRIVILEGED);
        stub.invoke(&contract, "addMaterial", &["wood", "forest", "1"]);
        let r = stub.invoke(&contract, "listMaterials", &["all", "please"]);
        assert!(r.is_ok(), "{}", r.message);
        let listed: Vec<Material> = serde_json::from_slice(&r.payload).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(stub.invoke(&contract, "listWands", &["all"]).payload_str(), "[]");
    }

    #[test]
    fn malformed_creator_fails_privileged_calls() {
        let contract = StudioContract::default();
        let mut stub = MockStub::for_org(PRIVILEGED);
        stub.set_creator(studio_identity::StaticCreator::new(vec![0xff, 0xff]));
        let r = stub.invoke(&contract, "sellWand", &["elm-wand", "0"]);
        assert!(!r.is_ok());
        // Identity is only needed for privileged operations.
        assert!(stub.invoke(&contract, "addMaterial", &["wood", "forest", "1"]).is_ok());
    }

    #[test]
    fn concatenated_scheme_writes_legacy_keys() {
        let config = ContractConfig {
            key_scheme: KeyScheme::Concatenated,
            ..ContractConfig::default()
        };
        let contract = StudioContract::new(config);
        let stub = MockStub::for_org(PRIVILEGED);
        stub.invoke(&contract, "addMaterial", &["wood", "forest", "2"]);
        let keys: Vec<_> = stub.state().entries().into_iter().map(|kv| kv.key).collect();
        assert_eq!(keys, vec!["woodforest".to_string()]);
    }
}
