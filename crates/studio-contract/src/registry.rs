use std::collections::BTreeMap;

use crate::operation::{AddMaterial, CreateWand, ListMaterials, ListWands, Operation, SellWand};

/// Name-indexed set of operations.
#[derive(Default)]
pub struct OperationRegistry {
    operations: BTreeMap<String, Box<dyn Operation>>,
}

impl OperationRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the five ledger operations.
    pub fn with_default_operations() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(AddMaterial));
        registry.register(Box::new(ListMaterials));
        registry.register(Box::new(CreateWand));
        registry.register(Box::new(SellWand));
        registry.register(Box::new(ListWands));
        registry
    }

    /// Add `operation`, replacing any operation registered under its name.
    pub fn register(&mut self, operation: Box<dyn Operation>) {
        self.operations.insert(operation.name().to_string(), operation);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Operation> {
        self.operations.get(name).map(|op| op.as_ref())
    }

    /// Registered operation names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.operations.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
