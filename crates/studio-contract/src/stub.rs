//! In-process stand-in for the host runtime.

use studio_identity::{CreatorSource, StaticCreator};
use studio_store::{InMemoryStateStore, StagedTransaction};

use crate::contract::StudioContract;
use crate::error::ContractError;
use crate::response::Response;

/// Hosts invocations against an in-memory ledger.
///
/// Every invocation runs in its own [`StagedTransaction`]. The write-set is
/// committed when the response is a success and discarded otherwise, so a
/// failed invocation never leaves partial writes behind.
pub struct MockStub {
    state: InMemoryStateStore,
    creator: Box<dyn CreatorSource>,
}

impl MockStub {
    pub fn new(state: InMemoryStateStore, creator: impl CreatorSource + 'static) -> Self {
        Self {
            state,
            creator: Box::new(creator),
        }
    }

    /// An empty ledger invoked by a member of `mspid`.
    pub fn for_org(mspid: &str) -> Self {
        Self::new(InMemoryStateStore::new(), StaticCreator::for_org(mspid))
    }

    /// Replace the creator used by subsequent invocations.
    pub fn set_creator(&mut self, creator: impl CreatorSource + 'static) {
        self.creator = Box::new(creator);
    }

    /// Invoke as a member of `mspid` from now on.
    pub fn set_org(&mut self, mspid: &str) {
        self.set_creator(StaticCreator::for_org(mspid));
    }

    /// The committed ledger state.
    pub fn state(&self) -> &InMemoryStateStore {
        &self.state
    }

    pub fn into_state(self) -> InMemoryStateStore {
        self.state
    }

    /// Run one invocation in its own transaction.
    pub fn invoke<S: AsRef<str>>(
        &self,
        contract: &StudioContract,
        function: &str,
        args: &[S],
    ) -> Response {
        let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();
        let tx = StagedTransaction::begin(&self.state);
        let response = contract.invoke(&tx, self.creator.as_ref(), function, &args);
        if !response.is_ok() {
            tx.discard();
            return response;
        }
        match tx.commit() {
            Ok(count) => {
                tracing::debug!(function, keys = count, "transaction committed");
                response
            }
            Err(e) => Response::error(ContractError::Commit(e.to_string()).to_string()),
        }
    }
}
