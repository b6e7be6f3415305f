//! # Stub Wiring
//!
//! Builds the decorator stacks chaincode handlers work against.
//!
//! ```text
//! HistoryRedirector ──put/del──→ AppendLogStrategy ──log──→ ┐
//!        │                                                  │
//!        └──────→ PartitionRedirector ──private data──→ LedgerStub
//! ```

use super::append_log::AppendLogStrategy;
use super::history::HistoryRedirector;
use super::partition::PartitionRedirector;
use crate::domain::PrivateStateConfig;
use crate::ports::outbound::{LedgerStub, StateStore};
use shared_types::{KeyModification, LedgerError};

/// Private collection stack with emulated history.
pub type PrivateHistoryStub<S> = HistoryRedirector<PartitionRedirector<S>, AppendLogStrategy>;

/// Serve state from the configured private collection, without history.
pub fn wrap_private<S: LedgerStub>(stub: S, config: &PrivateStateConfig) -> PartitionRedirector<S> {
    PartitionRedirector::new(config.collection.clone(), stub)
}

/// Serve state from the configured private collection, recording history.
///
/// The partition redirector sits inside the history redirector so that the
/// history logic already sees collection-scoped writes.
pub fn wrap_private_with_history<S: LedgerStub>(stub: S, config: &PrivateStateConfig) -> PrivateHistoryStub<S> {
    tracing::debug!(
        collection = %config.collection,
        prefix = %config.history_key_prefix,
        suffix = %config.history_key_suffix,
        "[ac-01] wrapping stub with private history"
    );

    HistoryRedirector::new(
        config.collection.clone(),
        AppendLogStrategy::from_config(config),
        wrap_private(stub, config),
    )
}

/// Drain the history of `key` into a vector, most-recent-first.
pub fn read_history<S>(store: &S, key: &str) -> Result<Vec<KeyModification>, LedgerError>
where
    S: StateStore + ?Sized,
{
    let mut iterator = store.get_history_for_key(key)?;
    let records = iterator.by_ref().collect::<Result<Vec<_>, _>>();
    iterator.close()?;
    records
}
