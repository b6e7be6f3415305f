//! # History Redirector
//!
//! Gives private keys a history even though the host keeps none for them.
//!
//! ## Write Ordering
//!
//! Every mutation of a tracked key first appends to the key's history and
//! only then performs the primary write. If the append fails the primary
//! write is never issued, so no state change goes unrecorded. Rolling back an
//! append whose primary write later fails is left to the host, which commits
//! or discards the invocation as a whole.
//!
//! ## Reserved Keys
//!
//! Keys the strategy reserves for its logs cannot be written or deleted
//! through the redirector; such writes fail with `InvalidArgument` before
//! anything is appended.

use crate::ports::outbound::{LedgerStub, PrivateDataStore, StateStore, TxContext};
use crate::ports::strategy::HistoryStrategy;
use shared_types::{HistoryIter, LedgerError, QueryResponseMetadata, StateIter, TxTimestamp};

/// Records history for `collection` through `strategy`, then delegates.
///
/// Expects `inner` to already serve state out of `collection`, i.e. a
/// `PartitionRedirector` for the same collection.
#[derive(Debug)]
pub struct HistoryRedirector<S, H> {
    inner: S,
    strategy: H,
    collection: String,
}

impl<S, H> HistoryRedirector<S, H> {
    pub fn new(collection: impl Into<String>, strategy: H, inner: S) -> Self {
        Self {
            inner,
            strategy,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn strategy(&self) -> &H {
        &self.strategy
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: LedgerStub, H: HistoryStrategy> HistoryRedirector<S, H> {
    fn record(&mut self, key: &str, value: &[u8], is_delete: bool) -> Result<(), LedgerError> {
        if self.strategy.is_reserved_key(key) {
            tracing::warn!(
                collection = %self.collection,
                key,
                is_delete,
                "[ac-01] write to history log key refused"
            );
            return Err(LedgerError::InvalidArgument(format!(
                "key {} is reserved for history logs in collection {}",
                key, self.collection
            )));
        }
        self.strategy
            .append(&mut self.inner, &self.collection, key, value, is_delete)
    }
}

impl<S: TxContext, H> TxContext for HistoryRedirector<S, H> {
    fn tx_id(&self) -> Result<String, LedgerError> {
        self.inner.tx_id()
    }

    fn tx_timestamp(&self) -> Result<TxTimestamp, LedgerError> {
        self.inner.tx_timestamp()
    }
}

impl<S: LedgerStub, H: HistoryStrategy> StateStore for HistoryRedirector<S, H> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        self.inner.get_state(key)
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        self.record(key, value, false)?;
        self.inner.put_state(key, value)
    }

    fn del_state(&mut self, key: &str) -> Result<(), LedgerError> {
        self.record(key, &[], true)?;
        self.inner.del_state(key)
    }

    fn set_state_validation_parameter(&mut self, key: &str, ep: &[u8]) -> Result<(), LedgerError> {
        self.inner.set_state_validation_parameter(key, ep)
    }

    fn get_state_validation_parameter(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        self.inner.get_state_validation_parameter(key)
    }

    fn get_state_by_range(&self, start_key: &str, end_key: &str) -> Result<StateIter, LedgerError> {
        self.inner.get_state_by_range(start_key, end_key)
    }

    fn get_state_by_range_with_pagination(
        &self,
        start_key: &str,
        end_key: &str,
        page_size: i32,
        bookmark: &str,
    ) -> Result<(StateIter, QueryResponseMetadata), LedgerError> {
        self.inner
            .get_state_by_range_with_pagination(start_key, end_key, page_size, bookmark)
    }

    fn get_state_by_partial_composite_key(
        &self,
        object_type: &str,
        attributes: &[&str],
    ) -> Result<StateIter, LedgerError> {
        self.inner
            .get_state_by_partial_composite_key(object_type, attributes)
    }

    fn get_state_by_partial_composite_key_with_pagination(
        &self,
        object_type: &str,
        attributes: &[&str],
        page_size: i32,
        bookmark: &str,
    ) -> Result<(StateIter, QueryResponseMetadata), LedgerError> {
        self.inner.get_state_by_partial_composite_key_with_pagination(
            object_type,
            attributes,
            page_size,
            bookmark,
        )
    }

    fn get_query_result(&self, query: &str) -> Result<StateIter, LedgerError> {
        self.inner.get_query_result(query)
    }

    fn get_query_result_with_pagination(
        &self,
        query: &str,
        page_size: i32,
        bookmark: &str,
    ) -> Result<(StateIter, QueryResponseMetadata), LedgerError> {
        self.inner
            .get_query_result_with_pagination(query, page_size, bookmark)
    }

    /// Reconstructed history instead of the (empty) native one.
    fn get_history_for_key(&self, key: &str) -> Result<HistoryIter, LedgerError> {
        self.strategy.iterator(&self.inner, &self.collection, key)
    }
}

impl<S: LedgerStub, H: HistoryStrategy> PrivateDataStore for HistoryRedirector<S, H> {
    fn get_private_data(&self, collection: &str, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        self.inner.get_private_data(collection, key)
    }

    fn put_private_data(&mut self, collection: &str, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        if collection == self.collection {
            self.record(key, value, false)?;
        }
        self.inner.put_private_data(collection, key, value)
    }

    fn del_private_data(&mut self, collection: &str, key: &str) -> Result<(), LedgerError> {
        if collection == self.collection {
            self.record(key, &[], true)?;
        }
        self.inner.del_private_data(collection, key)
    }

    fn set_private_data_validation_parameter(
        &mut self,
        collection: &str,
        key: &str,
        ep: &[u8],
    ) -> Result<(), LedgerError> {
        self.inner
            .set_private_data_validation_parameter(collection, key, ep)
    }

    fn get_private_data_validation_parameter(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>, LedgerError> {
        self.inner.get_private_data_validation_parameter(collection, key)
    }

    fn get_private_data_by_range(
        &self,
        collection: &str,
        start_key: &str,
        end_key: &str,
    ) -> Result<StateIter, LedgerError> {
        self.inner
            .get_private_data_by_range(collection, start_key, end_key)
    }

    fn get_private_data_by_partial_composite_key(
        &self,
        collection: &str,
        object_type: &str,
        attributes: &[&str],
    ) -> Result<StateIter, LedgerError> {
        self.inner
            .get_private_data_by_partial_composite_key(collection, object_type, attributes)
    }

    fn get_private_data_query_result(&self, collection: &str, query: &str) -> Result<StateIter, LedgerError> {
        self.inner.get_private_data_query_result(collection, query)
    }
}
