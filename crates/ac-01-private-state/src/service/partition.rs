//! # Partition Redirector
//!
//! Serves the plain state API out of one private data collection, so code
//! written against `StateStore` never has to name the collection.
//!
//! The host has no paginated queries for private data. Asking for one here is
//! a programming error and panics instead of quietly returning a full,
//! unpaged result.

use crate::ports::outbound::{PrivateDataStore, StateStore, TxContext};
use shared_types::{HistoryIter, LedgerError, QueryResponseMetadata, StateIter, TxTimestamp};

/// Redirects every keyed state operation to `collection` on the inner store.
#[derive(Debug)]
pub struct PartitionRedirector<S> {
    inner: S,
    collection: String,
}

impl<S> PartitionRedirector<S> {
    pub fn new(collection: impl Into<String>, inner: S) -> Self {
        Self {
            inner,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
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

    fn unsupported(&self, operation: &'static str) -> ! {
        let err = LedgerError::UnsupportedOperation {
            operation,
            collection: self.collection.clone(),
        };
        tracing::error!(
            collection = %self.collection,
            operation,
            "[ac-01] paginated query requested against private collection"
        );
        panic!("{}", err);
    }
}

impl<S: TxContext> TxContext for PartitionRedirector<S> {
    fn tx_id(&self) -> Result<String, LedgerError> {
        self.inner.tx_id()
    }

    fn tx_timestamp(&self) -> Result<TxTimestamp, LedgerError> {
        self.inner.tx_timestamp()
    }
}

impl<S: StateStore + PrivateDataStore> StateStore for PartitionRedirector<S> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        self.inner.get_private_data(&self.collection, key)
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        self.inner.put_private_data(&self.collection, key, value)
    }

    fn del_state(&mut self, key: &str) -> Result<(), LedgerError> {
        self.inner.del_private_data(&self.collection, key)
    }

    fn set_state_validation_parameter(&mut self, key: &str, ep: &[u8]) -> Result<(), LedgerError> {
        self.inner
            .set_private_data_validation_parameter(&self.collection, key, ep)
    }

    fn get_state_validation_parameter(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        self.inner
            .get_private_data_validation_parameter(&self.collection, key)
    }

    fn get_state_by_range(&self, start_key: &str, end_key: &str) -> Result<StateIter, LedgerError> {
        self.inner
            .get_private_data_by_range(&self.collection, start_key, end_key)
    }

    fn get_state_by_range_with_pagination(
        &self,
        _start_key: &str,
        _end_key: &str,
        _page_size: i32,
        _bookmark: &str,
    ) -> Result<(StateIter, QueryResponseMetadata), LedgerError> {
        self.unsupported("get_state_by_range_with_pagination")
    }

    fn get_state_by_partial_composite_key(
        &self,
        object_type: &str,
        attributes: &[&str],
    ) -> Result<StateIter, LedgerError> {
        self.inner
            .get_private_data_by_partial_composite_key(&self.collection, object_type, attributes)
    }

    fn get_state_by_partial_composite_key_with_pagination(
        &self,
        _object_type: &str,
        _attributes: &[&str],
        _page_size: i32,
        _bookmark: &str,
    ) -> Result<(StateIter, QueryResponseMetadata), LedgerError> {
        self.unsupported("get_state_by_partial_composite_key_with_pagination")
    }

    fn get_query_result(&self, query: &str) -> Result<StateIter, LedgerError> {
        self.inner
            .get_private_data_query_result(&self.collection, query)
    }

    fn get_query_result_with_pagination(
        &self,
        _query: &str,
        _page_size: i32,
        _bookmark: &str,
    ) -> Result<(StateIter, QueryResponseMetadata), LedgerError> {
        self.unsupported("get_query_result_with_pagination")
    }

    /// Native history, untouched. Private keys have none on the host.
    fn get_history_for_key(&self, key: &str) -> Result<HistoryIter, LedgerError> {
        self.inner.get_history_for_key(key)
    }
}

impl<S: PrivateDataStore> PrivateDataStore for PartitionRedirector<S> {
    fn get_private_data(&self, collection: &str, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        self.inner.get_private_data(collection, key)
    }

    fn put_private_data(&mut self, collection: &str, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        self.inner.put_private_data(collection, key, value)
    }

    fn del_private_data(&mut self, collection: &str, key: &str) -> Result<(), LedgerError> {
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
