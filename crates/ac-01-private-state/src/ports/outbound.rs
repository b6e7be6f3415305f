//! # Outbound Ports (Driven Ports)
//!
//! The host ledger API as seen from chaincode, split by concern so that a
//! decorator only has to restate the concern it changes.
//!
//! - `TxContext` - identity and time of the running transaction
//! - `StateStore` - keyed state operations (public state on the host)
//! - `PrivateDataStore` - the same operations addressed to a named collection
//! - `LedgerStub` - everything at once; blanket-implemented
//!
//! Production: the peer's chaincode stub.
//! Testing: `MemoryLedger` (adapters/memory_ledger.rs)

use shared_types::{HistoryIter, LedgerError, QueryResponseMetadata, StateIter, TxTimestamp};

/// Identity and logical time of the transaction being executed.
pub trait TxContext {
    /// Id of the current transaction.
    ///
    /// Fails with `LedgerError::Context` outside a transaction.
    fn tx_id(&self) -> Result<String, LedgerError>;

    /// Proposal timestamp of the current transaction.
    ///
    /// Fails with `LedgerError::Context` outside a transaction.
    fn tx_timestamp(&self) -> Result<TxTimestamp, LedgerError>;
}

/// Keyed state operations.
///
/// Range bounds follow the host: `start_key` inclusive, `end_key` exclusive,
/// an empty bound is open.
pub trait StateStore {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), LedgerError>;

    fn del_state(&mut self, key: &str) -> Result<(), LedgerError>;

    fn set_state_validation_parameter(&mut self, key: &str, ep: &[u8]) -> Result<(), LedgerError>;

    fn get_state_validation_parameter(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    fn get_state_by_range(&self, start_key: &str, end_key: &str) -> Result<StateIter, LedgerError>;

    fn get_state_by_range_with_pagination(
        &self,
        start_key: &str,
        end_key: &str,
        page_size: i32,
        bookmark: &str,
    ) -> Result<(StateIter, QueryResponseMetadata), LedgerError>;

    fn get_state_by_partial_composite_key(
        &self,
        object_type: &str,
        attributes: &[&str],
    ) -> Result<StateIter, LedgerError>;

    fn get_state_by_partial_composite_key_with_pagination(
        &self,
        object_type: &str,
        attributes: &[&str],
        page_size: i32,
        bookmark: &str,
    ) -> Result<(StateIter, QueryResponseMetadata), LedgerError>;

    /// Rich (JSON selector) query.
    fn get_query_result(&self, query: &str) -> Result<StateIter, LedgerError>;

    fn get_query_result_with_pagination(
        &self,
        query: &str,
        page_size: i32,
        bookmark: &str,
    ) -> Result<(StateIter, QueryResponseMetadata), LedgerError>;

    /// Modification history of `key`, most-recent-first.
    ///
    /// The host only tracks history for public state.
    fn get_history_for_key(&self, key: &str) -> Result<HistoryIter, LedgerError>;
}

/// Keyed operations against a named private data collection.
///
/// The host offers no paginated or history variants here.
pub trait PrivateDataStore {
    fn get_private_data(&self, collection: &str, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    fn put_private_data(&mut self, collection: &str, key: &str, value: &[u8]) -> Result<(), LedgerError>;

    fn del_private_data(&mut self, collection: &str, key: &str) -> Result<(), LedgerError>;

    fn set_private_data_validation_parameter(
        &mut self,
        collection: &str,
        key: &str,
        ep: &[u8],
    ) -> Result<(), LedgerError>;

    fn get_private_data_validation_parameter(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>, LedgerError>;

    fn get_private_data_by_range(
        &self,
        collection: &str,
        start_key: &str,
        end_key: &str,
    ) -> Result<StateIter, LedgerError>;

    fn get_private_data_by_partial_composite_key(
        &self,
        collection: &str,
        object_type: &str,
        attributes: &[&str],
    ) -> Result<StateIter, LedgerError>;

    fn get_private_data_query_result(&self, collection: &str, query: &str) -> Result<StateIter, LedgerError>;
}

/// The complete chaincode-facing ledger API.
///
/// Decorators implement the three component traits and get this for free,
/// so any stack of them can stand wherever the host stub is expected.
pub trait LedgerStub: TxContext + StateStore + PrivateDataStore {}

impl<T: ?Sized> LedgerStub for T where T: TxContext + StateStore + PrivateDataStore {}
