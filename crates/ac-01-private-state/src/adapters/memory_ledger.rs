//! # In-Memory Ledger
//!
//! Single-process stand-in for the host ledger API.
//!
//! Behaves like the host where chaincode can observe it:
//!
//! - Public state and each private collection are separate keyspaces.
//! - Native history is kept for public keys only; history queries never see
//!   private writes.
//! - Writes require an active transaction.
//! - Range queries skip composite keys; composite-key queries match by prefix.
//! - Rich queries accept `{"selector": {field: value, ...}}` with top-level
//!   equality matching against JSON values.
//!
//! There is no commit step: writes land immediately. Tests can inject write
//! failures per key to exercise error paths.

use crate::domain::HistoryIterator;
use crate::ports::outbound::{PrivateDataStore, StateStore, TxContext};
use serde_json::Value;
use shared_types::{
    create_composite_key, is_composite_key, BufferedStateIterator, HistoryIter, KeyModification,
    KeyValue, LedgerError, QueryResponseMetadata, StateIter, TxTimestamp,
};
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

/// Transaction the ledger is currently executing.
#[derive(Debug, Clone)]
struct ActiveTransaction {
    tx_id: String,
    timestamp: TxTimestamp,
}

/// One keyspace: public state or a single private collection.
#[derive(Debug, Default, Clone)]
struct Keyspace {
    values: BTreeMap<String, Vec<u8>>,
    validation_parameters: HashMap<String, Vec<u8>>,
}

impl Keyspace {
    fn range(&self, start_key: &str, end_key: &str) -> Vec<KeyValue> {
        if !start_key.is_empty() && !end_key.is_empty() && start_key >= end_key {
            return Vec::new();
        }

        let lower = if start_key.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start_key)
        };
        let upper = if end_key.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end_key)
        };

        self.values
            .range::<str, _>((lower, upper))
            .filter(|(key, _)| !is_composite_key(key))
            .map(|(key, value)| KeyValue::new(key.clone(), value.clone()))
            .collect()
    }

    fn by_prefix(&self, prefix: &str) -> Vec<KeyValue> {
        self.values
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| KeyValue::new(key.clone(), value.clone()))
            .collect()
    }

    fn query(&self, query: &str) -> Result<Vec<KeyValue>, LedgerError> {
        let selector = parse_selector(query)?;

        Ok(self
            .values
            .iter()
            .filter(|(_, value)| matches_selector(&selector, value))
            .map(|(key, value)| KeyValue::new(key.clone(), value.clone()))
            .collect())
    }
}

fn parse_selector(query: &str) -> Result<serde_json::Map<String, Value>, LedgerError> {
    let parsed: Value = serde_json::from_str(query)
        .map_err(|e| LedgerError::InvalidArgument(format!("rich query is not JSON: {}", e)))?;

    match parsed.get("selector") {
        Some(Value::Object(selector)) => Ok(selector.clone()),
        _ => Err(LedgerError::InvalidArgument(
            "rich query must contain a \"selector\" object".into(),
        )),
    }
}

fn matches_selector(selector: &serde_json::Map<String, Value>, value: &[u8]) -> bool {
    let Ok(Value::Object(document)) = serde_json::from_slice::<Value>(value) else {
        return false;
    };
    selector
        .iter()
        .all(|(field, expected)| document.get(field) == Some(expected))
}

/// Cut one page out of `rows` (sorted by key), resuming after `bookmark`.
fn paginate(
    rows: Vec<KeyValue>,
    page_size: i32,
    bookmark: &str,
) -> Result<(StateIter, QueryResponseMetadata), LedgerError> {
    if page_size <= 0 {
        return Err(LedgerError::InvalidArgument(format!(
            "page size must be positive, got {}",
            page_size
        )));
    }

    let mut remaining = rows
        .into_iter()
        .filter(|row| bookmark.is_empty() || row.key.as_str() > bookmark)
        .peekable();

    let page: Vec<KeyValue> = remaining.by_ref().take(page_size as usize).collect();
    let next_bookmark = match (remaining.peek(), page.last()) {
        (Some(_), Some(last)) => last.key.clone(),
        _ => String::new(),
    };

    let metadata = QueryResponseMetadata {
        fetched_records_count: page.len() as i32,
        bookmark: next_bookmark,
    };
    Ok((BufferedStateIterator::boxed(page), metadata))
}

/// In-memory ledger implementing the whole chaincode stub API.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    public: Keyspace,
    collections: HashMap<String, Keyspace>,
    /// Native public history, oldest first.
    public_history: HashMap<String, Vec<KeyModification>>,
    transaction: Option<ActiveTransaction>,
    last_timestamp: TxTimestamp,
    write_faults: Vec<String>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start executing a transaction with a known id and timestamp.
    pub fn begin_transaction(&mut self, tx_id: impl Into<String>, timestamp: TxTimestamp) {
        if timestamp > self.last_timestamp {
            self.last_timestamp = timestamp;
        }
        self.transaction = Some(ActiveTransaction {
            tx_id: tx_id.into(),
            timestamp,
        });
    }

    /// Start a transaction with a fresh id and the next timestamp.
    ///
    /// Returns the transaction id.
    pub fn next_transaction(&mut self) -> String {
        let tx_id = uuid::Uuid::new_v4().to_string();
        let timestamp = self.last_timestamp.next();
        self.begin_transaction(tx_id.clone(), timestamp);
        tx_id
    }

    pub fn end_transaction(&mut self) {
        self.transaction = None;
    }

    pub fn in_transaction(&self) -> bool {
        self.transaction.is_some()
    }

    /// Make every put or delete on a key containing `pattern` fail.
    pub fn fail_writes_matching(&mut self, pattern: impl Into<String>) {
        self.write_faults.push(pattern.into());
    }

    pub fn clear_faults(&mut self) {
        self.write_faults.clear();
    }

    /// Keys stored in `collection`, in order.
    pub fn private_keys(&self, collection: &str) -> Vec<String> {
        self.collections
            .get(collection)
            .map(|space| space.values.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Keys stored in public state, in order.
    pub fn public_keys(&self) -> Vec<String> {
        self.public.values.keys().cloned().collect()
    }

    fn active(&self) -> Result<&ActiveTransaction, LedgerError> {
        self.transaction
            .as_ref()
            .ok_or_else(|| LedgerError::Context("no transaction is executing".into()))
    }

    fn check_write(&self, key: &str) -> Result<&ActiveTransaction, LedgerError> {
        if key.is_empty() {
            return Err(LedgerError::InvalidArgument("key must not be empty".into()));
        }
        if let Some(pattern) = self.write_faults.iter().find(|p| key.contains(p.as_str())) {
            return Err(LedgerError::transport(format!(
                "injected write failure for key {} (pattern {})",
                key, pattern
            )));
        }
        self.active()
    }

    fn collection(&self, collection: &str) -> Option<&Keyspace> {
        self.collections.get(collection)
    }

    fn collection_mut(&mut self, collection: &str) -> Result<&mut Keyspace, LedgerError> {
        if collection.is_empty() {
            return Err(LedgerError::InvalidArgument(
                "collection name must not be empty".into(),
            ));
        }
        Ok(self.collections.entry(collection.to_string()).or_default())
    }

    fn record_public(&mut self, key: &str, modification: KeyModification) {
        self.public_history
            .entry(key.to_string())
            .or_default()
            .push(modification);
    }
}

impl TxContext for MemoryLedger {
    fn tx_id(&self) -> Result<String, LedgerError> {
        Ok(self.active()?.tx_id.clone())
    }

    fn tx_timestamp(&self) -> Result<TxTimestamp, LedgerError> {
        Ok(self.active()?.timestamp)
    }
}

impl StateStore for MemoryLedger {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.public.values.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        let tx = self.check_write(key)?.clone();
        self.public.values.insert(key.to_string(), value.to_vec());
        self.record_public(key, KeyModification::write(tx.tx_id, value.to_vec(), tx.timestamp));
        Ok(())
    }

    fn del_state(&mut self, key: &str) -> Result<(), LedgerError> {
        let tx = self.check_write(key)?.clone();
        self.public.values.remove(key);
        self.record_public(key, KeyModification::delete(tx.tx_id, Vec::new(), tx.timestamp));
        Ok(())
    }

    fn set_state_validation_parameter(&mut self, key: &str, ep: &[u8]) -> Result<(), LedgerError> {
        self.check_write(key)?;
        self.public
            .validation_parameters
            .insert(key.to_string(), ep.to_vec());
        Ok(())
    }

    fn get_state_validation_parameter(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.public.validation_parameters.get(key).cloned())
    }

    fn get_state_by_range(&self, start_key: &str, end_key: &str) -> Result<StateIter, LedgerError> {
        Ok(BufferedStateIterator::boxed(self.public.range(start_key, end_key)))
    }

    fn get_state_by_range_with_pagination(
        &self,
        start_key: &str,
        end_key: &str,
        page_size: i32,
        bookmark: &str,
    ) -> Result<(StateIter, QueryResponseMetadata), LedgerError> {
        paginate(self.public.range(start_key, end_key), page_size, bookmark)
    }

    fn get_state_by_partial_composite_key(
        &self,
        object_type: &str,
        attributes: &[&str],
    ) -> Result<StateIter, LedgerError> {
        let prefix = create_composite_key(object_type, attributes)?;
        Ok(BufferedStateIterator::boxed(self.public.by_prefix(&prefix)))
    }

    fn get_state_by_partial_composite_key_with_pagination(
        &self,
        object_type: &str,
        attributes: &[&str],
        page_size: i32,
        bookmark: &str,
    ) -> Result<(StateIter, QueryResponseMetadata), LedgerError> {
        let prefix = create_composite_key(object_type, attributes)?;
        paginate(self.public.by_prefix(&prefix), page_size, bookmark)
    }

    fn get_query_result(&self, query: &str) -> Result<StateIter, LedgerError> {
        Ok(BufferedStateIterator::boxed(self.public.query(query)?))
    }

    fn get_query_result_with_pagination(
        &self,
        query: &str,
        page_size: i32,
        bookmark: &str,
    ) -> Result<(StateIter, QueryResponseMetadata), LedgerError> {
        paginate(self.public.query(query)?, page_size, bookmark)
    }

    fn get_history_for_key(&self, key: &str) -> Result<HistoryIter, LedgerError> {
        let records = self
            .public_history
            .get(key)
            .map(|records| records.iter().rev().cloned().collect())
            .unwrap_or_default();
        Ok(HistoryIterator::boxed(records))
    }
}

impl PrivateDataStore for MemoryLedger {
    fn get_private_data(&self, collection: &str, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self
            .collection(collection)
            .and_then(|space| space.values.get(key).cloned()))
    }

    fn put_private_data(&mut self, collection: &str, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        self.check_write(key)?;
        self.collection_mut(collection)?
            .values
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn del_private_data(&mut self, collection: &str, key: &str) -> Result<(), LedgerError> {
        self.check_write(key)?;
        self.collection_mut(collection)?.values.remove(key);
        Ok(())
    }

    fn set_private_data_validation_parameter(
        &mut self,
        collection: &str,
        key: &str,
        ep: &[u8],
    ) -> Result<(), LedgerError> {
        self.check_write(key)?;
        self.collection_mut(collection)?
            .validation_parameters
            .insert(key.to_string(), ep.to_vec());
        Ok(())
    }

    fn get_private_data_validation_parameter(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self
            .collection(collection)
            .and_then(|space| space.validation_parameters.get(key).cloned()))
    }

    fn get_private_data_by_range(
        &self,
        collection: &str,
        start_key: &str,
        end_key: &str,
    ) -> Result<StateIter, LedgerError> {
        let rows = self
            .collection(collection)
            .map(|space| space.range(start_key, end_key))
            .unwrap_or_default();
        Ok(BufferedStateIterator::boxed(rows))
    }

    fn get_private_data_by_partial_composite_key(
        &self,
        collection: &str,
        object_type: &str,
        attributes: &[&str],
    ) -> Result<StateIter, LedgerError> {
        let prefix = create_composite_key(object_type, attributes)?;
        let rows = self
            .collection(collection)
            .map(|space| space.by_prefix(&prefix))
            .unwrap_or_default();
        Ok(BufferedStateIterator::boxed(rows))
    }

    fn get_private_data_query_result(&self, collection: &str, query: &str) -> Result<StateIter, LedgerError> {
        let rows = match self.collection(collection) {
            Some(space) => space.query(query)?,
            None => {
                parse_selector(query)?;
                Vec::new()
            }
        };
        Ok(BufferedStateIterator::boxed(rows))
    }
}
