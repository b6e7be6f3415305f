//! # Append-Log History Strategy
//!
//! Keeps each private key's history as one JSON log stored next to the key
//! in the same collection, under `prefix + key + suffix`.
//!
//! ## Algorithm
//!
//! - Append: read log, prepend a record for the current transaction, write
//!   the whole log back. Cost is linear in the log length.
//! - Delete records carry the most recent non-empty value from the log, the
//!   way the host's native history keeps the last value on a delete.
//! - Replay: decode the log and hand its records out in stored order, which
//!   is already most-recent-first.
//!
//! Logs are never compacted or removed.

use crate::domain::{HistoryEntry, HistoryIterator, HistoryKeyScheme, HistoryLog, PrivateStateConfig};
use crate::ports::outbound::{PrivateDataStore, TxContext};
use crate::ports::strategy::HistoryStrategy;
use shared_types::{HistoryIter, LedgerError, TxTimestamp};

/// History strategy storing a prepend-only log per key.
#[derive(Debug, Clone, Default)]
pub struct AppendLogStrategy {
    keys: HistoryKeyScheme,
}

impl AppendLogStrategy {
    pub fn new(key_prefix: impl Into<String>, key_suffix: impl Into<String>) -> Self {
        Self {
            keys: HistoryKeyScheme::new(key_prefix, key_suffix),
        }
    }

    pub fn from_config(config: &PrivateStateConfig) -> Self {
        let keys = config.history_keys();
        if keys.is_degenerate() {
            tracing::warn!(
                collection = %config.collection,
                "[ac-01] empty history key prefix and suffix; every write will be refused"
            );
        }
        Self { keys }
    }

    /// Key the history of `key` is stored under.
    pub fn history_key(&self, key: &str) -> String {
        self.keys.derive(key)
    }

    fn load<S>(&self, store: &S, collection: &str, log_key: &str) -> Result<HistoryLog, LedgerError>
    where
        S: PrivateDataStore + ?Sized,
    {
        let bytes = store.get_private_data(collection, log_key)?;
        HistoryLog::decode(bytes.as_deref()).map_err(|e| {
            tracing::warn!(
                collection,
                log_key,
                error = %e,
                "[ac-01] history log failed to decode"
            );
            e.at(log_key)
        })
    }
}

/// Id and timestamp of the running transaction; both are required.
fn current_tx<S>(store: &S) -> Result<(String, TxTimestamp), LedgerError>
where
    S: TxContext + ?Sized,
{
    let context = store.tx_id().and_then(|tx_id| {
        if tx_id.is_empty() {
            return Err(LedgerError::Context("transaction id is empty".into()));
        }
        Ok((tx_id, store.tx_timestamp()?))
    });

    if let Err(e) = &context {
        tracing::warn!(error = %e, "[ac-01] no transaction context for history append");
    }
    context
}

impl HistoryStrategy for AppendLogStrategy {
    fn append<S>(
        &self,
        store: &mut S,
        collection: &str,
        key: &str,
        value: &[u8],
        is_delete: bool,
    ) -> Result<(), LedgerError>
    where
        S: TxContext + PrivateDataStore + ?Sized,
    {
        let (tx_id, timestamp) = current_tx(store)?;

        let log_key = self.history_key(key);
        let mut log = self.load(store, collection, &log_key)?;

        let entry = if is_delete {
            let last_value = log.last_known_value().map(<[u8]>::to_vec).unwrap_or_default();
            HistoryEntry::deletion(tx_id, timestamp, last_value)
        } else {
            HistoryEntry::write(tx_id, timestamp, value.to_vec())
        };
        log.prepend(entry);

        let bytes = log.encode().map_err(|e| e.at(&log_key))?;
        store.put_private_data(collection, &log_key, &bytes)?;

        tracing::debug!(
            collection,
            key,
            is_delete,
            entries = log.len(),
            "[ac-01] history appended"
        );
        Ok(())
    }

    fn iterator<S>(&self, store: &S, collection: &str, key: &str) -> Result<HistoryIter, LedgerError>
    where
        S: PrivateDataStore + ?Sized,
    {
        let log_key = self.history_key(key);
        let log = self.load(store, collection, &log_key)?;

        tracing::debug!(collection, key, entries = log.len(), "[ac-01] history replayed");
        Ok(HistoryIterator::boxed(log.into_modifications()))
    }

    fn is_reserved_key(&self, key: &str) -> bool {
        self.keys.is_history_key(key)
    }
}
