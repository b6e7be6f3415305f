//! # History Strategy Port
//!
//! Policy for recording and replaying key history inside a private
//! collection, where the host keeps none.

use super::outbound::{PrivateDataStore, TxContext};
use shared_types::{HistoryIter, LedgerError};

/// Records and replays the modification history of private keys.
///
/// Injected into `HistoryRedirector` at construction. Implementations must
/// keep their bookkeeping inside `collection` and must replay records
/// most-recent-first, the order the host uses for public history.
pub trait HistoryStrategy {
    /// Record a modification of `key` made by the current transaction.
    ///
    /// Must succeed before the caller performs the primary write; an error
    /// here means the write must not happen.
    fn append<S>(
        &self,
        store: &mut S,
        collection: &str,
        key: &str,
        value: &[u8],
        is_delete: bool,
    ) -> Result<(), LedgerError>
    where
        S: TxContext + PrivateDataStore + ?Sized;

    /// Replay the recorded history of `key`, most-recent-first.
    ///
    /// A key with no recorded history yields an empty cursor.
    fn iterator<S>(&self, store: &S, collection: &str, key: &str) -> Result<HistoryIter, LedgerError>
    where
        S: PrivateDataStore + ?Sized;

    /// Whether `key` is reserved for this strategy's own bookkeeping.
    ///
    /// Callers must refuse primary writes to reserved keys.
    fn is_reserved_key(&self, _key: &str) -> bool {
        false
    }
}
