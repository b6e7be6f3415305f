//! # Ledger Entities
//!
//! Shapes the host ledger returns to chaincode.
//!
//! ## Clusters
//!
//! - **Transaction context**: `TxTimestamp`
//! - **Query results**: `KeyValue`, `QueryResponseMetadata`
//! - **History**: `KeyModification`

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// TRANSACTION CONTEXT
// =============================================================================

/// Logical time assigned to a transaction by its proposer.
///
/// Ordered by `(seconds, nanos)`, which is the order the ledger applies
/// transactions in for a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct TxTimestamp {
    /// Whole seconds since the Unix epoch.
    pub seconds: i64,
    /// Sub-second part, `0..1_000_000_000`.
    pub nanos: i32,
}

impl TxTimestamp {
    pub const fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }

    /// Timestamp one nanosecond later, carrying into seconds.
    pub fn next(self) -> Self {
        if self.nanos >= 999_999_999 {
            Self::new(self.seconds + 1, 0)
        } else {
            Self::new(self.seconds, self.nanos + 1)
        }
    }
}

impl fmt::Display for TxTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.seconds, self.nanos)
    }
}

// =============================================================================
// QUERY RESULTS
// =============================================================================

/// One row of a range, composite-key or rich query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Paging information returned alongside a paginated query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryResponseMetadata {
    /// Rows returned in this page.
    pub fetched_records_count: i32,
    /// Opaque cursor to pass back for the next page. Empty when exhausted.
    pub bookmark: String,
}

// =============================================================================
// HISTORY
// =============================================================================

/// A single modification of a key, as reported by a history query.
///
/// History queries emit these most-recent-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyModification {
    /// Transaction that performed the modification.
    pub tx_id: String,
    /// Value written, or for deletes the value the key held before.
    pub value: Vec<u8>,
    /// Transaction timestamp. `None` when the ledger did not record one.
    pub timestamp: Option<TxTimestamp>,
    /// Whether the modification removed the key.
    pub is_delete: bool,
}

impl KeyModification {
    pub fn write(tx_id: impl Into<String>, value: impl Into<Vec<u8>>, timestamp: TxTimestamp) -> Self {
        Self {
            tx_id: tx_id.into(),
            value: value.into(),
            timestamp: Some(timestamp),
            is_delete: false,
        }
    }

    pub fn delete(tx_id: impl Into<String>, value: impl Into<Vec<u8>>, timestamp: TxTimestamp) -> Self {
        Self {
            tx_id: tx_id.into(),
            value: value.into(),
            timestamp: Some(timestamp),
            is_delete: true,
        }
    }
}
