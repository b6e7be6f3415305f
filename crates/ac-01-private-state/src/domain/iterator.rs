//! # History Iterator
//!
//! Cursor over reconstructed history, handed out where the host would hand
//! out its native history cursor.

use shared_types::{HistoryIter, HistoryQueryIterator, KeyModification, LedgerError};
use std::vec;

/// Cursor over modification records, most-recent-first.
///
/// Owns its records, so it stays valid after the store that produced it is
/// written to again.
#[derive(Debug)]
pub struct HistoryIterator {
    records: vec::IntoIter<KeyModification>,
}

impl HistoryIterator {
    /// `records` must already be ordered most-recent-first.
    pub fn new(records: Vec<KeyModification>) -> Self {
        Self {
            records: records.into_iter(),
        }
    }

    pub fn boxed(records: Vec<KeyModification>) -> HistoryIter {
        Box::new(Self::new(records))
    }
}

impl Iterator for HistoryIterator {
    type Item = Result<KeyModification, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next().map(Ok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl HistoryQueryIterator for HistoryIterator {
    fn close(&mut self) -> Result<(), LedgerError> {
        self.records = Vec::new().into_iter();
        Ok(())
    }
}
