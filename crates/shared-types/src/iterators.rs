//! # Query Iterators
//!
//! Result cursors handed out by ledger queries.
//!
//! Both cursor kinds are plain `Iterator`s over `Result<_, LedgerError>`, so
//! callers can use `collect::<Result<Vec<_>, _>>()` and friends. `close()`
//! releases host-side resources; in-process cursors have nothing to release.

use crate::entities::{KeyModification, KeyValue};
use crate::errors::LedgerError;
use std::collections::VecDeque;

/// Cursor over range, composite-key and rich query rows.
pub trait StateQueryIterator: Iterator<Item = Result<KeyValue, LedgerError>> {
    fn close(&mut self) -> Result<(), LedgerError> {
        Ok(())
    }
}

/// Cursor over the modification history of one key, most-recent-first.
pub trait HistoryQueryIterator: Iterator<Item = Result<KeyModification, LedgerError>> {
    fn close(&mut self) -> Result<(), LedgerError> {
        Ok(())
    }
}

/// Boxed state cursor returned by `StateStore` queries.
pub type StateIter = Box<dyn StateQueryIterator>;

/// Boxed history cursor returned by `get_history_for_key`.
pub type HistoryIter = Box<dyn HistoryQueryIterator>;

/// In-process cursor over query rows that were materialized up front.
#[derive(Debug, Default)]
pub struct BufferedStateIterator {
    rows: VecDeque<KeyValue>,
    closed: bool,
}

impl BufferedStateIterator {
    pub fn new(rows: impl IntoIterator<Item = KeyValue>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
            closed: false,
        }
    }

    pub fn boxed(rows: impl IntoIterator<Item = KeyValue>) -> StateIter {
        Box::new(Self::new(rows))
    }
}

impl Iterator for BufferedStateIterator {
    type Item = Result<KeyValue, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed {
            return None;
        }
        self.rows.pop_front().map(Ok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.closed { 0 } else { self.rows.len() };
        (remaining, Some(remaining))
    }
}

impl StateQueryIterator for BufferedStateIterator {
    fn close(&mut self) -> Result<(), LedgerError> {
        self.closed = true;
        self.rows.clear();
        Ok(())
    }
}
