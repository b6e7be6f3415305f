//! # Domain Errors
//!
//! Failures of the history log codec. They never leave the crate as-is:
//! callers see them as `LedgerError` tagged with the log key.

use shared_types::LedgerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryLogError {
    #[error("history log is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("history log could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
}

impl HistoryLogError {
    /// Report against the log stored under `log_key`.
    pub fn at(self, log_key: &str) -> LedgerError {
        match self {
            HistoryLogError::Decode(_) => LedgerError::corruption(log_key, self),
            HistoryLogError::Encode(_) => {
                LedgerError::transport(format!("{} (log key {})", self, log_key))
            }
        }
    }
}
