//! # Error Types
//!
//! Errors returned across the ledger boundary.
//!
//! Every store in the chaincode, the host ledger and each decorator wrapped
//! around it, reports failures through `LedgerError`. None of the variants
//! are retried inside the chaincode; retry belongs to whoever submits the
//! transaction.

use thiserror::Error;

/// Errors that can occur while talking to ledger state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The underlying state database call failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Stored bytes under `key` could not be decoded.
    #[error("Corrupted data under key {key}: {reason}")]
    Corruption { key: String, reason: String },

    /// Transaction id or timestamp unavailable (called outside a transaction).
    #[error("Transaction context unavailable: {0}")]
    Context(String),

    /// The operation cannot be served against a private data collection.
    #[error("Operation {operation} is not supported for private collection {collection}")]
    UnsupportedOperation {
        operation: &'static str,
        collection: String,
    },

    /// Malformed input (composite key parts, query strings).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl LedgerError {
    pub fn transport(message: impl Into<String>) -> Self {
        LedgerError::Transport(message.into())
    }

    pub fn corruption(key: impl Into<String>, reason: impl ToString) -> Self {
        LedgerError::Corruption {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}
