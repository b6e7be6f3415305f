//! # ac-01-private-state
//!
//! Private-collection state layer for the attorney chaincode.
//!
//! ## Role in System
//!
//! - **Redirection**: chaincode written against the plain state API reads and
//!   writes one private data collection instead of public state
//! - **Emulated History**: the host ledger keeps key history for public state
//!   only; this crate records it for private keys and serves it back through
//!   the ordinary history query
//!
//! ## Composition
//!
//! ```text
//! handler ──→ HistoryRedirector ──→ PartitionRedirector ──→ host stub
//!                  │                                          ↑
//!                  └──→ AppendLogStrategy ──(key + "_HIST")──┘
//! ```
//!
//! The order is fixed: history logic runs on top of the collection-scoped
//! store and writes its logs into the same collection.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Append Before Write | A mutation is recorded before it is applied; a failed record aborts the mutation |
//! | 2 | Newest First | History is replayed most-recent-first, like native history |
//! | 3 | Separate Log | History logs never overwrite primary values |
//! | 4 | No Paged Private Queries | Paginated queries against a collection panic |
//!
//! ## Usage
//!
//! ```ignore
//! use ac_01_private_state::{wrap_private_with_history, read_history, PrivateStateConfig};
//!
//! let config = PrivateStateConfig::from_env();
//! let mut stub = wrap_private_with_history(host_stub, &config);
//!
//! stub.put_state("POA-1", b"v1")?;
//! let history = read_history(&stub, "POA-1")?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(test)]
pub(crate) mod test_utils;

pub use adapters::MemoryLedger;
pub use domain::{
    HistoryEntry, HistoryIterator, HistoryKeyScheme, HistoryLog, HistoryLogError,
    PrivateStateConfig,
};
pub use ports::{HistoryStrategy, LedgerStub, PrivateDataStore, StateStore, TxContext};
pub use service::{
    read_history, wrap_private, wrap_private_with_history, AppendLogStrategy, HistoryRedirector,
    PartitionRedirector, PrivateHistoryStub,
};
