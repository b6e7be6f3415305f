//! # Private State Service
//!
//! The decorators chaincode handlers use in place of the raw ledger stub.
//!
//! ## Architecture
//!
//! 1. `PartitionRedirector` maps the state API onto one private collection
//! 2. `HistoryRedirector` records history before every write and answers
//!    history queries from it
//! 3. `AppendLogStrategy` is the history policy plugged into (2)
//! 4. `wiring` assembles the stacks from a `PrivateStateConfig`

mod append_log;
mod history;
mod partition;
mod wiring;

pub use append_log::AppendLogStrategy;
pub use history::HistoryRedirector;
pub use partition::PartitionRedirector;
pub use wiring::{read_history, wrap_private, wrap_private_with_history, PrivateHistoryStub};
