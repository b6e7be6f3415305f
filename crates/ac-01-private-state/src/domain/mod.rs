//! # Domain Layer
//!
//! Pure logic for private history: no ledger access happens here.
//!
//! ## Modules
//!
//! - `config` - Collection name and history key scheme
//! - `history_log` - Persisted per-key history and its codec
//! - `iterator` - Cursor over reconstructed history
//! - `errors` - Codec errors

pub mod config;
pub mod errors;
pub mod history_log;
pub mod iterator;

pub use config::*;
pub use errors::*;
pub use history_log::*;
pub use iterator::*;
