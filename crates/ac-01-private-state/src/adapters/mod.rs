//! # Adapters Module
//!
//! - `memory_ledger`: in-process ledger for tests and local embedding

pub mod memory_ledger;

pub use memory_ledger::MemoryLedger;
