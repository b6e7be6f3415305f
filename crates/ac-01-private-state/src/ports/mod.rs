//! # Ports Layer
//!
//! - `outbound.rs` - Driven ports (the host ledger API this crate consumes
//!   and, through its decorators, re-exposes)
//! - `strategy.rs` - The pluggable history policy

pub mod outbound;
pub mod strategy;

pub use outbound::{LedgerStub, PrivateDataStore, StateStore, TxContext};
pub use strategy::HistoryStrategy;
