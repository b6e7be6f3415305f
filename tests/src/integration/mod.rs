//! # Integration Tests
//!
//! Decorator stacks exercised end to end against the in-memory ledger.

pub mod history_flows;
pub mod partition_isolation;

use ac_01_private_state::{wrap_private_with_history, MemoryLedger, PrivateHistoryStub, PrivateStateConfig};

pub const COLLECTION: &str = "attorney_pdc";

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Default private-history stack over a fresh ledger.
pub fn history_stack() -> PrivateHistoryStub<MemoryLedger> {
    init_tracing();
    wrap_private_with_history(MemoryLedger::new(), &PrivateStateConfig::default())
}

/// Ledger at the bottom of a private-history stack.
pub fn ledger(stub: &mut PrivateHistoryStub<MemoryLedger>) -> &mut MemoryLedger {
    stub.inner_mut().inner_mut()
}
