use crate::adapters::MemoryLedger;
use crate::domain::PrivateStateConfig;
use crate::service::{wrap_private_with_history, PrivateHistoryStub};
use shared_types::TxTimestamp;

pub const COLLECTION: &str = "attorney_pdc";

pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn make_history_stub() -> PrivateHistoryStub<MemoryLedger> {
    init_test_tracing();
    wrap_private_with_history(MemoryLedger::new(), &PrivateStateConfig::default())
}

pub fn ledger_of(stub: &mut PrivateHistoryStub<MemoryLedger>) -> &mut MemoryLedger {
    stub.inner_mut().inner_mut()
}

/// Start transaction `tx_id` at `seconds` on the ledger under `stub`.
pub fn begin(stub: &mut PrivateHistoryStub<MemoryLedger>, tx_id: &str, seconds: i64) {
    ledger_of(stub).begin_transaction(tx_id, TxTimestamp::new(seconds, 0));
}
