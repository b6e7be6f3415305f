//! # Partition Isolation
//!
//! Checks that the private stacks keep their state inside the configured
//! collection while handlers talking to the bare ledger keep using public
//! state, and that the unsupported paginated queries fail loudly.

#[cfg(test)]
mod tests {
    use super::super::{history_stack, init_tracing, ledger, COLLECTION};
    use ac_01_private_state::{
        read_history, wrap_private, wrap_private_with_history, MemoryLedger, PrivateDataStore,
        PrivateStateConfig, StateStore,
    };
    use shared_types::{create_composite_key, KeyValue, TxTimestamp};

    fn begin(ledger: &mut MemoryLedger, seconds: i64) -> String {
        let tx_id = uuid::Uuid::new_v4().to_string();
        ledger.begin_transaction(tx_id.clone(), TxTimestamp::new(seconds, 0));
        tx_id
    }

    fn collect(rows: shared_types::StateIter) -> Vec<KeyValue> {
        rows.collect::<Result<Vec<_>, _>>().unwrap()
    }

    #[test]
    fn test_public_and_private_handlers_share_one_ledger() {
        init_tracing();
        let mut bare = MemoryLedger::new();
        begin(&mut bare, 1);
        bare.put_state("INN-1", b"public").unwrap();

        let mut private = wrap_private(bare, &PrivateStateConfig::default());
        private.put_state("INN-1", b"private").unwrap();
        assert_eq!(private.get_state("INN-1").unwrap(), Some(b"private".to_vec()));

        let bare = private.into_inner();
        assert_eq!(bare.get_state("INN-1").unwrap(), Some(b"public".to_vec()));
        assert_eq!(
            bare.get_private_data(COLLECTION, "INN-1").unwrap(),
            Some(b"private".to_vec())
        );
    }

    #[test]
    fn test_plain_partition_keeps_no_history() {
        init_tracing();
        let mut ledger = MemoryLedger::new();
        begin(&mut ledger, 1);

        let mut private = wrap_private(ledger, &PrivateStateConfig::default());
        private.put_state("POA-1", b"v1").unwrap();

        // Native history only covers public state.
        assert!(read_history(&private, "POA-1").unwrap().is_empty());
        assert_eq!(private.inner().private_keys(COLLECTION), vec!["POA-1"]);
    }

    #[test]
    fn test_custom_collection_from_config() {
        init_tracing();
        let config = PrivateStateConfig::default()
            .with_collection("custody_pdc")
            .with_history_key_prefix("h:")
            .with_history_key_suffix("");
        let mut ledger = MemoryLedger::new();
        let tx_id = begin(&mut ledger, 7);

        let mut stub = wrap_private_with_history(ledger, &config);
        stub.put_state("POA-1", b"v1").unwrap();

        let history = read_history(&stub, "POA-1").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].tx_id, tx_id);
        assert_eq!(history[0].timestamp, Some(TxTimestamp::new(7, 0)));

        let ledger = stub.into_inner().into_inner();
        assert_eq!(ledger.private_keys("custody_pdc"), vec!["POA-1", "h:POA-1"]);
        assert!(ledger.private_keys(COLLECTION).is_empty());
    }

    #[test]
    fn test_range_scan_sees_history_logs() {
        let mut stub = history_stack();
        ledger(&mut stub).next_transaction();
        stub.put_state("POA-1", b"one").unwrap();
        stub.put_state("POA-2", b"two").unwrap();

        let keys: Vec<String> = collect(stub.get_state_by_range("POA-", "POA-~").unwrap())
            .into_iter()
            .map(|row| row.key)
            .collect();
        assert_eq!(keys, vec!["POA-1", "POA-1_HIST", "POA-2", "POA-2_HIST"]);
    }

    #[test]
    fn test_composite_keys_live_in_collection() {
        let mut stub = history_stack();
        ledger(&mut stub).next_transaction();

        let key = create_composite_key("POA", &["grantor-1", "agent-9"]).unwrap();
        stub.put_state(&key, b"{}").unwrap();

        // The suffixed log key extends the composite key, so it matches too.
        let keys: Vec<String> = collect(
            stub.get_state_by_partial_composite_key("POA", &["grantor-1"])
                .unwrap(),
        )
        .into_iter()
        .map(|row| row.key)
        .collect();
        assert_eq!(keys, vec![key.clone(), format!("{}_HIST", key)]);
        assert_eq!(read_history(&stub, &key).unwrap().len(), 1);
        assert!(ledger(&mut stub).public_keys().is_empty());
    }

    #[test]
    #[should_panic(
        expected = "Operation get_state_by_range_with_pagination is not supported for private collection attorney_pdc"
    )]
    fn test_range_pagination_panics() {
        let stub = history_stack();
        let _ = stub.get_state_by_range_with_pagination("a", "z", 10, "");
    }

    #[test]
    #[should_panic(expected = "is not supported for private collection custody_pdc")]
    fn test_composite_pagination_panics_with_configured_collection() {
        init_tracing();
        let config = PrivateStateConfig::default().with_collection("custody_pdc");
        let stub = wrap_private(MemoryLedger::new(), &config);
        let _ = stub.get_state_by_partial_composite_key_with_pagination("POA", &[], 5, "");
    }

    #[test]
    fn test_bare_ledger_pagination_still_works() {
        init_tracing();
        let mut ledger = MemoryLedger::new();
        begin(&mut ledger, 1);
        for key in ["a", "b", "c"] {
            ledger.put_state(key, b"x").unwrap();
        }

        let (rows, metadata) = ledger
            .get_state_by_range_with_pagination("", "", 2, "")
            .unwrap();
        assert_eq!(collect(rows).len(), 2);
        assert_eq!(metadata.fetched_records_count, 2);
        assert_eq!(metadata.bookmark, "b");
    }
}
