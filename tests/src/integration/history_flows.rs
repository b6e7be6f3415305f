//! # History Flows
//!
//! Drives the private-history stack through whole transaction sequences and
//! checks the replayed history against an independent model of what each
//! key went through.
//!
//! ## Properties Checked
//!
//! 1. **Completeness**: n successful writes replay as exactly n records
//! 2. **Ordering**: records come back most-recent-first
//! 3. **Delete values**: a delete record carries the last value written
//! 4. **Atomicity**: a failed history append leaves primary state untouched

#[cfg(test)]
mod tests {
    use super::super::{history_stack, ledger, COLLECTION};
    use ac_01_private_state::{read_history, PrivateDataStore, StateStore};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use shared_types::{KeyModification, LedgerError};
    use std::collections::HashMap;

    const SEED: u64 = 0xA77E_5700;
    const KEYS: [&str; 3] = ["POA-1", "POA-2", "INN-7"];

    /// What a history record should look like, minus tx metadata.
    #[derive(Debug, Clone, PartialEq)]
    struct Expected {
        tx_id: String,
        value: Vec<u8>,
        is_delete: bool,
    }

    #[derive(Default)]
    struct KeyModel {
        records: Vec<Expected>,
        last_value: Vec<u8>,
        live: Option<Vec<u8>>,
    }

    fn random_value(rng: &mut StdRng) -> Vec<u8> {
        let len = rng.gen_range(1..=24);
        (0..len).map(|_| rng.gen()).collect()
    }

    fn strip(records: &[KeyModification]) -> Vec<Expected> {
        records
            .iter()
            .map(|r| Expected {
                tx_id: r.tx_id.clone(),
                value: r.value.clone(),
                is_delete: r.is_delete,
            })
            .collect()
    }

    // =========================================================================
    // RANDOMIZED SEQUENCES
    // =========================================================================

    #[test]
    fn test_random_sequences_replay_in_reverse() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let mut stub = history_stack();
        let mut model: HashMap<&str, KeyModel> = HashMap::new();

        for _ in 0..200 {
            let key = KEYS[rng.gen_range(0..KEYS.len())];
            let tx_id = ledger(&mut stub).next_transaction();
            let entry = model.entry(key).or_default();

            if rng.gen_bool(0.7) {
                let value = random_value(&mut rng);
                stub.put_state(key, &value).unwrap();
                entry.records.push(Expected {
                    tx_id,
                    value: value.clone(),
                    is_delete: false,
                });
                entry.last_value = value.clone();
                entry.live = Some(value);
            } else {
                stub.del_state(key).unwrap();
                entry.records.push(Expected {
                    tx_id,
                    value: entry.last_value.clone(),
                    is_delete: true,
                });
                entry.live = None;
            }
        }
        ledger(&mut stub).end_transaction();

        for (key, entry) in &model {
            let history = read_history(&stub, key).unwrap();
            let expected: Vec<Expected> = entry.records.iter().rev().cloned().collect();

            assert_eq!(history.len(), entry.records.len(), "record count for {}", key);
            assert_eq!(strip(&history), expected, "records for {}", key);
            assert_eq!(stub.get_state(key).unwrap(), entry.live, "live value for {}", key);

            let timestamps: Vec<_> = history.iter().map(|r| r.timestamp.unwrap()).collect();
            assert!(
                timestamps.windows(2).all(|w| w[0] > w[1]),
                "timestamps for {} not strictly decreasing",
                key
            );
        }
    }

    #[test]
    fn test_untouched_keys_have_empty_history() {
        let mut rng = StdRng::seed_from_u64(SEED ^ 1);
        let mut stub = history_stack();

        for _ in 0..20 {
            ledger(&mut stub).next_transaction();
            let value = random_value(&mut rng);
            stub.put_state("POA-1", &value).unwrap();
        }

        assert!(read_history(&stub, "POA-2").unwrap().is_empty());
        assert_eq!(read_history(&stub, "POA-1").unwrap().len(), 20);
    }

    // =========================================================================
    // DOCUMENTED FLOW
    // =========================================================================

    #[test]
    fn test_power_of_attorney_lifecycle() {
        let mut stub = history_stack();

        let t1 = ledger(&mut stub).next_transaction();
        stub.put_state("POA-1", b"v1").unwrap();
        let t2 = ledger(&mut stub).next_transaction();
        stub.put_state("POA-1", b"v2").unwrap();
        let t3 = ledger(&mut stub).next_transaction();
        stub.del_state("POA-1").unwrap();

        let history = read_history(&stub, "POA-1").unwrap();
        let expected = vec![
            Expected { tx_id: t3, value: b"v2".to_vec(), is_delete: true },
            Expected { tx_id: t2, value: b"v2".to_vec(), is_delete: false },
            Expected { tx_id: t1, value: b"v1".to_vec(), is_delete: false },
        ];
        assert_eq!(strip(&history), expected);

        // Primary value lives in the collection, never in public state.
        assert_eq!(stub.get_state("POA-1").unwrap(), None);
        assert_eq!(ledger(&mut stub).private_keys(COLLECTION), vec!["POA-1_HIST"]);
        assert!(ledger(&mut stub).public_keys().is_empty());
    }

    #[test]
    fn test_delete_then_rewrite_keeps_full_trail() {
        let mut stub = history_stack();

        for (value, delete) in [(&b"a"[..], false), (&b""[..], true), (&b"b"[..], false), (&b""[..], true)] {
            ledger(&mut stub).next_transaction();
            if delete {
                stub.del_state("k").unwrap();
            } else {
                stub.put_state("k", value).unwrap();
            }
        }

        let history = read_history(&stub, "k").unwrap();
        let trail: Vec<(&[u8], bool)> = history
            .iter()
            .map(|r| (r.value.as_slice(), r.is_delete))
            .collect();
        assert_eq!(
            trail,
            vec![(&b"b"[..], true), (&b"b"[..], false), (&b"a"[..], true), (&b"a"[..], false)]
        );
    }

    // =========================================================================
    // ATOMICITY
    // =========================================================================

    #[test]
    fn test_failed_append_never_reaches_primary_state() {
        let mut rng = StdRng::seed_from_u64(SEED ^ 2);
        let mut stub = history_stack();

        ledger(&mut stub).next_transaction();
        stub.put_state("POA-1", b"committed").unwrap();

        ledger(&mut stub).fail_writes_matching("_HIST");
        for _ in 0..10 {
            ledger(&mut stub).next_transaction();
            let value = random_value(&mut rng);
            let put = stub.put_state("POA-1", &value);
            assert!(matches!(put, Err(LedgerError::Transport(_))));
            assert!(stub.del_state("POA-1").is_err());
        }

        assert_eq!(stub.get_state("POA-1").unwrap(), Some(b"committed".to_vec()));

        ledger(&mut stub).clear_faults();
        ledger(&mut stub).next_transaction();
        stub.put_state("POA-1", b"after").unwrap();

        let values: Vec<Vec<u8>> = read_history(&stub, "POA-1")
            .unwrap()
            .into_iter()
            .map(|r| r.value)
            .collect();
        assert_eq!(values, vec![b"after".to_vec(), b"committed".to_vec()]);
    }

    #[test]
    fn test_direct_private_writes_are_recorded() {
        let mut stub = history_stack();

        ledger(&mut stub).next_transaction();
        stub.put_private_data(COLLECTION, "POA-1", b"via-pdc").unwrap();
        ledger(&mut stub).next_transaction();
        stub.del_private_data(COLLECTION, "POA-1").unwrap();
        ledger(&mut stub).next_transaction();
        stub.put_private_data("other_pdc", "POA-1", b"elsewhere").unwrap();

        let history = read_history(&stub, "POA-1").unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].is_delete);
        assert_eq!(history[0].value, b"via-pdc".to_vec());
        assert_eq!(
            stub.get_private_data("other_pdc", "POA-1").unwrap(),
            Some(b"elsewhere".to_vec())
        );
    }
}
