//! Property-Based Tests for the in-process store
//!
//! Uses proptest to check the laws every `KeyValueStore` backend must obey.

use proptest::prelude::*;
use std::collections::HashMap;

use crate::store::{KeyValueStore, MemoryStore};

// == Test Configuration ==
const TEST_DEFAULT_TTL: u64 = 300;

// == Strategies ==
/// Keys shaped like the encoded queries the gateway caches
fn key_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9+/=_-]{1,64}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[ -~]{1,256}"
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // A store followed by a fetch returns the stored value.
    #[test]
    fn prop_round_trip(key in key_strategy(), value in value_strategy()) {
        let found = block_on(async {
            let store = MemoryStore::new();
            store.store(&key, &value, TEST_DEFAULT_TTL).await.unwrap();
            store.fetch(&key).await.unwrap()
        });

        let found = found.expect("stored key must be found");
        prop_assert_eq!(found.value, value);
    }

    // After any sequence of writes each key holds its last written value.
    #[test]
    fn prop_last_write_wins(
        writes in prop::collection::vec((key_strategy(), value_strategy()), 1..40)
    ) {
        let mut expected: HashMap<String, String> = HashMap::new();
        for (key, value) in &writes {
            expected.insert(key.clone(), value.clone());
        }

        let (stored, len) = block_on(async {
            let store = MemoryStore::new();
            for (key, value) in &writes {
                store.store(key, value, TEST_DEFAULT_TTL).await.unwrap();
            }
            let mut stored = HashMap::new();
            for key in expected.keys() {
                let found = store.fetch(key).await.unwrap().unwrap();
                stored.insert(key.clone(), found.value);
            }
            (stored, store.len().await)
        });

        prop_assert_eq!(len, expected.len());
        prop_assert_eq!(stored, expected);
    }

    // A freshly written key reports 0 < ttl <= the TTL it was written with.
    #[test]
    fn prop_ttl_bounds(key in key_strategy(), ttl in 1u64..86_400) {
        let found = block_on(async {
            let store = MemoryStore::new();
            store.store(&key, "payload", ttl).await.unwrap();
            store.fetch(&key).await.unwrap()
        });

        let remaining = found.unwrap().ttl.expect("written keys always expire");
        prop_assert!(remaining > 0);
        prop_assert!(remaining <= ttl);
    }

    // Keys that were never written are never found.
    #[test]
    fn prop_unwritten_key_not_found(
        written in key_strategy(),
        probe in key_strategy(),
    ) {
        prop_assume!(written != probe);

        let found = block_on(async {
            let store = MemoryStore::new();
            store.store(&written, "payload", TEST_DEFAULT_TTL).await.unwrap();
            store.fetch(&probe).await.unwrap()
        });

        prop_assert!(found.is_none());
    }
}
