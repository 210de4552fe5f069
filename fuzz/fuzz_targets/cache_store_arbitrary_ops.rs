#![no_main]

use libfuzzer_sys::fuzz_target;
use memocache::config::{CacheConfig, IndexKind};
use memocache::policy::{EvictionPolicy, FifoPolicy, LruPolicy};
use memocache::store::{CacheStore, InsertOutcome};

const MAX_KEY: usize = 48;

// Fuzz arbitrary operation sequences on CacheStore
//
// The first byte picks policy, index backing and capacity; every following
// pair of bytes is one insert, lookup, peek or clear. Keys run past MAX_KEY
// to exercise the bypass path.
fuzz_target!(|data: &[u8]| {
    let Some((&header, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(header >> 2) % 16 + 1;
    let index = if header & 0b10 == 0 {
        IndexKind::Dense
    } else {
        IndexKind::Sparse
    };
    if header & 0b1 == 0 {
        run::<FifoPolicy>(capacity, index, ops);
    } else {
        run::<LruPolicy>(capacity, index, ops);
    }
});

fn run<P: EvictionPolicy>(capacity: usize, index: IndexKind, ops: &[u8]) {
    let config = CacheConfig {
        capacity,
        max_key: MAX_KEY,
        index,
        ..CacheConfig::default()
    };
    let mut store: CacheStore<u32, P> = CacheStore::try_new(&config).unwrap();

    for (step, pair) in ops.chunks_exact(2).enumerate() {
        let key = usize::from(pair[1]) % (MAX_KEY + 8);
        let value = step as u32;

        match pair[0] % 8 {
            0..=3 => {
                let was_live = store.contains(key);
                let len_before = store.len();
                let outcome = store.insert(key, value);

                match outcome {
                    InsertOutcome::Bypassed(_) => {
                        assert!(key > MAX_KEY);
                        assert_eq!(store.len(), len_before);
                    },
                    InsertOutcome::Replaced { .. } => assert!(was_live),
                    InsertOutcome::Stored { .. } => {
                        assert_eq!(store.len(), len_before + 1);
                    },
                    InsertOutcome::Evicted { key: evicted, .. } => {
                        assert_eq!(len_before, capacity);
                        assert_ne!(evicted, key);
                        assert!(!store.contains(evicted));
                    },
                }
                if key <= MAX_KEY {
                    assert_eq!(store.peek(key), Some(&value));
                }
            },
            4..=5 => {
                let present = store.contains(key);
                assert_eq!(store.lookup(key).is_some(), present);
            },
            6 => {
                let _ = store.peek(key);
            },
            _ => {
                if pair[1] == 0 {
                    store.clear();
                    assert!(store.is_empty());
                }
            },
        }

        assert!(store.len() <= capacity);
        store.check_invariants().unwrap();
    }
}
