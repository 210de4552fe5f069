#![no_main]

use libfuzzer_sys::fuzz_target;
use memocache::prelude::*;

// Fuzz call sequences through a runtime-selected caching provider
//
// Whatever the call order, the cached result must equal the provider's and
// requests must equal hits + misses.
fuzz_target!(|data: &[u8]| {
    let Some((&header, keys)) = data.split_first() else {
        return;
    };
    let policy = if header & 1 == 0 {
        PolicyKind::Fifo
    } else {
        PolicyKind::Lru
    };
    let mut cache = CacheBuilder::new(usize::from(header >> 1) % 8 + 1)
        .max_key(200)
        .policy(policy)
        .build::<u64, u64>();
    let mut provider = cache.install_decorator(Box::new(|salt: &u64, key: Key| {
        (key as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15) ^ salt
    }));

    for &byte in keys {
        let key = Key::from(byte);
        assert_eq!(provider.call(&17, key), provider.call_uncached(&17, key));
    }

    let stats = cache.snapshot();
    assert_eq!(stats.requests, keys.len() as u64);
    assert_eq!(stats.requests, stats.hits + stats.misses);
    assert!(stats.len <= stats.capacity);
});
