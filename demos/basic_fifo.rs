use memocache::prelude::*;

fn main() {
    // A FIFO module holding up to 3 results for keys 0..=100
    let config = CacheConfig {
        capacity: 3,
        max_key: 100,
        ..CacheConfig::default()
    };
    let mut cache: FifoCache<(), u64> = FifoCache::try_new(config).unwrap();

    // Wrap a "slow" provider
    let mut cube = cache.install_decorator(Box::new(|_: &(), key: Key| (key as u64).pow(3)));

    for key in [1, 2, 3, 1, 4, 1] {
        println!("cube({}) = {}", key, cube.call(&(), key));
    }

    // 1 was inserted first, so inserting 4 pushed it out even though it was
    // read in between.
    for stat in cache.statistics() {
        println!("{}", stat);
    }
}
