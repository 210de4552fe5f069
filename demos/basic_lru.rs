use memocache::prelude::*;

fn main() {
    // An LRU cache with capacity for 2 entries
    let mut cache = CacheBuilder::new(2).policy(PolicyKind::Lru).build::<str, String>();

    let mut shout = cache.install_decorator(Box::new(|word: &str, key: Key| {
        format!("{}{}", word.to_uppercase(), "!".repeat(key))
    }));

    shout.call("hey", 1);
    shout.call("hey", 2);
    shout.call("hey", 1); // touch 1
    shout.call("hey", 3); // evicts 2, the least recently used

    println!("cached 1: {}", cache.contains(1));
    println!("cached 2: {}", cache.contains(2));
    println!("hit ratio: {:.2}", cache.snapshot().hit_ratio());
}
