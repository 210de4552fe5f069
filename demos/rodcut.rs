//! Rod-cutting tester.
//!
//! Solves random rod lengths twice each, optionally through a cache module
//! named on the command line, and prints the module's statistics at the end.
//!
//! ```text
//! cargo run --example rodcut                # uncached
//! cargo run --example rodcut -- lru         # through the LRU module
//! RUST_LOG=memocache=debug cargo run --example rodcut -- fifo debug
//! ```

use std::fmt::Write;

use memocache::prelude::*;
use rand::Rng;
use tracing_subscriber::EnvFilter;

const TEST_COUNT: usize = 100;
const MAX_TEST_LENGTH: Key = 100;

/// `(length, price)` for each piece length on sale.
type PriceList = [(usize, u64)];

const PRICES: &[(usize, u64)] = &[(1, 1), (2, 5), (3, 8), (4, 9), (5, 10), (6, 17), (7, 17), (8, 20)];

/// Best way to cut a rod of `rod_length`, rendered as a report.
fn solve_rod_cutting(prices: &PriceList, rod_length: Key) -> String {
    let mut price_of = vec![0u64; rod_length + 1];
    for &(length, price) in prices {
        if length <= rod_length {
            price_of[length] = price;
        }
    }

    let mut best = vec![0u64; rod_length + 1];
    let mut first_cut = vec![0usize; rod_length + 1];
    for length in 1..=rod_length {
        for cut in 1..=length {
            let profit = price_of[cut] + best[length - cut];
            if price_of[cut] > 0 && profit > best[length] {
                best[length] = profit;
                first_cut[length] = cut;
            }
        }
    }

    // Group identical pieces, in the order they are first cut.
    let mut pieces: Vec<(usize, u64)> = Vec::new();
    let mut remaining = rod_length;
    while remaining > 0 && first_cut[remaining] > 0 {
        let cut = first_cut[remaining];
        match pieces.iter_mut().find(|(length, _)| *length == cut) {
            Some((_, count)) => *count += 1,
            None => pieces.push((cut, 1)),
        }
        remaining -= cut;
    }

    let mut report = String::new();
    for (length, count) in pieces {
        let _ = writeln!(report, "{} @ {} = {}", count, length, count * price_of[length]);
    }
    let _ = writeln!(report, "Remainder: {}", remaining);
    let _ = writeln!(report, "Value: {}", best[rod_length]);
    report
}

fn main() -> Result<(), CacheError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let module_name = args.next();
    let debug = args.next().is_some_and(|flag| flag == "debug");

    let mut module = module_name
        .as_deref()
        .map(|name| {
            load_module::<PriceList, String>(name, CacheConfig {
                debug,
                ..CacheConfig::default()
            })
        })
        .transpose()?;

    let downstream: Provider<PriceList, String> = Box::new(solve_rod_cutting);
    let mut caching = module.as_mut().map(|cache| cache.install_decorator(downstream));
    if let Some(name) = &module_name {
        println!("Cache module '{}' loaded", name);
    }

    let mut rng = rand::thread_rng();
    for test_number in 0..TEST_COUNT {
        let length = rng.gen_range(1..=MAX_TEST_LENGTH);
        for pass in 1..=2 {
            let result = match caching.as_mut() {
                Some(provider) => provider.call(PRICES, length),
                None => solve_rod_cutting(PRICES, length),
            };
            println!("\nTest {:2}-{}: rod length {} solution:\n{}", test_number, pass, length, result);
        }
    }
    drop(caching);

    if let Some(mut cache) = module {
        println!();
        for stat in cache.statistics().iter().take_while(|stat| !stat.is_end()) {
            println!("{}", stat);
        }
        cache.cleanup();
    }
    Ok(())
}
