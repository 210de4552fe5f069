// ==============================================
// MODULE CONTRACT TESTS (integration)
// ==============================================
//
// Drives FIFO and LRU modules only through `dyn CacheModule`, the way a host
// application that picks a module at runtime would.

use memocache::prelude::*;

type Prices = [u64];

fn prefix_sum() -> Provider<Prices, u64> {
    Box::new(|prices: &Prices, key: Key| prices.iter().take(key).sum())
}

fn modules() -> Vec<Box<dyn CacheModule<Prices, u64>>> {
    ["fifo", "least_recently_used"]
        .into_iter()
        .map(|name| {
            let cache = load_module::<Prices, u64>(name, CacheConfig {
                capacity: 4,
                max_key: 64,
                ..CacheConfig::default()
            })
            .unwrap();
            Box::new(cache) as Box<dyn CacheModule<Prices, u64>>
        })
        .collect()
}

const PRICES: [u64; 6] = [1, 5, 8, 9, 10, 17];

// ==============================================
// Lifecycle
// ==============================================

mod lifecycle {
    use super::*;

    #[test]
    fn loaded_module_is_ready_to_use() {
        for mut module in modules() {
            assert!(module.is_initialized());
            let mut provider = module.install_decorator(prefix_sum());
            assert_eq!(provider.call(&PRICES, 3), 14);
        }
    }

    #[test]
    fn cleanup_then_initialize_starts_over() {
        for mut module in modules() {
            module.install_decorator(prefix_sum()).call(&PRICES, 2);
            module.cleanup();
            assert!(!module.is_initialized());
            assert_eq!(module.len(), 0);

            module.initialize().unwrap();
            assert!(module.is_initialized());
            assert_eq!(module.snapshot().requests, 0);

            // The decorator stays installed across the cycle.
            let mut provider = module.caching_provider().unwrap();
            assert_eq!(provider.call(&PRICES, 2), 6);
            assert_eq!(provider.call(&PRICES, 2), 6);
            assert_eq!(module.snapshot().hits, 1);
        }
    }

    #[test]
    fn calls_after_cleanup_pass_through() {
        for mut module in modules() {
            module.install_decorator(prefix_sum());
            module.cleanup();
            let mut provider = module.caching_provider().unwrap();
            assert_eq!(provider.call(&PRICES, 6), 50);
            assert_eq!(provider.call(&PRICES, 6), 50);
            assert_eq!(module.snapshot().hits, 0);
            assert_eq!(module.snapshot().misses, 2);
        }
    }

    #[test]
    fn no_provider_before_install() {
        for mut module in modules() {
            assert!(module.caching_provider().is_none());
        }
    }
}

// ==============================================
// Decorator Installation
// ==============================================

mod decorator_installation {
    use super::*;

    #[test]
    fn reinstall_replaces_downstream_for_new_keys() {
        for mut module in modules() {
            module.install_decorator(prefix_sum()).call(&PRICES, 1);

            let mut provider =
                module.install_decorator(Box::new(|_: &Prices, key: Key| key as u64 * 1000));
            assert_eq!(provider.call(&PRICES, 1), 1, "already cached");
            assert_eq!(provider.call(&PRICES, 2), 2000);
        }
    }
}

// ==============================================
// Statistics
// ==============================================

mod statistics {
    use super::*;

    #[test]
    fn listing_has_fixed_labels_and_end_marker() {
        for mut module in modules() {
            let mut provider = module.install_decorator(prefix_sum());
            provider.call(&PRICES, 1);
            provider.call(&PRICES, 1);
            provider.call(&PRICES, 2);

            let stats = module.statistics();
            let labels: Vec<_> = stats.iter().map(|stat| stat.label).collect();
            assert_eq!(labels, [
                StatLabel::Requests,
                StatLabel::Hits,
                StatLabel::Misses,
                StatLabel::Capacity,
                StatLabel::EndOfStats,
            ]);
            let counts: Vec<_> = stats.iter().map(|stat| stat.count).collect();
            assert_eq!(counts, [3, 1, 2, 4, 0]);
        }
    }

    #[test]
    fn reset_zeroes_counters_but_keeps_values() {
        for mut module in modules() {
            module.install_decorator(prefix_sum()).call(&PRICES, 4);
            module.reset_statistics();

            let stats = CacheStatistics::from_stats(&module.statistics());
            assert_eq!((stats.requests, stats.hits, stats.misses), (0, 0, 0));
            assert_eq!(stats.capacity, 4);

            module.caching_provider().unwrap().call(&PRICES, 4);
            assert_eq!(module.snapshot().hits, 1);
        }
    }

    #[test]
    fn debug_toggle_does_not_change_results() {
        for mut module in modules() {
            module.set_debug(true);
            let mut provider = module.install_decorator(prefix_sum());
            for key in 0..8 {
                provider.call(&PRICES, key);
            }
            module.set_debug(false);
            let stats = module.snapshot();
            assert_eq!(stats.misses, 8);
            assert_eq!(stats.len, 4);
            assert_eq!(stats.evictions, 4);
        }
    }
}

// ==============================================
// Module Loading
// ==============================================

mod module_loading {
    use super::*;

    #[test]
    fn unknown_module_is_unavailable() {
        let err = load_module::<Prices, u64>("lfu", CacheConfig::default()).unwrap_err();
        assert!(matches!(err, CacheError::ModuleUnavailable(ref name) if name == "lfu"));
        assert!(err.to_string().contains("lfu"));
    }

    #[test]
    fn bad_config_is_reported_before_module_exists() {
        let err = load_module::<Prices, u64>("fifo", CacheConfig {
            capacity: 0,
            ..CacheConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, CacheError::Config(_)));
    }

    #[test]
    fn policies_are_distinguishable() {
        let kinds: Vec<_> = modules().iter().map(|module| module.policy()).collect();
        assert_eq!(kinds, [PolicyKind::Fifo, PolicyKind::Lru]);
    }
}
