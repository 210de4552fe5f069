//! # Cache Module Contract
//!
//! A host application drives a cache through [`CacheModule`]: it installs a
//! provider once, calls the returned [`CachingProvider`] instead of the
//! provider, and reads statistics at the end. FIFO and LRU modules satisfy the
//! same contract, so the host can pick one at runtime without changing call
//! sites.
//!
//! ## Architecture
//!
//! ```text
//!                          ┌─────────────────────────────────────────┐
//!                          │          ReadOnlyCache                  │
//!                          │                                         │
//!                          │  contains(&, Key) → bool                │
//!                          │  len(&) → usize                         │
//!                          │  is_empty(&) → bool                     │
//!                          │  capacity(&) → usize                    │
//!                          └──────────────────┬──────────────────────┘
//!                                             │
//!                                             ▼
//!                          ┌─────────────────────────────────────────┐
//!                          │          CacheModule<C, V>              │
//!                          │                                         │
//!                          │  policy(&) → PolicyKind                 │
//!                          │  initialize(&mut) → Result<()>          │
//!                          │  cleanup(&mut)                          │
//!                          │  install_decorator(&mut, Provider)      │
//!                          │      → CachingProvider                  │
//!                          │  caching_provider(&mut)                 │
//!                          │      → Option<CachingProvider>          │
//!                          │  snapshot(&) → CacheStatistics          │
//!                          │  statistics(&) → Vec<CacheStat>         │
//!                          │  reset_statistics(&mut)                 │
//!                          │  set_debug(&mut, bool)                  │
//!                          └──────────────────┬──────────────────────┘
//!                                             │
//!                ┌────────────────────────────┼───────────────────────────┐
//!                ▼                            ▼                           ▼
//!   ┌──────────────────────────┐ ┌──────────────────────────┐ ┌──────────────────────┐
//!   │ FifoCache<C, V>          │ │ LruCache<C, V>           │ │ Cache<C, V>          │
//!   │ MemoCache<_, _, Fifo>    │ │ MemoCache<_, _, Lru>     │ │ runtime-selected     │
//!   └──────────────────────────┘ └──────────────────────────┘ └──────────────────────┘
//! ```
//!
//! ## Lifecycle
//!
//! ```text
//!   try_new / load_module ──▶ initialized ──cleanup()──▶ released
//!                                  ▲                        │
//!                                  └──────initialize()──────┘
//! ```
//!
//! | Call                 | Initialized                   | Released                    |
//! |----------------------|-------------------------------|-----------------------------|
//! | `initialize()`       | Empties cache, zeroes stats   | Reallocates, zeroes stats   |
//! | `cleanup()`          | Drops every cached value      | No-op                       |
//! | provider `call`      | Lookup, then downstream       | Downstream only (a miss)    |
//! | `statistics()`       | Current counters              | Counters since last reset   |
//!
//! The installed downstream survives `cleanup()` and `initialize()`; only a
//! later `install_decorator` replaces it.

use crate::config::PolicyKind;
use crate::decorator::{CachingProvider, Provider};
use crate::ds::Key;
use crate::error::CacheError;
use crate::metrics::{CacheStat, CacheStatistics};

/// Read-only view of a key-bounded cache.
pub trait ReadOnlyCache {
    /// Whether `key` is currently cached. Never affects eviction order.
    fn contains(&self, key: Key) -> bool;

    /// Number of live entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of live entries.
    fn capacity(&self) -> usize;
}

/// Lifecycle, decorator installation and statistics of a memoizing cache
/// module.
///
/// `C` is the provider's read-only context, `V` the value it produces.
///
/// # Example
///
/// ```
/// use memocache::traits::CacheModule;
/// use memocache::{CacheBuilder, Key, PolicyKind};
///
/// fn run(module: &mut dyn CacheModule<[u64], u64>) -> u64 {
///     let mut provider = module.install_decorator(Box::new(|prices: &[u64], key: Key| {
///         prices.iter().take(key).sum::<u64>()
///     }));
///     let prices = [3, 4, 5];
///     provider.call(&prices[..], 2) + provider.call(&prices[..], 2)
/// }
///
/// let mut cache = CacheBuilder::new(8).policy(PolicyKind::Lru).build::<[u64], u64>();
/// assert_eq!(run(&mut cache), 14);
/// assert_eq!(cache.snapshot().hits, 1);
/// ```
pub trait CacheModule<C: ?Sized, V>: ReadOnlyCache {
    /// Eviction policy this module runs.
    fn policy(&self) -> PolicyKind;

    /// Whether the module currently holds a store.
    fn is_initialized(&self) -> bool;

    /// Allocates a fresh, empty store and zeroes the statistics.
    ///
    /// On error the module is left as it was.
    fn initialize(&mut self) -> Result<(), CacheError>;

    /// Drops every cached value. Statistics stay readable.
    fn cleanup(&mut self);

    /// Installs `downstream` (replacing any earlier one) and returns the
    /// caching provider wrapping it.
    fn install_decorator(&mut self, downstream: Provider<C, V>) -> CachingProvider<'_, C, V>;

    /// The caching provider over the installed downstream, if any.
    fn caching_provider(&mut self) -> Option<CachingProvider<'_, C, V>>;

    /// Current counters as a struct.
    fn snapshot(&self) -> CacheStatistics;

    /// Current counters as an owned, ordered listing ending in
    /// [`StatLabel::EndOfStats`](crate::metrics::StatLabel::EndOfStats).
    fn statistics(&self) -> Vec<CacheStat> {
        self.snapshot().to_stats()
    }

    /// Zeroes the request counters. Cached values are untouched.
    fn reset_statistics(&mut self);

    /// Turns per-operation `debug!` events on or off.
    fn set_debug(&mut self, enabled: bool);
}
