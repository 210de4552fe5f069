//! Memoizing cache module over a fixed eviction policy.
//!
//! [`MemoCache`] owns the store, the statistics and the installed provider:
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │ MemoCache<C, V, P>                                           │
//!   │                                                              │
//!   │   config ─────────── capacity, max_key, index, debug         │
//!   │   downstream ─────── Option<Provider<C, V>>                  │
//!   │   state ┬── store: Option<CacheStore<V, P>>  (None: released)│
//!   │         └── stats: StatisticsCollector                       │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The [`CachingProvider`] returned by `install_decorator` borrows `state`
//! mutably and `downstream` shared, so statistics can be read again as soon
//! as the provider is dropped.

use std::fmt;

use tracing::debug;

use crate::config::{CacheConfig, PolicyKind};
use crate::decorator::{CachingProvider, MemoStore, Provider};
use crate::ds::Key;
use crate::error::CacheError;
use crate::metrics::{CacheStatistics, StatisticsCollector};
use crate::policy::{EvictionPolicy, FifoPolicy, LruPolicy};
use crate::store::{CacheStore, InsertOutcome};
use crate::traits::{CacheModule, ReadOnlyCache};

/// FIFO memoizing module.
pub type FifoCache<C, V> = MemoCache<C, V, FifoPolicy>;

/// LRU memoizing module.
pub type LruCache<C, V> = MemoCache<C, V, LruPolicy>;

struct ModuleState<V, P> {
    store: Option<CacheStore<V, P>>,
    stats: StatisticsCollector,
    debug: bool,
}

impl<V, P: EvictionPolicy> MemoStore<V> for ModuleState<V, P> {
    fn lookup(&mut self, key: Key) -> Option<&V> {
        self.store.as_mut()?.lookup(key)
    }

    fn insert(&mut self, key: Key, value: V) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        if let InsertOutcome::Evicted { key: evicted, .. } = store.insert(key, value) {
            self.stats.record_eviction();
            if self.debug {
                debug!(key, evicted, "evicted to make room");
            }
        }
    }

    fn statistics_mut(&mut self) -> &mut StatisticsCollector {
        &mut self.stats
    }
}

/// Memoizing cache module with eviction policy `P`.
///
/// # Example
///
/// ```
/// use memocache::traits::CacheModule;
/// use memocache::{CacheConfig, FifoCache, Key};
///
/// let config = CacheConfig { capacity: 3, ..CacheConfig::default() };
/// let mut cache: FifoCache<(), u64> = FifoCache::try_new(config).unwrap();
///
/// let mut square = cache.install_decorator(Box::new(|_: &(), key: Key| (key * key) as u64));
/// for key in 1..=4 {
///     square.call(&(), key);
/// }
/// assert_eq!(square.call(&(), 4), 16); // hit
/// assert_eq!(square.call(&(), 1), 1); // miss, 1 was evicted first
///
/// let stats = cache.snapshot();
/// assert_eq!((stats.requests, stats.hits, stats.misses), (6, 1, 5));
/// ```
pub struct MemoCache<C: ?Sized, V, P> {
    config: CacheConfig,
    state: ModuleState<V, P>,
    downstream: Option<Provider<C, V>>,
}

impl<C: ?Sized, V, P> MemoCache<C, V, P>
where
    P: EvictionPolicy,
{
    /// Validates `config` and allocates an initialized module.
    ///
    /// `config.policy` is overwritten with `P`'s kind.
    pub fn try_new(mut config: CacheConfig) -> Result<Self, CacheError> {
        let store = CacheStore::<V, P>::try_new(&config)?;
        config.policy = store.policy().kind();
        if config.debug {
            debug!(policy = %config.policy, capacity = config.capacity, "module created");
        }
        Ok(Self {
            state: ModuleState {
                store: Some(store),
                stats: StatisticsCollector::new(),
                debug: config.debug,
            },
            config,
            downstream: None,
        })
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The backing store, or `None` after [`cleanup`](CacheModule::cleanup).
    pub fn store(&self) -> Option<&CacheStore<V, P>> {
        self.state.store.as_ref()
    }

    pub fn store_mut(&mut self) -> Option<&mut CacheStore<V, P>> {
        self.state.store.as_mut()
    }

    pub fn has_decorator(&self) -> bool {
        self.downstream.is_some()
    }
}

impl<C: ?Sized, V, P> ReadOnlyCache for MemoCache<C, V, P>
where
    P: EvictionPolicy,
{
    fn contains(&self, key: Key) -> bool {
        self.state.store.as_ref().is_some_and(|store| store.contains(key))
    }

    fn len(&self) -> usize {
        self.state.store.as_ref().map_or(0, CacheStore::len)
    }

    fn capacity(&self) -> usize {
        self.config.capacity
    }
}

impl<C: ?Sized, V, P> CacheModule<C, V> for MemoCache<C, V, P>
where
    V: Clone,
    P: EvictionPolicy,
{
    fn policy(&self) -> PolicyKind {
        self.config.policy
    }

    fn is_initialized(&self) -> bool {
        self.state.store.is_some()
    }

    fn initialize(&mut self) -> Result<(), CacheError> {
        if self.state.debug {
            debug!(policy = %self.config.policy, "initialize");
        }
        match self.state.store.as_mut() {
            Some(store) => store.clear(),
            None => self.state.store = Some(CacheStore::try_new(&self.config)?),
        }
        self.state.stats.reset();
        Ok(())
    }

    fn cleanup(&mut self) {
        if let Some(mut store) = self.state.store.take() {
            // The store logs the keys it frees.
            store.clear();
        }
        if self.state.debug {
            debug!(policy = %self.config.policy, "cleanup");
        }
    }

    fn install_decorator(&mut self, downstream: Provider<C, V>) -> CachingProvider<'_, C, V> {
        if self.state.debug {
            debug!(
                policy = %self.config.policy,
                replaced = self.downstream.is_some(),
                "install decorator"
            );
        }
        let downstream = self.downstream.insert(downstream);
        CachingProvider::new(&mut self.state, &**downstream)
    }

    fn caching_provider(&mut self) -> Option<CachingProvider<'_, C, V>> {
        let downstream = self.downstream.as_deref()?;
        Some(CachingProvider::new(&mut self.state, downstream))
    }

    fn snapshot(&self) -> CacheStatistics {
        if self.state.debug {
            debug!(policy = %self.config.policy, "statistics");
        }
        self.state.stats.snapshot(self.capacity(), self.len())
    }

    fn reset_statistics(&mut self) {
        if self.state.debug {
            debug!(policy = %self.config.policy, "reset statistics");
        }
        self.state.stats.reset();
    }

    fn set_debug(&mut self, enabled: bool) {
        self.config.debug = enabled;
        self.state.debug = enabled;
        if let Some(store) = self.state.store.as_mut() {
            store.set_debug(enabled);
        }
    }
}

#[cfg(feature = "metrics")]
impl<C: ?Sized, V, P> crate::metrics::traits::MetricsSnapshotProvider<CacheStatistics>
    for MemoCache<C, V, P>
where
    V: Clone,
    P: EvictionPolicy,
{
    fn snapshot(&self) -> CacheStatistics {
        <Self as CacheModule<C, V>>::snapshot(self)
    }
}

impl<C: ?Sized, V, P> fmt::Debug for MemoCache<C, V, P>
where
    P: EvictionPolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoCache")
            .field("config", &self.config)
            .field("store", &self.state.store)
            .field("stats", &self.state.stats)
            .field("decorated", &self.downstream.is_some())
            .finish()
    }
}
