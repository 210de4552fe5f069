//! Runtime policy selection.
//!
//! [`Cache`] wraps either module behind one type so a host can choose FIFO or
//! LRU from configuration, and [`load_module`] resolves a module by name.
//!
//! ## Example
//!
//! ```rust
//! use memocache::builder::{CacheBuilder, load_module};
//! use memocache::traits::CacheModule;
//! use memocache::{CacheConfig, IndexKind, Key, PolicyKind};
//!
//! let mut cache = CacheBuilder::new(100)
//!     .max_key(10_000)
//!     .index(IndexKind::Sparse)
//!     .policy(PolicyKind::Lru)
//!     .build::<(), String>();
//! let mut provider = cache.install_decorator(Box::new(|_: &(), key: Key| key.to_string()));
//! assert_eq!(provider.call(&(), 42), "42");
//!
//! let fifo = load_module::<(), String>("first_in_first_out", CacheConfig::default()).unwrap();
//! assert_eq!(fifo.policy(), PolicyKind::Fifo);
//! ```

use tracing::debug;

use crate::config::{CacheConfig, IndexKind, PolicyKind};
use crate::decorator::{CachingProvider, Provider};
use crate::ds::Key;
use crate::error::CacheError;
use crate::metrics::CacheStatistics;
use crate::module::{FifoCache, LruCache};
use crate::traits::{CacheModule, ReadOnlyCache};

/// Memoizing cache whose policy is chosen at runtime.
#[derive(Debug)]
pub struct Cache<C: ?Sized, V> {
    inner: CacheInner<C, V>,
}

#[derive(Debug)]
enum CacheInner<C: ?Sized, V> {
    Fifo(FifoCache<C, V>),
    Lru(LruCache<C, V>),
}

impl<C: ?Sized, V> Cache<C, V> {
    /// Validates `config` and allocates the module `config.policy` names.
    pub fn try_new(config: CacheConfig) -> Result<Self, CacheError> {
        let inner = match config.policy {
            PolicyKind::Fifo => CacheInner::Fifo(FifoCache::try_new(config)?),
            PolicyKind::Lru => CacheInner::Lru(LruCache::try_new(config)?),
        };
        Ok(Self { inner })
    }

    pub fn config(&self) -> &CacheConfig {
        match &self.inner {
            CacheInner::Fifo(fifo) => fifo.config(),
            CacheInner::Lru(lru) => lru.config(),
        }
    }

    /// The FIFO module, if that is the selected policy.
    pub fn as_fifo(&self) -> Option<&FifoCache<C, V>> {
        match &self.inner {
            CacheInner::Fifo(fifo) => Some(fifo),
            CacheInner::Lru(_) => None,
        }
    }

    /// The LRU module, if that is the selected policy.
    pub fn as_lru(&self) -> Option<&LruCache<C, V>> {
        match &self.inner {
            CacheInner::Lru(lru) => Some(lru),
            CacheInner::Fifo(_) => None,
        }
    }
}

impl<C: ?Sized, V> ReadOnlyCache for Cache<C, V> {
    fn contains(&self, key: Key) -> bool {
        match &self.inner {
            CacheInner::Fifo(fifo) => fifo.contains(key),
            CacheInner::Lru(lru) => lru.contains(key),
        }
    }

    fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Fifo(fifo) => fifo.len(),
            CacheInner::Lru(lru) => lru.len(),
        }
    }

    fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Fifo(fifo) => fifo.capacity(),
            CacheInner::Lru(lru) => lru.capacity(),
        }
    }
}

impl<C: ?Sized, V: Clone> CacheModule<C, V> for Cache<C, V> {
    fn policy(&self) -> PolicyKind {
        match &self.inner {
            CacheInner::Fifo(fifo) => fifo.policy(),
            CacheInner::Lru(lru) => lru.policy(),
        }
    }

    fn is_initialized(&self) -> bool {
        match &self.inner {
            CacheInner::Fifo(fifo) => fifo.is_initialized(),
            CacheInner::Lru(lru) => lru.is_initialized(),
        }
    }

    fn initialize(&mut self) -> Result<(), CacheError> {
        match &mut self.inner {
            CacheInner::Fifo(fifo) => fifo.initialize(),
            CacheInner::Lru(lru) => lru.initialize(),
        }
    }

    fn cleanup(&mut self) {
        match &mut self.inner {
            CacheInner::Fifo(fifo) => fifo.cleanup(),
            CacheInner::Lru(lru) => lru.cleanup(),
        }
    }

    fn install_decorator(&mut self, downstream: Provider<C, V>) -> CachingProvider<'_, C, V> {
        match &mut self.inner {
            CacheInner::Fifo(fifo) => fifo.install_decorator(downstream),
            CacheInner::Lru(lru) => lru.install_decorator(downstream),
        }
    }

    fn caching_provider(&mut self) -> Option<CachingProvider<'_, C, V>> {
        match &mut self.inner {
            CacheInner::Fifo(fifo) => fifo.caching_provider(),
            CacheInner::Lru(lru) => lru.caching_provider(),
        }
    }

    fn snapshot(&self) -> CacheStatistics {
        match &self.inner {
            CacheInner::Fifo(fifo) => fifo.snapshot(),
            CacheInner::Lru(lru) => lru.snapshot(),
        }
    }

    fn reset_statistics(&mut self) {
        match &mut self.inner {
            CacheInner::Fifo(fifo) => fifo.reset_statistics(),
            CacheInner::Lru(lru) => lru.reset_statistics(),
        }
    }

    fn set_debug(&mut self, enabled: bool) {
        match &mut self.inner {
            CacheInner::Fifo(fifo) => fifo.set_debug(enabled),
            CacheInner::Lru(lru) => lru.set_debug(enabled),
        }
    }
}

#[cfg(feature = "metrics")]
impl<C: ?Sized, V: Clone> crate::metrics::traits::MetricsSnapshotProvider<CacheStatistics>
    for Cache<C, V>
{
    fn snapshot(&self) -> CacheStatistics {
        <Self as CacheModule<C, V>>::snapshot(self)
    }
}

/// Resolves a cache module by name.
///
/// Accepts the names [`PolicyKind`] parses (`"fifo"`,
/// `"first_in_first_out"`, `"lru"`, `"least_recently_used"`, any case).
/// The name overrides `config.policy`.
///
/// # Errors
///
/// [`CacheError::ModuleUnavailable`] for an unknown name, otherwise whatever
/// [`Cache::try_new`] reports for `config`.
pub fn load_module<C: ?Sized, V>(name: &str, config: CacheConfig) -> Result<Cache<C, V>, CacheError> {
    let Ok(policy) = name.parse::<PolicyKind>() else {
        debug!(name, "no such cache module");
        return Err(CacheError::ModuleUnavailable(name.to_string()));
    };
    Cache::try_new(CacheConfig { policy, ..config })
}

/// Builder for creating cache instances.
#[derive(Debug, Clone, Default)]
pub struct CacheBuilder {
    config: CacheConfig,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity and default
    /// settings for everything else.
    pub fn new(capacity: usize) -> Self {
        Self {
            config: CacheConfig {
                capacity,
                ..CacheConfig::default()
            },
        }
    }

    pub fn from_config(config: CacheConfig) -> Self {
        Self { config }
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Largest key that will be cached.
    pub fn max_key(mut self, max_key: Key) -> Self {
        self.config.max_key = max_key;
        self
    }

    pub fn policy(mut self, policy: PolicyKind) -> Self {
        self.config.policy = policy;
        self
    }

    pub fn index(mut self, index: IndexKind) -> Self {
        self.config.index = index;
        self
    }

    pub fn debug(mut self, enabled: bool) -> Self {
        self.config.debug = enabled;
        self
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Build a cache, reporting invalid configuration or allocation failure.
    ///
    /// # Type Parameters
    ///
    /// - `C`: provider context, may be unsized (`[T]`, `str`)
    /// - `V`: provider value; `Clone` is needed to use the module
    pub fn try_build<C: ?Sized, V>(self) -> Result<Cache<C, V>, CacheError> {
        Cache::try_new(self.config)
    }

    /// Build a cache.
    ///
    /// # Panics
    ///
    /// If [`try_build`](Self::try_build) would fail: zero capacity, a dense
    /// index over `usize::MAX` keys, or failed allocation.
    ///
    /// # Example
    ///
    /// ```rust
    /// use memocache::builder::CacheBuilder;
    /// use memocache::PolicyKind;
    ///
    /// let fifo = CacheBuilder::new(100).build::<(), u64>();
    /// let lru = CacheBuilder::new(100).policy(PolicyKind::Lru).build::<str, String>();
    /// ```
    pub fn build<C: ?Sized, V>(self) -> Cache<C, V> {
        match self.try_build() {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }
}
