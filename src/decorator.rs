//! Caching wrapper around a provider function.
//!
//! A provider has the shape `Fn(&C, Key) -> V`. [`CachingProvider`] exposes
//! the same shape through [`CachingProvider::call`]:
//!
//! ```text
//!   call(ctx, key)
//!        │
//!        ├── cache.lookup(key) hit ──▶ hits += 1, return clone of cached value
//!        │
//!        └── miss ──▶ misses += 1
//!                     value = downstream(ctx, key)
//!                     cache.insert(key, value.clone())
//!                     return value
//! ```
//!
//! The provider holds `&mut` to its cache for as long as it lives, so a
//! downstream that tries to call back into the same cache does not compile.

use std::fmt;

use crate::ds::Key;
use crate::metrics::StatisticsCollector;

/// An owned provider function.
pub type Provider<C, V> = Box<dyn Fn(&C, Key) -> V>;

/// What a [`CachingProvider`] needs from the cache behind it.
pub trait MemoStore<V> {
    /// Cached value for `key`, recording the access with the eviction policy.
    fn lookup(&mut self, key: Key) -> Option<&V>;

    /// Caches `value` under `key`. Keys outside the domain are dropped.
    fn insert(&mut self, key: Key, value: V);

    fn statistics_mut(&mut self) -> &mut StatisticsCollector;
}

/// A provider that consults a cache before delegating downstream.
pub struct CachingProvider<'a, C: ?Sized, V> {
    cache: &'a mut dyn MemoStore<V>,
    downstream: &'a dyn Fn(&C, Key) -> V,
}

impl<'a, C: ?Sized, V: Clone> CachingProvider<'a, C, V> {
    pub fn new(cache: &'a mut dyn MemoStore<V>, downstream: &'a dyn Fn(&C, Key) -> V) -> Self {
        Self { cache, downstream }
    }

    /// Returns the value for `key`, from cache if possible.
    ///
    /// The result is always what `downstream(context, key)` returned the
    /// first time `key` was requested while it stayed cached.
    pub fn call(&mut self, context: &C, key: Key) -> V {
        if let Some(value) = self.cache.lookup(key).cloned() {
            self.cache.statistics_mut().record_hit();
            return value;
        }
        self.cache.statistics_mut().record_miss();
        let value = (self.downstream)(context, key);
        self.cache.insert(key, value.clone());
        value
    }

    /// Calls the downstream provider directly, bypassing cache and counters.
    pub fn call_uncached(&self, context: &C, key: Key) -> V {
        (self.downstream)(context, key)
    }
}

impl<C: ?Sized, V> fmt::Debug for CachingProvider<'_, C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingProvider").finish_non_exhaustive()
    }
}
