//! LRU (Least Recently Used) eviction with per-slot recency counters.
//!
//! Every occupied slot carries a "time since last access" counter. Each
//! access (a hit, or the touch that follows an insert) resets the accessed
//! slot to 0 and ages every other occupied slot by one. The victim is the
//! occupied slot with the largest counter.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                         LruPolicy                                │
//!   │                                                                  │
//!   │   ages: Vec<Option<RecencyCounter>>   (None = slot never used)   │
//!   │   victim: Option<SlotId>              (cached max, refreshed on  │
//!   │                                        every access)             │
//!   │                                                                  │
//!   │   slot:    0     1     2     3                                   │
//!   │   age:    [2]   [0]   [5]   [1]                                  │
//!   │                        ▲                                         │
//!   │                      victim                                      │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Access Flow
//!
//! ```text
//!   on_access(slot 0):
//!     slot 0: 2 → 0        (accessed: reset)
//!     slot 1: 0 → 1        (others: saturating +1)
//!     slot 2: 5 → 6  ◀──── new victim (first maximum in scan order)
//!     slot 3: 1 → 2
//! ```
//!
//! Counters saturate at [`RecencyCounter::MAX`] instead of wrapping, so a
//! long-lived, never-read entry cannot roll over to look freshly used. Two
//! saturated slots tie; the lower slot index wins.
//!
//! The victim is held as `Option<SlotId>`. Slot and key `0` are ordinary
//! values, never a "no candidate" marker.
//!
//! ## Performance Characteristics
//!
//! | Operation             | Time        | Notes                          |
//! |-----------------------|-------------|--------------------------------|
//! | `choose_reclaim_slot` | O(1)        | Cached from the last access    |
//! | `on_insert`           | O(capacity) | Starts tracking, then accesses |
//! | `on_access`           | O(capacity) | Ages every occupied slot       |

use tracing::trace;

use crate::config::PolicyKind;
use crate::ds::SlotId;
use crate::error::CacheError;
use crate::policy::EvictionPolicy;

/// Per-slot time-since-last-access counter.
pub type RecencyCounter = u32;

/// Recency-counter LRU bookkeeping.
///
/// # Example
///
/// ```
/// use memocache::config::CacheConfig;
/// use memocache::policy::LruPolicy;
/// use memocache::store::CacheStore;
///
/// let config = CacheConfig { capacity: 2, ..CacheConfig::default() };
/// let mut store: CacheStore<&str, LruPolicy> = CacheStore::try_new(&config).unwrap();
/// store.insert(1, "a");
/// store.insert(2, "b");
///
/// // Reading 1 leaves 2 as the least recently used entry.
/// assert_eq!(store.lookup(1), Some(&"a"));
/// store.insert(3, "c");
/// assert!(store.contains(1));
/// assert!(!store.contains(2));
/// ```
#[derive(Debug, Clone)]
pub struct LruPolicy {
    ages: Vec<Option<RecencyCounter>>,
    victim: Option<SlotId>,
}

impl LruPolicy {
    /// Counter value of `slot`, or `None` if it has never been filled.
    pub fn recency(&self, slot: SlotId) -> Option<RecencyCounter> {
        self.ages.get(slot.0).copied().flatten()
    }

    /// Number of slots currently tracked.
    pub fn tracked(&self) -> usize {
        self.ages.iter().filter(|age| age.is_some()).count()
    }

    /// Resets `accessed`, ages everything else and re-derives the victim in a
    /// single scan.
    fn touch(&mut self, accessed: SlotId) {
        let mut oldest: Option<(usize, RecencyCounter)> = None;

        for (idx, age) in self.ages.iter_mut().enumerate() {
            let Some(age) = age else {
                continue;
            };
            if idx == accessed.0 {
                *age = 0;
            } else {
                *age = age.saturating_add(1);
            }
            if oldest.is_none_or(|(_, max)| *age > max) {
                oldest = Some((idx, *age));
            }
        }

        self.victim = oldest.map(|(idx, _)| SlotId(idx));
        trace!(slot = accessed.0, victim = ?self.victim, "lru touch");

        #[cfg(debug_assertions)]
        self.validate_invariants();
    }

    /// Checks that the cached victim really is the first maximum.
    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        let expected = self
            .ages
            .iter()
            .enumerate()
            .filter_map(|(idx, age)| age.map(|age| (idx, age)))
            .fold(None, |best: Option<(usize, RecencyCounter)>, (idx, age)| {
                match best {
                    Some((_, max)) if max >= age => best,
                    _ => Some((idx, age)),
                }
            })
            .map(|(idx, _)| SlotId(idx));
        debug_assert_eq!(self.victim, expected, "cached LRU victim is stale");
    }
}

impl EvictionPolicy for LruPolicy {
    fn try_with_capacity(capacity: usize) -> Result<Self, CacheError> {
        let mut ages = Vec::new();
        ages.try_reserve_exact(capacity)
            .map_err(|_| CacheError::allocation("recency counters", capacity))?;
        ages.resize(capacity, None);
        Ok(Self { ages, victim: None })
    }

    #[inline]
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }

    #[inline]
    fn choose_reclaim_slot(&self) -> Option<SlotId> {
        self.victim
    }

    fn on_insert(&mut self, slot: SlotId) {
        self.ages[slot.0] = Some(0);
        self.touch(slot);
    }

    fn on_access(&mut self, slot: SlotId) {
        debug_assert!(self.recency(slot).is_some(), "access to untracked slot");
        self.touch(slot);
    }

    fn clear(&mut self) {
        self.ages.fill(None);
        self.victim = None;
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: a slot accessed after another occupied slot is never
        /// chosen over it.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_recently_accessed_slot_is_never_victim(
            capacity in 2usize..12,
            accesses in prop::collection::vec(any::<prop::sample::Index>(), 1..64)
        ) {
            let mut lru = LruPolicy::try_with_capacity(capacity).unwrap();
            for idx in 0..capacity {
                lru.on_insert(SlotId(idx));
            }
            for access in accesses {
                let slot = SlotId(access.index(capacity));
                lru.on_access(slot);
                prop_assert_ne!(lru.choose_reclaim_slot(), Some(slot));
                prop_assert_eq!(lru.recency(slot), Some(0));
            }
        }

        /// Property: the victim carries the maximum counter.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_victim_has_max_counter(
            capacity in 1usize..12,
            accesses in prop::collection::vec(any::<prop::sample::Index>(), 0..64)
        ) {
            let mut lru = LruPolicy::try_with_capacity(capacity).unwrap();
            for idx in 0..capacity {
                lru.on_insert(SlotId(idx));
            }
            for access in accesses {
                lru.on_access(SlotId(access.index(capacity)));
            }
            let victim = lru.choose_reclaim_slot().unwrap();
            let max = (0..capacity).filter_map(|i| lru.recency(SlotId(i))).max();
            prop_assert_eq!(lru.recency(victim), max);
        }
    }
}
