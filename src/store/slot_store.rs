//! Fixed-capacity cache store.
//!
//! [`CacheStore`] owns every cached value and keeps three structures in step:
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                        CacheStore<V, P>                              │
//!   │                                                                      │
//!   │   index: KeySlotIndex          slots: SlotArray<CacheEntry<V>>       │
//!   │   ┌──────┬──────┐              ┌─────────────────────────┐           │
//!   │   │ key  │ slot │──────────────▶ 0: CacheEntry{ 12, v }  │           │
//!   │   │  12  │  0   │              │ 1: CacheEntry{  3, v }  │           │
//!   │   │   3  │  1   │              │ 2: -                    │           │
//!   │   └──────┴──────┘              └─────────────────────────┘           │
//!   │                                                                      │
//!   │   policy: P (FifoPolicy | LruPolicy) ── tracks slots, picks victims  │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Insert Flow
//!
//! ```text
//!   insert(key, value)
//!        │
//!        ├── key > max_key ──────────────▶ Bypassed(value)   (nothing stored)
//!        ├── key live ───────────────────▶ replace value in place, on_access
//!        ├── free slot left ─────────────▶ fill it, bind, on_insert
//!        └── full ── choose_reclaim_slot ▶ overwrite slot, unbind old key,
//!                                          bind new key, on_insert,
//!                                          Evicted{ old key, old value }
//! ```
//!
//! The outgoing value is only released after the incoming entry is in its
//! slot, and it is handed back in the [`InsertOutcome`] rather than dropped
//! in place.

use std::fmt;

use tracing::debug;

use crate::config::{CacheConfig, IndexKind};
use crate::ds::{Key, KeySlotIndex, SlotArray, SlotId};
use crate::error::{CacheError, InvariantError};
use crate::policy::EvictionPolicy;
use crate::traits::ReadOnlyCache;

/// A cached `(key, value)` pair occupying one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<V> {
    key: Key,
    value: V,
}

impl<V> CacheEntry<V> {
    pub fn key(&self) -> Key {
        self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}

/// What [`CacheStore::insert`] did with the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome<V> {
    /// Stored in a previously unused slot.
    Stored { slot: SlotId },
    /// Stored in a reclaimed slot; the previous occupant is returned.
    Evicted { slot: SlotId, key: Key, value: V },
    /// The key was already cached; its old value is returned.
    Replaced { slot: SlotId, previous: V },
    /// The key is outside the key domain; the value is returned unstored.
    Bypassed(V),
}

impl<V> InsertOutcome<V> {
    /// Slot the value now lives in, or `None` if it was not stored.
    pub fn slot(&self) -> Option<SlotId> {
        match self {
            InsertOutcome::Stored { slot }
            | InsertOutcome::Evicted { slot, .. }
            | InsertOutcome::Replaced { slot, .. } => Some(*slot),
            InsertOutcome::Bypassed(_) => None,
        }
    }

    /// Key of the entry this insert pushed out, if any.
    pub fn evicted_key(&self) -> Option<Key> {
        match self {
            InsertOutcome::Evicted { key, .. } => Some(*key),
            _ => None,
        }
    }

    pub fn is_stored(&self) -> bool {
        self.slot().is_some()
    }
}

/// Fixed-capacity, bounded-key store driven by an [`EvictionPolicy`].
///
/// # Example
///
/// ```
/// use memocache::config::CacheConfig;
/// use memocache::policy::FifoPolicy;
/// use memocache::store::CacheStore;
///
/// let config = CacheConfig { capacity: 3, ..CacheConfig::default() };
/// let mut store: CacheStore<u64, FifoPolicy> = CacheStore::try_new(&config).unwrap();
///
/// for key in 1..=4 {
///     store.insert(key, key as u64 * 10);
/// }
/// assert_eq!(store.lookup(1), None); // first in, first out
/// assert_eq!(store.lookup(4), Some(&40));
/// ```
pub struct CacheStore<V, P> {
    slots: SlotArray<CacheEntry<V>>,
    index: KeySlotIndex,
    policy: P,
    debug: bool,
}

impl<V, P> CacheStore<V, P>
where
    P: EvictionPolicy,
{
    /// Validates `config` and allocates all backing storage.
    ///
    /// `config.policy` is ignored; the policy is the type parameter `P`.
    pub fn try_new(config: &CacheConfig) -> Result<Self, CacheError> {
        config.validate()?;
        let slots = SlotArray::try_with_capacity(config.capacity)?;
        let index = KeySlotIndex::try_new(config.index, config.max_key, config.capacity)?;
        let policy = P::try_with_capacity(config.capacity)?;
        Ok(Self {
            slots,
            index,
            policy,
            debug: config.debug,
        })
    }

    /// Returns a borrow of the value cached under `key` and records the
    /// access with the policy.
    ///
    /// Keys outside the domain and uncached keys are `None`.
    pub fn lookup(&mut self, key: Key) -> Option<&V> {
        let slot = self.index.slot_of(key)?;
        self.policy.on_access(slot);
        if self.debug {
            debug!(key, slot = slot.index(), "lookup hit");
        }
        self.slots.get(slot).map(|entry| &entry.value)
    }

    /// Returns the value cached under `key` without touching the policy.
    pub fn peek(&self, key: Key) -> Option<&V> {
        let slot = self.index.slot_of(key)?;
        self.slots.get(slot).map(|entry| &entry.value)
    }

    /// Caches `value` under `key`, reclaiming a slot if the store is full.
    pub fn insert(&mut self, key: Key, value: V) -> InsertOutcome<V> {
        if !self.index.in_domain(key) {
            if self.debug {
                debug!(key, max_key = self.index.max_key(), "insert bypassed");
            }
            return InsertOutcome::Bypassed(value);
        }

        if let Some((slot, entry)) = self
            .index
            .slot_of(key)
            .and_then(|slot| self.slots.get_mut(slot).map(|entry| (slot, entry)))
        {
            let previous = std::mem::replace(&mut entry.value, value);
            self.policy.on_access(slot);
            if self.debug {
                debug!(key, slot = slot.index(), "insert replaced value");
            }
            return InsertOutcome::Replaced { slot, previous };
        }

        match self.slots.push(CacheEntry { key, value }) {
            Ok(slot) => {
                self.index.bind(key, slot);
                self.policy.on_insert(slot);
                if self.debug {
                    debug!(key, slot = slot.index(), "insert");
                }
                InsertOutcome::Stored { slot }
            },
            Err(entry) => self.reclaim(entry),
        }
    }

    fn reclaim(&mut self, entry: CacheEntry<V>) -> InsertOutcome<V> {
        let Some(slot) = self.policy.choose_reclaim_slot() else {
            return InsertOutcome::Bypassed(entry.value);
        };
        let key = entry.key;
        match self.slots.replace(slot, entry) {
            Ok(evicted) => {
                self.index.unbind(evicted.key);
                self.index.bind(key, slot);
                self.policy.on_insert(slot);
                if self.debug {
                    debug!(key, slot = slot.index(), evicted = evicted.key, "insert");
                }
                InsertOutcome::Evicted {
                    slot,
                    key: evicted.key,
                    value: evicted.value,
                }
            },
            Err(entry) => {
                debug_assert!(false, "policy chose unoccupied slot {}", slot.index());
                InsertOutcome::Bypassed(entry.value)
            },
        }
    }

    pub fn contains(&self, key: Key) -> bool {
        self.index.present(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.is_full()
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn max_key(&self) -> Key {
        self.index.max_key()
    }

    pub fn index_kind(&self) -> IndexKind {
        self.index.kind()
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Drops every cached value and resets index and policy bookkeeping.
    pub fn clear(&mut self) {
        if self.debug {
            let keys: Vec<Key> = self.slots.iter().map(|(_, entry)| entry.key).collect();
            debug!(?keys, "clear");
        }
        self.slots.clear();
        self.index.clear();
        self.policy.clear();
    }

    /// Live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Key, &V)> {
        self.slots.iter().map(|(_, entry)| (entry.key, &entry.value))
    }

    /// Live entries with their slots, in slot order.
    pub fn entries(&self) -> impl Iterator<Item = (SlotId, &CacheEntry<V>)> {
        self.slots.iter()
    }

    /// Verifies that the index and the slot array describe the same set of
    /// entries and that a full store has an occupied eviction candidate.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.slots.len() > self.slots.capacity() {
            return Err(InvariantError::new(format!(
                "{} live entries exceed capacity {}",
                self.slots.len(),
                self.slots.capacity()
            )));
        }
        if self.index.len() != self.slots.len() {
            return Err(InvariantError::new(format!(
                "index binds {} keys but {} slots are occupied",
                self.index.len(),
                self.slots.len()
            )));
        }
        for (slot, entry) in self.slots.iter() {
            if self.index.slot_of(entry.key) != Some(slot) {
                return Err(InvariantError::new(format!(
                    "slot {} holds key {} but index maps it to {:?}",
                    slot.index(),
                    entry.key,
                    self.index.slot_of(entry.key)
                )));
            }
        }
        for (key, slot) in self.index.iter() {
            let held = self.slots.get(slot).map(CacheEntry::key);
            if held != Some(key) {
                return Err(InvariantError::new(format!(
                    "index maps key {} to slot {} which holds {:?}",
                    key,
                    slot.index(),
                    held
                )));
            }
        }
        if self.slots.is_full() {
            match self.policy.choose_reclaim_slot() {
                Some(slot) if self.slots.contains(slot) => {},
                other => {
                    return Err(InvariantError::new(format!(
                        "store is full but eviction candidate is {:?}",
                        other
                    )));
                },
            }
        }
        Ok(())
    }
}

impl<V, P> ReadOnlyCache for CacheStore<V, P>
where
    P: EvictionPolicy,
{
    fn contains(&self, key: Key) -> bool {
        CacheStore::contains(self, key)
    }

    fn len(&self) -> usize {
        CacheStore::len(self)
    }

    fn capacity(&self) -> usize {
        CacheStore::capacity(self)
    }
}

impl<V, P> fmt::Debug for CacheStore<V, P>
where
    P: EvictionPolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheStore")
            .field("policy", &self.policy.kind())
            .field("capacity", &self.slots.capacity())
            .field("len", &self.slots.len())
            .field("max_key", &self.index.max_key())
            .field("index", &self.index.kind())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{FifoPolicy, LruPolicy};

    fn config(capacity: usize, max_key: Key, index: IndexKind) -> CacheConfig {
        CacheConfig {
            capacity,
            max_key,
            index,
            ..CacheConfig::default()
        }
    }

    fn fifo(capacity: usize) -> CacheStore<String, FifoPolicy> {
        CacheStore::try_new(&config(capacity, 1_000, IndexKind::Dense)).unwrap()
    }

    fn lru(capacity: usize) -> CacheStore<String, LruPolicy> {
        CacheStore::try_new(&config(capacity, 1_000, IndexKind::Dense)).unwrap()
    }

    fn value(key: Key) -> String {
        format!("v{}", key)
    }

    // ==============================================
    // Basic Operations
    // ==============================================

    mod basic_operations {
        use super::*;

        #[test]
        fn new_store_is_empty() {
            let store = fifo(4);
            assert!(store.is_empty());
            assert_eq!(store.len(), 0);
            assert_eq!(store.capacity(), 4);
            assert_eq!(store.max_key(), 1_000);
            assert!(store.check_invariants().is_ok());
        }

        #[test]
        fn insert_then_lookup_round_trips() {
            let mut store = lru(4);
            assert_eq!(store.insert(7, value(7)), InsertOutcome::Stored { slot: SlotId(0) });
            assert_eq!(store.lookup(7), Some(&value(7)));
        }

        #[test]
        fn repeated_lookups_return_same_value() {
            let mut store = fifo(2);
            store.insert(3, value(3));
            let first = store.lookup(3).cloned();
            let second = store.lookup(3).cloned();
            assert_eq!(first, second);
            assert_eq!(store.len(), 1);
        }

        #[test]
        fn missing_key_is_absent() {
            let mut store = fifo(2);
            assert_eq!(store.lookup(5), None);
            assert!(!store.contains(5));
        }

        #[test]
        fn key_zero_is_cacheable() {
            let mut store = lru(2);
            store.insert(0, value(0));
            assert_eq!(store.lookup(0), Some(&value(0)));
        }

        #[test]
        fn reinsert_replaces_in_place() {
            let mut store = fifo(2);
            store.insert(1, "old".to_string());
            let outcome = store.insert(1, "new".to_string());
            assert_eq!(
                outcome,
                InsertOutcome::Replaced {
                    slot: SlotId(0),
                    previous: "old".to_string()
                }
            );
            assert_eq!(store.len(), 1);
            assert_eq!(store.peek(1), Some(&"new".to_string()));
            assert!(store.check_invariants().is_ok());
        }

        #[test]
        fn clear_releases_everything() {
            let mut store = lru(3);
            for key in 0..3 {
                store.insert(key, value(key));
            }
            store.clear();
            assert!(store.is_empty());
            assert!(!store.contains(0));
            assert_eq!(store.policy().tracked(), 0);
            assert_eq!(store.insert(9, value(9)).slot(), Some(SlotId(0)));
            assert!(store.check_invariants().is_ok());
        }

        #[test]
        fn iter_lists_live_entries_in_slot_order() {
            let mut store = fifo(3);
            store.insert(30, value(30));
            store.insert(10, value(10));
            let keys: Vec<_> = store.iter().map(|(key, _)| key).collect();
            assert_eq!(keys, vec![30, 10]);
        }
    }

    // ==============================================
    // Key Domain
    // ==============================================

    mod key_domain {
        use super::*;

        #[test]
        fn out_of_range_insert_is_bypassed() {
            for kind in [IndexKind::Dense, IndexKind::Sparse] {
                let mut store: CacheStore<String, FifoPolicy> =
                    CacheStore::try_new(&config(2, 10, kind)).unwrap();
                let outcome = store.insert(11, value(11));
                assert_eq!(outcome, InsertOutcome::Bypassed(value(11)));
                assert!(store.is_empty());
                assert_eq!(store.policy().tail(), SlotId(0));
                assert_eq!(store.lookup(11), None);
            }
        }

        #[test]
        fn max_key_itself_is_cached() {
            let mut store: CacheStore<String, LruPolicy> =
                CacheStore::try_new(&config(2, 10, IndexKind::Dense)).unwrap();
            assert!(store.insert(10, value(10)).is_stored());
            assert_eq!(store.lookup(10), Some(&value(10)));
        }
    }

    // ==============================================
    // FIFO Eviction
    // ==============================================

    mod fifo_eviction {
        use super::*;

        #[test]
        fn capacity_three_evicts_first_inserted() {
            let mut store = fifo(3);
            for key in 1..=3 {
                store.insert(key, value(key));
            }
            let outcome = store.insert(4, value(4));
            assert_eq!(outcome.evicted_key(), Some(1));
            assert_eq!(store.lookup(1), None);
            assert_eq!(store.lookup(4), Some(&value(4)));
        }

        #[test]
        fn lookups_do_not_change_eviction_order() {
            let mut store = fifo(3);
            for key in 1..=3 {
                store.insert(key, value(key));
            }
            store.lookup(1);
            store.lookup(1);
            let evicted: Vec<_> = (4..=6)
                .filter_map(|key| store.insert(key, value(key)).evicted_key())
                .collect();
            assert_eq!(evicted, vec![1, 2, 3]);
        }

        #[test]
        fn evicted_value_is_handed_back() {
            let mut store = fifo(1);
            store.insert(1, value(1));
            match store.insert(2, value(2)) {
                InsertOutcome::Evicted { slot, key, value: old } => {
                    assert_eq!(slot, SlotId(0));
                    assert_eq!(key, 1);
                    assert_eq!(old, value(1));
                },
                other => panic!("expected eviction, got {:?}", other),
            }
        }
    }

    // ==============================================
    // LRU Eviction
    // ==============================================

    mod lru_eviction {
        use super::*;

        #[test]
        fn capacity_two_keeps_touched_key() {
            let mut store = lru(2);
            store.insert(1, value(1));
            store.insert(2, value(2));
            store.lookup(1);
            assert_eq!(store.insert(3, value(3)).evicted_key(), Some(2));
            assert_eq!(store.lookup(2), None);
            assert!(store.contains(1));
        }

        #[test]
        fn read_key_survives_new_insert() {
            let mut store = lru(3);
            for key in [10, 20, 30] {
                store.insert(key, value(key));
            }
            store.lookup(10);
            let evicted = store.insert(40, value(40)).evicted_key();
            assert_eq!(evicted, Some(20));
            assert!(store.contains(10));
        }

        #[test]
        fn peek_does_not_refresh_recency() {
            let mut store = lru(2);
            store.insert(1, value(1));
            store.insert(2, value(2));
            assert_eq!(store.peek(1), Some(&value(1)));
            assert_eq!(store.insert(3, value(3)).evicted_key(), Some(1));
        }

        #[test]
        fn replacing_a_value_counts_as_access() {
            let mut store = lru(2);
            store.insert(1, value(1));
            store.insert(2, value(2));
            store.insert(1, "again".to_string());
            assert_eq!(store.insert(3, value(3)).evicted_key(), Some(2));
        }

        #[test]
        fn evicting_key_zero_unbinds_it() {
            let mut store = lru(2);
            store.insert(0, value(0));
            store.insert(1, value(1));
            store.lookup(1);
            assert_eq!(store.insert(2, value(2)).evicted_key(), Some(0));
            assert!(!store.contains(0));
            assert!(store.check_invariants().is_ok());
        }
    }

    #[test]
    fn debug_output_names_policy_and_sizes() {
        let store = lru(4);
        let dbg = format!("{:?}", store);
        assert!(dbg.contains("CacheStore"));
        assert!(dbg.contains("Lru"));
        assert!(dbg.contains("capacity: 4"));
    }

    #[test]
    fn zero_capacity_config_is_rejected() {
        let err = CacheStore::<String, FifoPolicy>::try_new(&config(0, 10, IndexKind::Dense))
            .unwrap_err();
        assert!(matches!(err, CacheError::Config(_)));
    }
}
