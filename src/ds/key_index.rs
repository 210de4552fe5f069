//! Key → slot mapping.
//!
//! The slot array already records which key each slot holds, so this index
//! only needs the forward direction; together they form a bijection over the
//! live entries:
//!
//! ```text
//!   KeySlotIndex (Dense, max_key = 9)         SlotArray
//!   ┌─────┬──────────┐                        ┌──────────────┐
//!   │ key │ slot     │                        │ 0: (key 4)   │
//!   ├─────┼──────────┤                        │ 1: (key 7)   │
//!   │  0  │ absent   │                        │ 2: (key 1)   │
//!   │  1  │ 2        │ ─────────────────────▶ └──────────────┘
//!   │  4  │ 0        │
//!   │  7  │ 1        │
//!   │ ... │ absent   │
//!   └─────┴──────────┘
//! ```
//!
//! `Dense` keeps one row per key in `0..=max_key`, as a flat array indexed
//! directly by key. `Sparse` keeps only live keys in an `FxHashMap`. Both
//! report out-of-range keys as absent.

use rustc_hash::FxHashMap;

use crate::config::IndexKind;
use crate::ds::{Key, SlotId};
use crate::error::CacheError;

#[derive(Debug)]
pub struct KeySlotIndex {
    max_key: Key,
    len: usize,
    backing: Backing,
}

#[derive(Debug)]
enum Backing {
    Dense(Vec<Option<SlotId>>),
    Sparse(FxHashMap<Key, SlotId>),
}

impl KeySlotIndex {
    /// Builds an empty index for keys in `0..=max_key`.
    ///
    /// A dense index reserves all `max_key + 1` rows up front; a sparse one
    /// reserves room for `capacity` live keys.
    pub fn try_new(kind: IndexKind, max_key: Key, capacity: usize) -> Result<Self, CacheError> {
        let backing = match kind {
            IndexKind::Dense => {
                let rows = max_key
                    .checked_add(1)
                    .ok_or_else(|| CacheError::allocation("key index rows", usize::MAX))?;
                let mut table = Vec::new();
                table
                    .try_reserve_exact(rows)
                    .map_err(|_| CacheError::allocation("key index rows", rows))?;
                table.resize(rows, None);
                Backing::Dense(table)
            },
            IndexKind::Sparse => {
                let mut map = FxHashMap::default();
                map.try_reserve(capacity)
                    .map_err(|_| CacheError::allocation("key index entries", capacity))?;
                Backing::Sparse(map)
            },
        };
        Ok(Self {
            max_key,
            len: 0,
            backing,
        })
    }

    pub fn kind(&self) -> IndexKind {
        match self.backing {
            Backing::Dense(_) => IndexKind::Dense,
            Backing::Sparse(_) => IndexKind::Sparse,
        }
    }

    pub fn max_key(&self) -> Key {
        self.max_key
    }

    /// Returns `true` if `key` is within `0..=max_key`.
    #[inline]
    pub fn in_domain(&self, key: Key) -> bool {
        key <= self.max_key
    }

    #[inline]
    pub fn present(&self, key: Key) -> bool {
        self.slot_of(key).is_some()
    }

    #[inline]
    pub fn slot_of(&self, key: Key) -> Option<SlotId> {
        if !self.in_domain(key) {
            return None;
        }
        match &self.backing {
            Backing::Dense(rows) => rows[key],
            Backing::Sparse(map) => map.get(&key).copied(),
        }
    }

    /// Maps `key` to `slot`, returning the slot it was previously bound to.
    ///
    /// The caller checks [`in_domain`](Self::in_domain) first.
    pub fn bind(&mut self, key: Key, slot: SlotId) -> Option<SlotId> {
        debug_assert!(self.in_domain(key), "key {} outside 0..={}", key, self.max_key);
        let previous = match &mut self.backing {
            Backing::Dense(rows) => rows[key].replace(slot),
            Backing::Sparse(map) => map.insert(key, slot),
        };
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Removes the mapping for `key`, returning the slot it pointed to.
    pub fn unbind(&mut self, key: Key) -> Option<SlotId> {
        if !self.in_domain(key) {
            return None;
        }
        let previous = match &mut self.backing {
            Backing::Dense(rows) => rows[key].take(),
            Backing::Sparse(map) => map.remove(&key),
        };
        if previous.is_some() {
            self.len -= 1;
        }
        previous
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Unbinds every key, keeping the allocation.
    pub fn clear(&mut self) {
        match &mut self.backing {
            Backing::Dense(rows) => rows.fill(None),
            Backing::Sparse(map) => map.clear(),
        }
        self.len = 0;
    }

    /// Every bound `(key, slot)` pair, in key order for a dense index and
    /// unspecified order for a sparse one.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (Key, SlotId)> + '_> {
        match &self.backing {
            Backing::Dense(rows) => Box::new(
                rows.iter()
                    .enumerate()
                    .filter_map(|(key, slot)| slot.map(|slot| (key, slot))),
            ),
            Backing::Sparse(map) => Box::new(map.iter().map(|(&key, &slot)| (key, slot))),
        }
    }
}
