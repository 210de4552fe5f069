//! Fixed-capacity slot array.
//!
//! Slots are handed out sequentially (`0, 1, 2, …`) until the array is full;
//! from then on the only way to store a value is to [`replace`](SlotArray::replace)
//! an occupied slot. Individual slots are never vacated, so the occupied
//! slots are always exactly `0..len`.
//!
//! ```text
//!   capacity = 5, len = 3
//!
//!   ┌─────┬─────┬─────┬─────┬─────┐
//!   │  A  │  B  │  C  │  -  │  -  │
//!   └─────┴─────┴─────┴─────┴─────┘
//!     0     1     2     ▲
//!                       └── next_free()
//! ```

use crate::error::CacheError;

/// Index of a storage slot, in `[0, capacity)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub struct SlotArray<T> {
    slots: Vec<Option<T>>,
    len: usize,
}

impl<T> SlotArray<T> {
    /// Allocates `capacity` empty slots, failing instead of aborting when
    /// the memory is not available.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, CacheError> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| CacheError::allocation("cache slots", capacity))?;
        slots.resize_with(capacity, || None);
        Ok(Self { slots, len: 0 })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// The slot the next [`push`](Self::push) will fill, if any remain.
    pub fn next_free(&self) -> Option<SlotId> {
        (!self.is_full()).then_some(SlotId(self.len))
    }

    /// Stores `value` in the next unused slot.
    ///
    /// Returns the value back when every slot is occupied.
    pub fn push(&mut self, value: T) -> Result<SlotId, T> {
        match self.next_free() {
            Some(id) => {
                self.slots[id.0] = Some(value);
                self.len += 1;
                Ok(id)
            },
            None => Err(value),
        }
    }

    /// Overwrites an occupied slot and hands back its previous value.
    ///
    /// The new value is in place before the old one is returned. Returns
    /// `Err(value)` if `id` does not name an occupied slot.
    pub fn replace(&mut self, id: SlotId, value: T) -> Result<T, T> {
        match self.get_mut(id) {
            Some(current) => Ok(std::mem::replace(current, value)),
            None => Err(value),
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    /// Drops every stored value; capacity is retained.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|value| (SlotId(idx), value)))
    }
}
