//! FIFO (First In, First Out) eviction.
//!
//! The slot array is treated as a circular queue. A single tail cursor points
//! at the slot the next insert goes to; once the array is full that is also
//! the oldest resident entry, so eviction order is strict insertion order and
//! reads never change it.
//!
//! ```text
//!   capacity = 4, inserts: 1 2 3 4 5 6
//!
//!   after 1..4        after 5           after 6
//!   ┌───┬───┬───┬───┐ ┌───┬───┬───┬───┐ ┌───┬───┬───┬───┐
//!   │ 1 │ 2 │ 3 │ 4 │ │ 5 │ 2 │ 3 │ 4 │ │ 5 │ 6 │ 3 │ 4 │
//!   └───┴───┴───┴───┘ └───┴───┴───┴───┘ └───┴───┴───┴───┘
//!     ▲                     ▲                     ▲
//!    tail                  tail                  tail
//! ```
//!
//! | Operation             | Time | Notes                           |
//! |-----------------------|------|---------------------------------|
//! | `choose_reclaim_slot` | O(1) | Returns the tail                |
//! | `on_insert`           | O(1) | Advances the tail circularly    |
//! | `on_access`           | O(1) | No-op                           |

use crate::config::PolicyKind;
use crate::ds::SlotId;
use crate::error::{CacheError, ConfigError};
use crate::policy::EvictionPolicy;

/// Tail cursor over a circular slot array.
///
/// # Example
///
/// ```
/// use memocache::policy::{EvictionPolicy, FifoPolicy};
///
/// let mut fifo = FifoPolicy::try_with_capacity(2).unwrap();
/// let first = fifo.choose_reclaim_slot().unwrap();
/// fifo.on_insert(first);
/// let second = fifo.choose_reclaim_slot().unwrap();
/// fifo.on_insert(second);
///
/// // Reads don't matter; the first slot written is reclaimed first.
/// fifo.on_access(first);
/// assert_eq!(fifo.choose_reclaim_slot(), Some(first));
/// ```
#[derive(Debug, Clone)]
pub struct FifoPolicy {
    tail: usize,
    capacity: usize,
}

impl FifoPolicy {
    /// Current position of the tail cursor.
    pub fn tail(&self) -> SlotId {
        SlotId(self.tail)
    }
}

impl EvictionPolicy for FifoPolicy {
    fn try_with_capacity(capacity: usize) -> Result<Self, CacheError> {
        if capacity == 0 {
            return Err(CacheError::Config(ConfigError::new("capacity must be > 0")));
        }
        Ok(Self { tail: 0, capacity })
    }

    #[inline]
    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }

    #[inline]
    fn choose_reclaim_slot(&self) -> Option<SlotId> {
        (self.capacity > 0).then_some(SlotId(self.tail))
    }

    #[inline]
    fn on_insert(&mut self, slot: SlotId) {
        debug_assert_eq!(slot.0, self.tail, "FIFO inserts must land on the tail");
        self.tail = (self.tail + 1) % self.capacity;
    }

    #[inline]
    fn on_access(&mut self, _slot: SlotId) {}

    fn clear(&mut self) {
        self.tail = 0;
    }
}
