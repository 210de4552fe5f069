//! Eviction policies.
//!
//! A policy never touches keys or values. It sees slot indices only, and
//! answers one question for the store: *which occupied slot should be
//! reclaimed next?* The store tells it about every insert and every access so
//! it can keep its bookkeeping current.
//!
//! ```text
//!   CacheStore                               EvictionPolicy
//!   ──────────                               ──────────────
//!   lookup(key) hit ──────── on_access(slot) ─────▶ update recency
//!   insert(key) fresh slot ─ on_insert(slot) ─────▶ start tracking slot
//!   insert(key) when full ── choose_reclaim_slot() ◀─ victim slot
//!                            on_insert(slot) ─────▶ restart tracking slot
//! ```
//!
//! | Policy        | Victim                         | Reads affect order |
//! |---------------|--------------------------------|--------------------|
//! | [`FifoPolicy`]| Oldest insertion (tail cursor) | No                 |
//! | [`LruPolicy`] | Highest time-since-access      | Yes                |

pub mod fifo;
pub mod lru;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

use std::fmt::Debug;

use crate::config::PolicyKind;
use crate::ds::SlotId;
use crate::error::CacheError;

/// Bookkeeping that decides which slot a full store reclaims.
///
/// Slots are filled in order `0, 1, 2, …` by the store; the policy is only
/// consulted for a victim once all `capacity` slots are occupied.
pub trait EvictionPolicy: Debug {
    /// Creates the policy's state for a store with `capacity` slots.
    fn try_with_capacity(capacity: usize) -> Result<Self, CacheError>
    where
        Self: Sized;

    /// Which policy this is.
    fn kind(&self) -> PolicyKind;

    /// The slot to overwrite when the store is full. Only consulted once
    /// every slot holds an entry; `None` means the policy has no candidate.
    fn choose_reclaim_slot(&self) -> Option<SlotId>;

    /// A new entry was stored in `slot` (fresh or reclaimed).
    fn on_insert(&mut self, slot: SlotId);

    /// The entry in `slot` was read, or its value replaced in place.
    fn on_access(&mut self, slot: SlotId);

    /// Forgets all tracked slots.
    fn clear(&mut self);
}
