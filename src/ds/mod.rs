//! Fixed-size building blocks shared by the cache store and the policies.

pub mod key_index;
pub mod slots;

pub use key_index::KeySlotIndex;
pub use slots::{SlotArray, SlotId};

/// External cache key: a non-negative integer bounded by the configured
/// `max_key`.
pub type Key = usize;
