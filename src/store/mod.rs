//! Value storage.
//!
//! The store owns keys and values; the eviction policy only sees slot
//! indices. This keeps FIFO and LRU interchangeable behind one store type.

pub mod slot_store;

pub use slot_store::{CacheEntry, CacheStore, InsertOutcome};
