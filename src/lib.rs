//! memocache: bounded-key memoization caches with swappable FIFO and LRU
//! eviction modules.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod builder;
pub mod config;
pub mod decorator;
pub mod ds;
pub mod error;
pub mod metrics;
pub mod module;
pub mod policy;
pub mod prelude;
pub mod store;
pub mod traits;

pub use crate::builder::{Cache, CacheBuilder, load_module};
pub use crate::config::{CacheConfig, IndexKind, PolicyKind};
pub use crate::decorator::{CachingProvider, Provider};
pub use crate::ds::Key;
pub use crate::error::CacheError;
pub use crate::module::{FifoCache, LruCache, MemoCache};
