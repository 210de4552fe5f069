//! Cache configuration.
//!
//! | Field      | Type         | Default   | Description                          |
//! |------------|--------------|-----------|--------------------------------------|
//! | `capacity` | `usize`      | 50        | Number of slots (maximum entries)    |
//! | `max_key`  | `Key`        | 100 000   | Largest key that is ever cached      |
//! | `policy`   | `PolicyKind` | `Fifo`    | Eviction policy                      |
//! | `index`    | `IndexKind`  | `Dense`   | Key → slot index backing             |
//! | `debug`    | `bool`       | false     | Emit per-operation `tracing` events  |
//!
//! ## Example
//!
//! ```
//! use memocache::config::{CacheConfig, IndexKind, PolicyKind};
//!
//! let config = CacheConfig {
//!     capacity: 8,
//!     policy: "lru".parse().unwrap(),
//!     index: IndexKind::Sparse,
//!     ..CacheConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! assert_eq!(config.policy, PolicyKind::Lru);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::ds::Key;
use crate::error::ConfigError;

/// Slot count used when none is configured.
pub const DEFAULT_CAPACITY: usize = 50;

/// Key bound used when none is configured.
pub const DEFAULT_MAX_KEY: Key = 100_000;

/// Available eviction policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PolicyKind {
    /// First In, First Out: evict in strict insertion order.
    #[default]
    Fifo,
    /// Least Recently Used: evict the entry untouched for the longest time.
    Lru,
}

impl PolicyKind {
    /// All policies, in registry order.
    pub const ALL: [PolicyKind; 2] = [PolicyKind::Fifo, PolicyKind::Lru];

    /// Short, lowercase name of the policy.
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Fifo => "fifo",
            PolicyKind::Lru => "lru",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    /// Accepts the short names and the long module names, ignoring case,
    /// surrounding whitespace and `-` vs `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "fifo" | "first_in_first_out" => Ok(PolicyKind::Fifo),
            "lru" | "least_recently_used" => Ok(PolicyKind::Lru),
            _ => Err(ConfigError::new(format!("unknown eviction policy `{}`", s))),
        }
    }
}

/// Backing structure of the key → slot index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IndexKind {
    /// One row per key in `0..=max_key`. O(1) with no hashing, memory
    /// proportional to the key domain.
    #[default]
    Dense,
    /// Hash map holding only live keys. Memory proportional to capacity.
    Sparse,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexKind::Dense => "dense",
            IndexKind::Sparse => "sparse",
        })
    }
}

impl FromStr for IndexKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" => Ok(IndexKind::Dense),
            "sparse" => Ok(IndexKind::Sparse),
            _ => Err(ConfigError::new(format!("unknown index kind `{}`", s))),
        }
    }
}

/// Configuration for a cache module.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CacheConfig {
    pub capacity: usize,
    pub max_key: Key,
    pub policy: PolicyKind,
    pub index: IndexKind,
    pub debug: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_key: DEFAULT_MAX_KEY,
            policy: PolicyKind::default(),
            index: IndexKind::default(),
            debug: false,
        }
    }
}

impl CacheConfig {
    /// Checks the parameters without allocating anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::new("capacity must be > 0"));
        }
        if self.index == IndexKind::Dense && self.max_key == Key::MAX {
            return Err(ConfigError::new(
                "max_key must be < usize::MAX for a dense index",
            ));
        }
        Ok(())
    }
}
