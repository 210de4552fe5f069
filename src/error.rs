//! Error types for the memocache library.
//!
//! ## Key Components
//!
//! - [`CacheError`]: Top-level error returned by fallible module and store
//!   operations (construction, `initialize`, module loading).
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (e.g. zero capacity, a dense index whose row count would overflow).
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` methods).
//!
//! A key outside the configured domain is *not* an error: it bypasses the
//! cache entirely. A full store is not an error either; it triggers eviction.
//!
//! ## Example Usage
//!
//! ```
//! use memocache::builder::CacheBuilder;
//! use memocache::error::CacheError;
//!
//! let err = CacheBuilder::new(0).try_build::<(), u64>().unwrap_err();
//! assert!(matches!(err, CacheError::Config(_)));
//! assert!(err.to_string().contains("capacity"));
//! ```

use thiserror::Error;

// ---------------------------------------------------------------------------
// CacheError
// ---------------------------------------------------------------------------

/// Errors surfaced by cache modules and stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The configuration failed validation.
    #[error("invalid cache configuration: {0}")]
    Config(#[from] ConfigError),

    /// Backing storage could not be reserved. Nothing was modified.
    #[error("failed to reserve {requested} {what}")]
    Allocation {
        /// Which structure was being reserved.
        what: &'static str,
        /// Number of elements requested.
        requested: usize,
    },

    /// No cache module is registered under the requested name.
    #[error("cache module `{0}` is not available")]
    ModuleUnavailable(String),
}

impl CacheError {
    pub(crate) fn allocation(what: &'static str, requested: usize) -> Self {
        Self::Allocation { what, requested }
    }
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by [`CacheStore::check_invariants`](crate::store::CacheStore::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`CacheConfig::validate`](crate::config::CacheConfig::validate)
/// and by builder `try_build()`. Carries a human-readable description of
/// which parameter failed validation.
///
/// # Example
///
/// ```
/// use memocache::config::CacheConfig;
///
/// let config = CacheConfig { capacity: 0, ..CacheConfig::default() };
/// let err = config.validate().unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
