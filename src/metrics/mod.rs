//! Request statistics, plus snapshot and export plumbing behind the
//! `metrics` feature.
//!
//! ```text
//!   CachingProvider::call ──▶ StatisticsCollector ──snapshot──▶ CacheStatistics
//!                                                                   │
//!                                        (feature = "metrics")      ▼
//!                                        MetricsExporter ──▶ PrometheusTextExporter
//! ```

pub mod stats;

#[cfg(feature = "metrics")]
pub mod exporter;
#[cfg(feature = "metrics")]
pub mod traits;

pub use stats::{CacheStat, CacheStatistics, StatLabel, StatisticsCollector};
