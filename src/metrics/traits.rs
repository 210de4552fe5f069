//! Snapshot and export traits.
//!
//! Recording lives in [`StatisticsCollector`](crate::metrics::StatisticsCollector);
//! these traits only cover reading counters out and publishing them.
//!
//! ```text
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

use std::io;

/// Produces a point-in-time copy of a cache's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publishes a snapshot to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S) -> io::Result<()>;
}
