pub use crate::builder::{Cache, CacheBuilder, load_module};
pub use crate::config::{CacheConfig, IndexKind, PolicyKind};
pub use crate::decorator::{CachingProvider, MemoStore, Provider};
pub use crate::ds::{Key, SlotId};
pub use crate::error::{CacheError, ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::exporter::PrometheusTextExporter;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::MetricsExporter;
pub use crate::metrics::{CacheStat, CacheStatistics, StatLabel};
pub use crate::module::{FifoCache, LruCache, MemoCache};
pub use crate::policy::{EvictionPolicy, FifoPolicy, LruPolicy};
pub use crate::store::{CacheStore, InsertOutcome};
pub use crate::traits::{CacheModule, ReadOnlyCache};
