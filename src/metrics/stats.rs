//! Request statistics for a cache module.
//!
//! [`StatisticsCollector`] is updated by the caching provider on every call;
//! it only ever records a hit or a miss as a whole, so
//! `requests == hits + misses` holds after every call.
//!
//! Modules report statistics as an owned, ordered list of labeled counters
//! ending in [`StatLabel::EndOfStats`]:
//!
//! ```text
//!   [ (Requests, 12), (Hits, 5), (Misses, 7), (Capacity, 50), (EndOfStats, 0) ]
//! ```
//!
//! [`CacheStatistics`] is the same data as a plain struct, which is easier to
//! consume from Rust.

use std::fmt;

/// Label of one entry in a statistics listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatLabel {
    Requests,
    Hits,
    Misses,
    Capacity,
    /// Terminates a listing; its count is always 0.
    EndOfStats,
}

impl StatLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            StatLabel::Requests => "Cache requests",
            StatLabel::Hits => "Cache hits",
            StatLabel::Misses => "Cache misses",
            StatLabel::Capacity => "Cache size",
            StatLabel::EndOfStats => "End of stats",
        }
    }
}

impl fmt::Display for StatLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One labeled counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheStat {
    pub label: StatLabel,
    pub count: u64,
}

impl CacheStat {
    pub fn new(label: StatLabel, count: u64) -> Self {
        Self { label, count }
    }

    pub fn is_end(&self) -> bool {
        self.label == StatLabel::EndOfStats
    }
}

impl fmt::Display for CacheStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.count)
    }
}

/// Point-in-time copy of a module's counters and gauges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheStatistics {
    pub requests: u64,
    pub hits: u64,
    pub misses: u64,
    /// Entries displaced to make room for a new key.
    pub evictions: u64,
    pub capacity: usize,
    /// Live entries at snapshot time.
    pub len: usize,
}

impl CacheStatistics {
    /// Fraction of requests served from cache, `0.0` when there were none.
    pub fn hit_ratio(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.hits as f64 / self.requests as f64
        }
    }

    /// The labeled listing form, terminated by [`StatLabel::EndOfStats`].
    pub fn to_stats(&self) -> Vec<CacheStat> {
        vec![
            CacheStat::new(StatLabel::Requests, self.requests),
            CacheStat::new(StatLabel::Hits, self.hits),
            CacheStat::new(StatLabel::Misses, self.misses),
            CacheStat::new(StatLabel::Capacity, self.capacity as u64),
            CacheStat::new(StatLabel::EndOfStats, 0),
        ]
    }

    /// Rebuilds the counters from a labeled listing, stopping at the end
    /// marker. Labels that are missing read as 0.
    pub fn from_stats(stats: &[CacheStat]) -> Self {
        let mut out = Self::default();
        for stat in stats.iter().take_while(|stat| !stat.is_end()) {
            match stat.label {
                StatLabel::Requests => out.requests = stat.count,
                StatLabel::Hits => out.hits = stat.count,
                StatLabel::Misses => out.misses = stat.count,
                StatLabel::Capacity => out.capacity = stat.count as usize,
                StatLabel::EndOfStats => {},
            }
        }
        out
    }
}

/// Counts requests, hits, misses and evictions.
#[derive(Debug, Default, Clone)]
pub struct StatisticsCollector {
    requests: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl StatisticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.hits += 1;
    }

    #[inline]
    pub fn record_miss(&mut self) {
        self.requests += 1;
        self.misses += 1;
    }

    #[inline]
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn requests(&self) -> u64 {
        self.requests
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn snapshot(&self, capacity: usize, len: usize) -> CacheStatistics {
        CacheStatistics {
            requests: self.requests,
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            capacity,
            len,
        }
    }
}
