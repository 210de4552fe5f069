use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crate::metrics::stats::CacheStatistics;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache statistics.
///
/// Writes in the Prometheus text exposition format so the output can be
/// scraped directly or forwarded to a collector.
///
/// # Example
///
/// ```
/// use memocache::metrics::CacheStatistics;
/// use memocache::metrics::exporter::PrometheusTextExporter;
/// use memocache::metrics::traits::MetricsExporter;
///
/// let exporter = PrometheusTextExporter::new("memo", Vec::new());
/// let snapshot = CacheStatistics { requests: 3, hits: 1, misses: 2, ..Default::default() };
/// exporter.export(&snapshot).unwrap();
///
/// let text = String::from_utf8(exporter.into_inner()).unwrap();
/// assert!(text.contains("memo_requests_total 3"));
/// ```
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) -> io::Result<()> {
        let name = self.metric_name(suffix);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "# TYPE {} {}", name, kind)?;
        writeln!(writer, "{} {}", name, value)
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write> MetricsExporter<CacheStatistics> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &CacheStatistics) -> io::Result<()> {
        self.write_metric("counter", "requests_total", snapshot.requests)?;
        self.write_metric("counter", "hits_total", snapshot.hits)?;
        self.write_metric("counter", "misses_total", snapshot.misses)?;
        self.write_metric("counter", "evictions_total", snapshot.evictions)?;
        self.write_metric("gauge", "cache_len", snapshot.len as u64)?;
        self.write_metric("gauge", "capacity", snapshot.capacity as u64)
    }
}
