//! Cache metrics recording.

use metrics::{counter, gauge, histogram};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Describes the settings cache metrics.
/// Call once at startup, after installing a recorder.
pub fn register_cache_metrics() {
    metrics::describe_counter!(
        "give_settings_fast_cache_hits_total",
        "Reloads served from the fast cache"
    );
    metrics::describe_counter!(
        "give_settings_fast_cache_misses_total",
        "Reloads that missed the fast cache"
    );
    metrics::describe_counter!(
        "give_settings_store_reads_total",
        "Batched reads issued against the option store"
    );
    metrics::describe_counter!(
        "give_settings_store_failures_total",
        "Batched reads that failed and kept the previous values"
    );
    metrics::describe_counter!(
        "give_settings_invalidations_total",
        "Tracked option mutations that invalidated the cache"
    );
    metrics::describe_counter!(
        "give_settings_fast_cache_evictions_total",
        "Total number of fast cache evictions"
    );
    metrics::describe_gauge!(
        "give_settings_fast_cache_entries",
        "Current number of entries in the fast cache"
    );
    metrics::describe_histogram!(
        "give_settings_operation_seconds",
        "Time spent on settings cache operations"
    );
}

/// Settings cache metrics.
///
/// Every event goes to the `metrics` facade. Hits, misses, store reads and
/// invalidations are also kept in shared atomics for local queries.
#[derive(Debug, Clone)]
pub struct CacheMetrics {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    store_reads: Arc<AtomicU64>,
    invalidations: Arc<AtomicU64>,
}

impl CacheMetrics {
    /// Creates metrics with all local counters at zero.
    pub fn new() -> Self {
        Self {
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            store_reads: Arc::new(AtomicU64::new(0)),
            invalidations: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records a reload served from the fast cache.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!("give_settings_fast_cache_hits_total").increment(1);
    }

    /// Records a reload that missed the fast cache.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!("give_settings_fast_cache_misses_total").increment(1);
    }

    /// Records a batched read against the option store.
    pub fn record_store_read(&self) {
        self.store_reads.fetch_add(1, Ordering::Relaxed);
        counter!("give_settings_store_reads_total").increment(1);
    }

    /// Records a failed batched read; previous values were kept.
    pub fn record_store_failure(&self) {
        counter!("give_settings_store_failures_total").increment(1);
    }

    /// Records an invalidation caused by a tracked option mutation.
    pub fn record_invalidation(&self, option: &str) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
        counter!("give_settings_invalidations_total", "option" => option.to_string()).increment(1);
    }

    /// Records a fast cache eviction.
    pub fn record_eviction(&self, reason: &str) {
        counter!("give_settings_fast_cache_evictions_total", "reason" => reason.to_string())
            .increment(1);
    }

    /// Sets the fast cache entry gauge.
    pub fn update_entry_count(&self, count: u64) {
        gauge!("give_settings_fast_cache_entries").set(count as f64);
    }

    /// Records how long an operation took.
    pub fn record_operation_duration(&self, operation: &str, duration: Duration) {
        histogram!(
            "give_settings_operation_seconds",
            "operation" => operation.to_string()
        )
        .record(duration.as_secs_f64());
    }

    /// Fraction of reloads served from the fast cache.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        match hits + self.misses() {
            0 => 0.0,
            reloads => hits as f64 / reloads as f64,
        }
    }

    /// Number of fast cache hits.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of fast cache misses.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Number of batched store reads issued.
    pub fn store_reads(&self) -> u64 {
        self.store_reads.load(Ordering::Relaxed)
    }

    /// Number of invalidations.
    pub fn invalidations(&self) -> u64 {
        self.invalidations.load(Ordering::Relaxed)
    }
}

impl Default for CacheMetrics {
    fn default() -> Self {
        Self::new()
    }
}
