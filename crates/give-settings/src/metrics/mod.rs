//! Metrics for the settings cache.

pub mod cache;

pub use cache::{CacheMetrics, register_cache_metrics};
