//! Fast cache layer in front of the option store.

use std::sync::Arc;

use give_core::SettingValue;
use moka::notification::RemovalCause;
use moka::sync::Cache;

use crate::cache::keys::CacheKey;
use crate::config::FastCacheConfig;
use crate::metrics::CacheMetrics;

/// Shared object cache addressed by key and group.
///
/// May be shared by several settings cache instances, and in real
/// deployments by several processes. Entries are only ever deleted and
/// reloaded, never read-modified-written.
pub trait ObjectCache: Send + Sync {
    /// Returns the value, if present.
    fn get(&self, key: &str, group: &str) -> Option<SettingValue>;

    /// Inserts or replaces a value.
    fn set(&self, key: &str, value: SettingValue, group: &str);

    /// Removes a value. Returns true if it existed.
    fn delete(&self, key: &str, group: &str) -> bool;
}

/// In-process fast cache backed by Moka, with TTL and a capacity bound.
///
/// # Examples
///
/// ```
/// use give_core::SettingValue;
/// use give_settings::cache::{MokaObjectCache, ObjectCache};
/// use give_settings::config::FastCacheConfig;
///
/// let cache = MokaObjectCache::new(FastCacheConfig::default());
/// cache.set("give_all_options", SettingValue::from("cached"), "give_options");
///
/// assert!(cache.get("give_all_options", "give_options").is_some());
/// assert!(cache.get("give_all_options", "other_group").is_none());
/// ```
#[derive(Clone)]
pub struct MokaObjectCache {
    inner: Cache<CacheKey, Arc<SettingValue>>,
    metrics: CacheMetrics,
}

impl MokaObjectCache {
    /// Creates a cache with the given sizing.
    pub fn new(config: FastCacheConfig) -> Self {
        Self::with_metrics(config, CacheMetrics::new())
    }

    /// Creates a cache that records into the given metrics.
    pub fn with_metrics(config: FastCacheConfig, metrics: CacheMetrics) -> Self {
        let mut builder = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.ttl());

        if let Some(tti) = config.tti() {
            builder = builder.time_to_idle(tti);
        }

        // evictions feed the metrics
        let eviction_metrics = metrics.clone();
        builder = builder.eviction_listener(move |_key, _value, cause| {
            let reason = match cause {
                RemovalCause::Expired => "ttl",
                RemovalCause::Size => "capacity",
                RemovalCause::Explicit => "manual",
                RemovalCause::Replaced => "replaced",
            };
            eviction_metrics.record_eviction(reason);
        });

        Self {
            inner: builder.build(),
            metrics,
        }
    }

    /// Approximate number of cached entries.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Drops every entry.
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Returns the metrics for external access.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    fn update_entry_gauge(&self) {
        self.metrics.update_entry_count(self.inner.entry_count());
    }
}

impl ObjectCache for MokaObjectCache {
    fn get(&self, key: &str, group: &str) -> Option<SettingValue> {
        self.inner
            .get(&CacheKey::new(group, key))
            .map(|value| value.as_ref().clone())
    }

    fn set(&self, key: &str, value: SettingValue, group: &str) {
        self.inner.insert(CacheKey::new(group, key), Arc::new(value));
        self.update_entry_gauge();
    }

    fn delete(&self, key: &str, group: &str) -> bool {
        let removed = self.inner.remove(&CacheKey::new(group, key)).is_some();
        self.update_entry_gauge();
        removed
    }
}

/// A fast cache that stores nothing, so every reload reads the option store.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObjectCache;

impl ObjectCache for NullObjectCache {
    fn get(&self, _key: &str, _group: &str) -> Option<SettingValue> {
        None
    }

    fn set(&self, _key: &str, _value: SettingValue, _group: &str) {}

    fn delete(&self, _key: &str, _group: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let cache = MokaObjectCache::new(FastCacheConfig::default());

        cache.set("give_all_options", SettingValue::from("v1"), "give_options");

        let cached = cache.get("give_all_options", "give_options");
        assert_eq!(cached, Some(SettingValue::from("v1")));
    }

    #[test]
    fn test_miss_returns_none() {
        let cache = MokaObjectCache::new(FastCacheConfig::default());
        assert!(cache.get("nonexistent", "give_options").is_none());
    }

    #[test]
    fn test_set_replaces_value() {
        let cache = MokaObjectCache::new(FastCacheConfig::default());

        cache.set("give_all_options", SettingValue::from("v1"), "give_options");
        cache.set("give_all_options", SettingValue::from("v2"), "give_options");

        assert_eq!(
            cache.get("give_all_options", "give_options"),
            Some(SettingValue::from("v2"))
        );
    }

    #[test]
    fn test_delete_removes_entry() {
        let cache = MokaObjectCache::new(FastCacheConfig::default());
        cache.set("give_all_options", SettingValue::from("v1"), "give_options");

        assert!(cache.delete("give_all_options", "give_options"));
        assert!(!cache.delete("give_all_options", "give_options"));
        assert!(cache.get("give_all_options", "give_options").is_none());
    }

    #[test]
    fn test_groups_are_isolated() {
        let cache = MokaObjectCache::new(FastCacheConfig::default());
        cache.set("give_all_options", SettingValue::from("a"), "group_a");
        cache.set("give_all_options", SettingValue::from("b"), "group_b");

        cache.delete("give_all_options", "group_a");

        assert!(cache.get("give_all_options", "group_a").is_none());
        assert_eq!(
            cache.get("give_all_options", "group_b"),
            Some(SettingValue::from("b"))
        );
    }

    #[test]
    fn test_clones_share_storage() {
        let cache = MokaObjectCache::new(FastCacheConfig::default());
        let other = cache.clone();

        cache.set("give_all_options", SettingValue::from("shared"), "give_options");

        assert!(other.get("give_all_options", "give_options").is_some());
    }

    #[test]
    fn test_null_cache_never_hits() {
        let cache = NullObjectCache;
        cache.set("give_all_options", SettingValue::from("v1"), "give_options");

        assert!(cache.get("give_all_options", "give_options").is_none());
        assert!(!cache.delete("give_all_options", "give_options"));
    }
}
