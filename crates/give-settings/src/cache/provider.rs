//! Lazily built, shared settings cache.

use std::sync::{Arc, OnceLock};

use tracing::info;

use crate::cache::object_cache::ObjectCache;
use crate::cache::settings_cache::SettingsCache;
use crate::config::SettingsCacheConfig;
use crate::filters::Filters;
use crate::metrics::CacheMetrics;
use crate::store::OptionStore;

/// Owns the collaborators of a [`SettingsCache`] and builds it on first use.
///
/// Construct one per process (or request) and pass it by reference to the
/// code that reads settings. The cache is created and loaded on the first
/// call to [`SettingsProvider::get_instance`]; later calls return the same
/// instance without touching the store.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use give_core::SettingValue;
/// use give_settings::{
///     MemoryOptionStore, NullObjectCache, SettingsCacheConfig, SettingsProvider,
/// };
///
/// let store = Arc::new(MemoryOptionStore::with_rows([("give_version", "2.33.1")]));
/// let provider = SettingsProvider::new(
///     SettingsCacheConfig::default(),
///     store,
///     Arc::new(NullObjectCache),
/// );
///
/// let settings = provider.get_instance();
/// let version = settings.get_option("give_version", SettingValue::Null);
/// assert_eq!(version.as_str(), Some("2.33.1"));
/// assert!(Arc::ptr_eq(&settings, &provider.get_instance()));
/// ```
pub struct SettingsProvider {
    config: SettingsCacheConfig,
    store: Arc<dyn OptionStore>,
    fast_cache: Arc<dyn ObjectCache>,
    filters: Arc<Filters>,
    metrics: CacheMetrics,
    instance: OnceLock<Arc<SettingsCache>>,
}

impl SettingsProvider {
    /// Creates a provider with no filters registered.
    pub fn new(
        config: SettingsCacheConfig,
        store: Arc<dyn OptionStore>,
        fast_cache: Arc<dyn ObjectCache>,
    ) -> Self {
        Self {
            config,
            store,
            fast_cache,
            filters: Arc::new(Filters::new()),
            metrics: CacheMetrics::new(),
            instance: OnceLock::new(),
        }
    }

    /// Uses the given extension points instead of an empty set.
    pub fn with_filters(mut self, filters: Arc<Filters>) -> Self {
        self.filters = filters;
        self
    }

    /// Records into the given metrics.
    pub fn with_metrics(mut self, metrics: CacheMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Returns the extension points, to register transforms on.
    pub fn filters(&self) -> &Arc<Filters> {
        &self.filters
    }

    /// Returns the shared cache, building and loading it on first call.
    pub fn get_instance(&self) -> Arc<SettingsCache> {
        Arc::clone(self.instance.get_or_init(|| {
            SettingsCache::with_metrics(
                self.config.clone(),
                Arc::clone(&self.store),
                Arc::clone(&self.fast_cache),
                Arc::clone(&self.filters),
                self.metrics.clone(),
            )
        }))
    }

    /// Runs the post-init setup: builds the cache if needed, then the
    /// currency and gateway lists.
    pub fn bootstrap(&self) -> Arc<SettingsCache> {
        let cache = self.get_instance();
        let currencies = cache.setup_currencies_list();
        let gateways = cache.setup_gateways_list();
        info!(
            currencies = currencies,
            gateways = gateways,
            "Settings cache bootstrapped"
        );
        cache
    }

    /// Returns true once the cache has been built.
    pub fn is_initialized(&self) -> bool {
        self.instance.get().is_some()
    }
}
