//! The settings cache.

use std::sync::{Arc, Weak};
use std::time::Instant;

use give_core::{SettingValue, SettingsMap, decode_option_value};
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::object_cache::ObjectCache;
use crate::config::SettingsCacheConfig;
use crate::filters::Filters;
use crate::metrics::CacheMetrics;
use crate::registry::{self, CURRENCIES, Currencies, GATEWAYS, Gateways};
use crate::store::{OptionMutation, OptionStore, SubscriptionId};

/// Outcome of looking an option up in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionLookup {
    /// The name is neither tracked nor derived.
    Unrecognized,
    /// The name is known but its value is missing or empty.
    Empty,
    /// The name is known and holds a non-empty value.
    Value(SettingValue),
}

impl OptionLookup {
    /// Returns the value, or `default` for anything but [`OptionLookup::Value`].
    pub fn unwrap_or(self, default: SettingValue) -> SettingValue {
        match self {
            OptionLookup::Value(value) => value,
            _ => default,
        }
    }

    /// Returns true if the name is tracked or derived.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, OptionLookup::Unrecognized)
    }
}

#[derive(Debug, Default)]
struct DerivedLists {
    currencies: Option<Currencies>,
    gateways: Option<Gateways>,
    values: IndexMap<&'static str, SettingValue>,
}

/// Memoized view of a fixed set of plugin options.
///
/// Tracked options are read from the [`OptionStore`] in a single batched
/// query (or adopted from the fast cache) and reloaded synchronously
/// whenever the store reports a mutation of one of them. Derived lists
/// (currencies, gateways) are computed once from built-in defaults and
/// their extension points, and are never touched by a reload.
///
/// Reads never fail: unknown or empty options yield the caller's default.
pub struct SettingsCache {
    config: SettingsCacheConfig,
    store: Arc<dyn OptionStore>,
    fast_cache: Arc<dyn ObjectCache>,
    filters: Arc<Filters>,
    metrics: CacheMetrics,
    tracked: RwLock<SettingsMap>,
    derived: RwLock<DerivedLists>,
    subscription: Mutex<Option<SubscriptionId>>,
}

impl SettingsCache {
    /// Builds the cache, loads the tracked options and subscribes to their
    /// mutations.
    pub fn new(
        config: SettingsCacheConfig,
        store: Arc<dyn OptionStore>,
        fast_cache: Arc<dyn ObjectCache>,
        filters: Arc<Filters>,
    ) -> Arc<Self> {
        Self::with_metrics(config, store, fast_cache, filters, CacheMetrics::new())
    }

    /// Like [`SettingsCache::new`], recording into the given metrics.
    pub fn with_metrics(
        config: SettingsCacheConfig,
        store: Arc<dyn OptionStore>,
        fast_cache: Arc<dyn ObjectCache>,
        filters: Arc<Filters>,
        metrics: CacheMetrics,
    ) -> Arc<Self> {
        let defaults = defaults_for(config.tracked_keys());
        let cache = Arc::new(Self {
            config,
            store,
            fast_cache,
            filters,
            metrics,
            tracked: RwLock::new(defaults),
            derived: RwLock::new(DerivedLists::default()),
            subscription: Mutex::new(None),
        });

        cache.reload();

        let weak: Weak<Self> = Arc::downgrade(&cache);
        let id = cache.store.subscribe(
            cache.config.tracked_keys(),
            Arc::new(move |mutation: &OptionMutation| {
                if let Some(cache) = weak.upgrade() {
                    cache.on_store_mutation(&mutation.name);
                }
            }),
        );
        *cache.subscription.lock() = Some(id);

        debug!(
            store = %cache.store.name(),
            tracked = cache.config.tracked_keys().len(),
            "Settings cache subscribed to option store"
        );

        cache
    }

    /// Returns an option's cached value, or `default` if the option is not
    /// tracked or derived, or if its value is empty.
    pub fn get_option(&self, name: &str, default: SettingValue) -> SettingValue {
        self.lookup(name).unwrap_or(default)
    }

    /// Looks an option up, distinguishing unknown names from empty values.
    pub fn lookup(&self, name: &str) -> OptionLookup {
        let value = if self.config.is_tracked(name) {
            self.tracked.read().as_inner().get(name).cloned()
        } else if registry::is_derived(name) {
            self.derived.read().values.get(name).cloned()
        } else {
            return OptionLookup::Unrecognized;
        };

        match value {
            Some(value) if !value.is_empty() => OptionLookup::Value(value),
            _ => OptionLookup::Empty,
        }
    }

    /// Returns the plugin settings blob after the `get_settings` filters.
    ///
    /// An unset or non-object blob reads as an empty map.
    pub fn get_settings(&self) -> SettingsMap {
        let settings = self
            .tracked
            .read()
            .as_inner()
            .get(self.config.settings_key())
            .cloned()
            .and_then(SettingsMap::from_value)
            .unwrap_or_default();

        self.filters.get_settings.apply(settings)
    }

    /// Reads one field of the filtered settings blob. Dot notation walks
    /// nested objects. Missing or empty fields yield `default`.
    pub fn setting(&self, key: &str, default: SettingValue) -> SettingValue {
        match self.get_settings().get(key) {
            Some(value) if !value.is_empty() => value.clone(),
            _ => default,
        }
    }

    /// Handles a store mutation. Returns true if the cache was reloaded.
    ///
    /// Mutations of untracked options are ignored. For tracked ones the
    /// shared fast cache entry is deleted before reloading, so the reload
    /// always goes to the store.
    pub fn on_store_mutation(&self, name: &str) -> bool {
        if !self.config.is_tracked(name) {
            debug!(option = %name, "Ignoring mutation of untracked option");
            return false;
        }

        self.metrics.record_invalidation(name);
        self.fast_cache
            .delete(self.config.fast_cache_key(), self.config.fast_cache_group());

        info!(option = %name, "Tracked option changed, reloading settings");
        self.reload();
        true
    }

    /// Loads the tracked options.
    ///
    /// A fast cache hit is adopted as is. On a miss, all tracked options are
    /// fetched with one batched store query, decoded over fresh defaults,
    /// and written back to the fast cache. If the query fails the current
    /// values are kept.
    pub fn reload(&self) {
        let start = Instant::now();
        let key = self.config.fast_cache_key();
        let group = self.config.fast_cache_group();

        if let Some(cached) = self.fast_cache.get(key, group) {
            if let Some(map) = SettingsMap::from_value(cached) {
                self.metrics.record_hit();
                debug!(
                    key = %key,
                    group = %group,
                    entries = map.len(),
                    "Settings loaded from fast cache"
                );
                *self.tracked.write() = map;
                self.metrics
                    .record_operation_duration("reload_hit", start.elapsed());
                return;
            }
            debug!(key = %key, group = %group, "Discarding malformed fast cache entry");
        }

        self.metrics.record_miss();
        self.metrics.record_store_read();

        let rows = match self.store.batch_get(self.config.tracked_keys()) {
            Ok(rows) => rows,
            Err(e) => {
                self.metrics.record_store_failure();
                warn!(
                    store = %self.store.name(),
                    error = %e,
                    "Failed to read tracked options, keeping previous values"
                );
                return;
            },
        };

        let mut loaded = defaults_for(self.config.tracked_keys());
        let mut found = 0;
        for row in rows {
            if let Some(slot) = loaded.as_inner_mut().get_mut(&row.name) {
                *slot = decode_option_value(&row.value);
                found += 1;
            }
        }

        self.fast_cache.set(key, loaded.clone().into(), group);
        *self.tracked.write() = loaded;

        self.metrics
            .record_operation_duration("reload_miss", start.elapsed());
        info!(
            store = %self.store.name(),
            found = found,
            tracked = self.config.tracked_keys().len(),
            "Settings loaded from option store"
        );
    }

    /// Builds the currency list from the defaults and the
    /// `register_currency` filters. Returns false if it was already built.
    pub fn setup_currencies_list(&self) -> bool {
        if self.derived.read().currencies.is_some() {
            debug!("Currency list already set up");
            return false;
        }

        let currencies = self
            .filters
            .register_currency
            .apply(registry::default_currencies());
        let value = to_setting_value(CURRENCIES, &currencies);

        let mut derived = self.derived.write();
        if derived.currencies.is_some() {
            return false;
        }
        info!(count = currencies.len(), "Currency list set up");
        derived.currencies = Some(currencies);
        derived.values.insert(CURRENCIES, value);
        true
    }

    /// Builds the gateway list from the defaults and the
    /// `register_gateway` filters. Returns false if it was already built.
    pub fn setup_gateways_list(&self) -> bool {
        if self.derived.read().gateways.is_some() {
            debug!("Gateway list already set up");
            return false;
        }

        let gateways = self
            .filters
            .register_gateway
            .apply(registry::default_gateways());
        let value = to_setting_value(GATEWAYS, &gateways);

        let mut derived = self.derived.write();
        if derived.gateways.is_some() {
            return false;
        }
        info!(count = gateways.len(), "Gateway list set up");
        derived.gateways = Some(gateways);
        derived.values.insert(GATEWAYS, value);
        true
    }

    /// Returns the currency list, if set up.
    pub fn currencies(&self) -> Option<Currencies> {
        self.derived.read().currencies.clone()
    }

    /// Returns the gateway list, if set up.
    pub fn gateways(&self) -> Option<Gateways> {
        self.derived.read().gateways.clone()
    }

    /// Returns the configuration this cache was built with.
    pub fn config(&self) -> &SettingsCacheConfig {
        &self.config
    }

    /// Returns the filters consulted by this cache.
    pub fn filters(&self) -> &Arc<Filters> {
        &self.filters
    }

    /// Returns the metrics for external access.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }
}

impl Drop for SettingsCache {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.get_mut().take() {
            self.store.unsubscribe(id);
        }
    }
}

fn defaults_for(keys: &[String]) -> SettingsMap {
    keys.iter()
        .map(|key| (key.clone(), SettingValue::Null))
        .collect()
}

fn to_setting_value<T: Serialize>(name: &str, list: &T) -> SettingValue {
    SettingValue::from_serialize(list).unwrap_or_else(|e| {
        warn!(option = %name, error = %e, "Failed to convert derived list");
        SettingValue::Null
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MokaObjectCache, NullObjectCache};
    use crate::config::FastCacheConfig;
    use crate::registry::Gateway;
    use crate::store::MemoryOptionStore;

    fn build(store: &Arc<MemoryOptionStore>) -> Arc<SettingsCache> {
        SettingsCache::new(
            SettingsCacheConfig::default(),
            Arc::clone(store) as Arc<dyn OptionStore>,
            Arc::new(MokaObjectCache::new(FastCacheConfig::default())),
            Arc::new(Filters::new()),
        )
    }

    #[test]
    fn test_loads_tracked_options_on_construction() {
        let store = Arc::new(MemoryOptionStore::with_rows([
            ("give_settings", r#"{"currency":"EUR"}"#),
            ("give_version", "2.33.1"),
        ]));

        let cache = build(&store);

        assert_eq!(
            cache.get_option("give_version", SettingValue::Null),
            SettingValue::from("2.33.1")
        );
        assert_eq!(
            cache.setting("currency", SettingValue::from("USD")),
            SettingValue::from("EUR")
        );
        assert_eq!(store.batch_reads(), 1);
    }

    #[test]
    fn test_lookup_distinguishes_unknown_from_empty() {
        let store = Arc::new(MemoryOptionStore::with_rows([("give_doing_upgrade", "")]));
        let cache = build(&store);

        assert_eq!(cache.lookup("blogname"), OptionLookup::Unrecognized);
        assert_eq!(cache.lookup("give_doing_upgrade"), OptionLookup::Empty);
        assert_eq!(cache.lookup("give_version"), OptionLookup::Empty);
        assert_eq!(cache.lookup(GATEWAYS), OptionLookup::Empty);
        assert!(cache.lookup(GATEWAYS).is_recognized());
    }

    #[test]
    fn test_untracked_mutation_is_ignored() {
        let store = Arc::new(MemoryOptionStore::new());
        let cache = build(&store);

        assert!(!cache.on_store_mutation("blogname"));
        assert_eq!(store.batch_reads(), 1);
    }

    #[test]
    fn test_deleted_option_reverts_to_default() {
        let store = Arc::new(MemoryOptionStore::with_rows([("give_doing_upgrade", "1")]));
        let cache = build(&store);
        assert_eq!(
            cache.lookup("give_doing_upgrade"),
            OptionLookup::Value(1.into())
        );

        store.delete("give_doing_upgrade");

        assert_eq!(cache.lookup("give_doing_upgrade"), OptionLookup::Empty);
    }

    #[test]
    fn test_reload_survives_derived_lists() {
        let store = Arc::new(MemoryOptionStore::new());
        let cache = build(&store);
        cache.setup_gateways_list();

        store.set("give_version", "3.0.0");

        assert!(cache.lookup(GATEWAYS).is_recognized());
        assert_ne!(cache.lookup(GATEWAYS), OptionLookup::Empty);
        assert_eq!(cache.gateways().map(|g| g.len()), Some(3));
    }

    #[test]
    fn test_derived_lists_are_write_once() {
        let filters = Arc::new(Filters::new());
        let cache = SettingsCache::new(
            SettingsCacheConfig::default(),
            Arc::new(MemoryOptionStore::new()),
            Arc::new(NullObjectCache),
            Arc::clone(&filters),
        );

        assert!(cache.setup_gateways_list());
        filters.register_gateway.add(|mut g: Gateways| {
            g.insert("stripe".to_string(), Gateway::new("Stripe", "Credit Card"));
            g
        });
        assert!(!cache.setup_gateways_list());

        assert!(!cache.gateways().unwrap().contains_key("stripe"));
    }

    #[test]
    fn test_currencies_list_exposed_as_option() {
        let cache = build(&Arc::new(MemoryOptionStore::new()));
        assert!(cache.setup_currencies_list());

        let value = cache.get_option(CURRENCIES, SettingValue::Null);
        let usd = value.as_object().unwrap().get("USD").unwrap();
        assert_eq!(
            usd.as_object().unwrap().get("symbol").unwrap().as_str(),
            Some("$")
        );
        assert_eq!(
            cache.currencies().unwrap()["USD"].setting.number_decimals,
            2
        );
    }

    #[test]
    fn test_dropping_cache_unsubscribes() {
        let store = Arc::new(MemoryOptionStore::new());
        let cache = build(&store);
        assert_eq!(store.subscriber_count(), 1);

        drop(cache);

        assert_eq!(store.subscriber_count(), 0);
        assert!(store.set("give_version", "3.0.0"));
    }
}
