#![allow(dead_code)]
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use give_core::{GiveError, Result};
use give_settings::config::FastCacheConfig;
use give_settings::filters::Filters;
use give_settings::store::{MutationHandler, OptionRow, SubscriptionId};
use give_settings::{
    MemoryOptionStore, MokaObjectCache, OptionStore, SettingsCache, SettingsCacheConfig,
};

/// Store, shared fast cache and a cache built on top of them.
pub struct Fixture {
    pub store: Arc<MemoryOptionStore>,
    pub fast_cache: Arc<MokaObjectCache>,
    pub filters: Arc<Filters>,
    pub cache: Arc<SettingsCache>,
}

impl Fixture {
    /// Builds a fixture over a store pre-filled with `rows`.
    pub fn with_rows(rows: &[(&str, &str)]) -> Self {
        let store = Arc::new(MemoryOptionStore::with_rows(rows.iter().copied()));
        let fast_cache = Arc::new(MokaObjectCache::new(FastCacheConfig::default()));
        let filters = Arc::new(Filters::new());
        let cache = build_cache(&store, &fast_cache, &filters);
        Self {
            store,
            fast_cache,
            filters,
            cache,
        }
    }

    /// Builds a second cache over the same store and fast cache, as a new
    /// request would.
    pub fn next_request(&self) -> Arc<SettingsCache> {
        build_cache(&self.store, &self.fast_cache, &Arc::new(Filters::new()))
    }
}

pub fn build_cache(
    store: &Arc<MemoryOptionStore>,
    fast_cache: &Arc<MokaObjectCache>,
    filters: &Arc<Filters>,
) -> Arc<SettingsCache> {
    SettingsCache::new(
        SettingsCacheConfig::default(),
        Arc::clone(store) as Arc<dyn OptionStore>,
        Arc::clone(fast_cache) as Arc<dyn give_settings::ObjectCache>,
        Arc::clone(filters),
    )
}

/// A store wrapper whose reads can be switched off.
pub struct FlakyStore {
    pub inner: MemoryOptionStore,
    pub offline: AtomicBool,
}

impl FlakyStore {
    pub fn new(inner: MemoryOptionStore) -> Self {
        Self {
            inner,
            offline: AtomicBool::new(false),
        }
    }

    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }
}

impl OptionStore for FlakyStore {
    fn batch_get(&self, names: &[String]) -> Result<Vec<OptionRow>> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(GiveError::store(self.name(), "connection refused"));
        }
        self.inner.batch_get(names)
    }

    fn subscribe(&self, names: &[String], handler: MutationHandler) -> SubscriptionId {
        self.inner.subscribe(names, handler)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.unsubscribe(id)
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

/// Installs a test subscriber once; output shows with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("give_settings=debug"))
        .with_test_writer()
        .try_init();
}
