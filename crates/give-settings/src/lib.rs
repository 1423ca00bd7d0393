//! # Give Settings
//!
//! Settings cache for the Give donation plugin.
//!
//! A fixed set of plugin options is loaded from an [`OptionStore`] in one
//! batched query, memoized, and reloaded whenever the store reports that one
//! of them changed. A shared [`ObjectCache`] sits in front of the store so
//! that fresh instances can skip the query. Currency and gateway lists are
//! derived once from built-in defaults and their extension points.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use give_core::SettingValue;
//! use give_settings::{
//!     MemoryOptionStore, MokaObjectCache, SettingsCacheConfig, SettingsProvider,
//!     config::FastCacheConfig, registry::{Gateway, Gateways},
//! };
//!
//! let store = Arc::new(MemoryOptionStore::with_rows([
//!     ("give_settings", r#"{"currency":"EUR"}"#),
//! ]));
//! let provider = SettingsProvider::new(
//!     SettingsCacheConfig::default(),
//!     store.clone(),
//!     Arc::new(MokaObjectCache::new(FastCacheConfig::default())),
//! );
//!
//! provider.filters().register_gateway.add(|mut gateways: Gateways| {
//!     gateways.insert("stripe".into(), Gateway::new("Stripe", "Credit Card"));
//!     gateways
//! });
//!
//! let settings = provider.bootstrap();
//! assert_eq!(settings.setting("currency", "USD".into()).as_str(), Some("EUR"));
//! assert!(settings.gateways().unwrap().contains_key("stripe"));
//!
//! store.set("give_settings", r#"{"currency":"GBP"}"#);
//! assert_eq!(settings.setting("currency", SettingValue::Null).as_str(), Some("GBP"));
//! ```

pub mod cache;
pub mod config;
pub mod filters;
pub mod metrics;
pub mod registry;
pub mod store;

// Re-exports
pub use cache::{
    MokaObjectCache, NullObjectCache, ObjectCache, OptionLookup, SettingsCache, SettingsProvider,
};
pub use config::SettingsCacheConfig;
pub use filters::{FilterChain, Filters};
pub use store::{MemoryOptionStore, OptionStore};

// Re-export give_core for consumers
pub use give_core;
