//! Settings cache configuration.

use std::path::Path;
use std::time::Duration;

use give_core::{GiveError, Result};
use serde::{Deserialize, Serialize};

use crate::registry::{CURRENCIES, GATEWAYS};

/// Environment variable prefix read by [`SettingsCacheConfig::load`].
pub const ENV_PREFIX: &str = "GIVE_SETTINGS";

/// Configuration for the settings cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsCacheConfig {
    /// Option names mirrored from the store, in load order.
    #[serde(default = "default_tracked_keys")]
    tracked_keys: Vec<String>,

    /// Tracked option holding the plugin settings blob.
    #[serde(default = "default_settings_key")]
    settings_key: String,

    /// Key of the aggregated entry in the fast cache.
    #[serde(default = "default_fast_cache_key")]
    fast_cache_key: String,

    /// Group of the aggregated entry in the fast cache.
    #[serde(default = "default_fast_cache_group")]
    fast_cache_group: String,

    /// Fast cache sizing and expiry.
    #[serde(default)]
    fast_cache: FastCacheConfig,
}

/// Sizing and expiry of the in-process fast cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastCacheConfig {
    /// TTL in seconds (default: 300 = 5 minutes)
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    /// Maximum number of entries (default: 10000)
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Time-to-idle in seconds (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tti_seconds: Option<u64>,
}

impl Default for FastCacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            max_capacity: default_max_capacity(),
            tti_seconds: None,
        }
    }
}

impl FastCacheConfig {
    /// Returns the TTL as a duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// Returns the time-to-idle as a duration, if configured.
    pub fn tti(&self) -> Option<Duration> {
        self.tti_seconds.map(Duration::from_secs)
    }
}

fn default_tracked_keys() -> Vec<String> {
    [
        "give_settings",
        "give_version",
        "give_completed_upgrades",
        "give_doing_upgrade",
        "give_paused_batches",
        "give_version_upgraded_from",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_settings_key() -> String {
    "give_settings".to_string()
}

fn default_fast_cache_key() -> String {
    "give_all_options".to_string()
}

fn default_fast_cache_group() -> String {
    "give_options".to_string()
}

fn default_ttl_seconds() -> u64 {
    300
}

fn default_max_capacity() -> u64 {
    10_000
}

impl Default for SettingsCacheConfig {
    fn default() -> Self {
        Self {
            tracked_keys: default_tracked_keys(),
            settings_key: default_settings_key(),
            fast_cache_key: default_fast_cache_key(),
            fast_cache_group: default_fast_cache_group(),
            fast_cache: FastCacheConfig::default(),
        }
    }
}

impl SettingsCacheConfig {
    /// Creates a new builder for SettingsCacheConfig.
    pub fn builder() -> SettingsCacheConfigBuilder {
        SettingsCacheConfigBuilder::default()
    }

    /// Loads the configuration from an optional file and `GIVE_SETTINGS_*`
    /// environment variables. Nested fields use `__`, lists use `,`
    /// (e.g. `GIVE_SETTINGS_FAST_CACHE__TTL_SECONDS=60`).
    ///
    /// # Errors
    ///
    /// Returns a config error if a source cannot be read or the resulting
    /// configuration does not validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("tracked_keys")
                .try_parsing(true),
        );

        let loaded = builder
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .map_err(|e| GiveError::config("settings_cache", e.to_string()))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks the invariants the cache relies on.
    pub fn validate(&self) -> Result<()> {
        if self.tracked_keys.is_empty() {
            return Err(GiveError::config("tracked_keys", "must not be empty"));
        }
        if let Some(name) = self
            .tracked_keys
            .iter()
            .find(|k| k.as_str() == CURRENCIES || k.as_str() == GATEWAYS)
        {
            return Err(GiveError::config(
                "tracked_keys",
                format!("'{}' is reserved for a derived list", name),
            ));
        }
        if !self.is_tracked(&self.settings_key) {
            return Err(GiveError::config(
                "settings_key",
                format!("'{}' is not a tracked key", self.settings_key),
            ));
        }
        if self.fast_cache_key.is_empty() || self.fast_cache_group.is_empty() {
            return Err(GiveError::config(
                "fast_cache_key",
                "key and group must not be empty",
            ));
        }
        Ok(())
    }

    /// Returns the tracked option names.
    pub fn tracked_keys(&self) -> &[String] {
        &self.tracked_keys
    }

    /// Returns true if the option is tracked.
    pub fn is_tracked(&self, name: &str) -> bool {
        self.tracked_keys.iter().any(|k| k == name)
    }

    /// Returns the option name of the settings blob.
    pub fn settings_key(&self) -> &str {
        &self.settings_key
    }

    /// Returns the fast cache key of the aggregated entry.
    pub fn fast_cache_key(&self) -> &str {
        &self.fast_cache_key
    }

    /// Returns the fast cache group of the aggregated entry.
    pub fn fast_cache_group(&self) -> &str {
        &self.fast_cache_group
    }

    /// Returns the fast cache sizing.
    pub fn fast_cache(&self) -> &FastCacheConfig {
        &self.fast_cache
    }
}

/// Builder for SettingsCacheConfig.
#[derive(Debug, Default)]
pub struct SettingsCacheConfigBuilder {
    tracked_keys: Option<Vec<String>>,
    settings_key: Option<String>,
    fast_cache_key: Option<String>,
    fast_cache_group: Option<String>,
    fast_cache: Option<FastCacheConfig>,
}

impl SettingsCacheConfigBuilder {
    /// Replaces the tracked option names.
    pub fn tracked_keys(mut self, keys: Vec<impl Into<String>>) -> Self {
        self.tracked_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Appends a tracked option name to the current (or default) set.
    pub fn track(mut self, key: impl Into<String>) -> Self {
        self.tracked_keys
            .get_or_insert_with(default_tracked_keys)
            .push(key.into());
        self
    }

    /// Sets the option name of the settings blob.
    pub fn settings_key(mut self, key: impl Into<String>) -> Self {
        self.settings_key = Some(key.into());
        self
    }

    /// Sets the fast cache key and group of the aggregated entry.
    pub fn fast_cache_entry(mut self, key: impl Into<String>, group: impl Into<String>) -> Self {
        self.fast_cache_key = Some(key.into());
        self.fast_cache_group = Some(group.into());
        self
    }

    /// Sets the fast cache sizing.
    pub fn fast_cache(mut self, fast_cache: FastCacheConfig) -> Self {
        self.fast_cache = Some(fast_cache);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns a config error if the result does not validate.
    pub fn build(self) -> Result<SettingsCacheConfig> {
        let config = SettingsCacheConfig {
            tracked_keys: self.tracked_keys.unwrap_or_else(default_tracked_keys),
            settings_key: self.settings_key.unwrap_or_else(default_settings_key),
            fast_cache_key: self.fast_cache_key.unwrap_or_else(default_fast_cache_key),
            fast_cache_group: self
                .fast_cache_group
                .unwrap_or_else(default_fast_cache_group),
            fast_cache: self.fast_cache.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}
