//! Cache module for Give settings.
//!
//! The settings cache memoizes the tracked plugin options in front of the
//! option store, using a moka-backed fast cache shared across instances,
//! and reloads on every tracked mutation.

pub mod keys;
pub mod object_cache;
pub mod provider;
pub mod settings_cache;

// Re-exports
pub use keys::CacheKey;
pub use object_cache::{MokaObjectCache, NullObjectCache, ObjectCache};
pub use provider::SettingsProvider;
pub use settings_cache::{OptionLookup, SettingsCache};
