//! Fast cache key normalization.

use std::fmt;

/// Fast cache key: group plus entry name, both lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    group: String,
    key: String,
}

impl CacheKey {
    /// Creates a key, lowercasing both parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use give_settings::cache::CacheKey;
    ///
    /// let key = CacheKey::new("Give_Options", "GIVE_ALL_OPTIONS");
    /// assert_eq!(key.group(), "give_options");
    /// assert_eq!(key.key(), "give_all_options");
    /// ```
    pub fn new(group: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            group: group.into().to_lowercase(),
            key: key.into().to_lowercase(),
        }
    }

    /// Returns the group.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Returns the entry name within the group.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.key)
    }
}
