use crate::config::value::SettingValue;
use crate::error::{GiveError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An ordered map of option names (or settings fields) to decoded values.
///
/// Used both for the plugin settings blob and for the set of tracked options
/// held by the settings cache. Insertion order is preserved so the tracked
/// key order survives a round-trip through the fast cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SettingsMap {
    #[serde(flatten)]
    inner: IndexMap<String, SettingValue>,
}

impl SettingsMap {
    /// Creates a new empty map.
    pub fn new() -> Self {
        Self {
            inner: IndexMap::new(),
        }
    }

    /// Returns a reference to the internal map.
    pub fn as_inner(&self) -> &IndexMap<String, SettingValue> {
        &self.inner
    }

    /// Returns a mutable reference to the internal map.
    pub fn as_inner_mut(&mut self) -> &mut IndexMap<String, SettingValue> {
        &mut self.inner
    }

    /// Consumes the map and returns the internal `IndexMap`.
    pub fn into_inner(self) -> IndexMap<String, SettingValue> {
        self.inner
    }

    /// Returns true if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the top-level key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Inserts a key-value pair into the map.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.inner.insert(key.into(), value.into());
    }

    /// Removes a top-level key, preserving the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<SettingValue> {
        self.inner.shift_remove(key)
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, SettingValue> {
        self.inner.iter()
    }

    /// Retrieves a value by key, supporting dot notation for nested access.
    ///
    /// A top-level key that itself contains dots is matched before the path
    /// is split.
    ///
    /// # Example
    /// ```
    /// # use give_core::SettingsMap;
    /// let map = SettingsMap::from_json(r#"{"paypal": {"sandbox": true}}"#).unwrap();
    /// assert_eq!(map.get("paypal.sandbox").unwrap().as_bool(), Some(true));
    /// ```
    pub fn get(&self, path: &str) -> Option<&SettingValue> {
        if path.is_empty() {
            return None;
        }

        if let Some(value) = self.inner.get(path) {
            return Some(value);
        }
        if !path.contains('.') {
            return None;
        }

        let mut parts = path.split('.');
        let mut current_value = self.inner.get(parts.next()?)?;

        for part in parts {
            match current_value {
                SettingValue::Object(map) => {
                    current_value = map.get(part)?;
                },
                _ => return None,
            }
        }

        Some(current_value)
    }

    /// Builds a map from an object value; any other value yields `None`.
    pub fn from_value(value: SettingValue) -> Option<Self> {
        match value {
            SettingValue::Object(inner) => Some(Self { inner }),
            _ => None,
        }
    }

    /// Parses a JSON string into a SettingsMap.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GiveError::decode("json", e.to_string()))
    }
}

impl From<IndexMap<String, SettingValue>> for SettingsMap {
    fn from(map: IndexMap<String, SettingValue>) -> Self {
        SettingsMap { inner: map }
    }
}

impl From<SettingsMap> for SettingValue {
    fn from(map: SettingsMap) -> Self {
        SettingValue::Object(map.inner)
    }
}

impl FromIterator<(String, SettingValue)> for SettingsMap {
    fn from_iter<I: IntoIterator<Item = (String, SettingValue)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}
