use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A decoded option value.
///
/// Option rows may hold scalars, lists (e.g. completed upgrades) or nested
/// objects (e.g. the plugin settings blob). Objects use `IndexMap` so the
/// order in which keys were stored is preserved.
///
/// # Example
///
/// ```
/// use give_core::SettingValue;
///
/// let val: SettingValue = "2.33.1".into();
/// assert_eq!(val.as_str(), Some("2.33.1"));
///
/// let upgrades: SettingValue = vec!["v20_upgrades_form_metadata"].into();
/// assert!(matches!(upgrades, SettingValue::Array(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum SettingValue {
    /// Null value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (signed 64-bit)
    Integer(i64),
    /// Floating point value (wrapped in OrderedFloat for Eq support)
    Float(OrderedFloat<f64>),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<SettingValue>),
    /// Object (Map) of values
    Object(IndexMap<String, SettingValue>),
}

impl SettingValue {
    /// Returns true if the value is Null.
    pub fn is_null(&self) -> bool {
        matches!(self, SettingValue::Null)
    }

    /// Returns true if the value counts as empty for option lookups.
    ///
    /// Null, `false`, zero, `""`, `"0"`, and empty arrays/objects are empty.
    ///
    /// ```
    /// use give_core::SettingValue;
    ///
    /// assert!(SettingValue::from("0").is_empty());
    /// assert!(SettingValue::from(false).is_empty());
    /// assert!(!SettingValue::from("enabled").is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        match self {
            SettingValue::Null => true,
            SettingValue::Bool(b) => !*b,
            SettingValue::Integer(i) => *i == 0,
            SettingValue::Float(f) => f.into_inner() == 0.0,
            SettingValue::String(s) => s.is_empty() || s == "0",
            SettingValue::Array(arr) => arr.is_empty(),
            SettingValue::Object(map) => map.is_empty(),
        }
    }

    /// Returns the value as a bool if it matches.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as an i64 if it matches.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as an f64 if it matches (Integer or Float).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SettingValue::Float(f) => Some(f.into_inner()),
            SettingValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the value as a str if it matches.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an array slice if it matches.
    pub fn as_array(&self) -> Option<&[SettingValue]> {
        match self {
            SettingValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Returns the value as an object (IndexMap) if it matches.
    pub fn as_object(&self) -> Option<&IndexMap<String, SettingValue>> {
        match self {
            SettingValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Converts any serializable value into a `SettingValue`.
    pub fn from_serialize<T: Serialize>(value: &T) -> serde_json::Result<Self> {
        serde_json::to_value(value).and_then(serde_json::from_value)
    }
}

// ==========================================
// From Conversions for Ergonomics
// ==========================================

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        SettingValue::Bool(v)
    }
}

impl From<i64> for SettingValue {
    fn from(v: i64) -> Self {
        SettingValue::Integer(v)
    }
}

impl From<i32> for SettingValue {
    fn from(v: i32) -> Self {
        SettingValue::Integer(v as i64)
    }
}

impl From<f64> for SettingValue {
    fn from(v: f64) -> Self {
        SettingValue::Float(OrderedFloat(v))
    }
}

impl From<String> for SettingValue {
    fn from(v: String) -> Self {
        SettingValue::String(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        SettingValue::String(v.to_string())
    }
}

impl<T: Into<SettingValue>> From<Vec<T>> for SettingValue {
    fn from(v: Vec<T>) -> Self {
        SettingValue::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, SettingValue>> for SettingValue {
    fn from(v: IndexMap<String, SettingValue>) -> Self {
        SettingValue::Object(v)
    }
}
