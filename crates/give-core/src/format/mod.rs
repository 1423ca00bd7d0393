//! Decoding of raw option rows.
//!
//! The option store keeps every value as text. Structured values are kept as
//! serialized documents (JSON, or YAML behind a `---` marker) while plain
//! scalars are stored verbatim. Decoding happens once, at the store-read edge;
//! everything past that edge works with [`SettingValue`].

use crate::config::SettingValue;
use crate::error::Result;

pub mod json;
pub mod yaml;

pub use json::JsonFormat;
pub use yaml::YamlFormat;

/// Prefix that marks a YAML document in an option row.
pub const YAML_MARKER: &str = "---\n";

/// Serialization formats found in option rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionFormat {
    Json,
    Yaml,
    Plain,
}

impl OptionFormat {
    /// Guesses the format of a raw option row.
    ///
    /// Objects, arrays, quoted strings and bare JSON scalars (`true`,
    /// `false`, `null`, numbers) are JSON; anything else is plain text.
    ///
    /// ```
    /// use give_core::OptionFormat;
    ///
    /// assert_eq!(OptionFormat::detect(r#"{"currency":"USD"}"#), OptionFormat::Json);
    /// assert_eq!(OptionFormat::detect("---\ncurrency: USD\n"), OptionFormat::Yaml);
    /// assert_eq!(OptionFormat::detect("false"), OptionFormat::Json);
    /// assert_eq!(OptionFormat::detect("2.33.1"), OptionFormat::Plain);
    /// ```
    pub fn detect(raw: &str) -> Self {
        if raw.starts_with(YAML_MARKER) {
            return OptionFormat::Yaml;
        }
        let trimmed = raw.trim_start();
        if trimmed.starts_with(['{', '[', '"']) || is_json_scalar(raw) {
            OptionFormat::Json
        } else {
            OptionFormat::Plain
        }
    }
}

fn is_json_scalar(raw: &str) -> bool {
    matches!(raw, "true" | "false" | "null")
        || serde_json::from_str::<serde_json::Number>(raw).is_ok()
}

/// A trait for decoding a raw option row.
pub trait ValueDecoder: Send + Sync {
    /// Decodes the raw text into a value.
    fn decode(&self, raw: &str) -> Result<SettingValue>;
}

/// A trait for encoding a value into an option row.
pub trait ValueEncoder: Send + Sync {
    /// Encodes the value into raw text.
    fn encode(&self, value: &SettingValue) -> Result<String>;
}

/// Decodes a raw option row, transparently unwrapping serialized documents.
///
/// Text that looks like a document but fails to parse is kept as a plain
/// string, so a malformed row never makes an option disappear.
pub fn decode_option_value(raw: &str) -> SettingValue {
    let decoded = match OptionFormat::detect(raw) {
        OptionFormat::Json => JsonFormat.decode(raw),
        OptionFormat::Yaml => YamlFormat.decode(raw),
        OptionFormat::Plain => return SettingValue::String(raw.to_string()),
    };

    decoded.unwrap_or_else(|_| SettingValue::String(raw.to_string()))
}

/// Encodes a value for storage.
///
/// Strings that [`OptionFormat::detect`] reads as plain text are stored
/// verbatim; every other value, including strings that would be mistaken
/// for a document or a scalar, is stored as JSON. Decoding the result with
/// [`decode_option_value`] yields the original value.
pub fn encode_option_value(value: &SettingValue) -> Result<String> {
    match value {
        SettingValue::String(s) if OptionFormat::detect(s) == OptionFormat::Plain => {
            Ok(s.clone())
        },
        other => JsonFormat.encode(other),
    }
}
