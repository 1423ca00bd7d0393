use crate::config::SettingValue;
use crate::error::{GiveError, Result};
use crate::format::{ValueDecoder, ValueEncoder};

pub struct YamlFormat;

impl ValueDecoder for YamlFormat {
    fn decode(&self, raw: &str) -> Result<SettingValue> {
        serde_yaml::from_str(raw).map_err(|e| GiveError::decode("yaml", e.to_string()))
    }
}

impl ValueEncoder for YamlFormat {
    fn encode(&self, value: &SettingValue) -> Result<String> {
        serde_yaml::to_string(value)
            .map(|body| format!("{}{}", super::YAML_MARKER, body))
            .map_err(|e| GiveError::encode("yaml", e.to_string()))
    }
}
