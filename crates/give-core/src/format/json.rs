use crate::config::SettingValue;
use crate::error::{GiveError, Result};
use crate::format::{ValueDecoder, ValueEncoder};

pub struct JsonFormat;

impl ValueDecoder for JsonFormat {
    fn decode(&self, raw: &str) -> Result<SettingValue> {
        serde_json::from_str(raw).map_err(|e| GiveError::decode("json", e.to_string()))
    }
}

impl ValueEncoder for JsonFormat {
    fn encode(&self, value: &SettingValue) -> Result<String> {
        serde_json::to_string(value).map_err(|e| GiveError::encode("json", e.to_string()))
    }
}
