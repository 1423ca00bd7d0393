#![allow(dead_code)]
use give_core::SettingsMap;

/// Helper to create a SettingsMap from a JSON string slice.
/// Panics if the JSON is invalid (intended for tests).
pub fn settings_from_json(json: &str) -> SettingsMap {
    SettingsMap::from_json(json).expect("Failed to create test settings from JSON")
}

/// Returns a settings blob shaped like a real plugin install.
pub fn plugin_settings() -> SettingsMap {
    settings_from_json(
        r#"{
        "currency": "USD",
        "currency_position": "before",
        "thousands_separator": ",",
        "decimal_separator": ".",
        "number_decimals": 2,
        "gateways": {
            "manual": "1",
            "offline": "1"
        },
        "default_gateway": "manual",
        "test_mode": "enabled",
        "donor_wall": {
            "columns": "best-fit",
            "avatar_size": 60
        }
    }"#,
    )
}
