use give_core::{
    OptionFormat, Result, SettingValue, SettingsMap, decode_option_value, encode_option_value,
};

mod common;

#[test]
fn test_settings_blob_survives_store_edge() {
    let settings = common::plugin_settings();

    let raw = encode_option_value(&settings.clone().into()).unwrap();
    assert_eq!(OptionFormat::detect(&raw), OptionFormat::Json);

    let decoded = SettingsMap::from_value(decode_option_value(&raw)).unwrap();
    assert_eq!(decoded, settings);
    assert_eq!(
        decoded.get("donor_wall.avatar_size").unwrap().as_i64(),
        Some(60)
    );
}

#[test]
fn test_field_order_is_preserved() {
    let decoded = decode_option_value(r#"{"test_mode":"enabled","currency":"USD"}"#);
    let keys: Vec<&str> = decoded
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();

    assert_eq!(keys, vec!["test_mode", "currency"]);
}

#[test]
fn test_empty_settings_field_checks() {
    let settings = common::settings_from_json(r#"{"test_mode": "", "disable_css": "0"}"#);

    assert!(settings.get("test_mode").unwrap().is_empty());
    assert!(settings.get("disable_css").unwrap().is_empty());
    assert!(!common::plugin_settings().get("test_mode").unwrap().is_empty());
}

#[test]
fn test_decode_error_propagation() {
    fn load(json: &str) -> Result<SettingsMap> {
        let settings = SettingsMap::from_json(json)?;
        Ok(settings)
    }

    assert!(load(r#"{"currency":"USD"}"#).is_ok());

    let error = load(r#"["not", "a", "map"]"#).unwrap_err();
    assert!(error.is_decode_error());
    assert!(error.to_string().starts_with("Failed to decode json value"));
}

#[test]
fn test_scalar_rows_keep_their_type() {
    assert_eq!(decode_option_value("1"), SettingValue::from(1));
    assert_eq!(decode_option_value("2.33.1").as_str(), Some("2.33.1"));

    for value in [SettingValue::from(false), SettingValue::from("false")] {
        let raw = encode_option_value(&value).unwrap();
        assert_eq!(decode_option_value(&raw), value);
    }
    assert!(decode_option_value(&encode_option_value(&false.into()).unwrap()).is_empty());
}
