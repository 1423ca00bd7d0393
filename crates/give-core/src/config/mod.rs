pub mod map;
pub mod value;

pub use map::SettingsMap;
pub use value::SettingValue;
