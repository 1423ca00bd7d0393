//! Give Core - Domain types for the Give settings cache
//!
//! This crate provides the value types shared by the settings cache and its
//! collaborators, the error hierarchy, and the decoding applied to raw option
//! rows at the store-read edge.

pub mod config;
pub mod error;
pub mod format;

pub use config::{SettingValue, SettingsMap};
pub use error::{GiveError, Result};
pub use format::{OptionFormat, decode_option_value, encode_option_value};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
