//! Built-in derived lists: payment gateways and currencies.
//!
//! Both lists are computed once per cache instance from the defaults in this
//! module, folded through their extension point, and never persisted.

pub mod currencies;
pub mod gateways;

pub use currencies::{Currencies, Currency, CurrencyPosition, CurrencySetting, default_currencies};
pub use gateways::{Gateway, Gateways, default_gateways};

/// Option name under which the currency list is exposed.
pub const CURRENCIES: &str = "currencies";

/// Option name under which the gateway list is exposed.
pub const GATEWAYS: &str = "gateways";

/// Returns true if `name` is a derived list rather than a stored option.
pub fn is_derived(name: &str) -> bool {
    name == CURRENCIES || name == GATEWAYS
}
