//! Payment gateway registry.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Labels of a payment gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gateway {
    /// Label shown in the admin settings.
    pub admin_label: String,
    /// Label shown to donors at checkout.
    pub checkout_label: String,
}

impl Gateway {
    /// Creates a new gateway entry.
    pub fn new(admin_label: impl Into<String>, checkout_label: impl Into<String>) -> Self {
        Self {
            admin_label: admin_label.into(),
            checkout_label: checkout_label.into(),
        }
    }
}

/// Gateways keyed by id, in registration order.
pub type Gateways = IndexMap<String, Gateway>;

/// Returns the gateways that ship with the plugin.
pub fn default_gateways() -> Gateways {
    let mut gateways = Gateways::new();
    gateways.insert(
        "manual".to_string(),
        Gateway::new("Test Donation", "Test Donation"),
    );
    gateways.insert(
        "offline".to_string(),
        Gateway::new("Offline Donation", "Offline Donation"),
    );
    gateways.insert(
        "paypal".to_string(),
        Gateway::new("PayPal Standard", "PayPal"),
    );
    gateways
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gateways() {
        let gateways = default_gateways();

        let ids: Vec<&str> = gateways.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["manual", "offline", "paypal"]);
        assert_eq!(gateways["paypal"].admin_label, "PayPal Standard");
        assert_eq!(gateways["paypal"].checkout_label, "PayPal");
    }
}
