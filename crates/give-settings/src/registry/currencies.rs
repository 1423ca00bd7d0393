//! Currency registry.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Where the currency symbol goes relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyPosition {
    Before,
    After,
}

/// Formatting defaults applied when a currency is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySetting {
    pub currency_position: CurrencyPosition,
    pub thousands_separator: String,
    pub decimal_separator: String,
    pub number_decimals: u8,
}

/// A currency donors can give in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Label shown in the admin currency selector.
    pub admin_label: String,
    /// Symbol printed next to amounts.
    pub symbol: String,
    /// Formatting defaults.
    pub setting: CurrencySetting,
}

impl Currency {
    /// Returns `amount` with the symbol placed per the currency position.
    ///
    /// ```
    /// use give_settings::registry::default_currencies;
    ///
    /// let currencies = default_currencies();
    /// assert_eq!(currencies["USD"].decorate("10.00"), "$10.00");
    /// assert_eq!(currencies["CZK"].decorate("10,00"), "10,00Kč");
    /// ```
    pub fn decorate(&self, amount: &str) -> String {
        match self.setting.currency_position {
            CurrencyPosition::Before => format!("{}{}", self.symbol, amount),
            CurrencyPosition::After => format!("{}{}", amount, self.symbol),
        }
    }
}

/// Currencies keyed by ISO code, in registration order.
pub type Currencies = IndexMap<String, Currency>;

use CurrencyPosition::{After, Before};

// code, admin label, symbol, position, thousands separator, decimal separator, decimals
const BUILT_IN: &[(&str, &str, &str, CurrencyPosition, &str, &str, u8)] = &[
    ("USD", "US Dollars", "$", Before, ",", ".", 2),
    ("EUR", "Euros", "€", Before, ".", ",", 2),
    ("GBP", "Pounds Sterling", "£", Before, ",", ".", 2),
    ("AUD", "Australian Dollars", "$", Before, ",", ".", 2),
    ("BRL", "Brazilian Real", "R$", Before, "", ".", 2),
    ("CAD", "Canadian Dollars", "$", Before, ",", ".", 2),
    ("CZK", "Czech Koruna", "Kč", After, "", ".", 2),
    ("DKK", "Danish Krone", "kr.", Before, "", ".", 2),
    ("HKD", "Hong Kong Dollar", "$", Before, "", ".", 2),
    ("HUF", "Hungarian Forint", "Ft", Before, "", ".", 2),
    ("ILS", "Israeli Shekel", "₪", After, "", ".", 2),
    ("JPY", "Japanese Yen", "¥", Before, ",", ".", 0),
    ("MYR", "Malaysian Ringgits", "RM", Before, ",", ".", 2),
    ("MXN", "Mexican Peso", "$", Before, ",", ".", 2),
    ("MAD", "Moroccan Dirham", "&#x2e;&#x62f;&#x2e;&#x645;", Before, ",", ".", 2),
    ("NZD", "New Zealand Dollar", "$", Before, ",", ".", 2),
    ("NOK", "Norwegian Krone", "Kr.", Before, ".", ",", 2),
    ("PHP", "Philippine Pesos", "₱", Before, ",", ".", 2),
    ("PLN", "Polish Zloty", "zł", Before, " ", ",", 2),
    ("SGD", "Singapore Dollar", "$", Before, ",", ".", 2),
    ("KRW", "South Korean Won", "₩", Before, ",", ".", 0),
    ("ZAR", "South African Rand", "R", Before, " ", ".", 2),
    ("SEK", "Swedish Krona", "kr", Before, " ", ",", 2),
    ("CHF", "Swiss Franc", "CHF", Before, ",", ".", 2),
    ("TWD", "Taiwan New Dollars", "NT$", Before, ",", ".", 2),
    ("THB", "Thai Baht", "฿", Before, ",", ".", 2),
    ("INR", "Indian Rupee", "₹", Before, ",", ".", 2),
    ("TRY", "Turkish Lira", "₺", Before, ",", ".", 2),
    ("IRR", "Iranian Rial", "﷼", After, ",", ".", 2),
    ("RUB", "Russian Rubles", "₽", Before, ".", ",", 2),
    ("AED", "United Arab Emirates dirham", "د.إ", Before, ",", ".", 2),
    ("AMD", "Armenian dram", "AMD", Before, ",", ".", 2),
    ("ANG", "Netherlands Antillean guilder", "ƒ", Before, ",", ".", 2),
    ("UYU", "Uruguayan peso", "$U", Before, ",", ".", 2),
    ("ARS", "Argentine peso", "$", Before, ".", ",", 2),
    ("HRK", "Croatian kuna", "kn", Before, ",", ".", 2),
    ("NGN", "Nigerian naira", "₦", Before, ",", ".", 2),
    ("BGN", "Bulgarian lev", "лв.", Before, ",", ".", 2),
    ("CLP", "Chilean peso", "$", Before, ".", ",", 0),
];

/// Returns the currencies that ship with the plugin.
pub fn default_currencies() -> Currencies {
    BUILT_IN
        .iter()
        .map(
            |&(code, label, symbol, position, thousands, decimal, decimals)| {
                let currency = Currency {
                    admin_label: format!("{} ({})", label, symbol),
                    symbol: symbol.to_string(),
                    setting: CurrencySetting {
                        currency_position: position,
                        thousands_separator: thousands.to_string(),
                        decimal_separator: decimal.to_string(),
                        number_decimals: decimals,
                    },
                };
                (code.to_string(), currency)
            },
        )
        .collect()
}
