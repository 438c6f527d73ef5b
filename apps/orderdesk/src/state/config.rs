//! # Configuration State
//!
//! Host configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`ORDERDESK_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use orderdesk_core::{Money, SellerRef};
use serde::{Deserialize, Serialize};

/// Host configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Catalog snapshot read at startup, if any
    pub catalog_path: Option<PathBuf>,

    /// Seller pre-filled on every new draft (single-seller back-offices)
    pub default_seller: Option<SellerRef>,
}

impl Default for ConfigState {
    /// Development defaults: PEN (S/), no catalog file, no default seller.
    fn default() -> Self {
        ConfigState {
            currency_code: "PEN".to_string(),
            currency_symbol: "S/ ".to_string(),
            catalog_path: None,
            default_seller: None,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `ORDERDESK_CURRENCY_CODE`: e.g. "USD"
    /// - `ORDERDESK_CURRENCY_SYMBOL`: e.g. "$"
    /// - `ORDERDESK_CATALOG_PATH`: JSON catalog snapshot to load at startup
    /// - `ORDERDESK_SELLER_ID` + `ORDERDESK_SELLER_NAME`: default seller
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, with an injectable lookup for tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(code) = lookup("ORDERDESK_CURRENCY_CODE") {
            config.currency_code = code;
        }

        if let Some(symbol) = lookup("ORDERDESK_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(path) = lookup("ORDERDESK_CATALOG_PATH").filter(|p| !p.trim().is_empty()) {
            config.catalog_path = Some(PathBuf::from(path));
        }

        if let (Some(id), Some(name)) = (
            lookup("ORDERDESK_SELLER_ID"),
            lookup("ORDERDESK_SELLER_NAME"),
        ) {
            config.default_seller = Some(SellerRef { id, name });
        }

        config
    }

    /// Formats an amount for display.
    ///
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(59000)), "S/ 590.00");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{}{}{}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            Money::from_cents(amount.cents().abs())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(59000)), "S/ 590.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "S/ 0.01");
        assert_eq!(config.format_currency(Money::zero()), "S/ 0.00");
        assert_eq!(config.format_currency(Money::from_cents(-1250)), "-S/ 12.50");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let env: HashMap<&str, &str> = [
            ("ORDERDESK_CURRENCY_CODE", "USD"),
            ("ORDERDESK_CURRENCY_SYMBOL", "$"),
            ("ORDERDESK_CATALOG_PATH", "/tmp/catalog.json"),
            ("ORDERDESK_SELLER_ID", "s-1"),
            ("ORDERDESK_SELLER_NAME", "Luis"),
        ]
        .into_iter()
        .collect();

        let config = ConfigState::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.currency_code, "USD");
        assert_eq!(config.format_currency(Money::from_cents(100)), "$1.00");
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(config.default_seller.unwrap().name, "Luis");
    }

    #[test]
    fn test_seller_needs_both_fields() {
        let config = ConfigState::from_lookup(|k| {
            (k == "ORDERDESK_SELLER_ID").then(|| "s-1".to_string())
        });
        assert!(config.default_seller.is_none());
        assert_eq!(config, ConfigState::default());
    }
}
