//! User settings store and the update/payload types around it

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use super::currency::{default_currency, Currency};
use crate::utils::errors::SettingsError;
use crate::utils::icons::build_icon_map;

/// Exchanges the application knows how to talk to
pub const EXCHANGES: [&str; 5] = ["kraken", "poloniex", "bittrex", "bitmex", "binance"];

/// Fail unless `name` is one of the supported exchanges
pub fn assert_exchange_exists(name: &str) -> Result<(), SettingsError> {
    if EXCHANGES.contains(&name) {
        Ok(())
    } else {
        Err(SettingsError::InvalidExchange(name.to_string()))
    }
}

/// In-memory user preferences.
///
/// `main_currency` always points into the currency registry. Fields are
/// changed only through [`Settings::apply`].
#[derive(Debug)]
pub struct Settings {
    floating_precision: u8,
    historical_data_start: String,
    main_currency: &'static Currency,
    eth_rpc_port: String,
    balance_save_frequency: u32,
    anonymized_logs: bool,
    usd_to_fiat_exchange_rates: HashMap<String, f64>,
    icon_map: HashMap<String, PathBuf>,

    pub connected_exchanges: Vec<String>,
    pub datetime_format: String,
    pub has_premium: bool,
    pub premium_should_sync: bool,
    pub start_suggestion: String,
    pub last_balance_save: i64,
    pub include_crypto2crypto: bool,
    pub taxfree_after_period: i64,
    pub current_location: Option<String>,
}

impl Settings {
    /// Defaults with an already built icon map
    pub fn new(icon_map: HashMap<String, PathBuf>) -> Self {
        Settings {
            floating_precision: 2,
            historical_data_start: "01/08/2015".to_string(),
            main_currency: default_currency(),
            eth_rpc_port: "8545".to_string(),
            balance_save_frequency: 24,
            anonymized_logs: false,
            usd_to_fiat_exchange_rates: HashMap::new(),
            icon_map,
            connected_exchanges: Vec::new(),
            datetime_format: "d/m/Y G:i".to_string(),
            has_premium: false,
            premium_should_sync: false,
            start_suggestion: "inactive".to_string(),
            last_balance_save: 0,
            include_crypto2crypto: false,
            taxfree_after_period: 0,
            current_location: None,
        }
    }

    /// Defaults plus an icon map scanned from `icon_dir`
    pub fn load(icon_dir: &Path) -> Result<Self, SettingsError> {
        let icon_map = build_icon_map(icon_dir)?;
        Ok(Self::new(icon_map))
    }

    pub fn floating_precision(&self) -> u8 {
        self.floating_precision
    }

    pub fn historical_data_start(&self) -> &str {
        &self.historical_data_start
    }

    pub fn main_currency(&self) -> &'static Currency {
        self.main_currency
    }

    pub fn eth_rpc_port(&self) -> &str {
        &self.eth_rpc_port
    }

    pub fn balance_save_frequency(&self) -> u32 {
        self.balance_save_frequency
    }

    pub fn anonymized_logs(&self) -> bool {
        self.anonymized_logs
    }

    pub fn exchanges(&self) -> &'static [&'static str] {
        &EXCHANGES
    }

    pub fn icon_map(&self) -> &HashMap<String, PathBuf> {
        &self.icon_map
    }

    /// Rate for `ticker` where 1 USD = rate units of `ticker`
    pub fn exchange_rate(&self, ticker: &str) -> Option<f64> {
        self.usd_to_fiat_exchange_rates.get(ticker).copied()
    }

    /// Merge externally fetched USD→fiat rates into the table
    pub fn set_exchange_rates<I>(&mut self, rates: I)
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        self.usd_to_fiat_exchange_rates.extend(rates);
    }

    /// Apply a validated update and return the resulting state
    pub fn apply(&mut self, update: SettingsUpdate) -> &Self {
        debug!(
            "Applying settings update: precision={}, main_currency={}",
            update.floating_precision, update.main_currency.ticker_symbol
        );
        self.floating_precision = update.floating_precision;
        self.historical_data_start = update.historical_data_start;
        self.main_currency = update.main_currency;
        self.eth_rpc_port = update.eth_rpc_port;
        self.balance_save_frequency = update.balance_save_frequency;
        self.anonymized_logs = update.anonymized_logs;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

/// A validated, not yet applied set of new values
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsUpdate {
    pub floating_precision: u8,
    pub historical_data_start: String,
    pub main_currency: &'static Currency,
    pub eth_rpc_port: String,
    pub balance_save_frequency: u32,
    pub anonymized_logs: bool,
}

impl SettingsUpdate {
    pub fn to_payload(&self) -> SettingsPayload {
        SettingsPayload {
            ui_floating_precision: self.floating_precision,
            historical_data_start: self.historical_data_start.clone(),
            main_currency: self.main_currency.ticker_symbol.to_string(),
            eth_rpc_port: self.eth_rpc_port.clone(),
            balance_save_frequency: self.balance_save_frequency.to_string(),
            anonymized_logs: self.anonymized_logs,
        }
    }
}

/// Body sent to the backend when settings change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsPayload {
    pub ui_floating_precision: u8,
    pub historical_data_start: String,
    pub main_currency: String,
    pub eth_rpc_port: String,
    pub balance_save_frequency: String,
    pub anonymized_logs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::currency::currency_by_ticker;
    use serde_json::json;

    fn eur_update() -> SettingsUpdate {
        SettingsUpdate {
            floating_precision: 4,
            historical_data_start: "15/03/2017".to_string(),
            main_currency: currency_by_ticker("EUR").unwrap(),
            eth_rpc_port: "8546".to_string(),
            balance_save_frequency: 12,
            anonymized_logs: true,
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.floating_precision(), 2);
        assert_eq!(settings.historical_data_start(), "01/08/2015");
        assert_eq!(settings.main_currency().ticker_symbol, "USD");
        assert_eq!(settings.eth_rpc_port(), "8545");
        assert_eq!(settings.balance_save_frequency(), 24);
        assert!(!settings.anonymized_logs());
        assert_eq!(settings.start_suggestion, "inactive");
        assert_eq!(settings.exchanges().len(), 5);
    }

    #[test]
    fn test_assert_exchange_exists() {
        assert!(assert_exchange_exists("kraken").is_ok());
        let err = assert_exchange_exists("nope").unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_apply_returns_new_state() {
        let mut settings = Settings::default();
        let state = settings.apply(eur_update());
        assert_eq!(state.main_currency().ticker_symbol, "EUR");
        assert_eq!(state.floating_precision(), 4);
        assert_eq!(state.historical_data_start(), "15/03/2017");
        assert_eq!(state.eth_rpc_port(), "8546");
        assert_eq!(state.balance_save_frequency(), 12);
        assert!(state.anonymized_logs());
    }

    #[test]
    fn test_payload_shape() {
        let payload = eur_update().to_payload();
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "ui_floating_precision": 4,
                "historical_data_start": "15/03/2017",
                "main_currency": "EUR",
                "eth_rpc_port": "8546",
                "balance_save_frequency": "12",
                "anonymized_logs": true
            })
        );
    }

    #[test]
    fn test_exchange_rates_merge() {
        let mut settings = Settings::default();
        settings.set_exchange_rates(vec![("EUR".to_string(), 0.9)]);
        settings.set_exchange_rates(vec![("GBP".to_string(), 0.8)]);
        assert_eq!(settings.exchange_rate("EUR"), Some(0.9));
        assert_eq!(settings.exchange_rate("GBP"), Some(0.8));
        assert_eq!(settings.exchange_rate("JPY"), None);
    }
}
