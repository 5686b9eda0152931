use tracing::warn;

use crate::models::Settings;
use crate::utils::errors::SettingsError;
use crate::utils::number::{parse_float, to_fixed};

fn rate_for(settings: &Settings, ticker: &str) -> f64 {
    match settings.exchange_rate(ticker) {
        Some(rate) => rate,
        None => {
            warn!("No USD exchange rate known for {}", ticker);
            f64::NAN
        }
    }
}

/// Convert a USD value into the main currency (USD → X, multiply)
pub fn get_value_in_main_currency(settings: &Settings, usd_value: &str) -> f64 {
    let main = settings.main_currency();
    let usd = parse_float(usd_value);
    if main.is_usd() {
        return usd;
    }
    usd * rate_for(settings, main.ticker_symbol)
}

/// Convert an amount of `currency` into USD (X → USD, divide)
pub fn get_fiat_usd_value(settings: &Settings, currency: &str, amount: &str) -> f64 {
    let value = parse_float(amount);
    if currency == "USD" {
        return value;
    }
    value / rate_for(settings, currency)
}

/// Format a value for display in the main currency with
/// `floating_precision` decimal digits.
///
/// When `asset` is the main currency itself, `amount` is already in that
/// currency and is shown as-is; it must then be given.
pub fn format_currency_value(
    settings: &Settings,
    usd_value: &str,
    asset: Option<&str>,
    amount: Option<&str>,
) -> Result<String, SettingsError> {
    let value = if asset == Some(settings.main_currency().ticker_symbol) {
        match amount {
            Some(amount) if !amount.is_empty() => parse_float(amount),
            _ => return Err(SettingsError::MissingAmount),
        }
    } else {
        get_value_in_main_currency(settings, usd_value)
    };

    Ok(to_fixed(value, settings.floating_precision()))
}
