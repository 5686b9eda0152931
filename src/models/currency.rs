//! Fiat currency models and the static registry

use lazy_static::lazy_static;

/// A supported fiat currency. Identity is the ticker symbol.
#[derive(Debug, PartialEq, Eq)]
pub struct Currency {
    pub full_name: &'static str,
    pub icon_key: &'static str,
    pub ticker_symbol: &'static str,
    pub unicode_symbol: &'static str,
}

impl Currency {
    const fn new(
        full_name: &'static str,
        icon_key: &'static str,
        ticker_symbol: &'static str,
        unicode_symbol: &'static str,
    ) -> Self {
        Currency {
            full_name,
            icon_key,
            ticker_symbol,
            unicode_symbol,
        }
    }

    pub fn is_usd(&self) -> bool {
        self.ticker_symbol == "USD"
    }
}

lazy_static! {
    static ref CURRENCIES: Vec<Currency> = vec![
        Currency::new("United States Dollar", "fa-usd", "USD", "$"),
        Currency::new("Euro", "fa-eur", "EUR", "€"),
        Currency::new("British Pound", "fa-gbp", "GBP", "£"),
        Currency::new("Japanese Yen", "fa-jpy", "JPY", "¥"),
        Currency::new("Chinese Yuan", "fa-jpy", "CNY", "¥"),
    ];
}

/// All supported fiat currencies, in display order
pub fn currencies() -> &'static [Currency] {
    &CURRENCIES
}

/// The first registry entry (USD)
pub fn default_currency() -> &'static Currency {
    &CURRENCIES[0]
}

/// Resolve a ticker against the registry
pub fn currency_by_ticker(ticker: &str) -> Option<&'static Currency> {
    CURRENCIES.iter().find(|c| c.ticker_symbol == ticker)
}
