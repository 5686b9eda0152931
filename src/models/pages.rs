//! Registry of rendered page fragments

use std::collections::HashMap;

use super::settings::assert_exchange_exists;
use crate::utils::errors::SettingsError;

pub const PAGE_INDEX: &str = "page_index";
pub const PAGE_SETTINGS: &str = "page_settings";
pub const PAGE_OTCTRADES: &str = "page_otctrades";
pub const PAGE_USER_SETTINGS: &str = "page_user_settings";
pub const PAGE_ACCOUNTING_SETTINGS: &str = "page_accounting_settings";
pub const PAGE_TAXREPORT: &str = "page_taxreport";

/// Page name to HTML fragment. Exchange pages live in their own map,
/// keyed by exchange name.
#[derive(Debug, Default)]
pub struct Pages {
    pages: HashMap<String, String>,
    page_exchange: HashMap<String, String>,
}

impl Pages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pages.get(name).map(String::as_str)
    }

    /// Store a fragment, returning the one it replaced
    pub fn insert(&mut self, name: impl Into<String>, html: impl Into<String>) -> Option<String> {
        self.pages.insert(name.into(), html.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.pages.remove(name)
    }

    pub fn exchange_page(&self, exchange: &str) -> Option<&str> {
        self.page_exchange.get(exchange).map(String::as_str)
    }

    /// Store an exchange page; the exchange must be a supported one
    pub fn insert_exchange_page(
        &mut self,
        exchange: &str,
        html: impl Into<String>,
    ) -> Result<Option<String>, SettingsError> {
        assert_exchange_exists(exchange)?;
        Ok(self.page_exchange.insert(exchange.to_string(), html.into()))
    }

    pub fn exchange_pages(&self) -> &HashMap<String, String> {
        &self.page_exchange
    }
}
