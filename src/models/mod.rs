//! Data models for the settings panel
//!
//! Currencies, the settings store, page fragments and user notifications.

pub mod currency;
pub mod notification;
pub mod pages;
pub mod settings;

// Re-export commonly used types for convenience
pub use currency::{currencies, currency_by_ticker, Currency};
pub use notification::{Notification, NotificationLevel};
pub use pages::Pages;
pub use settings::{assert_exchange_exists, Settings, SettingsPayload, SettingsUpdate};
