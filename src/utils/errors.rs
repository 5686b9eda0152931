use std::path::PathBuf;
use thiserror::Error;

use crate::api::backend::ApiError;

/// Errors raised by the settings store, conversion helpers and form handling
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid exchange name: {0}")]
    InvalidExchange(String),
    #[error("amount was supposed to have value but it did not have")]
    MissingAmount,
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
    #[error("Invalid value for {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },
    #[error("Failed to read icon directory {}: {source}", .path.display())]
    IconScan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Backend error: {0}")]
    Backend(#[from] ApiError),
}
