use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

fn default_true() -> bool {
    true
}

/// Response from the settings update endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetSettingsResponse {
    #[serde(default = "default_true")]
    pub result: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Settings as the backend currently holds them. Every field is optional;
/// whatever is missing keeps its local value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    pub ui_floating_precision: Option<u8>,
    pub historical_data_start: Option<String>,
    pub main_currency: Option<String>,
    pub eth_rpc_port: Option<String>,
    #[serde(deserialize_with = "number_or_string")]
    pub balance_save_frequency: Option<u32>,
    pub anonymized_logs: Option<bool>,
    pub connected_exchanges: Option<Vec<String>>,
    pub datetime_format: Option<String>,
    pub has_premium: Option<bool>,
    pub premium_should_sync: Option<bool>,
    pub last_balance_save: Option<i64>,
    pub include_crypto2crypto: Option<bool>,
    pub taxfree_after_period: Option<i64>,
}

/// The backend sends `balance_save_frequency` back as either a number or
/// the string it was given
fn number_or_string<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Response from the settings query endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSettingsResponse {
    #[serde(default)]
    pub result: Option<RemoteSettings>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response from the fiat exchange rates endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRatesResponse {
    #[serde(default)]
    pub result: Option<HashMap<String, f64>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body the backend sends with non-2xx statuses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}

/// Error type for backend operations
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 404 Not Found
    NotFound(String),
    /// 409 Conflict
    Conflict(String),
    /// 5xx Server Error
    ServerError(i32, String),
    /// Other HTTP errors
    HttpError(i32, String),
    /// 2xx response whose body reports failure
    Rejected(String),
    /// No response within the configured timeout
    Timeout,
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
}

impl ApiError {
    /// The human-readable part of the error, without the kind prefix
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::ServerError(_, msg)
            | ApiError::HttpError(_, msg)
            | ApiError::Rejected(msg)
            | ApiError::RequestError(msg)
            | ApiError::DeserializationError(msg) => msg.clone(),
            ApiError::Timeout => "backend did not respond in time".to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::Rejected(msg) => write!(f, "Rejected: {}", msg),
            ApiError::Timeout => write!(f, "Timeout: backend did not respond in time"),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}
