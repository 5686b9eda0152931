use reqwest::Client as HttpClient;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use super::models::{
    ApiError, ErrorResponse, ExchangeRatesResponse, GetSettingsResponse, RemoteSettings,
    SetSettingsResponse,
};
use crate::models::SettingsPayload;

/// The backend operations the settings panel depends on
pub trait SettingsBackend {
    fn get_settings(&self) -> impl Future<Output = Result<RemoteSettings, ApiError>> + Send;

    fn set_settings(
        &self,
        payload: &SettingsPayload,
    ) -> impl Future<Output = Result<SetSettingsResponse, ApiError>> + Send;
}

/// HTTP client for the backend process
pub struct BackendClient {
    http_client: HttpClient,
    base_url: String,
}

impl BackendClient {
    /// Create a client for `base_url`; every request gives up after `timeout`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn map_send_error(e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            warn!("Backend request timed out: {}", e);
            ApiError::Timeout
        } else {
            ApiError::RequestError(format!("Request failed: {}", e))
        }
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body_text)
            .ok()
            .and_then(|err| err.message.or(err.error))
            .unwrap_or(body_text);

        match status_code {
            400 => ApiError::BadRequest(message),
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            500..=599 => {
                warn!("Server error {}: {}", status_code, message);
                ApiError::ServerError(status_code as i32, message)
            }
            _ => ApiError::HttpError(status_code as i32, message),
        }
    }

    /// GET /settings
    ///
    /// The settings the backend currently holds.
    pub async fn get_settings(&self) -> Result<RemoteSettings, ApiError> {
        let url = format!("{}/settings", self.base_url);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response
            .json::<GetSettingsResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        body.result
            .ok_or_else(|| ApiError::Rejected(body.message.unwrap_or_default()))
    }

    /// POST /settings
    ///
    /// Sends the changed settings. A 2xx body with `result: false` is
    /// reported as [`ApiError::Rejected`] carrying the server's message.
    pub async fn set_settings(&self, payload: &SettingsPayload) -> Result<SetSettingsResponse, ApiError> {
        let url = format!("{}/settings", self.base_url);
        debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response
            .json::<SetSettingsResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        if !body.result {
            return Err(ApiError::Rejected(body.message.unwrap_or_default()));
        }
        Ok(body)
    }

    /// GET /fiat_exchange_rates?currencies=EUR,GBP
    ///
    /// Returns USD→fiat rates for the requested tickers.
    pub async fn get_fiat_exchange_rates(
        &self,
        tickers: &[&str],
    ) -> Result<HashMap<String, f64>, ApiError> {
        let url = format!("{}/fiat_exchange_rates", self.base_url);
        debug!("GET {} for {:?}", url, tickers);

        let response = self
            .http_client
            .get(&url)
            .query(&[("currencies", tickers.join(","))])
            .send()
            .await
            .map_err(Self::map_send_error)?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response
            .json::<ExchangeRatesResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        body.result
            .ok_or_else(|| ApiError::Rejected(body.message.unwrap_or_default()))
    }
}

impl SettingsBackend for BackendClient {
    fn get_settings(&self) -> impl Future<Output = Result<RemoteSettings, ApiError>> + Send {
        BackendClient::get_settings(self)
    }

    fn set_settings(
        &self,
        payload: &SettingsPayload,
    ) -> impl Future<Output = Result<SetSettingsResponse, ApiError>> + Send {
        BackendClient::set_settings(self, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn payload() -> SettingsPayload {
        SettingsPayload {
            ui_floating_precision: 3,
            historical_data_start: "01/01/2018".to_string(),
            main_currency: "EUR".to_string(),
            eth_rpc_port: "8545".to_string(),
            balance_save_frequency: "24".to_string(),
            anonymized_logs: false,
        }
    }

    fn client_for(server: &MockServer) -> BackendClient {
        BackendClient::new(server.base_url(), Duration::from_secs(5)).expect("client")
    }

    #[tokio::test]
    async fn test_set_settings_posts_payload() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/settings").json_body(json!({
                    "ui_floating_precision": 3,
                    "historical_data_start": "01/01/2018",
                    "main_currency": "EUR",
                    "eth_rpc_port": "8545",
                    "balance_save_frequency": "24",
                    "anonymized_logs": false
                }));
                then.status(200)
                    .json_body(json!({"result": true, "message": "restart required"}));
            })
            .await;

        let response = client_for(&server).set_settings(&payload()).await.unwrap();
        assert!(response.result);
        assert_eq!(response.message.as_deref(), Some("restart required"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_set_settings_result_false_is_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/settings");
                then.status(200)
                    .json_body(json!({"result": false, "message": "invalid port"}));
            })
            .await;

        let err = client_for(&server).set_settings(&payload()).await.unwrap_err();
        assert_eq!(err, ApiError::Rejected("invalid port".to_string()));
        assert_eq!(err.message(), "invalid port");
    }

    #[tokio::test]
    async fn test_set_settings_error_status_uses_body_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/settings");
                then.status(500).json_body(json!({"message": "db locked"}));
            })
            .await;

        let err = client_for(&server).set_settings(&payload()).await.unwrap_err();
        assert_eq!(err, ApiError::ServerError(500, "db locked".to_string()));
    }

    #[tokio::test]
    async fn test_fiat_exchange_rates_are_parsed() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/fiat_exchange_rates")
                    .query_param("currencies", "EUR,GBP");
                then.status(200)
                    .json_body(json!({"result": {"EUR": 0.92, "GBP": 0.79}, "message": ""}));
            })
            .await;

        let rates = client_for(&server)
            .get_fiat_exchange_rates(&["EUR", "GBP"])
            .await
            .unwrap();
        assert_eq!(rates.get("EUR"), Some(&0.92));
        assert_eq!(rates.get("GBP"), Some(&0.79));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fiat_exchange_rates_null_result_is_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/fiat_exchange_rates");
                then.status(200)
                    .json_body(json!({"result": null, "message": "rates service down"}));
            })
            .await;

        let err = client_for(&server)
            .get_fiat_exchange_rates(&["EUR"])
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Rejected("rates service down".to_string()));
    }

    #[tokio::test]
    async fn test_client_errors_map_by_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/settings");
                then.status(400).json_body(json!({"error": "bad date"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/fiat_exchange_rates");
                then.status(404).body("no such route");
            })
            .await;

        let client = client_for(&server);
        let err = client.set_settings(&payload()).await.unwrap_err();
        assert_eq!(err, ApiError::BadRequest("bad date".to_string()));
        assert_eq!(err.message(), "bad date");

        let err = client.get_fiat_exchange_rates(&["EUR"]).await.unwrap_err();
        assert_eq!(err, ApiError::NotFound("no such route".to_string()));
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/settings");
                then.status(200)
                    .delay(Duration::from_millis(1500))
                    .json_body(json!({"result": true}));
            })
            .await;

        let client = BackendClient::new(server.base_url(), Duration::from_millis(200)).expect("client");
        let err = client.set_settings(&payload()).await.unwrap_err();
        assert_eq!(err, ApiError::Timeout);
        assert_eq!(err.message(), "backend did not respond in time");
    }

    #[tokio::test]
    async fn test_get_settings_reads_result() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/settings");
                then.status(200).json_body(json!({
                    "result": {
                        "ui_floating_precision": 4,
                        "main_currency": "GBP",
                        "eth_rpc_port": "9000",
                        "balance_save_frequency": 6,
                        "include_crypto2crypto": true
                    },
                    "message": ""
                }));
            })
            .await;

        let remote = client_for(&server).get_settings().await.unwrap();
        assert_eq!(remote.ui_floating_precision, Some(4));
        assert_eq!(remote.main_currency.as_deref(), Some("GBP"));
        assert_eq!(remote.balance_save_frequency, Some(6));
        assert_eq!(remote.include_crypto2crypto, Some(true));
        assert_eq!(remote.anonymized_logs, None);
        mock.assert_async().await;
    }
}
