use std::time::Duration;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use tracing::{debug, error, warn};
use skyfare_core::{FlightProvider, TransportError};
use crate::app_config::ProviderConfig;

const MAX_MESSAGE_LEN: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum ProviderClientError {
    #[error("Provider token is not a valid header value")]
    InvalidToken,
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Flight provider reached over HTTP. The bearer credential and timeout are
/// fixed when the client is built and shared by every request.
#[derive(Clone)]
pub struct HttpFlightProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFlightProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderClientError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ProviderClientError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl FlightProvider for HttpFlightProvider {
    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            error!("Provider request to {} failed: {}", url, e);
            TransportError::NoResponse(e.to_string())
        })?;

        let status = response.status();
        let body = response.text().await;

        if !status.is_success() {
            error!("Provider responded {} for {}", status, url);
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: body.ok().as_deref().and_then(provider_message),
            });
        }

        let text = body
            .map_err(|e| TransportError::NoResponse(format!("Failed to read provider response: {}", e)))?;

        // Non-JSON bodies are handed on as text and match no results container
        Ok(serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!("Provider body from {} is not JSON: {}", url, e);
            Value::String(text)
        }))
    }
}

/// Best-effort error message from a provider error body
fn provider_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(json) => ["/message", "/error", "/error/message", "/Error/ErrorMessage", "/Response/Error/ErrorMessage"]
            .iter()
            .filter_map(|pointer| json.pointer(pointer).and_then(Value::as_str))
            .find(|msg| !msg.is_empty())
            .map(str::to_string),
        Err(_) => Some(trimmed.chars().take(MAX_MESSAGE_LEN).collect()),
    }
}
