use async_trait::async_trait;
use serde_json::Value;

/// Transport-level failure. The variants keep "no response at all" apart from
/// "the provider answered with an error" so the search can classify them.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("No response from provider: {0}")]
    NoResponse(String),
    #[error("Provider returned status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },
}

#[async_trait]
pub trait FlightProvider: Send + Sync {
    /// POST a JSON body to the provider and return the raw response. A
    /// successful body that is not JSON comes back as `Value::String`.
    /// Credentials are attached by the implementation.
    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError>;
}
