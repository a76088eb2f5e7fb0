pub mod search;
pub mod offer;
pub mod provider;

pub use search::{CabinClass, ProviderRequest, SearchContext, SearchParams, TripType};
pub use offer::{AirlineInfo, AirportInfo, Amenities, FareInfo, FlightOffer, SearchResult};
pub use provider::{FlightProvider, TransportError};

/// Classified failures surfaced by a flight search.
///
/// Record-level formatting problems never show up here; they are logged and
/// the affected segment is left out of the result.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Provider error{}: {message}", status_suffix(.status))]
    Server {
        status: Option<u16>,
        message: String,
    },
    #[error("Processing failed: {0}")]
    Processing(String),
}

impl SearchError {
    /// Human-readable message without the class prefix
    pub fn message(&self) -> &str {
        match self {
            SearchError::Validation(msg)
            | SearchError::Network(msg)
            | SearchError::Processing(msg) => msg,
            SearchError::Server { message, .. } => message,
        }
    }

    /// Short class name, used in API error bodies and logs
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::Validation(_) => "validation_error",
            SearchError::Network(_) => "network_error",
            SearchError::Server { .. } => "server_error",
            SearchError::Processing(_) => "processing_error",
        }
    }
}

impl From<TransportError> for SearchError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::NoResponse(msg) => SearchError::Network(msg),
            TransportError::Status { status, message } => SearchError::Server {
                status: Some(status),
                message: message.unwrap_or_else(|| format!("Provider responded with status {}", status)),
            },
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

pub type CoreResult<T> = Result<T, SearchError>;
