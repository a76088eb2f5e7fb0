pub mod app_config;
pub mod provider_client;

pub use provider_client::{HttpFlightProvider, ProviderClientError};
