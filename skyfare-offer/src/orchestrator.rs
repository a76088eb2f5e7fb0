use std::sync::Arc;
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;
use skyfare_core::{
    CoreResult, FlightOffer, FlightProvider, ProviderRequest, SearchContext, SearchError, SearchParams,
    SearchResult,
};
use crate::extractor;
use crate::fallback;
use crate::fields;
use crate::formatter::OfferFormatter;
use crate::resolver;
use crate::segments::{self, NormalizedSegments};

pub const DEFAULT_SEARCH_PATH: &str = "/flights/search";

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Provider path the search request is posted to
    pub search_path: String,
    /// Serve the offline sample when the transport fails
    pub fallback_enabled: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_path: DEFAULT_SEARCH_PATH.to_string(),
            fallback_enabled: false,
        }
    }
}

/// Drives one flight search: validation, the provider call, and
/// normalization of the raw response into canonical offers.
pub struct SearchOrchestrator {
    provider: Arc<dyn FlightProvider>,
    formatter: OfferFormatter,
    config: SearchConfig,
}

impl SearchOrchestrator {
    pub fn new(provider: Arc<dyn FlightProvider>, formatter: OfferFormatter, config: SearchConfig) -> Self {
        Self { provider, formatter, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub async fn search(&self, params: &SearchParams) -> CoreResult<SearchResult> {
        // 1. Validate before touching the network
        let context = params.validate().map_err(|err| {
            tracing::warn!("Rejected search request: {}", err);
            err
        })?;

        let span = tracing::info_span!(
            "flight_search",
            search_id = %Uuid::new_v4(),
            origin = %context.origin,
            destination = %context.destination,
            trip_type = ?context.trip_type,
        );

        self.run(&context).instrument(span).await
    }

    async fn run(&self, context: &SearchContext) -> CoreResult<SearchResult> {
        // 2. Build provider request
        let request = ProviderRequest::from_context(context);
        let body = serde_json::to_value(&request)
            .map_err(|e| SearchError::Processing(format!("Failed to encode provider request: {}", e)))?;

        // 3. Call provider, falling back to the offline sample if allowed
        let raw = match self.provider.post(&self.config.search_path, &body).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::error!("Provider request failed: {}", err);
                if !self.config.fallback_enabled {
                    return Err(err.into());
                }
                tracing::warn!("Offline fallback enabled, serving sample response");
                fallback::offline_response()
                    .map_err(|e| SearchError::Processing(format!("Offline dataset is invalid: {}", e)))?
            }
        };

        // 4-7. Normalize
        self.normalize_response(&raw, context)
    }

    /// Turn a raw provider response into a `SearchResult` shaped by the trip
    /// type. Per-record problems are logged and skipped; only a results
    /// container that cannot be interpreted at all is an error.
    pub fn normalize_response(&self, raw: &Value, context: &SearchContext) -> CoreResult<SearchResult> {
        let envelopes = extractor::extract(raw).map_err(|e| {
            tracing::error!("Unable to interpret provider response: {}", e);
            SearchError::Processing(e.to_string())
        })?;

        if envelopes.is_empty() {
            tracing::info!("Provider returned no results");
            return Ok(SearchResult::empty(context.trip_type));
        }

        let is_round_trip = context.is_round_trip();
        let mut outbound = Vec::new();
        let mut inbound = Vec::new();
        let mut dropped = 0;

        for (position, entry) in envelopes.into_iter().enumerate() {
            // An entry may itself be a list of envelopes
            let group: Vec<&Value> = match entry {
                Value::Array(items) => items.iter().collect(),
                single => vec![single],
            };

            for envelope in group {
                if is_falsy(envelope) {
                    continue;
                }

                let Some(raw_segments) = resolver::resolve(envelope, fields::SEGMENTS) else {
                    tracing::warn!(
                        "Skipping envelope {} at position {}: no segments",
                        describe(envelope),
                        position
                    );
                    dropped += 1;
                    continue;
                };

                match segments::normalize(raw_segments, is_round_trip) {
                    NormalizedSegments::OneWay(legs) => {
                        dropped += self.format_all(envelope, &legs, context, &mut outbound);
                    }
                    NormalizedSegments::RoundTrip { outbound: out_legs, inbound: in_legs } => {
                        dropped += self.format_all(envelope, &out_legs, context, &mut outbound);
                        dropped += self.format_all(envelope, &in_legs, context, &mut inbound);
                    }
                }
            }
        }

        tracing::info!(
            "Normalized {} outbound and {} return offers ({} records skipped)",
            outbound.len(),
            inbound.len(),
            dropped
        );

        Ok(if is_round_trip {
            SearchResult::RoundTrip { outbound, inbound }
        } else {
            SearchResult::OneWay(outbound)
        })
    }

    fn format_all(
        &self,
        envelope: &Value,
        legs: &[&Value],
        context: &SearchContext,
        out: &mut Vec<FlightOffer>,
    ) -> usize {
        let before = out.len();
        out.extend(legs.iter().filter_map(|leg| self.formatter.format(envelope, leg, context)));
        legs.len() - (out.len() - before)
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn describe(envelope: &Value) -> String {
    resolver::resolve_str(envelope, fields::RESULT_INDEX).unwrap_or_else(|| "<no result index>".to_string())
}
