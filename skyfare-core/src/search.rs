use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use crate::{CoreResult, SearchError};

// ============================================================================
// Trip & Cabin Enums
// ============================================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    #[default]
    OneWay,
    RoundTrip,
}

impl TripType {
    /// Lenient parse; anything that is not recognizably a round trip is one-way
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "roundtrip" | "round-trip" | "round_trip" | "return" => TripType::RoundTrip,
            _ => TripType::OneWay,
        }
    }

    pub fn is_round_trip(self) -> bool {
        self == TripType::RoundTrip
    }

    /// Provider journey-type flag
    pub fn journey_type(self) -> u8 {
        match self {
            TripType::OneWay => 1,
            TripType::RoundTrip => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CabinClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "economy" => Some(CabinClass::Economy),
            "premium economy" | "premium_economy" | "premiumeconomy" => Some(CabinClass::PremiumEconomy),
            "business" => Some(CabinClass::Business),
            "first" => Some(CabinClass::First),
            _ => None,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            2 => Some(CabinClass::Economy),
            3 => Some(CabinClass::PremiumEconomy),
            4 => Some(CabinClass::Business),
            6 => Some(CabinClass::First),
            _ => None,
        }
    }

    /// Provider cabin code
    pub fn code(self) -> u8 {
        match self {
            CabinClass::Economy => 2,
            CabinClass::PremiumEconomy => 3,
            CabinClass::Business => 4,
            CabinClass::First => 6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CabinClass::Economy => "Economy",
            CabinClass::PremiumEconomy => "Premium Economy",
            CabinClass::Business => "Business",
            CabinClass::First => "First",
        }
    }
}

// ============================================================================
// Caller Parameters
// ============================================================================

/// Search parameters as the caller sends them. Everything is optional here so
/// that missing values surface as a `SearchError::Validation` instead of a
/// deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchParams {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    pub trip_type: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub adults: Option<i64>,
    #[serde(deserialize_with = "lenient_count")]
    pub children: Option<i64>,
    #[serde(deserialize_with = "lenient_count")]
    pub infants: Option<i64>,
    pub cabin_class: Option<String>,
}

/// Accepts numbers, numeric strings or null for passenger counts.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.floor() as i64)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.floor() as i64))
        }
        _ => None,
    })
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn non_negative(count: Option<i64>) -> u32 {
    count
        .map(|n| n.clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(0)
}

impl SearchParams {
    /// Check required fields and coerce the rest into a `SearchContext`.
    pub fn validate(&self) -> CoreResult<SearchContext> {
        let mut missing = Vec::new();
        if present(&self.origin).is_none() {
            missing.push("origin");
        }
        if present(&self.destination).is_none() {
            missing.push("destination");
        }
        if present(&self.departure_date).is_none() {
            missing.push("departureDate");
        }
        if !missing.is_empty() {
            return Err(SearchError::Validation(format!(
                "Missing required search parameters: {}",
                missing.join(", ")
            )));
        }

        let trip_type = self
            .trip_type
            .as_deref()
            .map(TripType::parse)
            .unwrap_or_default();

        Ok(SearchContext {
            origin: present(&self.origin).unwrap_or_default().to_string(),
            destination: present(&self.destination).unwrap_or_default().to_string(),
            departure_date: present(&self.departure_date).unwrap_or_default().to_string(),
            return_date: present(&self.return_date).map(str::to_string),
            trip_type,
            adults: self.adults.filter(|n| *n > 0).map(|n| non_negative(Some(n))).unwrap_or(1),
            children: non_negative(self.children),
            infants: non_negative(self.infants),
            cabin_class: present(&self.cabin_class).unwrap_or("Economy").to_string(),
        })
    }
}

/// Validated, immutable search context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchContext {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    pub trip_type: TripType,
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
    pub cabin_class: String,
}

impl SearchContext {
    pub fn is_round_trip(&self) -> bool {
        self.trip_type.is_round_trip()
    }
}

// ============================================================================
// Provider Request
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderRequest {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub journey_type: u8,
    pub adult_count: u32,
    pub child_count: u32,
    pub infant_count: u32,
    pub flight_cabin_class: u8,
}

impl ProviderRequest {
    pub fn from_context(context: &SearchContext) -> Self {
        let cabin = CabinClass::from_label(&context.cabin_class).unwrap_or(CabinClass::Economy);
        let return_date = if context.is_round_trip() {
            context.return_date.clone()
        } else {
            None
        };

        Self {
            origin: context.origin.to_uppercase(),
            destination: context.destination.to_uppercase(),
            departure_date: context.departure_date.clone(),
            return_date,
            journey_type: context.trip_type.journey_type(),
            adult_count: context.adults,
            child_count: context.children,
            infant_count: context.infants,
            flight_cabin_class: cabin.code(),
        }
    }
}
