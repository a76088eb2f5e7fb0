use serde::{Deserialize, Serialize};
use crate::search::TripType;

/// Canonical, provider-independent flight offer. Every field is always
/// populated; the formatter applies defaults where the provider is silent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    pub id: String,
    pub airline: AirlineInfo,
    pub origin: String,
    pub origin_info: AirportInfo,
    pub destination: String,
    pub destination_info: AirportInfo,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub duration_in_minutes: i64,
    pub stops: i64,
    pub aircraft_type: String,
    pub fare: FareInfo,
    pub cabin_class: String,
    pub booking_class: String,
    pub fare_type: String,
    pub baggage: String,
    pub amenities: Amenities,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AirlineInfo {
    pub code: String,
    pub name: String,
    pub number: String,
    pub logo_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AirportInfo {
    pub code: String,
    pub city: String,
    pub airport: String,
    pub terminal: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FareInfo {
    pub base_fare: f64,
    pub tax: f64,
    pub total_fare: f64,
    pub currency: String,
    pub refundable: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Amenities {
    pub wifi: bool,
    pub meals: bool,
    pub entertainment: bool,
}

/// Search output. The variant is fixed by the trip type before any
/// processing starts. One-way results serialize as a bare array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SearchResult {
    OneWay(Vec<FlightOffer>),
    RoundTrip {
        outbound: Vec<FlightOffer>,
        #[serde(rename = "return")]
        inbound: Vec<FlightOffer>,
    },
}

impl SearchResult {
    pub fn empty(trip_type: TripType) -> Self {
        match trip_type {
            TripType::OneWay => SearchResult::OneWay(Vec::new()),
            TripType::RoundTrip => SearchResult::RoundTrip {
                outbound: Vec::new(),
                inbound: Vec::new(),
            },
        }
    }

    /// Total number of offers across all legs
    pub fn len(&self) -> usize {
        match self {
            SearchResult::OneWay(offers) => offers.len(),
            SearchResult::RoundTrip { outbound, inbound } => outbound.len() + inbound.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_result_shapes() {
        let one_way = serde_json::to_value(SearchResult::empty(TripType::OneWay)).unwrap();
        assert_eq!(one_way, json!([]));

        let round_trip = serde_json::to_value(SearchResult::empty(TripType::RoundTrip)).unwrap();
        assert_eq!(round_trip, json!({ "outbound": [], "return": [] }));
        assert!(SearchResult::empty(TripType::RoundTrip).is_empty());
    }

    #[test]
    fn test_offer_serializes_camel_case() {
        let offer = FlightOffer {
            id: "OB1".to_string(),
            airline: AirlineInfo {
                code: "6E".to_string(),
                name: "IndiGo".to_string(),
                number: "2134".to_string(),
                logo_url: String::new(),
            },
            origin: "HDO".to_string(),
            origin_info: AirportInfo {
                code: "HDO".to_string(),
                city: String::new(),
                airport: String::new(),
                terminal: String::new(),
            },
            destination: "BOM".to_string(),
            destination_info: AirportInfo {
                code: "BOM".to_string(),
                city: String::new(),
                airport: String::new(),
                terminal: String::new(),
            },
            departure_time: String::new(),
            arrival_time: String::new(),
            duration: "2h 10m".to_string(),
            duration_in_minutes: 130,
            stops: 0,
            aircraft_type: "N/A".to_string(),
            fare: FareInfo {
                base_fare: 4200.0,
                tax: 897.0,
                total_fare: 5097.0,
                currency: "INR".to_string(),
                refundable: false,
            },
            cabin_class: "Economy".to_string(),
            booking_class: String::new(),
            fare_type: "Regular".to_string(),
            baggage: "Check Fare Rules".to_string(),
            amenities: Amenities::default(),
        };

        let value = serde_json::to_value(&offer).unwrap();
        assert_eq!(value["durationInMinutes"], 130);
        assert_eq!(value["airline"]["logoUrl"], "");
        assert_eq!(value["originInfo"]["code"], "HDO");
        assert_eq!(value["fare"]["totalFare"], 5097.0);
    }
}
