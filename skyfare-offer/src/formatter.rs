use chrono::Utc;
use serde_json::Value;
use skyfare_core::{AirlineInfo, AirportInfo, Amenities, CabinClass, FareInfo, FlightOffer, SearchContext};
use crate::fields;
use crate::resolver::{resolve_bool, resolve_f64, resolve_i64, resolve_str};

pub const DEFAULT_LOGO_URL_TEMPLATE: &str = "https://pics.avs.io/200/80/{code}.png";

const UNKNOWN_AIRLINE: &str = "Unknown Airline";
const DEFAULT_CURRENCY: &str = "INR";
const DEFAULT_FARE_TYPE: &str = "Regular";
const DEFAULT_AIRCRAFT: &str = "N/A";
const DEFAULT_BAGGAGE: &str = "Check Fare Rules";

#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Logo URL used when the provider sends none; `{code}` is replaced by the airline code
    pub logo_url_template: String,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            logo_url_template: DEFAULT_LOGO_URL_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum FormatError {
    #[error("envelope is not an object")]
    EnvelopeShape,
    #[error("segment is not an object")]
    SegmentShape,
    #[error("no usable origin, destination or time data")]
    NoRouteData,
}

/// Maps one raw (envelope, segment) pair into a canonical `FlightOffer`
#[derive(Debug, Clone, Default)]
pub struct OfferFormatter {
    config: FormatterConfig,
}

impl OfferFormatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    /// Format one segment. Returns `None` for absent or unusable records; the
    /// reason is logged and the caller simply moves on to the next record.
    pub fn format(&self, envelope: &Value, segment: &Value, context: &SearchContext) -> Option<FlightOffer> {
        if envelope.is_null() || segment.is_null() {
            return None;
        }

        match self.try_format(envelope, segment, context) {
            Ok(offer) => Some(offer),
            Err(err) => {
                tracing::warn!(
                    "Skipping segment {} of envelope {}: {}",
                    describe_segment(segment),
                    describe_envelope(envelope),
                    err
                );
                None
            }
        }
    }

    fn try_format(&self, envelope: &Value, segment: &Value, context: &SearchContext) -> Result<FlightOffer, FormatError> {
        if !envelope.is_object() {
            return Err(FormatError::EnvelopeShape);
        }
        if !segment.is_object() {
            return Err(FormatError::SegmentShape);
        }

        // 1. Route & times
        let origin_code = resolve_str(segment, fields::ORIGIN_CODE);
        let destination_code = resolve_str(segment, fields::DESTINATION_CODE);
        let departure_time = resolve_str(segment, fields::DEPARTURE_TIME);
        let arrival_time = resolve_str(segment, fields::ARRIVAL_TIME);

        if origin_code.is_none() && destination_code.is_none() && departure_time.is_none() && arrival_time.is_none() {
            return Err(FormatError::NoRouteData);
        }

        let origin = origin_code.unwrap_or_else(|| context.origin.clone());
        let destination = destination_code.unwrap_or_else(|| context.destination.clone());

        // 2. Airline
        let airline_code = resolve_str(segment, fields::AIRLINE_CODE).unwrap_or_default();
        let logo_url = resolve_str(segment, fields::AIRLINE_LOGO).unwrap_or_else(|| self.logo_url(&airline_code));
        let id = resolve_str(envelope, fields::RESULT_INDEX)
            .unwrap_or_else(|| format!("{}-{}", airline_code, Utc::now().timestamp_millis()));

        // 3. Duration
        let duration_in_minutes = resolve_i64(segment, fields::DURATION).unwrap_or(0);

        // 4. Fare; a missing or zero total is derived from base + tax
        let base_fare = resolve_f64(envelope, fields::BASE_FARE).unwrap_or(0.0);
        let tax = resolve_f64(envelope, fields::TAX).unwrap_or(0.0);
        let total_fare = resolve_f64(envelope, fields::PUBLISHED_FARE)
            .filter(|total| *total != 0.0)
            .unwrap_or(base_fare + tax);

        let baggage = resolve_str(segment, fields::BAGGAGE)
            .or_else(|| resolve_str(envelope, fields::FARE_BAGGAGE))
            .unwrap_or_else(|| DEFAULT_BAGGAGE.to_string());

        Ok(FlightOffer {
            id,
            airline: AirlineInfo {
                name: resolve_str(segment, fields::AIRLINE_NAME).unwrap_or_else(|| UNKNOWN_AIRLINE.to_string()),
                number: resolve_str(segment, fields::FLIGHT_NUMBER).unwrap_or_default(),
                code: airline_code,
                logo_url,
            },
            origin_info: AirportInfo {
                code: origin.clone(),
                city: resolve_str(segment, fields::ORIGIN_CITY).unwrap_or_default(),
                airport: resolve_str(segment, fields::ORIGIN_AIRPORT).unwrap_or_default(),
                terminal: resolve_str(segment, fields::ORIGIN_TERMINAL).unwrap_or_default(),
            },
            origin,
            destination_info: AirportInfo {
                code: destination.clone(),
                city: resolve_str(segment, fields::DESTINATION_CITY).unwrap_or_default(),
                airport: resolve_str(segment, fields::DESTINATION_AIRPORT).unwrap_or_default(),
                terminal: resolve_str(segment, fields::DESTINATION_TERMINAL).unwrap_or_default(),
            },
            destination,
            departure_time: departure_time.unwrap_or_default(),
            arrival_time: arrival_time.unwrap_or_default(),
            duration: format_duration(duration_in_minutes),
            duration_in_minutes,
            stops: resolve_i64(segment, fields::STOPS).unwrap_or(0),
            aircraft_type: resolve_str(segment, fields::AIRCRAFT).unwrap_or_else(|| DEFAULT_AIRCRAFT.to_string()),
            fare: FareInfo {
                base_fare,
                tax,
                total_fare,
                currency: resolve_str(envelope, fields::CURRENCY).unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
                refundable: resolve_bool(envelope, fields::REFUNDABLE).unwrap_or(false),
            },
            cabin_class: cabin_label(segment, context),
            booking_class: resolve_str(segment, fields::BOOKING_CLASS).unwrap_or_default(),
            fare_type: resolve_str(envelope, fields::FARE_TYPE).unwrap_or_else(|| DEFAULT_FARE_TYPE.to_string()),
            baggage,
            amenities: Amenities {
                wifi: resolve_bool(segment, fields::WIFI).unwrap_or(false),
                meals: resolve_bool(segment, fields::MEALS).unwrap_or(false),
                entertainment: resolve_bool(segment, fields::ENTERTAINMENT).unwrap_or(false),
            },
        })
    }

    fn logo_url(&self, airline_code: &str) -> String {
        if airline_code.is_empty() {
            return String::new();
        }
        self.config.logo_url_template.replace("{code}", airline_code)
    }
}

/// `"{h}h {m}m"` for positive minutes, empty otherwise
pub fn format_duration(minutes: i64) -> String {
    if minutes <= 0 {
        return String::new();
    }
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Segment cabin as a label. Numeric provider codes are mapped back through
/// the cabin table; otherwise the searched cabin is used.
fn cabin_label(segment: &Value, context: &SearchContext) -> String {
    if let Some(cabin) = resolve_i64(segment, fields::CABIN_CLASS).and_then(CabinClass::from_code) {
        return cabin.label().to_string();
    }
    resolve_str(segment, fields::CABIN_CLASS)
        .filter(|label| label.parse::<f64>().is_err())
        .unwrap_or_else(|| context.cabin_class.clone())
}

fn describe_envelope(envelope: &Value) -> String {
    resolve_str(envelope, fields::RESULT_INDEX).unwrap_or_else(|| "<no result index>".to_string())
}

fn describe_segment(segment: &Value) -> String {
    match (
        resolve_str(segment, fields::AIRLINE_CODE),
        resolve_str(segment, fields::FLIGHT_NUMBER),
    ) {
        (Some(code), Some(number)) => format!("{}{}", code, number),
        _ => "<unidentified>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use skyfare_core::{SearchParams, TripType};

    fn context() -> SearchContext {
        SearchParams {
            origin: Some("DEL".to_string()),
            destination: Some("BOM".to_string()),
            departure_date: Some("2025-11-18".to_string()),
            cabin_class: Some("Business".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    fn envelope() -> Value {
        json!({
            "ResultIndex": "OB7",
            "IsRefundable": true,
            "Fare": { "Currency": "INR", "BaseFare": 4200, "Tax": 897, "PublishedFare": 5097 }
        })
    }

    fn segment() -> Value {
        json!({
            "Airline": { "AirlineCode": "AI", "AirlineName": "Air India", "FlightNumber": "865", "FareClass": "U" },
            "Origin": {
                "Airport": { "AirportCode": "DEL", "AirportName": "Indira Gandhi", "Terminal": "3", "CityName": "Delhi" },
                "DepTime": "T1",
                "DepartureTime": "T2"
            },
            "Destination": {
                "Airport": { "AirportCode": "BOM", "CityName": "Mumbai" },
                "ArrTime": "2025-11-18T08:20:00"
            },
            "Duration": 135,
            "Craft": "32N",
            "CabinClass": 2,
            "Baggage": "15 KG"
        })
    }

    #[test]
    fn test_full_mapping() {
        let offer = OfferFormatter::default().format(&envelope(), &segment(), &context()).unwrap();
        assert_eq!(offer.id, "OB7");
        assert_eq!(offer.departure_time, "T1");
        assert_eq!(offer.arrival_time, "2025-11-18T08:20:00");
        assert_eq!(offer.origin_info.city, "Delhi");
        assert_eq!(offer.origin_info.terminal, "3");
        assert_eq!(offer.destination, "BOM");
        assert_eq!(offer.duration, "2h 15m");
        assert_eq!(offer.duration_in_minutes, 135);
        assert_eq!(offer.aircraft_type, "32N");
        assert_eq!(offer.cabin_class, "Economy");
        assert_eq!(offer.booking_class, "U");
        assert_eq!(offer.baggage, "15 KG");
        assert_eq!(offer.fare.total_fare, 5097.0);
        assert!(offer.fare.refundable);
        assert_eq!(offer.airline.logo_url, "https://pics.avs.io/200/80/AI.png");
    }

    #[test]
    fn test_defaults_on_sparse_segment() {
        let sparse = json!({ "Destination": { "AirportCode": "GOI" } });
        let offer = OfferFormatter::default().format(&json!({}), &sparse, &context()).unwrap();

        assert_eq!(offer.origin, "DEL");
        assert_eq!(offer.destination, "GOI");
        assert_eq!(offer.airline.name, "Unknown Airline");
        assert_eq!(offer.airline.code, "");
        assert_eq!(offer.airline.logo_url, "");
        assert!(offer.id.starts_with('-'));
        assert_eq!(offer.duration, "");
        assert_eq!(offer.duration_in_minutes, 0);
        assert_eq!(offer.stops, 0);
        assert_eq!(offer.aircraft_type, "N/A");
        assert_eq!(offer.baggage, "Check Fare Rules");
        assert_eq!(offer.fare_type, "Regular");
        assert_eq!(offer.fare.currency, "INR");
        assert_eq!(offer.cabin_class, "Business");
        assert_eq!(offer.amenities, Amenities::default());
    }

    #[test]
    fn test_total_fare_derived_when_missing() {
        let env = json!({ "Fare": { "BaseFare": "1000", "Tax": 250.5, "PublishedFare": 0 } });
        let offer = OfferFormatter::default().format(&env, &segment(), &context()).unwrap();
        assert_eq!(offer.fare.total_fare, 1250.5);
    }

    #[test]
    fn test_fallback_fields_and_envelope_baggage() {
        let seg = json!({
            "Airline": { "AirlineCode": "6E" },
            "Origin": { "AirportCode": "HDO", "DepartureDateTime": "2025-11-18T06:10:00" },
            "Destination": { "AirportCode": "BOM", "ArrivalTime": "2025-11-18T08:20:00" },
            "StopQuantity": 1,
            "Equipment": "A320",
            "Amenities": { "Wifi": true }
        });
        let env = json!({ "Fare": { "ChargeableBaggage": "20 KG" } });
        let offer = OfferFormatter::default().format(&env, &seg, &context()).unwrap();

        assert_eq!(offer.origin, "HDO");
        assert_eq!(offer.departure_time, "2025-11-18T06:10:00");
        assert_eq!(offer.arrival_time, "2025-11-18T08:20:00");
        assert_eq!(offer.stops, 1);
        assert_eq!(offer.aircraft_type, "A320");
        assert_eq!(offer.baggage, "20 KG");
        assert!(offer.amenities.wifi);
        assert!(!offer.amenities.meals);
        assert!(offer.id.starts_with("6E-"));
    }

    #[test]
    fn test_unusable_records_return_none() {
        let formatter = OfferFormatter::default();
        let ctx = context();
        assert!(formatter.format(&Value::Null, &segment(), &ctx).is_none());
        assert!(formatter.format(&envelope(), &Value::Null, &ctx).is_none());
        assert!(formatter.format(&json!("oops"), &segment(), &ctx).is_none());
        assert!(formatter.format(&envelope(), &json!([1, 2]), &ctx).is_none());
        assert!(formatter.format(&envelope(), &json!({ "Craft": "320" }), &ctx).is_none());
        assert_eq!(ctx.trip_type, TripType::OneWay);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(130), "2h 10m");
        assert_eq!(format_duration(59), "0h 59m");
        assert_eq!(format_duration(0), "");
        assert_eq!(format_duration(-5), "");
    }

    #[test]
    fn test_custom_logo_template() {
        let formatter = OfferFormatter::new(FormatterConfig {
            logo_url_template: "https://cdn.example.com/logos/{code}.svg".to_string(),
        });
        let offer = formatter.format(&envelope(), &segment(), &context()).unwrap();
        assert_eq!(offer.airline.logo_url, "https://cdn.example.com/logos/AI.svg");
    }
}
