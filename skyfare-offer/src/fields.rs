//! Candidate lists for every canonical field, in resolution order.
//!
//! Segment paths are relative to one raw segment, envelope paths to one raw
//! envelope (priced itinerary). Add a new provider spelling here, never
//! inline in the formatter.

use crate::resolver::Candidates;

// Envelope

pub const RESULT_INDEX: Candidates = &["ResultIndex", "resultIndex", "ResultId", "id"];
pub const SEGMENTS: Candidates = &["Segments", "segments"];
pub const BASE_FARE: Candidates = &["Fare.BaseFare", "Fare.baseFare", "fare.baseFare", "baseFare"];
pub const TAX: Candidates = &["Fare.Tax", "Fare.tax", "fare.tax", "tax"];
pub const PUBLISHED_FARE: Candidates = &[
    "Fare.PublishedFare",
    "Fare.publishedFare",
    "Fare.TotalFare",
    "Fare.totalFare",
    "fare.publishedFare",
    "fare.totalFare",
];
pub const CURRENCY: Candidates = &["Fare.Currency", "Fare.currency", "fare.currency", "Currency"];
pub const REFUNDABLE: Candidates = &["IsRefundable", "Fare.IsRefundable", "Fare.refundable", "fare.refundable"];
pub const FARE_TYPE: Candidates = &["FareType", "ResultFareType", "Fare.FareType"];
pub const FARE_BAGGAGE: Candidates = &["Fare.ChargeableBaggage", "Fare.chargeableBaggage"];

// Segment

pub const AIRLINE_CODE: Candidates = &["Airline.AirlineCode", "Airline.Code", "AirlineCode"];
pub const AIRLINE_NAME: Candidates = &["Airline.AirlineName", "Airline.Name", "AirlineName"];
pub const FLIGHT_NUMBER: Candidates = &["Airline.FlightNumber", "FlightNumber"];
pub const AIRLINE_LOGO: Candidates = &["Airline.LogoUrl", "Airline.Logo", "AirlineLogo"];
pub const BOOKING_CLASS: Candidates = &["Airline.FareClass", "FareClass", "BookingClass"];

pub const ORIGIN_CODE: Candidates = &["Origin.Airport.AirportCode", "Origin.AirportCode"];
pub const ORIGIN_CITY: Candidates = &["Origin.Airport.CityName", "Origin.CityName"];
pub const ORIGIN_AIRPORT: Candidates = &["Origin.Airport.AirportName", "Origin.AirportName"];
pub const ORIGIN_TERMINAL: Candidates = &["Origin.Airport.Terminal", "Origin.Terminal"];
pub const DEPARTURE_TIME: Candidates = &["Origin.DepTime", "Origin.DepartureTime", "Origin.DepartureDateTime"];

pub const DESTINATION_CODE: Candidates = &["Destination.Airport.AirportCode", "Destination.AirportCode"];
pub const DESTINATION_CITY: Candidates = &["Destination.Airport.CityName", "Destination.CityName"];
pub const DESTINATION_AIRPORT: Candidates = &["Destination.Airport.AirportName", "Destination.AirportName"];
pub const DESTINATION_TERMINAL: Candidates = &["Destination.Airport.Terminal", "Destination.Terminal"];
pub const ARRIVAL_TIME: Candidates = &["Destination.ArrTime", "Destination.ArrivalTime", "Destination.ArrivalDateTime"];

pub const DURATION: Candidates = &["Duration"];
pub const STOPS: Candidates = &["SegmentIndicator", "StopQuantity"];
pub const AIRCRAFT: Candidates = &["Craft", "Equipment"];
pub const CABIN_CLASS: Candidates = &["CabinClass", "CabinClassName"];
pub const BAGGAGE: Candidates = &["Baggage"];

pub const WIFI: Candidates = &["Amenities.Wifi", "Amenities.wifi", "HasWifi"];
pub const MEALS: Candidates = &["Amenities.Meals", "Amenities.meals", "IsMealIncluded"];
pub const ENTERTAINMENT: Candidates = &["Amenities.Entertainment", "Amenities.entertainment", "HasEntertainment"];

/// Raw location blocks; presence of either marks a segment as usable
pub const LOCATION_BLOCKS: Candidates = &["Origin", "Destination"];
