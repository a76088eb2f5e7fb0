use serde_json::Value;
use crate::fields;
use crate::resolver;

const ONE_WAY_DEPTH: usize = 3;
const LEG_GROUP_DEPTH: usize = 2;

/// Flattened raw segments, borrowed from the provider response
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedSegments<'a> {
    OneWay(Vec<&'a Value>),
    RoundTrip {
        outbound: Vec<&'a Value>,
        inbound: Vec<&'a Value>,
    },
}

impl<'a> NormalizedSegments<'a> {
    pub fn empty(is_round_trip: bool) -> Self {
        if is_round_trip {
            NormalizedSegments::RoundTrip { outbound: Vec::new(), inbound: Vec::new() }
        } else {
            NormalizedSegments::OneWay(Vec::new())
        }
    }

    pub fn len(&self) -> usize {
        match self {
            NormalizedSegments::OneWay(segments) => segments.len(),
            NormalizedSegments::RoundTrip { outbound, inbound } => outbound.len() + inbound.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Flatten an envelope's segment collection.
///
/// One-way collections are flattened up to three array levels. For round
/// trips index 0 is the outbound leg-group and index 1 the return group,
/// each flattened up to two levels. Input order is preserved and entries
/// without any origin or destination information are dropped.
pub fn normalize(raw_segments: &Value, is_round_trip: bool) -> NormalizedSegments<'_> {
    let Some(items) = raw_segments.as_array() else {
        return NormalizedSegments::empty(is_round_trip);
    };

    if !is_round_trip {
        let mut segments = Vec::new();
        let dropped = flatten_items(items, ONE_WAY_DEPTH, &mut segments);
        if dropped > 0 {
            tracing::debug!("Dropped {} malformed segment entries", dropped);
        }
        return NormalizedSegments::OneWay(segments);
    }

    let mut outbound = Vec::new();
    let mut inbound = Vec::new();
    let mut dropped = 0;
    if let Some(group) = items.first() {
        dropped += flatten_group(group, &mut outbound);
    }
    if let Some(group) = items.get(1) {
        dropped += flatten_group(group, &mut inbound);
    }
    if dropped > 0 {
        tracing::debug!("Dropped {} malformed segment entries", dropped);
    }

    NormalizedSegments::RoundTrip { outbound, inbound }
}

/// A leg-group is normally an array; its own level does not count toward the depth.
fn flatten_group<'a>(group: &'a Value, out: &mut Vec<&'a Value>) -> usize {
    match group {
        Value::Array(items) => flatten_items(items, LEG_GROUP_DEPTH, out),
        single => flatten_into(single, 0, out),
    }
}

fn flatten_items<'a>(items: &'a [Value], depth: usize, out: &mut Vec<&'a Value>) -> usize {
    items.iter().map(|item| flatten_into(item, depth, out)).sum()
}

/// Depth-first, order-preserving flatten. `depth` is how many more array
/// levels may be opened. Returns the number of entries dropped.
fn flatten_into<'a>(value: &'a Value, depth: usize, out: &mut Vec<&'a Value>) -> usize {
    match value {
        Value::Array(items) if depth > 0 => flatten_items(items, depth - 1, out),
        Value::Object(_) if has_location(value) => {
            out.push(value);
            0
        }
        _ => 1,
    }
}

/// A segment is usable when it carries origin or destination information in
/// any recognized shape.
pub fn has_location(segment: &Value) -> bool {
    if resolver::resolve(segment, fields::ORIGIN_CODE).is_some()
        || resolver::resolve(segment, fields::DESTINATION_CODE).is_some()
    {
        return true;
    }

    fields::LOCATION_BLOCKS
        .iter()
        .filter_map(|path| resolver::lookup(segment, path))
        .any(|block| match block {
            Value::Object(map) => !map.is_empty(),
            Value::String(s) => !s.is_empty(),
            _ => false,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn leg(code: &str) -> Value {
        json!({ "Origin": { "Airport": { "AirportCode": code } } })
    }

    #[test]
    fn test_round_trip_split() {
        let raw = json!([[leg("A1"), leg("A2")], [leg("B1")]]);
        match normalize(&raw, true) {
            NormalizedSegments::RoundTrip { outbound, inbound } => {
                assert_eq!(outbound.len(), 2);
                assert_eq!(inbound.len(), 1);
                assert_eq!(outbound[1], &leg("A2"));
            }
            other => panic!("expected round trip, got {:?}", other),
        }
    }

    #[test]
    fn test_round_trip_without_return_group() {
        let raw = json!([[leg("A1")]]);
        match normalize(&raw, true) {
            NormalizedSegments::RoundTrip { outbound, inbound } => {
                assert_eq!(outbound.len(), 1);
                assert!(inbound.is_empty());
            }
            other => panic!("expected round trip, got {:?}", other),
        }
    }

    fn codes(segments: &[&Value]) -> Vec<String> {
        segments
            .iter()
            .map(|s| s["Origin"]["Airport"]["AirportCode"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_one_way_flattens_three_levels_in_order() {
        let raw = json!([
            [[leg("X1")], leg("X2")],
            leg("X3"),
            [[[leg("X4")]]],
            [[[[leg("TOO_DEEP")]]]]
        ]);
        let NormalizedSegments::OneWay(segments) = normalize(&raw, false) else {
            panic!("expected one-way");
        };
        assert_eq!(codes(&segments), vec!["X1", "X2", "X3", "X4"]);
    }

    #[test]
    fn test_one_way_nesting_limit() {
        assert_eq!(normalize(&json!([[[[leg("D3")]]]]), false).len(), 1);
        assert_eq!(normalize(&json!([[[[[leg("D4")]]]]]), false).len(), 0);
    }

    #[test]
    fn test_round_trip_groups_flatten_two_levels() {
        let raw = json!([[[[leg("A1")]], leg("A2")], [[[leg("B1")]]]]);
        match normalize(&raw, true) {
            NormalizedSegments::RoundTrip { outbound, inbound } => {
                assert_eq!(codes(&outbound), vec!["A1", "A2"]);
                assert_eq!(codes(&inbound), vec!["B1"]);
            }
            other => panic!("expected round trip, got {:?}", other),
        }

        let too_deep = json!([[[[[leg("A1")]]]], [[[[leg("B1")]]]]]);
        assert!(normalize(&too_deep, true).is_empty());
    }

    #[test]
    fn test_drops_entries_without_location() {
        let raw = json!([
            leg("OK"),
            { "Craft": "320" },
            { "Origin": {} },
            null,
            42,
            { "Destination": { "AirportCode": "BOM" } },
            { "Destination": "BOM" }
        ]);
        assert_eq!(normalize(&raw, false).len(), 3);
    }

    #[test]
    fn test_non_array_input_yields_empty_shape() {
        assert_eq!(normalize(&json!(null), true), NormalizedSegments::empty(true));
        assert_eq!(normalize(&json!({ "Origin": {} }), false), NormalizedSegments::empty(false));
    }
}
