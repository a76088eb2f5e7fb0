use serde_json::Value;
use crate::resolver;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("results container at `{probe}` is {found}, expected an array")]
    MalformedContainer { probe: &'static str, found: &'static str },
}

/// One way of locating the results array inside a provider response
struct Probe {
    name: &'static str,
    locate: fn(&Value) -> Option<&Value>,
    accepts: fn(&Value) -> bool,
    /// Whether a non-array value found here means the response is broken
    is_container: bool,
}

fn nested_data_results(raw: &Value) -> Option<&Value> {
    resolver::lookup(raw, "data.data.results")
}

fn data_results(raw: &Value) -> Option<&Value> {
    resolver::lookup(raw, "data.results")
}

fn top_level_results(raw: &Value) -> Option<&Value> {
    resolver::lookup(raw, "results")
}

fn whole_response(raw: &Value) -> Option<&Value> {
    Some(raw)
}

const PROBES: &[Probe] = &[
    Probe { name: "data.data.results", locate: nested_data_results, accepts: Value::is_array, is_container: true },
    Probe { name: "data.results", locate: data_results, accepts: Value::is_array, is_container: true },
    Probe { name: "results", locate: top_level_results, accepts: Value::is_array, is_container: true },
    Probe { name: "<response>", locate: whole_response, accepts: Value::is_array, is_container: false },
];

/// Locate the envelope list in a raw provider response.
///
/// Probes run in order and the first array found wins, even when empty. An
/// array whose elements are all arrays of objects is flattened one level.
/// No match at all means zero results.
pub fn extract(raw: &Value) -> Result<Vec<&Value>, ExtractError> {
    let mut malformed = None;

    for probe in PROBES {
        let Some(found) = (probe.locate)(raw) else {
            continue;
        };

        if (probe.accepts)(found) {
            tracing::debug!("Results located at `{}`", probe.name);
            return Ok(flatten_nested(found));
        }

        if probe.is_container && !found.is_null() && malformed.is_none() {
            malformed = Some(ExtractError::MalformedContainer {
                probe: probe.name,
                found: type_name(found),
            });
        }
    }

    match malformed {
        Some(err) => Err(err),
        None => Ok(Vec::new()),
    }
}

fn flatten_nested(results: &Value) -> Vec<&Value> {
    let Some(items) = results.as_array() else {
        return Vec::new();
    };

    let nested = !items.is_empty()
        && items.iter().all(|item| {
            item.as_array()
                .map(|inner| inner.iter().all(Value::is_object))
                .unwrap_or(false)
        });

    if nested {
        items.iter().filter_map(Value::as_array).flatten().collect()
    } else {
        items.iter().collect()
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
