//! Ordered-candidate field resolution over raw provider JSON.
//!
//! Every canonical field is declared once as a list of dotted paths. The
//! first path that lands on a present value wins; a value is present when it
//! is neither missing, `null`, nor the empty string. Missing intermediate
//! objects are treated as "not found" and the next candidate is tried.
//! Integer path segments index into arrays (`Segments.0.0`).

use serde_json::Value;

/// Ordered candidate paths for one field
pub type Candidates = &'static [&'static str];

/// Walk a single dotted path.
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(record, |current, key| match current {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|idx| items.get(idx)),
        _ => None,
    })
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn present_values<'a>(record: &'a Value, candidates: &'a [&'a str]) -> impl Iterator<Item = &'a Value> + 'a {
    candidates
        .iter()
        .filter_map(move |path| lookup(record, path))
        .filter(|value| is_present(value))
}

/// First present value among `candidates`.
pub fn resolve<'a>(record: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|path| lookup(record, path))
        .find(|value| is_present(value))
}

/// First present value, else `fallback`.
pub fn resolve_or<'a>(record: &'a Value, candidates: &[&str], fallback: &'a Value) -> &'a Value {
    resolve(record, candidates).unwrap_or(fallback)
}

// Typed accessors skip candidates whose value cannot be read as the wanted
// type and keep walking the list.

pub fn resolve_str(record: &Value, candidates: &[&str]) -> Option<String> {
    present_values(record, candidates).find_map(|value| match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

pub fn resolve_i64(record: &Value, candidates: &[&str]) -> Option<i64> {
    present_values(record, candidates).find_map(|value| match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    })
}

pub fn resolve_f64(record: &Value, candidates: &[&str]) -> Option<f64> {
    present_values(record, candidates).find_map(|value| match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    })
}

pub fn resolve_bool(record: &Value, candidates: &[&str]) -> Option<bool> {
    present_values(record, candidates).find_map(|value| match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    })
}
