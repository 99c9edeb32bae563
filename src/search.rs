//! Dot-path JSON extraction
//!
//! The small subset of JSONPath that response flattening actually needs:
//! nested object fields joined by dots, with numeric steps indexing into
//! arrays. Absent data yields the caller's default, never an error.

use serde_json::Value;

/// Look up a dot path in a JSON value.
///
/// Returns `None` when any step is absent or the shape does not match.
/// An empty path returns the value itself.
pub fn search<'a>(path: &str, value: &'a Value) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(part)?;
            }
            Value::Array(arr) => {
                let idx: usize = part.parse().ok()?;
                current = arr.get(idx)?;
            }
            _ => return None,
        }
    }

    Some(current)
}

/// Look up a dot path, substituting `default` when it is absent.
///
/// Explicit `null` at the path also yields the default, matching how the
/// upstream APIs omit rather than null out optional fields.
pub fn search_or(path: &str, value: &Value, default: Value) -> Value {
    match search(path, value) {
        Some(Value::Null) | None => default,
        Some(v) => v.clone(),
    }
}

/// Look up a dot path and coerce it to a string
pub fn search_string(path: &str, value: &Value) -> Option<String> {
    match search(path, value)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Look up a dot path and parse it as an unsigned integer.
///
/// Some endpoints report totals as JSON numbers, some as strings.
pub fn search_u64(path: &str, value: &Value) -> Option<u64> {
    match search(path, value)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
