use chrono::Utc;
use serde_json::{Map, Value};

/// Append `_<epoch millis>` to every string-valued field of `data`.
///
/// Non-string values pass through untouched. Operates on a shallow copy; the
/// input is never mutated.
pub fn with_timestamp_suffix(data: &Map<String, Value>) -> Map<String, Value> {
    stamp_at(data, Utc::now().timestamp_millis())
}

/// Same as [`with_timestamp_suffix`] with a caller-provided timestamp.
pub fn stamp_at(data: &Map<String, Value>, epoch_millis: i64) -> Map<String, Value> {
    data.iter()
        .map(|(key, value)| {
            let stamped = match value {
                Value::String(s) => Value::String(format!("{s}_{epoch_millis}")),
                other => other.clone(),
            };
            (key.clone(), stamped)
        })
        .collect()
}
