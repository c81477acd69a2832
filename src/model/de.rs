//! Lenient deserializers for the normalized records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

/// Transaction timestamps are naive local date-times.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Describe the JSON value for a deserialization error.
pub fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::Null => de::Unexpected::Unit,
        Value::Bool(value) => de::Unexpected::Bool(*value),
        Value::Number(_) => de::Unexpected::Other("number"),
        Value::String(text) => de::Unexpected::Str(text),
        Value::Array(_) => de::Unexpected::Seq,
        Value::Object(_) => de::Unexpected::Map,
    }
}

/// Capability flag: the truthiness of whatever the supplier sent.
///
/// Textual `false` has already been replaced with `0` by the normalizer, so `"false"` ends up
/// disabled too.
pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(value) => value,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    })
}

/// Anything but a list means «no entries».
pub fn list_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: de::DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        items @ Value::Array(_) => serde_json::from_value(items).map_err(de::Error::custom),
        _ => Ok(Vec::new()),
    }
}

/// Number or numeric text, decimal comma included. Anything unparseable counts as absent.
pub fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<f64>,
{
    let number = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|number| number.is_finite()).map(T::from))
}

/// Optional timestamp, where an empty string is treated as absent.
pub fn optional_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(text) if text.is_empty() => Ok(None),
        Some(text) => NaiveDateTime::parse_from_str(&text, TIMESTAMP_FORMAT)
            .map(Some)
            .map_err(|error| de::Error::custom(format!("invalid timestamp `{text}`: {error}"))),
    }
}
