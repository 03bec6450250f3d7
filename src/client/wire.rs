//! Response marshalling helpers
//!
//! The backend is not uniform: some collections wrap their payload in an
//! extra `data` envelope, some identifiers arrive as `_id`, and a few
//! numeric fields arrive as strings. These helpers normalise those shapes
//! before the typed models see them.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

/// Strip a `{ "data": ... }` envelope when present.
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") && !map["data"].is_null() => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Decode a single entity from a (possibly enveloped) response body.
pub fn decode_entity<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, ApiError> {
    serde_json::from_value(unwrap_envelope(value))
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse {}: {}", what, e)))
}

/// Extract the server-provided `message` from an error body.
///
/// Accepts a plain string or an array of strings (validation pipes report
/// one message per failed constraint; the first one is surfaced).
pub fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = value.get("message")?;
    match message {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }),
        _ => None,
    }
}

/// Server message or a generic fallback
pub fn server_message_or(body: &str, fallback: &str) -> String {
    server_message(body).unwrap_or_else(|| fallback.to_string())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Numberish {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Numberish {
    fn to_i64(&self) -> Option<i64> {
        match self {
            Numberish::Int(n) => Some(*n),
            Numberish::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            Numberish::Float(_) => None,
            Numberish::Text(s) => s.trim().parse().ok(),
        }
    }

    fn to_f64(&self) -> Option<f64> {
        match self {
            Numberish::Int(n) => Some(*n as f64),
            Numberish::Float(f) => Some(*f),
            Numberish::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Integer that may arrive as a JSON number or a numeric string
pub fn int_from_any<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Numberish::deserialize(deserializer)?;
    raw.to_i64()
        .ok_or_else(|| de::Error::custom("expected an integer or numeric string"))
}

/// Optional integer that may arrive as a number, a numeric string, or null
pub fn opt_int_from_any<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Numberish>::deserialize(deserializer)?;
    Ok(raw.and_then(|r| r.to_i64()))
}

/// Optional epoch seconds; fractional values are truncated toward zero
pub fn opt_seconds_from_any<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Numberish>::deserialize(deserializer)?;
    Ok(raw.and_then(|r| match r {
        Numberish::Int(n) => Some(n),
        other => other.to_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64),
    }))
}

/// Optional decimal that may arrive as a number, a numeric string, or null
pub fn opt_f64_from_any<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Numberish>::deserialize(deserializer)?;
    Ok(raw.and_then(|r| r.to_f64()))
}

/// Percent-encode `raw` for use as one URL path segment.
///
/// Only RFC 3986 unreserved characters pass through unchanged.
pub fn path_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(char::from(byte))
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Identifier of a document-store entity: `_id` when present, else `id`.
///
/// Some backends send both keys; nulls count as absent.
pub fn document_id(underscore: Option<Value>, plain: Option<Value>) -> Result<String, String> {
    let raw = underscore
        .filter(|v| !v.is_null())
        .or_else(|| plain.filter(|v| !v.is_null()));
    match raw {
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(format!(
            "expected a string or number identifier, got {}",
            other
        )),
        None => Err("missing field `_id` or `id`".to_string()),
    }
}
