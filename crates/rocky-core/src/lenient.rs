//! Coercive readers for loosely typed JSON.
//!
//! Intake payloads and second-source results arrive from browsers and
//! language models. A field of the wrong type is read as "no signal"
//! rather than rejected; these helpers hold the single definition of what
//! that means for each primitive.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a finite number from a JSON number or a numeric string.
pub fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|v| v.is_finite())
}

/// Read text from a JSON string, or the literal form of a number.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a probability, clamped to `[0, 1]`.
pub fn unit_interval(value: &Value) -> Option<f64> {
    number(value).map(|v| v.clamp(0.0, 1.0))
}

/// Read a list of strings. A bare string is a one-element list; non-text
/// elements are skipped.
pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(text).collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

pub fn deserialize_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number(&value).unwrap_or(0.0))
}

pub fn deserialize_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number(&value)
        .map(|v| v.trunc().clamp(i32::MIN as f64, i32::MAX as f64) as i32)
        .unwrap_or(0))
}

pub fn deserialize_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text(&value).unwrap_or_default())
}

pub fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(string_list(&value))
}
