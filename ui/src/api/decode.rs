//! Boundary coercions for the backend's loosely typed JSON.
//!
//! Aggregates computed with SQL `COUNT`/`ROUND` arrive as numbers or as strings
//! depending on the driver, optional text arrives as `null`, and AI fields may be
//! a single string or a list. These helpers are used with `#[serde(deserialize_with)]`.

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Number or numeric string; `null`/missing becomes `0.0`.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(0.0),
        Some(v) => value_to_f64(&v)
            .ok_or_else(|| de::Error::custom(format!("expected a number, got {v}"))),
    }
}

/// Non-negative count; fractional values are rounded.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = number(deserializer)?;
    Ok(value.max(0.0).round() as u64)
}

/// Identifier that may be sent as `5` or `"5"`. Required.
pub fn id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .ok_or_else(|| de::Error::custom(format!("invalid identifier {value}")))
}

/// Text that may be `null`; numbers are stringified.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Optional text, with blank strings collapsed to `None`.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = text(deserializer)?;
    Ok(if s.trim().is_empty() { None } else { Some(s) })
}

/// `"a"` → `["a"]`, `["a","b"]` → as is, `null` → `[]`. Blank entries are dropped.
pub fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let items = match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        Some(Value::String(s)) => vec![s],
        Some(other) => vec![other.to_string()],
    };
    Ok(items
        .into_iter()
        .filter(|item| !item.trim().is_empty())
        .collect())
}

/// Lists joined into one paragraph (rationale fields sometimes arrive as arrays).
pub fn joined_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(one_or_many(deserializer)?.join(" "))
}
