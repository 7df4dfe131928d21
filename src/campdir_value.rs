use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Represents a dynamic document value.
///
/// This enum is the common currency between the query-translation layer, the
/// aggregate engine and the storage facade: filter predicates carry these as
/// comparison operands, documents carry them as field values, and listing
/// responses embed them directly in the payload.
///
/// Numbers are always `f64`, matching the document-store convention where a
/// coerced query parameter and a stored numeric field must compare without a
/// separate integer lattice.
///
/// # Examples
///
/// ```rust
/// use campdir::CampdirValue;
///
/// let fv_map = CampdirValue::from_map(vec![
///     ("name", "Alice".into()), // .into() relies on From<T> for CampdirValue
///     ("age", 30.into()),
/// ]);
/// assert!(matches!(fv_map, CampdirValue::Map(_)));
/// ```
#[derive(Debug, PartialEq, Clone)]
pub enum CampdirValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<CampdirValue>),
    Map(HashMap<String, CampdirValue>),
}

impl CampdirValue {
    /// Creates a `CampdirValue` representing a map from an iterator of
    /// key-value pairs.
    pub fn from_map<I, IS>(fields: I) -> Self
    where
        I: IntoIterator<Item = (IS, CampdirValue)>,
        IS: AsRef<str>,
    {
        CampdirValue::Map(
            fields
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_string(), v))
                .collect(),
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CampdirValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CampdirValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Converts a `serde_json::Value` into a `CampdirValue` without loss.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CampdirValue::Null,
            serde_json::Value::Bool(b) => CampdirValue::Bool(b),
            // Integers outside the f64 mantissa degrade; document ids and
            // counters in this system are strings, so nothing relies on them.
            serde_json::Value::Number(n) => CampdirValue::Number(n.as_f64().unwrap_or(f64::MAX)),
            serde_json::Value::String(s) => CampdirValue::String(s),
            serde_json::Value::Array(items) => {
                CampdirValue::Array(items.into_iter().map(CampdirValue::from_json).collect())
            }
            serde_json::Value::Object(fields) => CampdirValue::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, CampdirValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    pub fn into_json(self) -> serde_json::Value {
        match self {
            CampdirValue::Null => serde_json::Value::Null,
            CampdirValue::Bool(b) => serde_json::Value::Bool(b),
            CampdirValue::Number(n) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            CampdirValue::String(s) => serde_json::Value::String(s),
            CampdirValue::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(CampdirValue::into_json).collect())
            }
            CampdirValue::Map(fields) => serde_json::Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, v.into_json()))
                    .collect(),
            ),
        }
    }
}

impl Serialize for CampdirValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CampdirValue::Null => serializer.serialize_unit(),
            CampdirValue::Bool(b) => serializer.serialize_bool(*b),
            CampdirValue::Number(n) => serializer.serialize_f64(*n),
            CampdirValue::String(s) => serializer.serialize_str(s),
            CampdirValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            CampdirValue::Map(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl From<bool> for CampdirValue {
    fn from(value: bool) -> Self {
        CampdirValue::Bool(value)
    }
}

impl From<f64> for CampdirValue {
    fn from(value: f64) -> Self {
        CampdirValue::Number(value)
    }
}

impl From<i32> for CampdirValue {
    fn from(value: i32) -> Self {
        CampdirValue::Number(value as f64)
    }
}

impl From<i64> for CampdirValue {
    fn from(value: i64) -> Self {
        CampdirValue::Number(value as f64)
    }
}

impl From<u32> for CampdirValue {
    fn from(value: u32) -> Self {
        CampdirValue::Number(value as f64)
    }
}

impl From<&str> for CampdirValue {
    fn from(value: &str) -> Self {
        CampdirValue::String(value.to_string())
    }
}

impl From<String> for CampdirValue {
    fn from(value: String) -> Self {
        CampdirValue::String(value)
    }
}

impl<V> From<Vec<V>> for CampdirValue
where
    V: Into<CampdirValue>,
{
    fn from(values: Vec<V>) -> Self {
        CampdirValue::Array(values.into_iter().map(|v| v.into()).collect())
    }
}

impl From<chrono::DateTime<chrono::Utc>> for CampdirValue {
    fn from(value: chrono::DateTime<chrono::Utc>) -> Self {
        // RFC 3339 in UTC sorts lexicographically in timestamp order, which
        // is what the default `createdAt` ordering relies on.
        CampdirValue::String(value.to_rfc3339_opts(chrono::SecondsFormat::Micros, true))
    }
}
