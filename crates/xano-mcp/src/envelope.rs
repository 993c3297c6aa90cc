//! The uniform result-or-error reply shape.
//!
//! Every tool invocation produces exactly one envelope. A success carries
//! the parsed body under both `data` and the tool's payload key (e.g.
//! `instances`), so callers can pattern-match without inspecting a
//! generic field. A failure carries only `error`.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Result envelope returned for every invocation.
///
/// Invariant: exactly one of {data, error} is present.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    key: Option<&'static str>,
    data: Option<Value>,
    error: Option<String>,
}

impl Envelope {
    /// Successful outcome: body keyed under `data` and the payload key.
    pub fn success(key: &'static str, data: Value) -> Self {
        Self {
            key: Some(key),
            data: Some(data),
            error: None,
        }
    }

    /// Failed outcome with a human-readable message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            key: None,
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Serialize to a JSON object.
    pub fn to_value(&self) -> Value {
        // serializing Value never fails
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match (&self.data, &self.error) {
            (Some(data), None) => {
                let len = if self.key.is_some() { 2 } else { 1 };
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("data", data)?;
                if let Some(key) = self.key {
                    map.serialize_entry(key, data)?;
                }
                map.end()
            }
            _ => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(
                    "error",
                    self.error.as_deref().unwrap_or("unknown error"),
                )?;
                map.end()
            }
        }
    }
}
