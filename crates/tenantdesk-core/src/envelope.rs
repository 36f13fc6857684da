//! The server's uniform response wrapper.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{isvalid, data, errors}` as the API sends it.
///
/// Every field may be missing; a missing `isvalid` reads as `false` and a
/// `null` errors list reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub isvalid: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

impl Envelope {
    /// Reads an envelope out of an already-parsed JSON value.
    ///
    /// Anything that is not an object, or whose fields have unexpected
    /// types, is treated as an invalid envelope with no errors.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        let isvalid = object.get("isvalid").is_some_and(is_truthy);
        let data = object.get("data").filter(|v| !v.is_null()).cloned();
        let errors = object.get("errors").and_then(|v| match v {
            Value::Array(items) => Some(items.iter().map(error_text).collect()),
            Value::String(s) => Some(vec![s.clone()]),
            _ => None,
        });
        Self {
            isvalid,
            data,
            errors,
        }
    }

    /// The error list joined for display, or `None` when there is nothing
    /// to show.
    pub fn error_message(&self) -> Option<String> {
        let errors = self.errors.as_ref()?;
        let joined = errors
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        if joined.is_empty() { None } else { Some(joined) }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}

fn error_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}
