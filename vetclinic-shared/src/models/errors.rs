use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error payload the backend attaches to rejected requests.
///
/// The backend answers failures with `{"error": "..."}` and occasionally with
/// `{"message": "..."}`; both are optional here.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Primary error text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Secondary message text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Creates an error body carrying only an `error` field.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            message: None,
        }
    }

    /// Reads `error` and `message` out of an arbitrary JSON document.
    ///
    /// Empty strings, `false`, `0` and `null` count as absent. Other
    /// non-string values are kept in their JSON text form.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        Self {
            error: field_text(value, "error"),
            message: field_text(value, "message"),
        }
    }

    /// The `error` field if present, otherwise the `message` field.
    #[must_use]
    pub fn best_message(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.best_message().unwrap_or("unknown error"))
    }
}

fn field_text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
