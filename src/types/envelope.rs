//! Server envelope for mutating calls

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wrapper the server returns for create, update, delete and action calls.
///
/// `errors` and `warnings` entries are kept opaque; most servers send objects
/// with a `message` field but plain strings also occur.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(rename = "status-code", default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Value>,
}

impl ApiResponse {
    /// Envelope for a 2xx response with an empty body.
    pub fn from_status(status_code: u16) -> Self {
        Self {
            success: (200..300).contains(&status_code),
            status_code: Some(status_code),
            ..Default::default()
        }
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(entry_message).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(entry_message).collect()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

fn entry_message(entry: &Value) -> String {
    match entry {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| entry.to_string()),
        other => other.to_string(),
    }
}
