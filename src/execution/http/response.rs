//! Response normalization
//!
//! Turns a raw status/headers/body triple into either a [`ResponseEnvelope`]
//! or a [`PhoenixError`].

use std::collections::HashMap;

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::error::PhoenixError;

/// Parsed response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    /// Body declared as JSON
    Json(serde_json::Value),
    /// XML, plain text and anything else
    Text(String),
}

impl ResponseData {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(v) => Some(v),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            Self::Json(_) => None,
        }
    }

    /// Collapse into a JSON value; text becomes a JSON string.
    pub fn into_value(self) -> serde_json::Value {
        match self {
            Self::Json(v) => v,
            Self::Text(t) => serde_json::Value::String(t),
        }
    }

    /// True for a JSON `null` (empty JSON body) or empty text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Json(v) => v.is_null(),
            Self::Text(t) => t.is_empty(),
        }
    }
}

/// Successful response handed back to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope<T> {
    pub data: T,
    pub status_code: u16,
    pub status_text: String,
    /// Lower-cased header names; repeated headers joined with `", "`
    pub headers: HashMap<String, String>,
}

impl<T> ResponseEnvelope<T> {
    pub fn into_data(self) -> T {
        self.data
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResponseEnvelope<U> {
        ResponseEnvelope {
            data: f(self.data),
            status_code: self.status_code,
            status_text: self.status_text,
            headers: self.headers,
        }
    }

    pub fn try_map<U, E>(
        self,
        f: impl FnOnce(T) -> Result<U, E>,
    ) -> Result<ResponseEnvelope<U>, E> {
        Ok(ResponseEnvelope {
            data: f(self.data)?,
            status_code: self.status_code,
            status_text: self.status_text,
            headers: self.headers,
        })
    }
}

impl ResponseEnvelope<ResponseData> {
    /// Decode the payload into `T`.
    ///
    /// Text payloads are parsed as JSON first and otherwise offered to `T` as a
    /// JSON string; anything that still does not fit is a decode error.
    pub fn json<T: DeserializeOwned>(self) -> Result<ResponseEnvelope<T>, PhoenixError> {
        let status_code = self.status_code;
        self.try_map(|data| match data {
            ResponseData::Json(value) => {
                let raw = value.to_string();
                serde_json::from_value(value).map_err(|e| decode_error(status_code, &e, raw))
            }
            ResponseData::Text(text) => match serde_json::from_str(&text) {
                Ok(v) => Ok(v),
                Err(e) => serde_json::from_value(serde_json::Value::String(text.clone()))
                    .map_err(|_| decode_error(status_code, &e, text)),
            },
        })
    }

    pub fn into_value(self) -> ResponseEnvelope<serde_json::Value> {
        self.map(ResponseData::into_value)
    }
}

fn decode_error(status_code: u16, err: &serde_json::Error, body: String) -> PhoenixError {
    PhoenixError::Decode {
        message: err.to_string(),
        status_code,
        body,
    }
}

/// Whether a `Content-Type` value declares JSON (`application/json`, `*+json`).
pub fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

/// Flatten a header map into single string values.
///
/// Repeated headers are joined with `", "` in received order; values that are
/// not valid UTF-8 are skipped.
pub fn flatten_headers(headers: &HeaderMap) -> HashMap<String, String> {
    let mut out: HashMap<String, String> = HashMap::with_capacity(headers.keys_len());
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            continue;
        };
        out.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    out
}

/// Parse a 2xx body according to its declared content type.
pub fn parse_success_body(
    status_code: u16,
    content_type: Option<&str>,
    text: String,
) -> Result<ResponseData, PhoenixError> {
    if !content_type.is_some_and(is_json_content_type) {
        return Ok(ResponseData::Text(text));
    }
    if text.trim().is_empty() {
        return Ok(ResponseData::Json(serde_json::Value::Null));
    }
    serde_json::from_str(&text)
        .map(ResponseData::Json)
        .map_err(|e| decode_error(status_code, &e, text))
}

/// Build the error for a non-2xx response.
///
/// The message comes from a JSON body's `message` field, falling back to the
/// status text. The body is kept as JSON when it parses, else as a string.
pub fn error_from_response(status_code: u16, status_text: &str, text: &str) -> PhoenixError {
    let body = if text.trim().is_empty() {
        None
    } else {
        Some(
            serde_json::from_str::<serde_json::Value>(text)
                .unwrap_or_else(|_| serde_json::Value::String(text.to_string())),
        )
    };

    let message = body
        .as_ref()
        .and_then(|b| b.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| {
            if status_text.is_empty() {
                format!("HTTP {status_code}")
            } else {
                status_text.to_string()
            }
        });

    PhoenixError::api(status_code, status_text, message, body)
}
