//! Conversions from third-party error types

use super::PhoenixError;

impl From<serde_json::Error> for PhoenixError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for PhoenixError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Configuration(format!("Invalid request: {err}"))
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<reqwest::header::InvalidHeaderName> for PhoenixError {
    fn from(err: reqwest::header::InvalidHeaderName) -> Self {
        Self::Configuration(format!("Invalid header name: {err}"))
    }
}

impl From<reqwest::header::InvalidHeaderValue> for PhoenixError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::Configuration(format!("Invalid header value: {err}"))
    }
}
