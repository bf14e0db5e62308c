//! Core error types

use std::time::Duration;

use thiserror::Error;

/// Errors raised by the Phoenix client.
///
/// Every endpoint method can fail with any of these variants; endpoint modules
/// never catch or rewrite errors coming out of the transport.
#[derive(Error, Debug, Clone)]
pub enum PhoenixError {
    /// The server answered with a non-2xx status.
    #[error("API error {status_code}: {message}")]
    Api {
        /// `message` field of the error body, or the status text when absent
        message: String,
        status_code: u16,
        status_text: String,
        /// Raw error body kept for diagnostics (text bodies become JSON strings)
        body: Option<serde_json::Value>,
    },

    /// Network-level failure (connect, reset, TLS, body read).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A single attempt exceeded its timeout and was aborted.
    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The response body does not match its declared content type.
    #[error("Failed to decode response (status {status_code}): {message}")]
    Decode {
        message: String,
        status_code: u16,
        body: String,
    },

    /// The request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid client configuration (base URL, header names or values).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A caller-supplied argument cannot be used to build a request.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Coarse classification used by retry policies and callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection problems and timeouts
    Network,
    /// 4xx responses
    Client,
    /// 5xx responses
    Server,
    /// Local decoding or encoding defects
    Local,
}

impl PhoenixError {
    /// Build an API error from a status line and an optional body.
    pub fn api(
        status_code: u16,
        status_text: impl Into<String>,
        message: impl Into<String>,
        body: Option<serde_json::Value>,
    ) -> Self {
        Self::Api {
            message: message.into(),
            status_code,
            status_text: status_text.into(),
            body,
        }
    }

    /// Human readable message without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Api { message, .. } | Self::Decode { message, .. } => message.clone(),
            Self::Transport(msg)
            | Self::Serialization(msg)
            | Self::Configuration(msg)
            | Self::InvalidParameter(msg) => msg.clone(),
            Self::Timeout(_) => self.to_string(),
        }
    }

    /// HTTP status code, when a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } | Self::Decode { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    pub fn status_text(&self) -> Option<&str> {
        match self {
            Self::Api { status_text, .. } => Some(status_text),
            _ => None,
        }
    }

    /// Parsed error body of an API error.
    pub fn body(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Api { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport(_) | Self::Timeout(_) => ErrorCategory::Network,
            Self::Api { status_code, .. } if *status_code >= 500 => ErrorCategory::Server,
            Self::Api { .. } => ErrorCategory::Client,
            Self::Decode { .. }
            | Self::Serialization(_)
            | Self::Configuration(_)
            | Self::InvalidParameter(_) => ErrorCategory::Local,
        }
    }

    /// Whether the failure is transient: network, timeout, 408, 429 or 5xx.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout(_) => true,
            Self::Api { status_code, .. } => {
                matches!(*status_code, 408 | 429) || *status_code >= 500
            }
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_accessors() {
        let err = PhoenixError::api(
            404,
            "Not Found",
            "Job not found",
            Some(serde_json::json!({"message": "Job not found"})),
        );
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.status_text(), Some("Not Found"));
        assert_eq!(err.message(), "Job not found");
        assert!(err.body().is_some());
        assert!(err.is_not_found());
        assert_eq!(err.category(), ErrorCategory::Client);
        assert!(!err.is_transient());
        assert!(err.to_string().contains("Job not found"));
    }

    #[test]
    fn transport_errors_carry_no_status() {
        let err = PhoenixError::Transport("connection refused".into());
        assert_eq!(err.status_code(), None);
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.is_transient());

        let timeout = PhoenixError::Timeout(Duration::from_millis(250));
        assert_eq!(timeout.status_code(), None);
        assert!(timeout.is_transient());
        assert!(timeout.to_string().contains("250ms"));
    }

    #[test]
    fn server_errors_and_throttling_are_transient() {
        assert!(PhoenixError::api(503, "Service Unavailable", "busy", None).is_transient());
        assert!(PhoenixError::api(429, "Too Many Requests", "slow down", None).is_transient());
        assert!(PhoenixError::api(408, "Request Timeout", "late", None).is_transient());
        assert!(!PhoenixError::api(400, "Bad Request", "bad", None).is_transient());
    }

    #[test]
    fn decode_errors_are_local() {
        let err = PhoenixError::Decode {
            message: "expected value".into(),
            status_code: 200,
            body: "{oops".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Local);
        assert!(!err.is_transient());
        assert_eq!(err.status_code(), Some(200));
    }
}
