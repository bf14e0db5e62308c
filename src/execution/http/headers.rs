//! HTTP Headers Utility
//!
//! Header construction and merge rules for Phoenix requests.
//!
//! Precedence, lowest to highest:
//! 1. built-in defaults (`Content-Type`/`Accept: application/json`)
//! 2. instance headers (constructor headers, then `set_headers` updates)
//! 3. per-request overrides
//!
//! A multipart body always wins the `Content-Type` header since its boundary
//! must match the encoded body.

use std::collections::HashMap;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};

use super::request::RequestBody;
use crate::error::PhoenixError;

pub const JSON_MIME: &str = "application/json";

/// HTTP header builder for API requests
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    /// Create a new header builder
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
        }
    }

    /// Start from the built-in defaults.
    pub fn with_defaults() -> Self {
        Self::new().with_json_content_type().with_json_accept()
    }

    /// Add JSON content type
    pub fn with_json_content_type(mut self) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MIME));
        self
    }

    pub fn with_json_accept(mut self) -> Self {
        self.headers.insert(ACCEPT, HeaderValue::from_static(JSON_MIME));
        self
    }

    /// Add user agent
    pub fn with_user_agent(mut self, user_agent: &str) -> Result<Self, PhoenixError> {
        self.headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).map_err(|e| {
                PhoenixError::Configuration(format!("Invalid user agent: {e}"))
            })?,
        );
        Ok(self)
    }

    /// Add a custom header, replacing any existing value.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, PhoenixError> {
        let (name, value) = parse_header(name, value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Add multiple custom headers from a HashMap
    pub fn with_custom_headers(
        mut self,
        custom_headers: &HashMap<String, String>,
    ) -> Result<Self, PhoenixError> {
        for (key, value) in custom_headers {
            self = self.with_header(key, value)?;
        }
        Ok(self)
    }

    pub fn with_overrides(mut self, overrides: &[(String, String)]) -> Result<Self, PhoenixError> {
        for (key, value) in overrides {
            self = self.with_header(key, value)?;
        }
        Ok(self)
    }

    /// Force the content type demanded by the body, if any.
    pub fn with_body_content_type(mut self, body: Option<&RequestBody>) -> Result<Self, PhoenixError> {
        if let Some(RequestBody::Multipart(multipart)) = body {
            self.headers
                .insert(CONTENT_TYPE, HeaderValue::from_str(&multipart.content_type())?);
        }
        Ok(self)
    }

    /// Build the final HeaderMap
    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

impl Default for HttpHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate and convert one header pair.
pub fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), PhoenixError> {
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
        PhoenixError::Configuration(format!("Invalid header name '{name}': {e}"))
    })?;
    let header_value = HeaderValue::from_str(value).map_err(|e| {
        PhoenixError::Configuration(format!("Invalid header value for '{name}': {e}"))
    })?;
    Ok((header_name, header_value))
}

/// Validate every pair of a header map without building anything.
pub fn validate_headers(headers: &HashMap<String, String>) -> Result<(), PhoenixError> {
    headers
        .iter()
        .try_for_each(|(k, v)| parse_header(k, v).map(|_| ()))
}

/// Merge `partial` into `base`; names compare case-insensitively and later
/// values win.
pub fn merge_header_maps(base: &mut HashMap<String, String>, partial: HashMap<String, String>) {
    for (key, value) in partial {
        base.retain(|existing, _| !existing.eq_ignore_ascii_case(&key));
        base.insert(key, value);
    }
}

/// Effective headers for one request.
pub fn build_request_headers(
    instance_headers: &HashMap<String, String>,
    user_agent: Option<&str>,
    overrides: &[(String, String)],
    body: Option<&RequestBody>,
) -> Result<HeaderMap, PhoenixError> {
    let mut builder = HttpHeaderBuilder::with_defaults();
    if let Some(ua) = user_agent {
        builder = builder.with_user_agent(ua)?;
    }
    Ok(builder
        .with_custom_headers(instance_headers)?
        .with_overrides(overrides)?
        .with_body_content_type(body)?
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::http::multipart::MultipartBody;

    fn get<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
        headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or("")
    }

    #[test]
    fn defaults_are_json() {
        let headers = build_request_headers(&HashMap::new(), None, &[], None).unwrap();
        assert_eq!(get(&headers, "content-type"), JSON_MIME);
        assert_eq!(get(&headers, "accept"), JSON_MIME);
    }

    #[test]
    fn precedence_is_request_over_instance_over_defaults() {
        let mut instance = HashMap::new();
        instance.insert("Accept".to_string(), "application/xml".to_string());
        instance.insert("X-Station".to_string(), "prepress-1".to_string());

        let overrides = vec![("x-station".to_string(), "prepress-2".to_string())];
        let headers = build_request_headers(&instance, Some("phoenix-client/test"), &overrides, None)
            .unwrap();

        assert_eq!(get(&headers, "accept"), "application/xml");
        assert_eq!(get(&headers, "x-station"), "prepress-2");
        assert_eq!(get(&headers, "content-type"), JSON_MIME);
        assert_eq!(get(&headers, "user-agent"), "phoenix-client/test");
    }

    #[test]
    fn multipart_body_forces_content_type() {
        let body = RequestBody::Multipart(MultipartBody::file_with_boundary(b"x", "a.pdf", "B0"));
        let overrides = vec![("Content-Type".to_string(), "text/plain".to_string())];
        let headers = build_request_headers(&HashMap::new(), None, &overrides, Some(&body)).unwrap();
        assert_eq!(get(&headers, "content-type"), "multipart/form-data; boundary=B0");
    }

    #[test]
    fn invalid_header_name_is_configuration_error() {
        let mut instance = HashMap::new();
        instance.insert("Bad Header".to_string(), "v".to_string());
        let err = build_request_headers(&instance, None, &[], None).unwrap_err();
        assert!(matches!(err, PhoenixError::Configuration(_)));
        assert!(validate_headers(&instance).is_err());
    }

    #[test]
    fn merge_replaces_case_insensitively() {
        let mut base = HashMap::new();
        base.insert("X-Token".to_string(), "old".to_string());
        base.insert("X-Keep".to_string(), "keep".to_string());

        let mut partial = HashMap::new();
        partial.insert("x-token".to_string(), "new".to_string());
        merge_header_maps(&mut base, partial);

        assert_eq!(base.len(), 2);
        assert_eq!(base.get("x-token").map(String::as_str), Some("new"));
        assert_eq!(base.get("X-Keep").map(String::as_str), Some("keep"));
    }
}
