//! Request description types
//!
//! A `RequestSpec` is the plain-data form of one logical API call: verb,
//! root-relative path, ordered query parameters, optional body, header
//! overrides and an optional per-request timeout. It is built once by an
//! endpoint method and handed by value to a [`Transport`](super::Transport).

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use super::multipart::MultipartBody;
use crate::error::PhoenixError;

/// HTTP verbs used by the Phoenix API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized to JSON text when sent.
    Json(serde_json::Value),
    /// Pre-encoded `multipart/form-data`; sent verbatim.
    Multipart(MultipartBody),
    /// Raw bytes sent verbatim with the effective content type.
    Bytes(Vec<u8>),
}

/// Ordered query parameters.
///
/// Keys keep insertion order; `None` values are dropped on insert so they never
/// reach the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn push(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// Append a parameter when `value` is `Some`.
    pub fn push_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.push(key, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// URL-encode as `k1=v1&k2=v2`.
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, Option<V>)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |params, (k, v)| params.push_opt(k, v))
    }
}

/// One logical API call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    method: HttpMethod,
    path: String,
    query: QueryParams,
    body: Option<RequestBody>,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::default(),
            body: None,
            headers: Vec::new(),
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Replace the query parameters.
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn query_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query = self.query.push(key, value);
        self
    }

    pub fn query_opt<V: ToString>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.query = self.query.push_opt(key, value);
        self
    }

    /// Serialize `body` into a JSON payload.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, PhoenixError> {
        let value = serde_json::to_value(body)?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    pub fn json_value(mut self, value: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(value));
        self
    }

    pub fn multipart(mut self, body: MultipartBody) -> Self {
        self.body = Some(RequestBody::Multipart(body));
        self
    }

    pub fn bytes(mut self, bytes: Vec<u8>) -> Self {
        self.body = Some(RequestBody::Bytes(bytes));
        self
    }

    /// Per-request header override; wins over instance and default headers.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Per-request timeout; replaces the client default for each attempt.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.query
    }

    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    /// JSON payload, if the body is JSON.
    pub fn json_body(&self) -> Option<&serde_json::Value> {
        match &self.body {
            Some(RequestBody::Json(v)) => Some(v),
            _ => None,
        }
    }

    pub fn header_overrides(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn timeout_override(&self) -> Option<Duration> {
        self.timeout
    }

    /// Combine with a normalized base URL (no trailing `/`) into the full URL.
    pub fn resolve_url(&self, base_url: &str) -> String {
        let mut url = String::with_capacity(base_url.len() + self.path.len() + 16);
        url.push_str(base_url.trim_end_matches('/'));
        if !self.path.is_empty() && !self.path.starts_with('/') {
            url.push('/');
        }
        url.push_str(&self.path);
        if !self.query.is_empty() {
            url.push('?');
            url.push_str(&self.query.encode());
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_path_and_query_against_base_url() {
        let spec = RequestSpec::get("/jobs/42").query_param("thumb", true);
        assert_eq!(
            spec.resolve_url("https://host:1234/phoenix"),
            "https://host:1234/phoenix/jobs/42?thumb=true"
        );
    }

    #[test]
    fn adds_missing_leading_separator() {
        let spec = RequestSpec::get("jobs");
        assert_eq!(
            spec.resolve_url("http://localhost:8022/phoenix"),
            "http://localhost:8022/phoenix/jobs"
        );
    }

    #[test]
    fn query_keeps_insertion_order_and_skips_none() {
        let spec = RequestSpec::get("/projects")
            .query_opt("status", Some("active"))
            .query_opt::<u32>("limit", None)
            .query_param("offset", 20);
        assert_eq!(
            spec.resolve_url("http://h/phoenix"),
            "http://h/phoenix/projects?status=active&offset=20"
        );
    }

    #[test]
    fn query_values_are_percent_encoded() {
        let query = QueryParams::new().push("search", "coated 80# gloss&matte");
        assert_eq!(query.encode(), "search=coated%2080%23%20gloss%26matte");
    }

    #[test]
    fn empty_query_adds_no_question_mark() {
        let spec = RequestSpec::delete("/jobs/7").query(QueryParams::new());
        assert_eq!(spec.resolve_url("http://h/phoenix"), "http://h/phoenix/jobs/7");
    }

    #[test]
    fn query_from_iterator_of_options() {
        let query: QueryParams = vec![("a", Some("1")), ("b", None), ("c", Some("3"))]
            .into_iter()
            .collect();
        assert_eq!(query.encode(), "a=1&c=3");
        assert_eq!(query.get("c"), Some("3"));
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn json_body_is_captured_as_value() {
        #[derive(Serialize)]
        struct Body {
            name: &'static str,
        }
        let spec = RequestSpec::post("/jobs").json(&Body { name: "J1" }).unwrap();
        assert_eq!(spec.method(), HttpMethod::Post);
        assert_eq!(spec.json_body(), Some(&json!({"name": "J1"})));
    }

    #[test]
    fn method_names() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(reqwest::Method::from(HttpMethod::Delete), reqwest::Method::DELETE);
    }
}
