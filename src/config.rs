//! Client configuration
//!
//! `ClientConfig` is the immutable-by-default settings bundle owned by one
//! transport. It is built through [`ClientConfigBuilder`] or loaded from
//! `PHOENIX_*` environment variables.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::PhoenixError;
use crate::execution::http::headers::{merge_header_maps, validate_headers};
use crate::execution::http::interceptor::{HttpInterceptor, LoggingInterceptor};
use crate::retry::{RetryOn, RetryPolicy};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8022;
pub const DEFAULT_BASE_PATH: &str = "/phoenix";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Settings for one Phoenix transport.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    /// Instance headers sent with every request
    pub headers: HashMap<String, String>,
    /// Per-attempt timeout
    pub timeout: Duration,
    pub connect_timeout: Option<Duration>,
    /// Additional attempts after the first
    pub retries: u32,
    /// Constant wait between attempts
    pub retry_delay: Duration,
    pub retry_on: RetryOn,
    pub user_agent: Option<String>,
    pub http_interceptors: Vec<Arc<dyn HttpInterceptor>>,
    /// Adds [`LoggingInterceptor`] in front of the configured interceptors
    pub http_debug: bool,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load from `PHOENIX_*` environment variables.
    ///
    /// - `PHOENIX_BASE_URL`, or `PHOENIX_HOST` / `PHOENIX_PORT` / `PHOENIX_BASE_PATH`
    /// - `PHOENIX_TIMEOUT_MS`, `PHOENIX_RETRIES`, `PHOENIX_RETRY_DELAY_MS`
    pub fn from_env() -> Result<Self, PhoenixError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PhoenixError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();
        if let Some(url) = lookup("PHOENIX_BASE_URL") {
            builder = builder.base_url(url);
        }
        if let Some(host) = lookup("PHOENIX_HOST") {
            builder = builder.host(host);
        }
        if let Some(port) = lookup("PHOENIX_PORT") {
            builder = builder.port(parse_env_number("PHOENIX_PORT", &port)?);
        }
        if let Some(path) = lookup("PHOENIX_BASE_PATH") {
            builder = builder.base_path(path);
        }
        if let Some(ms) = lookup("PHOENIX_TIMEOUT_MS") {
            builder = builder.timeout(Duration::from_millis(parse_env_number(
                "PHOENIX_TIMEOUT_MS",
                &ms,
            )?));
        }
        if let Some(retries) = lookup("PHOENIX_RETRIES") {
            builder = builder.retries(parse_env_number("PHOENIX_RETRIES", &retries)?);
        }
        if let Some(ms) = lookup("PHOENIX_RETRY_DELAY_MS") {
            builder = builder.retry_delay(Duration::from_millis(parse_env_number(
                "PHOENIX_RETRY_DELAY_MS",
                &ms,
            )?));
        }
        builder.build()
    }

    /// Normalized base URL, never ending in `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retries, self.retry_delay).with_retry_on(self.retry_on)
    }

    /// Interceptors in invocation order, including the debug logger.
    pub fn effective_interceptors(&self) -> Vec<Arc<dyn HttpInterceptor>> {
        let mut out: Vec<Arc<dyn HttpInterceptor>> = Vec::with_capacity(self.http_interceptors.len() + 1);
        if self.http_debug {
            out.push(Arc::new(LoggingInterceptor));
        }
        out.extend(self.http_interceptors.iter().cloned());
        out
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: format!("http://{DEFAULT_HOST}:{DEFAULT_PORT}{DEFAULT_BASE_PATH}"),
            headers: HashMap::new(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: None,
            retries: DEFAULT_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            retry_on: RetryOn::default(),
            user_agent: None,
            http_interceptors: Vec::new(),
            http_debug: false,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("retries", &self.retries)
            .field("retry_delay", &self.retry_delay)
            .field("retry_on", &self.retry_on)
            .field("user_agent", &self.user_agent)
            .field("http_interceptors", &self.http_interceptors.len())
            .field("http_debug", &self.http_debug)
            .finish()
    }
}

/// Builder for [`ClientConfig`].
///
/// An explicit `base_url` wins over `host`/`port`/`base_path`/`secure`.
#[derive(Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    base_path: Option<String>,
    secure: bool,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retries: Option<u32>,
    retry_delay: Option<Duration>,
    retry_on: Option<RetryOn>,
    user_agent: Option<String>,
    http_interceptors: Vec<Arc<dyn HttpInterceptor>>,
    http_debug: bool,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Path prefix of the API (default `/phoenix`).
    pub fn base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Use `https` when composing from host and port.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Add an instance header. Names are case-insensitive; the last value wins.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        merge_header_maps(&mut self.headers, HashMap::from([(name.into(), value.into())]));
        self
    }

    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        merge_header_maps(&mut self.headers, headers);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    pub fn retry_on(mut self, retry_on: RetryOn) -> Self {
        self.retry_on = Some(retry_on);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_interceptor(mut self, interceptor: Arc<dyn HttpInterceptor>) -> Self {
        self.http_interceptors.push(interceptor);
        self
    }

    pub fn http_debug(mut self, enabled: bool) -> Self {
        self.http_debug = enabled;
        self
    }

    pub fn build(self) -> Result<ClientConfig, PhoenixError> {
        let base_url = match self.base_url {
            Some(url) => normalize_base_url(&url)?,
            None => {
                let scheme = if self.secure { "https" } else { "http" };
                let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
                if host.trim().is_empty() {
                    return Err(PhoenixError::Configuration("Host must not be empty".into()));
                }
                let port = self.port.unwrap_or(DEFAULT_PORT);
                let path = normalize_base_path(self.base_path.as_deref().unwrap_or(DEFAULT_BASE_PATH));
                normalize_base_url(&format!("{scheme}://{}:{port}{path}", host.trim()))?
            }
        };

        validate_headers(&self.headers)?;
        if let Some(ua) = &self.user_agent {
            reqwest::header::HeaderValue::from_str(ua)?;
        }

        Ok(ClientConfig {
            base_url,
            headers: self.headers,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            connect_timeout: self.connect_timeout,
            retries: self.retries.unwrap_or(DEFAULT_RETRIES),
            retry_delay: self.retry_delay.unwrap_or(DEFAULT_RETRY_DELAY),
            retry_on: self.retry_on.unwrap_or_default(),
            user_agent: self.user_agent,
            http_interceptors: self.http_interceptors,
            http_debug: self.http_debug,
        })
    }
}

/// Trim whitespace and trailing separators; require an http(s) scheme.
pub fn normalize_base_url(url: &str) -> Result<String, PhoenixError> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(PhoenixError::Configuration("Base URL must not be empty".into()));
    }
    let lower = trimmed.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("http://")
        .or_else(|| lower.strip_prefix("https://"));
    match rest {
        Some(authority) if !authority.is_empty() && !authority.starts_with('/') => {
            Ok(trimmed.to_string())
        }
        _ => Err(PhoenixError::Configuration(format!(
            "Base URL must start with http:// or https:// and name a host: '{url}'"
        ))),
    }
}

fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn parse_env_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, PhoenixError> {
    value.trim().parse().map_err(|_| {
        PhoenixError::Configuration(format!("{key} must be a non-negative integer, got '{value}'"))
    })
}
