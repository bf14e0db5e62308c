//! Phoenix client facade
//!
//! [`Phoenix`] owns one [`PhoenixTransport`] and hands out endpoint modules
//! that borrow it, so every module shares one configuration and one connection
//! pool.
//!
//! ```rust,no_run
//! use phoenix_client::prelude::*;
//!
//! # async fn run() -> Result<(), PhoenixError> {
//! let phoenix = Phoenix::builder().host("imposer.local").retries(1).build()?;
//! let jobs = phoenix.jobs().list().await?;
//! println!("{}", jobs.data);
//! # Ok(())
//! # }
//! ```
//!
//! Mutators (`set_headers`, `set_timeout`) take `&mut self`; callers that share
//! a client across tasks and still want to mutate it need their own
//! synchronization.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{Document, JobsApi, LibrariesApi, PresetsApi, ProjectsApi, fetch};
use crate::config::{ClientConfig, ClientConfigBuilder};
use crate::error::PhoenixError;
use crate::execution::http::{HttpInterceptor, PhoenixTransport, RequestSpec};
use crate::retry::RetryOn;

/// Entry point of the client.
#[derive(Debug, Clone)]
pub struct Phoenix {
    transport: PhoenixTransport,
}

impl Phoenix {
    pub fn builder() -> PhoenixBuilder {
        PhoenixBuilder::default()
    }

    pub fn new(config: ClientConfig) -> Result<Self, PhoenixError> {
        Ok(Self {
            transport: PhoenixTransport::new(config)?,
        })
    }

    /// Build from `PHOENIX_*` environment variables; see [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self, PhoenixError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn from_transport(transport: PhoenixTransport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &PhoenixTransport {
        &self.transport
    }

    pub fn jobs(&self) -> JobsApi<&PhoenixTransport> {
        JobsApi::new(&self.transport)
    }

    pub fn projects(&self) -> ProjectsApi<&PhoenixTransport> {
        ProjectsApi::new(&self.transport)
    }

    pub fn libraries(&self) -> LibrariesApi<&PhoenixTransport> {
        LibrariesApi::new(&self.transport)
    }

    pub fn presets(&self) -> PresetsApi<&PhoenixTransport> {
        PresetsApi::new(&self.transport)
    }

    /// Server version information.
    pub async fn version(&self) -> Result<Document, PhoenixError> {
        fetch(&self.transport, RequestSpec::get("/version")).await
    }

    /// Whether the server answers a version probe. One attempt, no retries;
    /// any failure is reported as `false`.
    pub async fn health_check(&self) -> bool {
        let probe = self.transport.without_retries();
        match fetch(&probe, RequestSpec::get("/version")).await {
            Ok(_) => true,
            Err(error) => {
                tracing::debug!(target: "phoenix::http", err = %error, "health check failed");
                false
            }
        }
    }

    /// Merge headers into the instance headers for subsequent requests.
    pub fn set_headers(&mut self, headers: HashMap<String, String>) -> Result<(), PhoenixError> {
        self.transport.set_headers(headers)
    }

    /// Replace the default per-attempt timeout for subsequent requests.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.transport.set_timeout(timeout);
    }

    /// Owned copy of the current configuration.
    pub fn config(&self) -> ClientConfig {
        self.transport.config()
    }
}

/// Builder for [`Phoenix`]; thin wrapper over [`ClientConfigBuilder`].
#[derive(Default)]
pub struct PhoenixBuilder {
    config: ClientConfigBuilder,
    http_client: Option<reqwest::Client>,
}

impl PhoenixBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.base_url(url);
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config = self.config.host(host);
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config = self.config.port(port);
        self
    }

    pub fn base_path(mut self, path: impl Into<String>) -> Self {
        self.config = self.config.base_path(path);
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.config = self.config.secure(secure);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config = self.config.header(name, value);
        self
    }

    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.config = self.config.headers(headers);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    pub fn retries(mut self, retries: u32) -> Self {
        self.config = self.config.retries(retries);
        self
    }

    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config = self.config.retry_delay(delay);
        self
    }

    pub fn retry_on(mut self, retry_on: RetryOn) -> Self {
        self.config = self.config.retry_on(retry_on);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.user_agent(user_agent);
        self
    }

    pub fn with_interceptor(mut self, interceptor: Arc<dyn HttpInterceptor>) -> Self {
        self.config = self.config.with_interceptor(interceptor);
        self
    }

    pub fn http_debug(mut self, enabled: bool) -> Self {
        self.config = self.config.http_debug(enabled);
        self
    }

    /// Use a preconfigured `reqwest::Client`.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> Result<Phoenix, PhoenixError> {
        let config = self.config.build()?;
        let transport = match self.http_client {
            Some(client) => PhoenixTransport::with_http_client(config, client),
            None => PhoenixTransport::new(config)?,
        };
        Ok(Phoenix { transport })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_settings() {
        let phoenix = Phoenix::builder()
            .host("imposer")
            .port(9100)
            .timeout(Duration::from_secs(5))
            .retries(1)
            .header("X-Station", "a")
            .build()
            .unwrap();
        let config = phoenix.config();
        assert_eq!(config.base_url(), "http://imposer:9100/phoenix");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.retries, 1);
        assert_eq!(config.headers.get("X-Station").map(String::as_str), Some("a"));
    }

    #[test]
    fn config_is_a_copy() {
        let mut phoenix = Phoenix::builder().build().unwrap();
        let before = phoenix.config();
        phoenix.set_timeout(Duration::from_millis(10));
        phoenix
            .set_headers(HashMap::from([("X-Job-Queue".into(), "night".into())]))
            .unwrap();
        assert_eq!(before.timeout, Duration::from_secs(30));
        assert!(before.headers.is_empty());
        assert_eq!(phoenix.config().timeout, Duration::from_millis(10));
        assert_eq!(phoenix.config().headers.len(), 1);
    }

    #[tokio::test]
    async fn health_check_is_false_when_unreachable() {
        let phoenix = Phoenix::builder()
            .base_url("http://127.0.0.1:1/phoenix")
            .retry_delay(Duration::from_secs(60))
            .build()
            .unwrap();
        assert!(!phoenix.health_check().await);
    }
}
