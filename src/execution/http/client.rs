//! Reqwest-backed transport
//!
//! [`PhoenixTransport`] owns one `reqwest::Client` plus the [`ClientConfig`]
//! it was built from. Every request goes through the same pipeline: resolve
//! URL, merge headers, run interceptors, send under a per-attempt timeout,
//! classify the response, retry according to the configured policy.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use super::headers::{build_request_headers, merge_header_maps, validate_headers};
use super::interceptor::{HttpInterceptor, HttpRequestContext};
use super::request::{RequestBody, RequestSpec};
use super::response::{
    ResponseData, ResponseEnvelope, error_from_response, flatten_headers, parse_success_body,
};
use super::transport::Transport;
use crate::config::ClientConfig;
use crate::error::PhoenixError;
use crate::retry::RetryPolicy;

/// Build a `reqwest::Client` for a Phoenix configuration.
///
/// Per-attempt timeouts are enforced by the transport, not by the client, so
/// `set_timeout` can change them without rebuilding.
pub fn build_http_client_from_config(config: &ClientConfig) -> Result<reqwest::Client, PhoenixError> {
    let mut builder = reqwest::Client::builder();

    if let Some(connect_timeout) = config.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }

    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }

    builder
        .build()
        .map_err(|e| PhoenixError::Configuration(format!("Failed to create HTTP client: {e}")))
}

/// Production [`Transport`] talking to a Phoenix server over HTTP.
#[derive(Clone, Debug)]
pub struct PhoenixTransport {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl PhoenixTransport {
    pub fn new(config: ClientConfig) -> Result<Self, PhoenixError> {
        let http_client = build_http_client_from_config(&config)?;
        Ok(Self {
            http_client,
            config,
        })
    }

    /// Use a caller-provided `reqwest::Client` (proxies, custom TLS).
    pub fn with_http_client(config: ClientConfig, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> ClientConfig {
        self.config.clone()
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.config.headers
    }

    /// Merge `headers` into the instance headers. Names are matched
    /// case-insensitively; nothing changes when any entry is invalid.
    pub fn set_headers(&mut self, headers: HashMap<String, String>) -> Result<(), PhoenixError> {
        validate_headers(&headers)?;
        merge_header_maps(&mut self.config.headers, headers);
        Ok(())
    }

    /// Replace the per-attempt timeout for subsequent requests.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.config.timeout = timeout;
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.config.retry_policy()
    }

    /// Copy of this transport that makes a single attempt per request.
    pub fn without_retries(&self) -> Self {
        let mut single = self.clone();
        single.config.retries = 0;
        single
    }

    async fn send_once(
        &self,
        spec: &RequestSpec,
        url: &str,
        interceptors: &[Arc<dyn HttpInterceptor>],
        attempt: u32,
    ) -> Result<ResponseEnvelope<ResponseData>, PhoenixError> {
        let ctx = HttpRequestContext {
            method: spec.method(),
            url: url.to_string(),
            attempt,
        };
        let timeout = spec.timeout_override().unwrap_or(self.config.timeout);

        let result = self.attempt(spec, &ctx, interceptors, timeout).await;
        if let Err(error) = &result {
            for interceptor in interceptors {
                interceptor.on_error(&ctx, error);
            }
        }
        result
    }

    async fn attempt(
        &self,
        spec: &RequestSpec,
        ctx: &HttpRequestContext,
        interceptors: &[Arc<dyn HttpInterceptor>],
        timeout: Duration,
    ) -> Result<ResponseEnvelope<ResponseData>, PhoenixError> {
        let headers = build_request_headers(
            &self.config.headers,
            self.config.user_agent.as_deref(),
            spec.header_overrides(),
            spec.body(),
        )?;

        let mut builder = self
            .http_client
            .request(spec.method().into(), &ctx.url)
            .headers(headers.clone());
        builder = match spec.body() {
            Some(RequestBody::Json(value)) => builder.body(serde_json::to_string(value)?),
            Some(RequestBody::Multipart(form)) => builder.body(form.as_bytes().to_vec()),
            Some(RequestBody::Bytes(bytes)) => builder.body(bytes.clone()),
            None => builder,
        };
        for interceptor in interceptors {
            builder = interceptor.on_before_send(ctx, builder, &headers)?;
        }

        tracing::trace!(target: "phoenix::http", method = %ctx.method, url = %ctx.url, attempt = ctx.attempt, "dispatching");

        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            if status.is_success() {
                for interceptor in interceptors {
                    interceptor.on_response(ctx, &response)?;
                }
            }
            let status_text = status.canonical_reason().unwrap_or_default().to_string();
            let headers = flatten_headers(response.headers());
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let text = response.text().await?;
            Ok::<_, PhoenixError>((status, status_text, headers, content_type, text))
        };

        let (status, status_text, headers, content_type, text) =
            match tokio::time::timeout(timeout, exchange).await {
                Ok(outcome) => outcome?,
                Err(_) => return Err(PhoenixError::Timeout(timeout)),
            };

        let status_code = status.as_u16();
        if !status.is_success() {
            return Err(error_from_response(status_code, &status_text, &text));
        }

        let data = parse_success_body(status_code, content_type.as_deref(), text)?;
        Ok(ResponseEnvelope {
            data,
            status_code,
            status_text,
            headers,
        })
    }
}

#[async_trait]
impl Transport for PhoenixTransport {
    async fn execute(
        &self,
        spec: RequestSpec,
    ) -> Result<ResponseEnvelope<ResponseData>, PhoenixError> {
        let url = spec.resolve_url(self.config.base_url());
        let interceptors = self.config.effective_interceptors();
        let method = spec.method();

        self.retry_policy()
            .execute_with_hook(
                |attempt| self.send_once(&spec, &url, &interceptors, attempt),
                |error, attempt, delay| {
                    tracing::debug!(target: "phoenix::http", %method, url = %url, attempt, delay_ms = delay.as_millis() as u64, err = %error, "retrying request");
                    let ctx = HttpRequestContext {
                        method,
                        url: url.clone(),
                        attempt,
                    };
                    for interceptor in &interceptors {
                        interceptor.on_retry(&ctx, error, delay);
                    }
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn builds_client_from_default_config() {
        assert!(build_http_client_from_config(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn set_headers_merges_case_insensitively() {
        let config = ClientConfig::builder()
            .header("X-Api-Key", "old")
            .build()
            .unwrap();
        let mut transport = PhoenixTransport::new(config).unwrap();
        transport
            .set_headers(HashMap::from([("x-api-key".to_string(), "new".to_string())]))
            .unwrap();
        assert_eq!(transport.headers().len(), 1);
        assert_eq!(transport.headers().get("x-api-key").map(String::as_str), Some("new"));
    }

    #[test]
    fn invalid_headers_leave_state_untouched() {
        let mut transport = PhoenixTransport::new(ClientConfig::default()).unwrap();
        let err = transport
            .set_headers(HashMap::from([("bad name".to_string(), "v".to_string())]))
            .unwrap_err();
        assert!(matches!(err, PhoenixError::Configuration(_)));
        assert!(transport.headers().is_empty());
    }

    #[test]
    fn set_timeout_applies_to_config_snapshot() {
        let mut transport = PhoenixTransport::new(ClientConfig::default()).unwrap();
        transport.set_timeout(Duration::from_millis(250));
        assert_eq!(transport.config().timeout, Duration::from_millis(250));
        assert_eq!(transport.without_retries().retry_policy().max_attempts(), 1);
        assert_eq!(transport.retry_policy().max_attempts(), 4);
    }

    #[derive(Default)]
    struct CountingInterceptor {
        sent: AtomicU32,
        errors: AtomicU32,
        retries: AtomicU32,
    }

    impl HttpInterceptor for CountingInterceptor {
        fn on_before_send(
            &self,
            ctx: &HttpRequestContext,
            builder: reqwest::RequestBuilder,
            _headers: &reqwest::header::HeaderMap,
        ) -> Result<reqwest::RequestBuilder, PhoenixError> {
            self.sent.fetch_add(1, Ordering::SeqCst);
            Ok(builder.header("x-attempt", ctx.attempt.to_string()))
        }

        fn on_error(&self, _ctx: &HttpRequestContext, _error: &PhoenixError) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_retry(&self, _ctx: &HttpRequestContext, _error: &PhoenixError, _delay: Duration) {
            self.retries.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn transport_for(url: String, retries: u32, interceptor: Arc<CountingInterceptor>) -> PhoenixTransport {
        let config = ClientConfig::builder()
            .base_url(url)
            .retries(retries)
            .retry_delay(Duration::from_millis(5))
            .with_interceptor(interceptor)
            .build()
            .unwrap();
        PhoenixTransport::new(config).unwrap()
    }

    #[tokio::test]
    async fn interceptors_see_every_attempt() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/phoenix/jobs")
            .with_status(503)
            .with_body("busy")
            .expect(3)
            .create_async()
            .await;

        let counter = Arc::new(CountingInterceptor::default());
        let transport = transport_for(format!("{}/phoenix", server.url()), 2, counter.clone());
        let err = transport.execute(RequestSpec::get("/jobs")).await.unwrap_err();

        m.assert_async().await;
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(err.message(), "Service Unavailable");
        assert_eq!(counter.sent.load(Ordering::SeqCst), 3);
        assert_eq!(counter.errors.load(Ordering::SeqCst), 3);
        assert_eq!(counter.retries.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn interceptor_can_add_headers() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/phoenix/version")
            .match_header("x-attempt", "0")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"version":"24.1"}"#)
            .expect(1)
            .create_async()
            .await;

        let counter = Arc::new(CountingInterceptor::default());
        let transport = transport_for(format!("{}/phoenix", server.url()), 0, counter.clone());
        let response = transport.execute(RequestSpec::get("/version")).await.unwrap();

        m.assert_async().await;
        assert_eq!(response.data.as_json().unwrap()["version"], "24.1");
        assert_eq!(counter.errors.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let config = ClientConfig::builder()
            .base_url("http://127.0.0.1:1/phoenix")
            .retries(0)
            .build()
            .unwrap();
        let transport = PhoenixTransport::new(config).unwrap();
        let err = transport.execute(RequestSpec::get("/version")).await.unwrap_err();
        assert!(matches!(err, PhoenixError::Transport(_)), "{err:?}");
    }
}
