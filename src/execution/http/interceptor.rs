//! HTTP Interceptor interfaces
//!
//! Interceptors observe the transport: they can tweak request builders before
//! send, observe responses, and are told about errors and scheduled retries.
//! Hooks run once per attempt and should stay cheap.

use std::time::Duration;

use reqwest::header::HeaderMap;

use super::request::HttpMethod;
use crate::error::PhoenixError;

/// Context passed to interceptors describing the request.
#[derive(Clone, Debug)]
pub struct HttpRequestContext {
    pub method: HttpMethod,
    pub url: String,
    /// Zero-based attempt index
    pub attempt: u32,
}

/// HTTP interceptor trait
pub trait HttpInterceptor: Send + Sync {
    /// Called before sending a request. Return the (possibly modified) builder
    /// or an error to short-circuit the attempt.
    fn on_before_send(
        &self,
        _ctx: &HttpRequestContext,
        builder: reqwest::RequestBuilder,
        _headers: &HeaderMap,
    ) -> Result<reqwest::RequestBuilder, PhoenixError> {
        Ok(builder)
    }

    /// Called after a 2xx response is received, before the body is read.
    fn on_response(
        &self,
        _ctx: &HttpRequestContext,
        _response: &reqwest::Response,
    ) -> Result<(), PhoenixError> {
        Ok(())
    }

    /// Called when an attempt fails.
    fn on_error(&self, _ctx: &HttpRequestContext, _error: &PhoenixError) {}

    /// Called when another attempt is scheduled after `delay`.
    fn on_retry(&self, _ctx: &HttpRequestContext, _error: &PhoenixError, _delay: Duration) {}
}

/// A simple logging interceptor backed by `tracing` (no bodies or header values).
#[derive(Clone, Debug, Default)]
pub struct LoggingInterceptor;

impl HttpInterceptor for LoggingInterceptor {
    fn on_before_send(
        &self,
        ctx: &HttpRequestContext,
        builder: reqwest::RequestBuilder,
        headers: &HeaderMap,
    ) -> Result<reqwest::RequestBuilder, PhoenixError> {
        tracing::debug!(target: "phoenix::http", method=%ctx.method, url=%ctx.url, attempt=ctx.attempt, header_count=headers.len(), "sending request");
        Ok(builder)
    }

    fn on_response(
        &self,
        ctx: &HttpRequestContext,
        response: &reqwest::Response,
    ) -> Result<(), PhoenixError> {
        tracing::debug!(target: "phoenix::http", method=%ctx.method, url=%ctx.url, status=%response.status().as_u16(), "response received");
        Ok(())
    }

    fn on_error(&self, ctx: &HttpRequestContext, error: &PhoenixError) {
        tracing::debug!(target: "phoenix::http", method=%ctx.method, url=%ctx.url, attempt=ctx.attempt, err=%error, "request error");
    }

    fn on_retry(&self, ctx: &HttpRequestContext, error: &PhoenixError, delay: Duration) {
        tracing::debug!(target: "phoenix::http", method=%ctx.method, url=%ctx.url, attempt=ctx.attempt, delay_ms=delay.as_millis() as u64, err=%error, "retry scheduled");
    }
}
