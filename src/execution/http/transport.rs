//! HTTP transport abstraction
//!
//! Endpoint modules only need "something implementing `execute(spec)`". The
//! reqwest-backed [`PhoenixTransport`](super::client::PhoenixTransport) is the
//! production implementation; tests substitute recording or scripted ones.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::request::RequestSpec;
use super::response::{ResponseData, ResponseEnvelope};
use crate::error::PhoenixError;

/// Executes one logical request and yields exactly one outcome.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        spec: RequestSpec,
    ) -> Result<ResponseEnvelope<ResponseData>, PhoenixError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn execute(
        &self,
        spec: RequestSpec,
    ) -> Result<ResponseEnvelope<ResponseData>, PhoenixError> {
        (**self).execute(spec).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(
        &self,
        spec: RequestSpec,
    ) -> Result<ResponseEnvelope<ResponseData>, PhoenixError> {
        (**self).execute(spec).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn execute(
        &self,
        spec: RequestSpec,
    ) -> Result<ResponseEnvelope<ResponseData>, PhoenixError> {
        (**self).execute(spec).await
    }
}

/// Typed helpers on top of [`Transport::execute`].
#[async_trait]
pub trait TransportExt: Transport {
    /// Execute and decode the payload into `T`.
    async fn execute_as<T>(&self, spec: RequestSpec) -> Result<ResponseEnvelope<T>, PhoenixError>
    where
        T: DeserializeOwned + Send,
    {
        self.execute(spec).await?.json()
    }

    /// Execute and return the payload as a JSON value (text becomes a string).
    async fn execute_value(
        &self,
        spec: RequestSpec,
    ) -> Result<ResponseEnvelope<serde_json::Value>, PhoenixError> {
        Ok(self.execute(spec).await?.into_value())
    }
}

impl<T: Transport + ?Sized> TransportExt for T {}
