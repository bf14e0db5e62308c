//! Presets API

use serde_json::Value;

use super::{Document, Mutation, fetch, mutate, segment};
use crate::error::PhoenixError;
use crate::execution::http::{RequestSpec, Transport};
use crate::types::{CreatePreset, PresetKind};

#[derive(Debug, Clone)]
pub struct PresetsApi<T> {
    transport: T,
}

impl<T: Transport> PresetsApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    fn kind_path(kind: &PresetKind) -> Result<String, PhoenixError> {
        Ok(format!("/presets/{}", segment("preset kind", kind.as_str())?))
    }

    pub async fn list(&self, kind: &PresetKind) -> Result<Document, PhoenixError> {
        fetch(&self.transport, RequestSpec::get(Self::kind_path(kind)?)).await
    }

    pub async fn get(&self, kind: &PresetKind, name: &str) -> Result<Document, PhoenixError> {
        let spec = RequestSpec::get(format!(
            "{}/{}",
            Self::kind_path(kind)?,
            segment("preset name", name)?
        ));
        fetch(&self.transport, spec).await
    }

    /// Store `settings` as a new preset named `name`.
    pub async fn create(
        &self,
        kind: &PresetKind,
        name: &str,
        settings: Value,
    ) -> Result<Mutation, PhoenixError> {
        let body = CreatePreset {
            name: name.to_string(),
            settings,
        };
        let spec = RequestSpec::post(Self::kind_path(kind)?).json(&body)?;
        mutate(&self.transport, spec).await
    }

    pub async fn delete(&self, kind: &PresetKind, name: &str) -> Result<Mutation, PhoenixError> {
        let spec = RequestSpec::delete(format!(
            "{}/{}",
            Self::kind_path(kind)?,
            segment("preset name", name)?
        ));
        mutate(&self.transport, spec).await
    }
}
