//! Material libraries API
//!
//! Generic CRUD over every [`LibraryKind`], plus stock grades, die uploads and
//! sequential batch helpers.

use serde_json::Value;

use super::{Document, Mutation, fetch, mutate, segment};
use crate::error::PhoenixError;
use crate::execution::http::{MultipartBody, RequestSpec, Transport};
use crate::types::{Grade, LibraryKind, Stock};
use crate::utils::batch::{BatchReport, run_sequential};

#[derive(Debug, Clone)]
pub struct LibrariesApi<T> {
    transport: T,
}

impl<T: Transport> LibrariesApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    fn entry_path(kind: LibraryKind, name: &str) -> Result<String, PhoenixError> {
        Ok(format!("/libraries/{kind}/{}", segment("library entry name", name)?))
    }

    /// List entries of one library, optionally filtered by `search`.
    pub async fn list(&self, kind: LibraryKind, search: Option<&str>) -> Result<Document, PhoenixError> {
        let spec = RequestSpec::get(format!("/libraries/{kind}")).query_opt("search", search);
        fetch(&self.transport, spec).await
    }

    pub async fn get(&self, kind: LibraryKind, name: &str) -> Result<Document, PhoenixError> {
        fetch(&self.transport, RequestSpec::get(Self::entry_path(kind, name)?)).await
    }

    pub async fn create(&self, kind: LibraryKind, entry: &Value) -> Result<Mutation, PhoenixError> {
        let spec = RequestSpec::post(format!("/libraries/{kind}")).json(entry)?;
        mutate(&self.transport, spec).await
    }

    pub async fn update(
        &self,
        kind: LibraryKind,
        name: &str,
        entry: &Value,
    ) -> Result<Mutation, PhoenixError> {
        let spec = RequestSpec::put(Self::entry_path(kind, name)?).json(entry)?;
        mutate(&self.transport, spec).await
    }

    pub async fn delete(&self, kind: LibraryKind, name: &str) -> Result<Mutation, PhoenixError> {
        mutate(&self.transport, RequestSpec::delete(Self::entry_path(kind, name)?)).await
    }

    // Stocks

    pub async fn create_stock(&self, stock: &Stock) -> Result<Mutation, PhoenixError> {
        let spec = RequestSpec::post("/libraries/stocks").json(stock)?;
        mutate(&self.transport, spec).await
    }

    pub async fn list_grades(&self, stock: &str) -> Result<Document, PhoenixError> {
        let spec = RequestSpec::get(format!(
            "{}/grades",
            Self::entry_path(LibraryKind::Stocks, stock)?
        ));
        fetch(&self.transport, spec).await
    }

    pub async fn add_grade(&self, stock: &str, grade: &Grade) -> Result<Mutation, PhoenixError> {
        let spec = RequestSpec::post(format!(
            "{}/grades",
            Self::entry_path(LibraryKind::Stocks, stock)?
        ))
        .json(grade)?;
        mutate(&self.transport, spec).await
    }

    // Dies

    /// Upload a die design file (CFF2, DXF, ...) into the die library.
    pub async fn upload_die(&self, bytes: &[u8], filename: &str) -> Result<Mutation, PhoenixError> {
        let spec =
            RequestSpec::post("/libraries/dies/upload").multipart(MultipartBody::file(bytes, filename));
        mutate(&self.transport, spec).await
    }

    // Batches

    /// Create each stock in turn; failures are collected, not raised.
    pub async fn batch_create_stocks(&self, stocks: &[Stock]) -> BatchReport<Stock, PhoenixError> {
        let report = run_sequential(stocks.to_vec(), |stock| async move {
            self.create_stock(&stock).await
        })
        .await;
        tracing::debug!(succeeded = report.succeeded, failed = report.failed, "batch stock create finished");
        report
    }

    /// Delete each named entry of `kind` in turn; failures are collected.
    pub async fn batch_delete(
        &self,
        kind: LibraryKind,
        names: &[String],
    ) -> BatchReport<String, PhoenixError> {
        let report = run_sequential(names.to_vec(), |name| async move {
            self.delete(kind, &name).await
        })
        .await;
        tracing::debug!(%kind, succeeded = report.succeeded, failed = report.failed, "batch delete finished");
        report
    }
}
