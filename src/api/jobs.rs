//! Jobs API
//!
//! Jobs, their products, planning results, layouts, exports and artwork
//! uploads.
//!
//! - Open/create/save/close: `/jobs`, `/jobs/open`, `/jobs/{id}/save`
//! - Products: `/jobs/{id}/products[/{name}]`, `/jobs/{id}/import/products`
//! - Planning: `/jobs/{id}/plan`, `/jobs/{id}/plan/results[/{index}/apply]`
//! - Layouts: `/jobs/{id}/layouts[/{index}]`
//! - Output: `/jobs/{id}/export/{format}`, `/jobs/{id}/files` (multipart)

use serde_json::{Value, json};

use super::{Document, Mutation, fetch, mutate, segment};
use crate::error::PhoenixError;
use crate::execution::http::{MultipartBody, RequestSpec, Transport};
use crate::types::{
    CreateJob, ExportFormat, ExportRequest, ImportRequest, JobUpdate, PlanRequest, Product, SaveJob,
};

/// Job endpoints over any [`Transport`].
#[derive(Debug, Clone)]
pub struct JobsApi<T> {
    transport: T,
}

impl<T: Transport> JobsApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn job_path(id: &str) -> Result<String, PhoenixError> {
        Ok(format!("/jobs/{}", segment("job id", id)?))
    }

    /// List open jobs.
    pub async fn list(&self) -> Result<Document, PhoenixError> {
        fetch(&self.transport, RequestSpec::get("/jobs")).await
    }

    /// Fetch one job; `thumb` asks the server to embed a thumbnail.
    pub async fn get(&self, id: &str, thumb: Option<bool>) -> Result<Document, PhoenixError> {
        let spec = RequestSpec::get(Self::job_path(id)?).query_opt("thumb", thumb);
        fetch(&self.transport, spec).await
    }

    pub async fn create(&self, job: &CreateJob) -> Result<Mutation, PhoenixError> {
        mutate(&self.transport, RequestSpec::post("/jobs").json(job)?).await
    }

    /// Open a job file that already exists on the server.
    pub async fn open(&self, path: &str) -> Result<Mutation, PhoenixError> {
        let spec = RequestSpec::post("/jobs/open").json_value(json!({ "path": path }));
        mutate(&self.transport, spec).await
    }

    pub async fn save(&self, id: &str, request: &SaveJob) -> Result<Mutation, PhoenixError> {
        let spec = RequestSpec::post(format!("{}/save", Self::job_path(id)?)).json(request)?;
        mutate(&self.transport, spec).await
    }

    /// Close the job on the server (unsaved changes are discarded).
    pub async fn close(&self, id: &str) -> Result<Mutation, PhoenixError> {
        mutate(&self.transport, RequestSpec::delete(Self::job_path(id)?)).await
    }

    pub async fn update(&self, id: &str, update: &JobUpdate) -> Result<Mutation, PhoenixError> {
        let spec = RequestSpec::patch(Self::job_path(id)?).json(update)?;
        mutate(&self.transport, spec).await
    }

    // Products

    pub async fn list_products(&self, id: &str) -> Result<Document, PhoenixError> {
        let spec = RequestSpec::get(format!("{}/products", Self::job_path(id)?));
        fetch(&self.transport, spec).await
    }

    pub async fn get_product(&self, id: &str, name: &str) -> Result<Document, PhoenixError> {
        let spec = RequestSpec::get(format!(
            "{}/products/{}",
            Self::job_path(id)?,
            segment("product name", name)?
        ));
        fetch(&self.transport, spec).await
    }

    pub async fn add_product(&self, id: &str, product: &Product) -> Result<Mutation, PhoenixError> {
        let spec = RequestSpec::post(format!("{}/products", Self::job_path(id)?)).json(product)?;
        mutate(&self.transport, spec).await
    }

    /// Replace a product's properties with `product`.
    pub async fn update_product(
        &self,
        id: &str,
        name: &str,
        product: &Value,
    ) -> Result<Mutation, PhoenixError> {
        let spec = RequestSpec::put(format!(
            "{}/products/{}",
            Self::job_path(id)?,
            segment("product name", name)?
        ))
        .json(product)?;
        mutate(&self.transport, spec).await
    }

    pub async fn delete_product(&self, id: &str, name: &str) -> Result<Mutation, PhoenixError> {
        let spec = RequestSpec::delete(format!(
            "{}/products/{}",
            Self::job_path(id)?,
            segment("product name", name)?
        ));
        mutate(&self.transport, spec).await
    }

    /// Import products from a CSV, XML or JDF file on the server.
    pub async fn import_products(
        &self,
        id: &str,
        request: &ImportRequest,
    ) -> Result<Mutation, PhoenixError> {
        let spec =
            RequestSpec::post(format!("{}/import/products", Self::job_path(id)?)).json(request)?;
        mutate(&self.transport, spec).await
    }

    // Planning

    /// Start automatic planning for the job.
    pub async fn plan(&self, id: &str, request: &PlanRequest) -> Result<Mutation, PhoenixError> {
        let spec = RequestSpec::post(format!("{}/plan", Self::job_path(id)?)).json(request)?;
        mutate(&self.transport, spec).await
    }

    pub async fn list_plan_results(&self, id: &str) -> Result<Document, PhoenixError> {
        let spec = RequestSpec::get(format!("{}/plan/results", Self::job_path(id)?));
        fetch(&self.transport, spec).await
    }

    /// Apply the planning result at `index` to the job.
    pub async fn apply_plan_result(&self, id: &str, index: usize) -> Result<Mutation, PhoenixError> {
        let spec = RequestSpec::post(format!(
            "{}/plan/results/{index}/apply",
            Self::job_path(id)?
        ));
        mutate(&self.transport, spec).await
    }

    // Layouts

    pub async fn list_layouts(&self, id: &str) -> Result<Document, PhoenixError> {
        let spec = RequestSpec::get(format!("{}/layouts", Self::job_path(id)?));
        fetch(&self.transport, spec).await
    }

    pub async fn get_layout(
        &self,
        id: &str,
        index: usize,
        thumb: Option<bool>,
    ) -> Result<Document, PhoenixError> {
        let spec = RequestSpec::get(format!("{}/layouts/{index}", Self::job_path(id)?))
            .query_opt("thumb", thumb);
        fetch(&self.transport, spec).await
    }

    pub async fn delete_layout(&self, id: &str, index: usize) -> Result<Mutation, PhoenixError> {
        let spec = RequestSpec::delete(format!("{}/layouts/{index}", Self::job_path(id)?));
        mutate(&self.transport, spec).await
    }

    // Output

    pub async fn export(
        &self,
        id: &str,
        format: &ExportFormat,
        request: &ExportRequest,
    ) -> Result<Mutation, PhoenixError> {
        let spec = RequestSpec::post(format!(
            "{}/export/{}",
            Self::job_path(id)?,
            segment("export format", format.as_str())?
        ))
        .json(request)?;
        mutate(&self.transport, spec).await
    }

    /// Upload an artwork file into the job's file area.
    pub async fn upload_artwork(
        &self,
        id: &str,
        bytes: &[u8],
        filename: &str,
    ) -> Result<Mutation, PhoenixError> {
        let spec = RequestSpec::post(format!("{}/files", Self::job_path(id)?))
            .multipart(MultipartBody::file(bytes, filename));
        mutate(&self.transport, spec).await
    }
}
