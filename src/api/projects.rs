//! Projects API

use serde_json::Value;

use super::{Document, Mutation, fetch, mutate, segment};
use crate::error::PhoenixError;
use crate::execution::http::{RequestSpec, Transport};
use crate::types::{CreateProject, ProjectQuery};

#[derive(Debug, Clone)]
pub struct ProjectsApi<T> {
    transport: T,
}

impl<T: Transport> ProjectsApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    fn project_path(id: &str) -> Result<String, PhoenixError> {
        Ok(format!("/projects/{}", segment("project id", id)?))
    }

    pub async fn list(&self, query: &ProjectQuery) -> Result<Document, PhoenixError> {
        let spec = RequestSpec::get("/projects").query(query.to_query());
        fetch(&self.transport, spec).await
    }

    pub async fn get(&self, id: &str) -> Result<Document, PhoenixError> {
        fetch(&self.transport, RequestSpec::get(Self::project_path(id)?)).await
    }

    pub async fn create(&self, project: &CreateProject) -> Result<Mutation, PhoenixError> {
        mutate(&self.transport, RequestSpec::post("/projects").json(project)?).await
    }

    /// Replace the project document.
    pub async fn update(&self, id: &str, project: &Value) -> Result<Mutation, PhoenixError> {
        let spec = RequestSpec::put(Self::project_path(id)?).json(project)?;
        mutate(&self.transport, spec).await
    }

    /// Change only the fields present in `changes`.
    pub async fn patch(&self, id: &str, changes: &Value) -> Result<Mutation, PhoenixError> {
        let spec = RequestSpec::patch(Self::project_path(id)?).json(changes)?;
        mutate(&self.transport, spec).await
    }

    pub async fn delete(&self, id: &str) -> Result<Mutation, PhoenixError> {
        mutate(&self.transport, RequestSpec::delete(Self::project_path(id)?)).await
    }

    pub async fn list_jobs(&self, id: &str) -> Result<Document, PhoenixError> {
        let spec = RequestSpec::get(format!("{}/jobs", Self::project_path(id)?));
        fetch(&self.transport, spec).await
    }

    pub async fn archive(&self, id: &str) -> Result<Mutation, PhoenixError> {
        let spec = RequestSpec::post(format!("{}/archive", Self::project_path(id)?));
        mutate(&self.transport, spec).await
    }
}
