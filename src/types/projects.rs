//! Project request types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::execution::http::QueryParams;

/// Body of `POST /projects`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "kebab-case")]
pub struct CreateProject {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreateProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }
}

/// Filters for `GET /projects`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectQuery {
    pub status: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ProjectQuery {
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("status", self.status.as_deref())
            .push_opt("limit", self.limit)
            .push_opt("offset", self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_keeps_order_and_skips_unset() {
        let query = ProjectQuery::default().offset(20).status("active");
        assert_eq!(query.to_query().encode(), "status=active&offset=20");
        assert!(ProjectQuery::default().to_query().is_empty());
    }

    #[test]
    fn create_project_requires_name() {
        assert!(CreateProject::new("").validate().is_err());
        assert!(CreateProject::new("Spring catalogue").validate().is_ok());
    }
}
