//! Job request types
//!
//! Only the fields the client needs to name are typed; anything else rides
//! along in `extra` so callers can pass server fields this crate does not
//! know about.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::utils::units::Measurement;

/// Body of `POST /jobs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "kebab-case")]
pub struct CreateJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Job template to start from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreateJob {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }
}

/// Body of `PATCH /jobs/{id}`; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct JobUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /jobs/{id}/save`. An empty body saves in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SaveJob {
    /// Target path on the server, for "save as"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,
}

/// A product (component ordered for imposition) within a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "kebab-case")]
pub struct Product {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub ordered: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    /// Artwork file path on the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub die: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(name: impl Into<String>, ordered: u64) -> Self {
        Self {
            name: name.into(),
            ordered: Some(ordered),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, width: Measurement, height: Measurement) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_stock(mut self, stock: impl Into<String>, grade: Option<String>) -> Self {
        self.stock = Some(stock.into());
        self.grade = grade;
        self
    }

    pub fn with_artwork(mut self, path: impl Into<String>) -> Self {
        self.artwork = Some(path.into());
        self
    }
}

/// Body of `POST /jobs/{id}/import/products`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "kebab-case")]
pub struct ImportRequest {
    /// Server-side path of the CSV/XML/JDF file; forwarded untouched
    #[validate(length(min = 1))]
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ImportRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = Some(preset.into());
        self
    }
}

/// Output format segment of `POST /jobs/{id}/export/{format}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Pdf,
    Jdf,
    Cff2,
    Dxf,
    Zcc,
    Report,
    Json,
    /// Any other server-supported format, passed through as-is
    Custom(String),
}

impl ExportFormat {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pdf => "pdf",
            Self::Jdf => "jdf",
            Self::Cff2 => "cff2",
            Self::Dxf => "dxf",
            Self::Zcc => "zcc",
            Self::Report => "report",
            Self::Json => "json",
            Self::Custom(s) => s,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ExportFormat {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "jdf" => Self::Jdf,
            "cff2" => Self::Cff2,
            "dxf" => Self::Dxf,
            "zcc" => Self::Zcc,
            "report" => Self::Report,
            "json" => Self::Json,
            _ => Self::Custom(s.to_string()),
        }
    }
}

/// Body of `POST /jobs/{id}/export/{format}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExportRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExportRequest {
    pub fn to_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = Some(preset.into());
        self
    }
}

/// Body of `POST /jobs/{id}/plan`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "kebab-case")]
pub struct PlanRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    /// Upper bound on the number of results the planner returns
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub max_results: Option<u32>,
    /// Minutes the planner may run before returning its best results
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub stop_minutes: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
