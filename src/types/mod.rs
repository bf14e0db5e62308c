//! Request and response types
//!
//! Resource documents returned by the server (jobs, layouts, stocks, ...) are
//! kept as `serde_json::Value`; only request bodies and the mutation envelope
//! are typed here.

pub mod envelope;
pub mod jobs;
pub mod libraries;
pub mod presets;
pub mod projects;

pub use envelope::ApiResponse;
pub use jobs::{
    CreateJob, ExportFormat, ExportRequest, ImportRequest, JobUpdate, PlanRequest, Product, SaveJob,
};
pub use libraries::{Grade, LibraryKind, Stock};
pub use presets::{CreatePreset, PresetKind};
pub use projects::{CreateProject, ProjectQuery};
