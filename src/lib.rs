//! # phoenix-client
//!
//! Async client for the Phoenix print-production automation REST server.
//!
#![deny(unsafe_code)]

//! ## Features
//!
//! - **One method per endpoint**: jobs, products, planning, layouts, exports,
//!   projects, material libraries and presets.
//! - **Shared transport**: a single reqwest-backed transport applies base URL,
//!   headers, per-attempt timeouts and constant-delay retries for every module.
//! - **Substitutable transport**: endpoint modules are generic over
//!   [`Transport`], so tests can record requests without a server.
//! - **Utilities**: unit conversion, exponential-backoff retry, chunked and
//!   sequential batch processing, structural validators.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use phoenix_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), PhoenixError> {
//!     let phoenix = Phoenix::builder()
//!         .base_url("http://localhost:8022/phoenix")
//!         .timeout(std::time::Duration::from_secs(10))
//!         .build()?;
//!
//!     if !phoenix.health_check().await {
//!         eprintln!("Phoenix is not reachable");
//!         return Ok(());
//!     }
//!
//!     phoenix.jobs().create(&CreateJob::new("4711").with_name("Spring flyers")).await?;
//!     phoenix
//!         .jobs()
//!         .add_product("4711", &Product::new("flyer-a5", 5000).with_size(
//!             Measurement::mm(148.0),
//!             Measurement::mm(210.0),
//!         ))
//!         .await?;
//!     let layouts = phoenix.jobs().list_layouts("4711").await?;
//!     println!("{}", layouts.data);
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Every endpoint method returns `Result<_, PhoenixError>`. Non-2xx responses
//! become [`PhoenixError::Api`] with the server's `message`, network failures
//! [`PhoenixError::Transport`], expired attempts [`PhoenixError::Timeout`] and
//! malformed bodies [`PhoenixError::Decode`]. Only
//! [`Phoenix::health_check`] swallows errors.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod execution;
pub mod retry;
#[cfg(feature = "telemetry")]
pub mod telemetry;
pub mod types;
pub mod utils;

pub use client::{Phoenix, PhoenixBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{ErrorCategory, PhoenixError, Result};
pub use execution::http::{
    HttpMethod, PhoenixTransport, QueryParams, RequestSpec, ResponseData, ResponseEnvelope,
    Transport, TransportExt,
};
pub use retry::{BackoffPolicy, RetryOn, RetryPolicy, retry};

pub mod prelude {
    pub use crate::api::{Document, JobsApi, LibrariesApi, Mutation, PresetsApi, ProjectsApi};
    pub use crate::client::{Phoenix, PhoenixBuilder};
    pub use crate::config::ClientConfig;
    pub use crate::error::{ErrorCategory, PhoenixError};
    pub use crate::execution::http::{
        HttpInterceptor, LoggingInterceptor, RequestSpec, ResponseEnvelope, Transport,
    };
    pub use crate::retry::{RetryOn, retry};
    pub use crate::types::*;
    pub use crate::utils::{Measurement, Unit, process_in_chunks};
}
