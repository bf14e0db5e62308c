//! Error Handling Module
//!
//! - Core error type (`PhoenixError`, `ErrorCategory`)
//! - Conversions from reqwest / serde_json errors
//!
//! # Example
//!
//! ```rust,ignore
//! use phoenix_client::error::{PhoenixError, ErrorCategory};
//!
//! let error = PhoenixError::api(404, "Not Found", "Job not found", None);
//! assert_eq!(error.category(), ErrorCategory::Client);
//! assert_eq!(error.status_code(), Some(404));
//! ```

mod conversions;
pub mod types;

pub use types::*;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, PhoenixError>;
