//! Retry module
//! - policy.rs: constant-delay policy used by the Transport Core
//! - backoff.rs: exponential backoff helper for caller-level operations

pub mod backoff;
pub mod policy;

pub use backoff::{BackoffPolicy, retry, retry_with_policy};
pub use policy::{RetryOn, RetryPolicy};
