//! HTTP execution layer
//!
//! - `request`: request description (`RequestSpec`, `QueryParams`, bodies)
//! - `multipart`: single-file multipart encoder
//! - `headers`: header merging and validation
//! - `response`: response classification and decoding
//! - `interceptor`: per-attempt hooks
//! - `transport`: the `Transport` seam used by endpoint modules
//! - `client`: reqwest-backed `PhoenixTransport`

pub mod client;
pub mod headers;
pub mod interceptor;
pub mod multipart;
pub mod request;
pub mod response;
pub mod transport;

pub use client::{PhoenixTransport, build_http_client_from_config};
pub use interceptor::{HttpInterceptor, HttpRequestContext, LoggingInterceptor};
pub use multipart::MultipartBody;
pub use request::{HttpMethod, QueryParams, RequestBody, RequestSpec};
pub use response::{ResponseData, ResponseEnvelope};
pub use transport::{Transport, TransportExt};
