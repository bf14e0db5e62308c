//! Execution layer
//!
//! Everything between an endpoint method and the wire lives under `http`.

pub mod http;
