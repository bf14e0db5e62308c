//! Shared test helpers: a transport that records every request

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use phoenix_client::execution::http::{RequestBody, RequestSpec, ResponseData, ResponseEnvelope, Transport};
use phoenix_client::PhoenixError;

/// Records requests and answers from a script (default: `{"success": true}`).
#[derive(Clone, Default)]
pub struct RecordingTransport {
    calls: Arc<Mutex<Vec<RequestSpec>>>,
    script: Arc<Mutex<VecDeque<Result<ResponseEnvelope<ResponseData>, PhoenixError>>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next outcome.
    pub fn respond(&self, outcome: Result<ResponseEnvelope<ResponseData>, PhoenixError>) -> &Self {
        self.script.lock().expect("lock").push_back(outcome);
        self
    }

    pub fn respond_json(&self, status_code: u16, value: serde_json::Value) -> &Self {
        self.respond(Ok(envelope(status_code, ResponseData::Json(value))))
    }

    pub fn calls(&self) -> Vec<RequestSpec> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn last(&self) -> RequestSpec {
        self.calls().pop().expect("at least one call")
    }

    /// `(verb, path + query)` of every recorded call.
    pub fn routes(&self) -> Vec<(String, String)> {
        self.calls()
            .iter()
            .map(|spec| (spec.method().to_string(), spec.resolve_url("")))
            .collect()
    }
}

pub fn envelope(status_code: u16, data: ResponseData) -> ResponseEnvelope<ResponseData> {
    ResponseEnvelope {
        data,
        status_code,
        status_text: String::new(),
        headers: HashMap::new(),
    }
}

/// JSON body of a recorded request, `None` for bodiless or non-JSON requests.
pub fn json_body(spec: &RequestSpec) -> Option<serde_json::Value> {
    match spec.body() {
        Some(RequestBody::Json(value)) => Some(value.clone()),
        _ => None,
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(
        &self,
        spec: RequestSpec,
    ) -> Result<ResponseEnvelope<ResponseData>, PhoenixError> {
        self.calls.lock().expect("lock").push(spec);
        self.script
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| {
                Ok(envelope(
                    200,
                    ResponseData::Json(serde_json::json!({ "success": true })),
                ))
            })
    }
}
