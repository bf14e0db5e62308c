//! Endpoint modules
//!
//! Each module is a thin method set over a [`Transport`]: build a
//! [`RequestSpec`], hand it over, decode. Errors from the transport pass
//! through untouched.

pub mod jobs;
pub mod libraries;
pub mod presets;
pub mod projects;

pub use jobs::JobsApi;
pub use libraries::LibrariesApi;
pub use presets::PresetsApi;
pub use projects::ProjectsApi;

use serde_json::Value;

use crate::error::PhoenixError;
use crate::execution::http::{RequestSpec, ResponseData, ResponseEnvelope, Transport};
use crate::types::ApiResponse;

/// Response of a read endpoint: the resource document as returned.
pub type Document = ResponseEnvelope<Value>;

/// Response of a mutating endpoint.
pub type Mutation = ResponseEnvelope<ApiResponse>;

/// Percent-encode one path segment. Empty identifiers would silently address
/// the parent collection, so they are rejected.
pub(crate) fn segment(what: &str, value: &str) -> Result<String, PhoenixError> {
    if value.is_empty() {
        return Err(PhoenixError::InvalidParameter(format!("{what} must not be empty")));
    }
    Ok(urlencoding::encode(value).into_owned())
}

pub(crate) async fn fetch<T: Transport + ?Sized>(
    transport: &T,
    spec: RequestSpec,
) -> Result<Document, PhoenixError> {
    Ok(transport.execute(spec).await?.into_value())
}

/// Execute and read the server envelope. Success bodies that are not an
/// envelope (empty, plain text, arrays, bare resources) become an envelope
/// derived from the status code, with the payload kept in `resources`.
pub(crate) async fn mutate<T: Transport + ?Sized>(
    transport: &T,
    spec: RequestSpec,
) -> Result<Mutation, PhoenixError> {
    let response = transport.execute(spec).await?;
    let status = response.status_code;
    Ok(response.map(|data| envelope_from(status, data)))
}

fn envelope_from(status_code: u16, data: ResponseData) -> ApiResponse {
    let payload = match data {
        ResponseData::Json(value) => value,
        ResponseData::Text(text) => {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        }
    };

    let is_envelope = payload
        .as_object()
        .is_some_and(|map| map.contains_key("success") || map.contains_key("status-code"));
    if is_envelope {
        if let Ok(envelope) = serde_json::from_value::<ApiResponse>(payload.clone()) {
            return envelope;
        }
    }

    let mut envelope = ApiResponse::from_status(status_code);
    match payload {
        Value::Null => {}
        Value::String(s) if s.is_empty() => {}
        other => envelope.resources.push(other),
    }
    envelope
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_are_percent_encoded() {
        assert_eq!(segment("job id", "Job 42/A").unwrap(), "Job%2042%2FA");
        assert!(matches!(
            segment("job id", ""),
            Err(PhoenixError::InvalidParameter(_))
        ));
    }

    #[test]
    fn plain_text_success_keeps_payload_in_resources() {
        let envelope = envelope_from(200, ResponseData::Text("Job saved".into()));
        assert!(envelope.success);
        assert_eq!(envelope.status_code, Some(200));
        assert_eq!(envelope.resources, vec![Value::String("Job saved".into())]);
    }

    #[test]
    fn bare_resource_is_not_mistaken_for_an_envelope() {
        let doc = serde_json::json!({"id": "7", "name": "Labels"});
        let envelope = envelope_from(201, ResponseData::Json(doc.clone()));
        assert!(envelope.success);
        assert_eq!(envelope.resources, vec![doc]);
    }

    #[test]
    fn envelope_shaped_text_is_decoded() {
        let envelope = envelope_from(
            200,
            ResponseData::Text(r#"{"success": false, "errors": ["locked"]}"#.into()),
        );
        assert!(!envelope.success);
        assert_eq!(envelope.error_messages(), vec!["locked"]);
    }
}
