//! Multipart encoding for file upload endpoints
//!
//! Uploads carry exactly one part named `file`. The body is encoded up front so
//! the transport can send it verbatim on every attempt.

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Fixed marker in front of every generated boundary.
pub const BOUNDARY_PREFIX: &str = "----PhoenixFormBoundary";

const BOUNDARY_RANDOM_LEN: usize = 24;

/// An encoded single-part `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    boundary: String,
    bytes: Vec<u8>,
}

impl MultipartBody {
    /// Encode `bytes` as the `file` part with a freshly generated boundary.
    pub fn file(bytes: &[u8], filename: &str) -> Self {
        Self::file_with_boundary(bytes, filename, generate_boundary())
    }

    /// Encode with a caller-chosen boundary.
    pub fn file_with_boundary(bytes: &[u8], filename: &str, boundary: impl Into<String>) -> Self {
        let boundary = boundary.into();
        let filename = sanitize_filename(filename);

        let mut out = Vec::with_capacity(bytes.len() + boundary.len() * 2 + 160);
        out.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        out.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n")
                .as_bytes(),
        );
        out.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        out.extend_from_slice(bytes);
        out.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Self {
            boundary,
            bytes: out,
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value for the outer `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Random alphanumeric token behind [`BOUNDARY_PREFIX`].
pub fn generate_boundary() -> String {
    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(BOUNDARY_RANDOM_LEN)
        .map(char::from)
        .collect();
    format!("{BOUNDARY_PREFIX}{token}")
}

// Quotes and line breaks would terminate the header early.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .map(|c| if c == '"' { '\'' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn encodes_single_file_part() {
        let body = MultipartBody::file(b"\x01\x02", "a.pdf");
        let bytes = body.as_bytes();

        assert!(contains(
            bytes,
            b"Content-Disposition: form-data; name=\"file\"; filename=\"a.pdf\"\r\n"
        ));
        assert!(contains(bytes, b"Content-Type: application/octet-stream\r\n"));
        assert!(contains(bytes, b"\r\n\r\n\x01\x02\r\n"));

        let opening = format!("--{}\r\n", body.boundary());
        let closing = format!("--{}--\r\n", body.boundary());
        assert!(bytes.starts_with(opening.as_bytes()));
        assert!(bytes.ends_with(closing.as_bytes()));
    }

    #[test]
    fn content_type_declares_the_body_boundary() {
        let body = MultipartBody::file(b"data", "die.dxf");
        let content_type = body.content_type();
        let declared = content_type
            .strip_prefix("multipart/form-data; boundary=")
            .unwrap();
        assert_eq!(declared, body.boundary());
        assert!(contains(body.as_bytes(), format!("--{declared}\r\n").as_bytes()));
    }

    #[test]
    fn generated_boundaries_are_prefixed_and_unique() {
        let a = generate_boundary();
        let b = generate_boundary();
        assert!(a.starts_with(BOUNDARY_PREFIX));
        assert_eq!(a.len(), BOUNDARY_PREFIX.len() + BOUNDARY_RANDOM_LEN);
        assert_ne!(a, b);
    }

    #[test]
    fn explicit_boundary_is_used_verbatim() {
        let body = MultipartBody::file_with_boundary(b"x", "f.bin", "XYZ");
        assert_eq!(body.boundary(), "XYZ");
        assert!(body.as_bytes().starts_with(b"--XYZ\r\n"));
        assert!(!body.is_empty());
    }

    #[test]
    fn filename_cannot_break_out_of_header() {
        let body = MultipartBody::file_with_boundary(b"x", "evil\"\r\nX-Injected: 1.pdf", "B");
        assert!(contains(
            body.as_bytes(),
            b"filename=\"evil'X-Injected: 1.pdf\"\r\n"
        ));
    }
}
