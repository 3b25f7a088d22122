//! Multipart wire encoding.
//!
//! The composer resolves a [`crate::MultipartBody`] into a
//! [`MultipartContent`]: a boundary plus an ordered list of already
//! content-negotiated sections. Encoding follows standard
//! `multipart/form-data` framing; file sections carry a `filename`, other
//! sections omit it.

use bytes::{BufMut, Bytes, BytesMut};

/// One resolved section of a multipart payload.
#[derive(Debug, Clone)]
pub struct ContentPart {
    name: String,
    filename: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

impl ContentPart {
    /// A plain text section.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filename: None,
            content_type: Some("text/plain; charset=utf-8".to_string()),
            data: Bytes::from(value.into().into_bytes()),
        }
    }

    /// A serialized section with an explicit content type.
    #[must_use]
    pub fn serialized(
        name: impl Into<String>,
        text: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            filename: None,
            content_type: Some(content_type.into()),
            data: Bytes::from(text.into().into_bytes()),
        }
    }

    /// A file section tagged with its filename.
    #[must_use]
    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Bytes,
    ) -> Self {
        Self {
            name: name.into(),
            filename: Some(filename.into()),
            content_type: Some(content_type.into()),
            data,
        }
    }

    /// Section name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Filename, present only for file sections.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Content type of the section.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Section payload.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

/// An assembled multipart payload with its boundary.
#[derive(Debug, Clone)]
pub struct MultipartContent {
    boundary: String,
    parts: Vec<ContentPart>,
}

impl Default for MultipartContent {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartContent {
    /// Create an empty payload with a generated boundary.
    #[must_use]
    pub fn new() -> Self {
        Self {
            boundary: generate_boundary(),
            parts: Vec::new(),
        }
    }

    /// Create an empty payload with a fixed boundary.
    ///
    /// The boundary must not occur inside any section payload.
    #[must_use]
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    /// Append a section. Name uniqueness is enforced upstream by the
    /// multipart body model.
    pub fn push(&mut self, part: ContentPart) {
        self.parts.push(part);
    }

    /// The boundary string.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// The sections in order.
    #[must_use]
    pub fn parts(&self) -> &[ContentPart] {
        &self.parts
    }

    /// The `Content-Type` header value for this payload.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Encode the payload. Zero sections yield just the closing boundary.
    #[must_use]
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::new();

        for part in &self.parts {
            buf.put_slice(b"--");
            buf.put_slice(self.boundary.as_bytes());
            buf.put_slice(b"\r\n");

            buf.put_slice(b"Content-Disposition: form-data; name=\"");
            buf.put_slice(part.name.as_bytes());
            buf.put_slice(b"\"");
            if let Some(filename) = &part.filename {
                buf.put_slice(b"; filename=\"");
                buf.put_slice(filename.as_bytes());
                buf.put_slice(b"\"");
            }
            buf.put_slice(b"\r\n");

            if let Some(content_type) = &part.content_type {
                buf.put_slice(b"Content-Type: ");
                buf.put_slice(content_type.as_bytes());
                buf.put_slice(b"\r\n");
            }

            buf.put_slice(b"\r\n");
            buf.put_slice(&part.data);
            buf.put_slice(b"\r\n");
        }

        buf.put_slice(b"--");
        buf.put_slice(self.boundary.as_bytes());
        buf.put_slice(b"--\r\n");

        buf.freeze()
    }
}

/// Generate a boundary unlikely to collide with section payloads.
fn generate_boundary() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    format!("----TalonBoundary{timestamp:x}")
}
