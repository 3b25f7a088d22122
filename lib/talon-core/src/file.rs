//! File attachments.

use std::path::Path;

use bytes::Bytes;

/// A file attached to a request, either as the whole body or as one part
/// of a multipart body.
///
/// The payload is owned by the request that carries the parameter and is
/// released exactly once when the request is dropped.
#[derive(Debug, Clone)]
pub struct RequestFile {
    name: String,
    filename: String,
    content_type: String,
    data: Bytes,
}

impl RequestFile {
    /// Create a file parameter from an in-memory payload.
    ///
    /// The content type is guessed from the filename extension and can be
    /// overridden with [`Self::with_content_type`].
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        filename: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        let filename = filename.into();
        let content_type = guess_content_type(&filename).to_string();
        Self {
            name: name.into(),
            filename,
            content_type,
            data: data.into(),
        }
    }

    /// Create a file parameter by reading a file from disk.
    ///
    /// The filename is taken from the path's final component.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be read.
    pub fn from_path(name: impl Into<String>, path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, filename, data))
    }

    /// Override the content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// The parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The filename sent on the wire.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The content type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The file payload.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

/// Guess the content type from a filename extension.
fn guess_content_type(filename: &str) -> &'static str {
    let extension = filename
        .rsplit('.')
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "csv" => "text/csv",
        "md" => "text/markdown",
        "zip" => "application/zip",
        "tar" => "application/x-tar",
        "gz" | "gzip" => "application/gzip",
        _ => "application/octet-stream",
    }
}
