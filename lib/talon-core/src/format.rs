//! Content format negotiation types.

use derive_more::Display;

/// A named wire encoding for request and response bodies.
///
/// `Default` means "not decided yet": the composer falls back to the
/// client's configured default format, and fails with a configuration
/// error if that is also `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum ContentFormat {
    /// No explicit format; resolved against the client default at
    /// composition time.
    #[default]
    #[display("default")]
    Default,
    /// Key-value (form URL-encoded) content.
    #[display("key-value")]
    KeyValue,
    /// JSON content.
    #[display("json")]
    Json,
    /// XML content.
    #[display("xml")]
    Xml,
}

impl ContentFormat {
    /// Returns `true` when the format names a concrete encoding.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Default)
    }
}
