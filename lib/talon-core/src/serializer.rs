//! Body serializer contract and registry.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::{ContentFormat, Result};

/// Converts structured values to and from text for one content format.
///
/// The first advertised content type is the canonical one used to tag
/// composed content.
pub trait BodySerializer: Send + Sync {
    /// The content format this serializer supports.
    fn format(&self) -> ContentFormat;

    /// Advertised content types; the first is canonical.
    fn content_types(&self) -> &[&'static str];

    /// Serialize a structured value to text.
    fn serialize(&self, value: &Value) -> Result<String>;

    /// Deserialize text back into a structured value.
    fn deserialize(&self, text: &str) -> Result<Value>;
}

/// An ordered serializer registry; lookups return the first serializer
/// whose format matches.
#[derive(Clone, Default)]
pub struct SerializerRegistry {
    entries: Vec<Arc<dyn BodySerializer>>,
}

impl SerializerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a serializer.
    pub fn register(&mut self, serializer: Arc<dyn BodySerializer>) {
        self.entries.push(serializer);
    }

    /// Append a serializer, chainable.
    #[must_use]
    pub fn with(mut self, serializer: Arc<dyn BodySerializer>) -> Self {
        self.register(serializer);
        self
    }

    /// The first registered serializer supporting the given format.
    #[must_use]
    pub fn find(&self, format: ContentFormat) -> Option<&Arc<dyn BodySerializer>> {
        self.entries.iter().find(|s| s.format() == format)
    }

    /// Number of registered serializers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no serializer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formats: Vec<_> = self.entries.iter().map(|s| s.format()).collect();
        f.debug_struct("SerializerRegistry")
            .field("formats", &formats)
            .finish()
    }
}
