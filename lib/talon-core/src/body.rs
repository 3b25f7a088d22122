//! Request bodies.
//!
//! A [`RequestBody`] is either a single value paired with a content format,
//! or a [`MultipartBody`] owning named sub-parts. The multipart invariants
//! are enforced eagerly when a part is added, long before any network I/O.

use crate::{ContentFormat, Error, ParamValue, Parameter, Result};

/// The content carried by a [`RequestBody`].
#[derive(Debug, Clone)]
pub enum BodyContent {
    /// A single value, serialized according to the resolved format.
    Value {
        /// The body value.
        value: ParamValue,
        /// Explicit content format; `Default` falls back to the client's.
        format: ContentFormat,
    },
    /// A multipart body with named sub-parts.
    Multipart(MultipartBody),
}

/// A request body parameter.
#[derive(Debug, Clone)]
pub struct RequestBody {
    name: Option<String>,
    content: BodyContent,
}

impl RequestBody {
    /// Create an unnamed body with the default (deferred) format.
    pub fn new(value: impl Into<ParamValue>) -> Self {
        Self {
            name: None,
            content: BodyContent::Value {
                value: value.into(),
                format: ContentFormat::Default,
            },
        }
    }

    /// Create an empty multipart body.
    #[must_use]
    pub fn multipart(parts: MultipartBody) -> Self {
        Self {
            name: None,
            content: BodyContent::Multipart(parts),
        }
    }

    /// Name the body, making it usable as a multipart sub-part.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set an explicit content format.
    #[must_use]
    pub fn with_format(mut self, format: ContentFormat) -> Self {
        if let BodyContent::Value { format: f, .. } = &mut self.content {
            *f = format;
        }
        self
    }

    /// The body's part name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The body content.
    #[must_use]
    pub const fn content(&self) -> &BodyContent {
        &self.content
    }

    /// The explicit content format; multipart bodies report `Default`.
    #[must_use]
    pub const fn format(&self) -> ContentFormat {
        match &self.content {
            BodyContent::Value { format, .. } => *format,
            BodyContent::Multipart(_) => ContentFormat::Default,
        }
    }

    /// The single body value, when this is not a multipart body.
    #[must_use]
    pub const fn value(&self) -> Option<&ParamValue> {
        match &self.content {
            BodyContent::Value { value, .. } => Some(value),
            BodyContent::Multipart(_) => None,
        }
    }

    /// Returns `true` when this body owns named sub-parts.
    #[must_use]
    pub const fn is_multipart(&self) -> bool {
        matches!(self.content, BodyContent::Multipart(_))
    }

    /// The multipart sub-parts, when this is a multipart body.
    #[must_use]
    pub const fn parts(&self) -> Option<&MultipartBody> {
        match &self.content {
            BodyContent::Multipart(parts) => Some(parts),
            BodyContent::Value { .. } => None,
        }
    }
}

/// A multipart body: an insertion-ordered mapping from part name to
/// sub-parameter.
///
/// Only body and file parameters can join, every part must carry a unique
/// non-empty name, a body sub-part cannot itself be multipart, and its
/// format must be `Default` or `KeyValue`. Zero parts is legal.
#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    parts: Vec<(String, Parameter)>,
}

impl MultipartBody {
    /// Create an empty multipart body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named sub-part.
    ///
    /// # Errors
    ///
    /// Fails with a validation error when the part is not a body or file,
    /// is unnamed, duplicates an existing name, is itself multipart, or
    /// carries a format other than `Default`/`KeyValue`.
    pub fn add_part(&mut self, part: Parameter) -> Result<()> {
        let name = match &part {
            Parameter::Body(body) => {
                if body.is_multipart() {
                    return Err(Error::validation(
                        "cannot add a multipart body as a part of another multipart body",
                    ));
                }
                if !matches!(body.format(), ContentFormat::Default | ContentFormat::KeyValue) {
                    return Err(Error::validation(
                        "a body part can only use the default or key-value format",
                    ));
                }
                body.name().unwrap_or_default().to_string()
            }
            Parameter::File(file) => file.name().to_string(),
            _ => {
                return Err(Error::validation(
                    "only body and file parameters can be parts of a multipart body",
                ));
            }
        };

        if name.is_empty() {
            return Err(Error::validation("a part of a multipart body must be named"));
        }
        if self.parts.iter().any(|(existing, _)| *existing == name) {
            return Err(Error::validation(format!(
                "a part named `{name}` is already in the body"
            )));
        }

        self.parts.push((name, part));
        Ok(())
    }

    /// Add a named sub-part, chainable.
    ///
    /// # Errors
    ///
    /// Same rules as [`Self::add_part`].
    pub fn part(mut self, part: Parameter) -> Result<Self> {
        self.add_part(part)?;
        Ok(self)
    }

    /// Number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` when the body has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns `true` when a part with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.parts.iter().any(|(existing, _)| existing == name)
    }

    /// Iterate over the parts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Parameter)> {
        self.parts.iter().map(|(name, part)| (name.as_str(), part))
    }
}
