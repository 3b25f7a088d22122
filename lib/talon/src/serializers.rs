//! Shipped body serializers.
//!
//! The client registers these through
//! [`crate::ClientSettingsBuilder::use_json_serializer`] and
//! [`crate::ClientSettingsBuilder::use_form_serializer`]. XML is a format
//! callers can register their own serializer for.

use serde_json::Value;

use crate::{BodySerializer, ContentFormat, Error, Result};

/// JSON serializer backed by `serde_json`.
///
/// Decode errors carry the path to the failing element.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl BodySerializer for JsonSerializer {
    fn format(&self) -> ContentFormat {
        ContentFormat::Json
    }

    fn content_types(&self) -> &[&'static str] {
        &["application/json", "text/json", "application/x-json"]
    }

    fn serialize(&self, value: &Value) -> Result<String> {
        serde_json::to_string(value).map_err(Error::from)
    }

    fn deserialize(&self, text: &str) -> Result<Value> {
        let mut deserializer = serde_json::Deserializer::from_str(text);
        serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|e| Error::decode(e.path().to_string(), e.inner().to_string()))
    }
}

/// Key-value (form URL-encoded) serializer backed by `serde_html_form`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormSerializer;

impl BodySerializer for FormSerializer {
    fn format(&self) -> ContentFormat {
        ContentFormat::KeyValue
    }

    fn content_types(&self) -> &[&'static str] {
        &["application/x-www-form-urlencoded"]
    }

    fn serialize(&self, value: &Value) -> Result<String> {
        if !value.is_object() {
            return Err(Error::validation(
                "key-value content requires an object of key/value pairs",
            ));
        }
        serde_html_form::to_string(value).map_err(Error::from)
    }

    fn deserialize(&self, text: &str) -> Result<Value> {
        let pairs: Vec<(String, String)> = serde_html_form::from_str(text)
            .map_err(|e| Error::decode("", e.to_string()))?;
        Ok(Value::Object(
            pairs
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect(),
        ))
    }
}
