//! Content composition.
//!
//! Turns a built request into exactly one piece of transport-ready
//! content, resolving the content format and serializer on the way. Every
//! failure here surfaces before any network I/O happens.

use bytes::Bytes;

use crate::{
    BodyContent, ContentFormat, ContentPart, Error, MultipartBody, MultipartContent, ParamValue,
    Parameter, Request, RequestBody, RequestFile, Result, SerializerRegistry,
};

/// Transport-ready request content.
#[derive(Debug, Clone)]
pub enum Content {
    /// Textual content with its canonical content type.
    Text {
        /// Serialized or stringified payload.
        text: String,
        /// Canonical content type, without charset suffix.
        content_type: String,
    },
    /// File content carrying its payload and filename.
    File {
        /// File payload.
        data: Bytes,
        /// Filename sent on the wire.
        filename: String,
        /// Content type of the payload.
        content_type: String,
    },
    /// Multipart content.
    Multipart(MultipartContent),
}

impl Content {
    /// The canonical content type of this content.
    #[must_use]
    pub fn content_type(&self) -> String {
        match self {
            Self::Text { content_type, .. } | Self::File { content_type, .. } => {
                content_type.clone()
            }
            Self::Multipart(multipart) => multipart.content_type(),
        }
    }

    /// The content type as written to the wire; textual content is tagged
    /// as UTF-8.
    #[must_use]
    pub fn wire_content_type(&self) -> String {
        match self {
            Self::Text { content_type, .. } => format!("{content_type}; charset=utf-8"),
            Self::File { content_type, .. } => content_type.clone(),
            Self::Multipart(multipart) => multipart.content_type(),
        }
    }

    /// Consume into the wire payload.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        match self {
            Self::Text { text, .. } => Bytes::from(text.into_bytes()),
            Self::File { data, .. } => data,
            Self::Multipart(multipart) => multipart.encode(),
        }
    }
}

/// Compose the request's body or file parameter into transport content.
///
/// Returns `None` when the request carries neither. The first body or file
/// parameter in insertion order wins.
///
/// # Errors
///
/// Fails with a configuration error when the content format cannot be
/// resolved or no serializer supports it.
pub fn compose(
    request: &Request,
    serializers: &SerializerRegistry,
    default_format: ContentFormat,
) -> Result<Option<Content>> {
    for parameter in request.parameters() {
        match parameter {
            Parameter::Body(body) => {
                return compose_body(body, serializers, default_format).map(Some);
            }
            Parameter::File(file) => return Ok(Some(file_content(file))),
            _ => {}
        }
    }
    Ok(None)
}

fn compose_body(
    body: &RequestBody,
    serializers: &SerializerRegistry,
    default_format: ContentFormat,
) -> Result<Content> {
    match body.content() {
        BodyContent::Multipart(parts) => {
            compose_multipart(parts, serializers, default_format).map(Content::Multipart)
        }
        BodyContent::Value { value, format } => {
            let (text, content_type) = resolve_text(value, *format, serializers, default_format)?;
            Ok(Content::Text { text, content_type })
        }
    }
}

fn compose_multipart(
    parts: &MultipartBody,
    serializers: &SerializerRegistry,
    default_format: ContentFormat,
) -> Result<MultipartContent> {
    let mut multipart = MultipartContent::new();

    for (name, parameter) in parts.iter() {
        let section = match parameter {
            Parameter::File(file) => ContentPart::file(
                name,
                file.filename(),
                file.content_type(),
                file.data().clone(),
            ),
            Parameter::Body(body) => {
                // Nested multipart is rejected at add_part time; a body
                // part here is always a single value.
                let value = body.value().ok_or_else(|| {
                    Error::validation("a multipart section cannot itself be multipart")
                })?;
                let (text, content_type) =
                    resolve_text(value, body.format(), serializers, default_format)?;
                ContentPart::serialized(name, text, format!("{content_type}; charset=utf-8"))
            }
            _ => {
                return Err(Error::validation(
                    "only body and file parameters can be parts of a multipart body",
                ));
            }
        };
        multipart.push(section);
    }

    Ok(multipart)
}

/// Resolve a single body value into text plus its canonical content type.
///
/// Scalars stringify directly; structured values negotiate a format and a
/// serializer.
fn resolve_text(
    value: &ParamValue,
    format: ContentFormat,
    serializers: &SerializerRegistry,
    default_format: ContentFormat,
) -> Result<(String, String)> {
    let Some(raw) = value.as_structured() else {
        return Ok((value.to_text(), "text/plain".to_string()));
    };

    let mut format = format;
    if !format.is_resolved() {
        format = default_format;
    }
    if !format.is_resolved() {
        return Err(Error::configuration(
            "content format not set: the body falls back to a default format that was never configured",
        ));
    }

    let serializer = serializers.find(format).ok_or_else(|| {
        Error::configuration(format!("no serializer registered for {format} content"))
    })?;

    let text = serializer.serialize(raw)?;
    let content_type = serializer
        .content_types()
        .first()
        .copied()
        .ok_or_else(|| Error::configuration(format!("the {format} serializer advertises no content type")))?;

    Ok((text, content_type.to_string()))
}

fn file_content(file: &RequestFile) -> Content {
    Content::File {
        data: file.data().clone(),
        filename: file.filename().to_string(),
        content_type: file.content_type().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{Value, json};

    use crate::{BodySerializer, Method, RequestBuilder};

    use super::*;

    struct JsonStub;

    impl BodySerializer for JsonStub {
        fn format(&self) -> ContentFormat {
            ContentFormat::Json
        }

        fn content_types(&self) -> &[&'static str] {
            &["application/json", "text/json"]
        }

        fn serialize(&self, value: &Value) -> Result<String> {
            Ok(value.to_string())
        }

        fn deserialize(&self, text: &str) -> Result<Value> {
            serde_json::from_str(text).map_err(Error::from)
        }
    }

    fn registry() -> SerializerRegistry {
        SerializerRegistry::new().with(Arc::new(JsonStub))
    }

    fn request_with_body(body: RequestBody) -> Request {
        RequestBuilder::new()
            .method(Method::Post)
            .to("items")
            .with_body_param(body)
            .build()
            .expect("request")
    }

    #[test]
    fn no_body_composes_to_none() {
        let request = RequestBuilder::new()
            .method(Method::Get)
            .to("items")
            .build()
            .expect("request");
        let content = compose(&request, &registry(), ContentFormat::Json).expect("compose");
        assert!(content.is_none());
    }

    #[test]
    fn scalar_body_stringifies_without_serializer() {
        let request = request_with_body(RequestBody::new(44));
        let content = compose(&request, &SerializerRegistry::new(), ContentFormat::Default)
            .expect("compose")
            .expect("content");

        let Content::Text { text, content_type } = content else {
            panic!("expected text content");
        };
        assert_eq!(text, "44");
        assert_eq!(content_type, "text/plain");
    }

    #[test]
    fn structured_body_uses_explicit_format() {
        let body = RequestBody::new(json!({"id": 1})).with_format(ContentFormat::Json);
        let request = request_with_body(body);
        let content = compose(&request, &registry(), ContentFormat::Default)
            .expect("compose")
            .expect("content");

        assert_eq!(content.content_type(), "application/json");
        assert!(content.wire_content_type().starts_with("application/json"));
    }

    #[test]
    fn structured_body_falls_back_to_default_format() {
        let request = request_with_body(RequestBody::new(json!({"id": 1})));
        let content = compose(&request, &registry(), ContentFormat::Json)
            .expect("compose")
            .expect("content");

        assert_eq!(content.content_type(), "application/json");
    }

    #[test]
    fn unresolved_format_is_a_configuration_error() {
        let request = request_with_body(RequestBody::new(json!({"id": 1})));
        let err = compose(&request, &registry(), ContentFormat::Default).expect_err("no format");
        assert!(err.is_configuration());
        assert!(err.to_string().contains("format not set"));
    }

    #[test]
    fn missing_serializer_is_a_configuration_error() {
        let body = RequestBody::new(json!({"id": 1})).with_format(ContentFormat::Xml);
        let request = request_with_body(body);
        let err = compose(&request, &registry(), ContentFormat::Default).expect_err("no serializer");
        assert!(err.is_configuration());
        assert!(err.to_string().contains("no serializer"));
    }

    #[test]
    fn single_file_becomes_file_content() {
        let request = RequestBuilder::new()
            .method(Method::Post)
            .to("uploads")
            .with_file(RequestFile::new("doc", "report.pdf", vec![1, 2, 3]))
            .build()
            .expect("request");

        let content = compose(&request, &registry(), ContentFormat::Json)
            .expect("compose")
            .expect("content");
        let Content::File {
            data,
            filename,
            content_type,
        } = content
        else {
            panic!("expected file content");
        };
        assert_eq!(data.as_ref(), &[1, 2, 3]);
        assert_eq!(filename, "report.pdf");
        assert_eq!(content_type, "application/pdf");
    }

    #[test]
    fn empty_multipart_composes_to_zero_sections() {
        let request = request_with_body(RequestBody::multipart(MultipartBody::new()));
        let content = compose(&request, &registry(), ContentFormat::Json)
            .expect("compose")
            .expect("content");

        let Content::Multipart(multipart) = content else {
            panic!("expected multipart content");
        };
        assert!(multipart.parts().is_empty());
        assert!(
            multipart
                .content_type()
                .starts_with("multipart/form-data; boundary=")
        );
    }

    #[test]
    fn multipart_sections_resolve_independently() {
        let parts = MultipartBody::new()
            .part(Parameter::Body(RequestBody::new("John").with_name("name")))
            .expect("scalar part")
            .part(Parameter::File(RequestFile::new(
                "avatar",
                "photo.png",
                vec![0x89, 0x50],
            )))
            .expect("file part");
        let request = request_with_body(RequestBody::multipart(parts));

        let content = compose(&request, &registry(), ContentFormat::Json)
            .expect("compose")
            .expect("content");
        let Content::Multipart(multipart) = content else {
            panic!("expected multipart content");
        };

        let sections = multipart.parts();
        assert_eq!(sections.len(), 2);

        let name = sections.first().expect("name section");
        assert_eq!(name.name(), "name");
        assert!(name.filename().is_none());
        assert_eq!(name.data().as_ref(), b"John");

        let avatar = sections.get(1).expect("avatar section");
        assert_eq!(avatar.name(), "avatar");
        assert_eq!(avatar.filename(), Some("photo.png"));
        assert_eq!(avatar.content_type(), Some("image/png"));
    }

    #[test]
    fn multipart_round_trip() {
        let parts = MultipartBody::new()
            .part(Parameter::Body(RequestBody::new("hello").with_name("greeting")))
            .expect("text part")
            .part(Parameter::File(RequestFile::new(
                "attachment",
                "notes.txt",
                &b"line one"[..],
            )))
            .expect("file part");
        let request = request_with_body(RequestBody::multipart(parts));

        let content = compose(&request, &registry(), ContentFormat::Json)
            .expect("compose")
            .expect("content");
        let Content::Multipart(multipart) = content else {
            panic!("expected multipart content");
        };

        let boundary = multipart.boundary().to_string();
        let encoded = multipart.encode();
        let parsed = parse_multipart(&encoded, &boundary);

        assert_eq!(parsed.len(), 2);
        let greeting = parsed.first().expect("greeting");
        assert_eq!(greeting.0, "greeting");
        assert_eq!(greeting.1, None);
        assert_eq!(greeting.2, b"hello");

        let attachment = parsed.get(1).expect("attachment");
        assert_eq!(attachment.0, "attachment");
        assert_eq!(attachment.1.as_deref(), Some("notes.txt"));
        assert_eq!(attachment.2, b"line one");
    }

    /// Minimal multipart/form-data reader: splits on the boundary and
    /// pulls name, filename and payload out of each section.
    fn parse_multipart(body: &[u8], boundary: &str) -> Vec<(String, Option<String>, Vec<u8>)> {
        let text = String::from_utf8_lossy(body);
        let delimiter = format!("--{boundary}");
        text.split(&delimiter)
            .filter(|section| !section.is_empty() && !section.starts_with("--"))
            .map(|section| {
                let section = section.trim_start_matches("\r\n");
                let (headers, payload) = section.split_once("\r\n\r\n").expect("section framing");
                let name = extract_quoted(headers, "name=\"").expect("part name");
                let filename = extract_quoted(headers, "filename=\"");
                let payload = payload.trim_end_matches("\r\n").as_bytes().to_vec();
                (name, filename, payload)
            })
            .collect()
    }

    fn extract_quoted(headers: &str, marker: &str) -> Option<String> {
        let start = headers.find(marker)? + marker.len();
        let rest = headers.get(start..)?;
        let end = rest.find('"')?;
        rest.get(..end).map(str::to_string)
    }
}
