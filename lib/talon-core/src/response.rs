//! Response handling and status mapping.
//!
//! A [`Response`] stays bound to the request that produced it and to the
//! client's negotiation state, so the body can be decoded lazily. Decoding
//! recomputes from the raw content on every call; nothing is cached.

use std::collections::HashMap;

use bytes::Bytes;

use crate::{ContentFormat, Error, Request, Result, Returns, SerializerRegistry};

/// A file payload extracted from a response.
#[derive(Debug, Clone)]
pub struct ResponseFile {
    content_type: Option<String>,
    data: Bytes,
}

impl ResponseFile {
    /// The response's content type, if it carried one.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// The raw payload.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

/// An HTTP response bound to its originating request.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    reason: String,
    headers: HashMap<String, String>,
    content: Bytes,
    request: Request,
    serializers: SerializerRegistry,
    default_format: ContentFormat,
}

impl Response {
    /// Wrap a raw exchange result.
    ///
    /// The serializer registry and default format come from the client
    /// that dispatched the request; they drive lazy body decoding.
    #[must_use]
    pub fn new(
        status: u16,
        reason: impl Into<String>,
        headers: HashMap<String, String>,
        content: Bytes,
        request: Request,
        serializers: SerializerRegistry,
        default_format: ContentFormat,
    ) -> Self {
        Self {
            status,
            reason: reason.into(),
            headers,
            content,
            request,
            serializers,
            default_format,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Reason phrase.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// First header value with the given name, case-insensitive.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Raw response content.
    #[must_use]
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// The request that produced this response.
    #[must_use]
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Returns `true` for any status below 400.
    #[must_use]
    pub const fn is_successful(&self) -> bool {
        self.status < 400
    }

    /// The status error for a failed response, classified by code.
    ///
    /// Returns `None` when the response is successful. The dispatcher never
    /// calls this; status errors exist only on explicit caller request.
    #[must_use]
    pub fn status_error(&self) -> Option<Error> {
        if self.is_successful() {
            return None;
        }
        Some(Error::status(self.status, self.reason.clone()))
    }

    /// Fail with the mapped status error unless the response is successful.
    ///
    /// # Errors
    ///
    /// Returns the classified status error for any status of 400 or above.
    pub fn assert_successful(&self) -> Result<()> {
        match self.status_error() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// The response content as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Fails when the content is not valid UTF-8.
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.content.to_vec())
            .map_err(|e| Error::decode("", format!("response body is not valid UTF-8: {e}")))
    }

    /// Decode the response content into the declared return type.
    ///
    /// The deserializer is chosen by the negotiated return format: the
    /// request's declared format, falling back to the client default.
    /// Every call re-decodes from the raw content.
    ///
    /// # Errors
    ///
    /// Fails when the request declared no value return, the format cannot
    /// be resolved, no deserializer supports it, or decoding fails.
    pub fn body<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        let format = match self.request.returns() {
            Returns::Void => {
                return Err(Error::validation(
                    "the request declares no return body",
                ));
            }
            Returns::File => {
                return Err(Error::validation(
                    "the request declares a file return; use `file()` instead",
                ));
            }
            Returns::Value { format } => format,
        };

        let mut format = format;
        if !format.is_resolved() {
            format = self.default_format;
        }
        if !format.is_resolved() {
            return Err(Error::configuration(
                "return format not set: the response falls back to a default format that was never configured",
            ));
        }

        let serializer = self.serializers.find(format).ok_or_else(|| {
            Error::configuration(format!("no deserializer registered for {format} content"))
        })?;

        let text = self.text()?;
        let value = serializer.deserialize(&text)?;
        serde_json::from_value(value).map_err(Error::from)
    }

    /// Extract the raw payload as a file.
    ///
    /// # Errors
    ///
    /// Fails with a validation error unless the request declared a file
    /// return.
    pub fn file(&self) -> Result<ResponseFile> {
        if self.request.returns() != Returns::File {
            return Err(Error::validation(
                "the request does not declare a file return",
            ));
        }
        Ok(ResponseFile {
            content_type: self.header("Content-Type").map(str::to_string),
            data: self.content.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::Value;

    use crate::{BodySerializer, Request, StatusKind};

    use super::*;

    struct JsonStub;

    impl BodySerializer for JsonStub {
        fn format(&self) -> ContentFormat {
            ContentFormat::Json
        }

        fn content_types(&self) -> &[&'static str] {
            &["application/json"]
        }

        fn serialize(&self, value: &Value) -> Result<String> {
            Ok(value.to_string())
        }

        fn deserialize(&self, text: &str) -> Result<Value> {
            serde_json::from_str(text).map_err(Error::from)
        }
    }

    fn response(status: u16, reason: &str, content: &str, returns_json: bool) -> Response {
        let builder = Request::get().to("items");
        let builder = if returns_json {
            builder.returns_json()
        } else {
            builder
        };
        let request = builder.build().expect("request");

        Response::new(
            status,
            reason,
            HashMap::new(),
            Bytes::from(content.to_string()),
            request,
            SerializerRegistry::new().with(Arc::new(JsonStub)),
            ContentFormat::Default,
        )
    }

    #[test]
    fn success_threshold_is_400() {
        assert!(response(200, "OK", "", false).is_successful());
        assert!(response(302, "Found", "", false).is_successful());
        assert!(response(399, "", "", false).is_successful());
        assert!(!response(400, "Bad Request", "", false).is_successful());
        assert!(!response(500, "Internal Server Error", "", false).is_successful());
    }

    #[test]
    fn not_found_maps_with_reason() {
        let response = response(404, "Not Found", "", false);
        assert!(!response.is_successful());

        let error = response.status_error().expect("error");
        assert_eq!(error.status_kind(), Some(StatusKind::NotFound));
        assert_eq!(error.to_string(), "not found (404): Not Found");
    }

    #[test]
    fn successful_response_has_no_status_error() {
        let response = response(201, "Created", "", false);
        assert!(response.status_error().is_none());
        assert!(response.assert_successful().is_ok());
    }

    #[test]
    fn assert_successful_surfaces_conflict() {
        let response = response(409, "Conflict", "", false);
        let err = response.assert_successful().expect_err("conflict");
        assert_eq!(err.status_kind(), Some(StatusKind::Conflict));
    }

    #[test]
    fn body_decodes_with_declared_format() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Item {
            id: u64,
        }

        let response = response(200, "OK", r#"{"id": 7}"#, true);
        let item: Item = response.body().expect("decoded");
        assert_eq!(item, Item { id: 7 });

        // Decoding is recomputed on every call.
        let again: Item = response.body().expect("decoded again");
        assert_eq!(again, Item { id: 7 });
    }

    #[test]
    fn body_without_resolved_format_is_a_configuration_error() {
        let response = response(200, "OK", r#"{"id": 7}"#, false);
        let err = response.body::<Value>().expect_err("no format");
        assert!(err.is_configuration());
    }

    #[test]
    fn body_on_void_return_is_a_validation_error() {
        let request = Request::delete()
            .to("items/1")
            .no_return()
            .build()
            .expect("request");
        let response = Response::new(
            204,
            "No Content",
            HashMap::new(),
            Bytes::new(),
            request,
            SerializerRegistry::new(),
            ContentFormat::Json,
        );

        let err = response.body::<Value>().expect_err("void");
        assert!(err.is_validation());
    }

    #[test]
    fn file_requires_file_return() {
        let request = Request::get()
            .to("export")
            .returns_file()
            .build()
            .expect("request");
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "text/csv".to_string());
        let response = Response::new(
            200,
            "OK",
            headers,
            Bytes::from_static(b"a,b"),
            request,
            SerializerRegistry::new(),
            ContentFormat::Json,
        );

        let file = response.file().expect("file");
        assert_eq!(file.content_type(), Some("text/csv"));
        assert_eq!(file.data().as_ref(), b"a,b");

        let plain = self::response(200, "OK", "a,b", false);
        assert!(plain.file().is_err());
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let request = Request::get().to("items").build().expect("request");
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        let response = Response::new(
            200,
            "OK",
            headers,
            Bytes::new(),
            request,
            SerializerRegistry::new(),
            ContentFormat::Json,
        );

        assert_eq!(response.header("Content-Type"), Some("application/json"));
    }
}
