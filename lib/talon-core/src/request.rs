//! Request model and builder.
//!
//! A [`RequestBuilder`] accumulates typed parameters through additive,
//! chainable operations, then [`RequestBuilder::build`] snapshots them
//! into an immutable [`Request`]. Cross-field validation is deferred to
//! composition; the builder only performs immediate local checks.
//!
//! # Example
//!
//! ```
//! use talon_core::{Method, Request};
//!
//! let request = Request::get()
//!     .to_args("users/{0}", [42])
//!     .with_query("active", true)
//!     .build()
//!     .expect("request");
//!
//! assert_eq!(request.method(), Method::Get);
//! assert_eq!(request.resolved_path().expect("path"), "users/42");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::{
    Authenticator, ContentFormat, Error, MultipartBody, ParamKind, ParamValue, Parameter,
    RequestBody, RequestFile, Result, params_from_value,
};

/// What the caller expects back from a dispatch, declared at build time
/// and consumed only when the response body is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Returns {
    /// A decoded value; the target type is chosen at the decode call.
    Value {
        /// Expected return format; `Default` falls back to the client's.
        format: ContentFormat,
    },
    /// No body is expected.
    Void,
    /// The raw payload is expected as a file.
    File,
}

impl Default for Returns {
    fn default() -> Self {
        Self::Value {
            format: ContentFormat::Default,
        }
    }
}

impl Returns {
    /// The declared return format; void and file returns report `Default`.
    #[must_use]
    pub const fn format(&self) -> ContentFormat {
        match self {
            Self::Value { format } => *format,
            Self::Void | Self::File => ContentFormat::Default,
        }
    }
}

/// An immutable HTTP request: method, resource template, ordered
/// parameters, authentication intent, and return spec.
///
/// Built once by a [`RequestBuilder`]; the only mutation surface after
/// that is [`Request::insert_header`], reserved for authenticators.
#[derive(Clone)]
pub struct Request {
    method: crate::Method,
    resource: String,
    parameters: Vec<Parameter>,
    authenticate: Option<bool>,
    authenticator: Option<Arc<dyn Authenticator>>,
    returns: Returns,
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("resource", &self.resource)
            .field("parameters", &self.parameters)
            .field("authenticate", &self.authenticate)
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}

impl Request {
    /// Start building a GET request.
    #[must_use]
    pub fn get() -> RequestBuilder {
        RequestBuilder::new().method(crate::Method::Get)
    }

    /// Start building a POST request.
    #[must_use]
    pub fn post() -> RequestBuilder {
        RequestBuilder::new().method(crate::Method::Post)
    }

    /// Start building a PUT request.
    #[must_use]
    pub fn put() -> RequestBuilder {
        RequestBuilder::new().method(crate::Method::Put)
    }

    /// Start building a DELETE request.
    #[must_use]
    pub fn delete() -> RequestBuilder {
        RequestBuilder::new().method(crate::Method::Delete)
    }

    /// Start building a HEAD request.
    #[must_use]
    pub fn head() -> RequestBuilder {
        RequestBuilder::new().method(crate::Method::Head)
    }

    /// Start building an OPTIONS request.
    #[must_use]
    pub fn options() -> RequestBuilder {
        RequestBuilder::new().method(crate::Method::Options)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> crate::Method {
        self.method
    }

    /// Resource template, before route substitution.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// All parameters in insertion order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// The authentication tri-state: `None` defers to client policy.
    #[must_use]
    pub const fn authenticate(&self) -> Option<bool> {
        self.authenticate
    }

    /// Request-level authenticator override.
    #[must_use]
    pub fn authenticator(&self) -> Option<&Arc<dyn Authenticator>> {
        self.authenticator.as_ref()
    }

    /// The declared return spec.
    #[must_use]
    pub const fn returns(&self) -> Returns {
        self.returns
    }

    /// The first body parameter, if any.
    #[must_use]
    pub fn body(&self) -> Option<&RequestBody> {
        self.parameters.iter().find_map(|p| match p {
            Parameter::Body(body) => Some(body),
            _ => None,
        })
    }

    /// Returns `true` when a body parameter is present.
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.body().is_some()
    }

    /// The first file parameter, if any.
    #[must_use]
    pub fn file(&self) -> Option<&RequestFile> {
        self.parameters.iter().find_map(|p| match p {
            Parameter::File(file) => Some(file),
            _ => None,
        })
    }

    /// Returns `true` when a query string parameter is present.
    #[must_use]
    pub fn has_query(&self) -> bool {
        self.parameters
            .iter()
            .any(|p| matches!(p, Parameter::QueryString { .. }))
    }

    /// Query pairs in insertion order, values stringified.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.pairs_of(|p| match p {
            Parameter::QueryString { name, value } => Some((name.clone(), value.to_text())),
            _ => None,
        })
    }

    /// Header pairs in insertion order, values stringified.
    #[must_use]
    pub fn header_pairs(&self) -> Vec<(String, String)> {
        self.pairs_of(|p| match p {
            Parameter::Header { name, value } => Some((name.clone(), value.to_text())),
            _ => None,
        })
    }

    /// Route bindings in insertion order, values stringified.
    #[must_use]
    pub fn route_bindings(&self) -> Vec<(String, String)> {
        self.pairs_of(|p| match p {
            Parameter::Route { name, value } => Some((name.clone(), value.to_text())),
            _ => None,
        })
    }

    fn pairs_of<F>(&self, select: F) -> Vec<(String, String)>
    where
        F: Fn(&Parameter) -> Option<(String, String)>,
    {
        self.parameters.iter().filter_map(select).collect()
    }

    /// Fill the resource template with the request's route bindings.
    ///
    /// # Errors
    ///
    /// Fails with a validation error when a placeholder stays unbound.
    pub fn resolved_path(&self) -> Result<String> {
        crate::fill_template(&self.resource, &self.route_bindings())
    }

    /// Append a header parameter to the built request.
    ///
    /// This is the augmentation surface used by [`Authenticator`]
    /// implementations during dispatch; everything else should go through
    /// a builder.
    pub fn insert_header(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.parameters.push(Parameter::header(name, value));
    }
}

/// Builder for [`Request`] instances.
///
/// Every operation is additive and returns the builder; errors that can
/// be detected locally (multipart part rules, serialization of sugar
/// bodies) surface immediately as `Result`.
#[derive(Default)]
pub struct RequestBuilder {
    method: Option<crate::Method>,
    resource: Option<String>,
    parameters: Vec<Parameter>,
    authenticate: Option<bool>,
    authenticator: Option<Arc<dyn Authenticator>>,
    returns: Returns,
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("method", &self.method)
            .field("resource", &self.resource)
            .field("parameters", &self.parameters.len())
            .field("authenticate", &self.authenticate)
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}

impl RequestBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP method.
    #[must_use]
    pub fn method(mut self, method: crate::Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Set the HTTP method from its string name.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error for anything other than GET, POST,
    /// PUT, DELETE, HEAD, OPTIONS (case-insensitive).
    pub fn method_name(self, name: &str) -> Result<Self> {
        Ok(self.method(name.parse()?))
    }

    /// Set the resource template.
    #[must_use]
    pub fn to(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Set the resource template and bind positional arguments to
    /// index-named route parameters (`{0}`, `{1}`, …).
    #[must_use]
    pub fn to_args<I, V>(mut self, resource: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        for (index, arg) in args.into_iter().enumerate() {
            self = self.with_route(index.to_string(), arg);
        }
        self.to(resource)
    }

    /// Attach an arbitrary parameter.
    #[must_use]
    pub fn with(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Attach a route binding.
    #[must_use]
    pub fn with_route(self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.with(Parameter::route(name, value))
    }

    /// Attach a query string pair.
    #[must_use]
    pub fn with_query(self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.with(Parameter::query(name, value))
    }

    /// Attach a header pair.
    #[must_use]
    pub fn with_header(self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.with(Parameter::header(name, value))
    }

    /// Attach route bindings from a JSON object.
    ///
    /// # Errors
    ///
    /// Fails with a validation error when `values` is not an object.
    pub fn with_routes(self, values: serde_json::Value) -> Result<Self> {
        self.with_params(ParamKind::Route, &values)
    }

    /// Attach query pairs from a JSON object.
    ///
    /// # Errors
    ///
    /// Fails with a validation error when `values` is not an object.
    pub fn with_queries(self, values: serde_json::Value) -> Result<Self> {
        self.with_params(ParamKind::QueryString, &values)
    }

    /// Attach headers from a JSON object.
    ///
    /// # Errors
    ///
    /// Fails with a validation error when `values` is not an object.
    pub fn with_headers(self, values: serde_json::Value) -> Result<Self> {
        self.with_params(ParamKind::Header, &values)
    }

    fn with_params(mut self, kind: ParamKind, values: &serde_json::Value) -> Result<Self> {
        self.parameters.extend(params_from_value(kind, values)?);
        Ok(self)
    }

    /// Attach a body with the default (deferred) format.
    #[must_use]
    pub fn with_body(self, value: impl Into<ParamValue>) -> Self {
        self.with_body_param(RequestBody::new(value))
    }

    /// Attach a pre-built body parameter.
    #[must_use]
    pub fn with_body_param(self, body: RequestBody) -> Self {
        self.with(Parameter::Body(body))
    }

    /// Attach a JSON body, serializing the value into a structured payload.
    ///
    /// # Errors
    ///
    /// Fails when the value cannot be represented as JSON.
    pub fn with_json_body<T: serde::Serialize>(self, value: &T) -> Result<Self> {
        let raw = serde_json::to_value(value)?;
        Ok(self.with_body_param(
            RequestBody::new(ParamValue::Structured(raw)).with_format(ContentFormat::Json),
        ))
    }

    /// Attach an XML body, carrying the value as a structured payload.
    ///
    /// # Errors
    ///
    /// Fails when the value cannot be represented as a structured payload.
    pub fn with_xml_body<T: serde::Serialize>(self, value: &T) -> Result<Self> {
        let raw = serde_json::to_value(value)?;
        Ok(self.with_body_param(
            RequestBody::new(ParamValue::Structured(raw)).with_format(ContentFormat::Xml),
        ))
    }

    /// Attach a key-value (form URL-encoded) body.
    ///
    /// # Errors
    ///
    /// Fails when the value cannot be represented as a structured payload.
    pub fn with_form_body<T: serde::Serialize>(self, value: &T) -> Result<Self> {
        let raw = serde_json::to_value(value)?;
        Ok(self.with_body_param(
            RequestBody::new(ParamValue::Structured(raw)).with_format(ContentFormat::KeyValue),
        ))
    }

    /// Attach a multipart body.
    #[must_use]
    pub fn with_multipart_body(self, parts: MultipartBody) -> Self {
        self.with_body_param(RequestBody::multipart(parts))
    }

    /// Attach a file parameter.
    #[must_use]
    pub fn with_file(self, file: RequestFile) -> Self {
        self.with(Parameter::File(file))
    }

    /// Set the return spec.
    #[must_use]
    pub fn returns(mut self, returns: Returns) -> Self {
        self.returns = returns;
        self
    }

    /// Expect a decoded return value in the given format.
    #[must_use]
    pub fn returns_format(self, format: ContentFormat) -> Self {
        self.returns(Returns::Value { format })
    }

    /// Expect a JSON return value.
    #[must_use]
    pub fn returns_json(self) -> Self {
        self.returns_format(ContentFormat::Json)
    }

    /// Expect an XML return value.
    #[must_use]
    pub fn returns_xml(self) -> Self {
        self.returns_format(ContentFormat::Xml)
    }

    /// Expect the raw payload as a file.
    #[must_use]
    pub fn returns_file(self) -> Self {
        self.returns(Returns::File)
    }

    /// Expect no return body.
    #[must_use]
    pub fn no_return(self) -> Self {
        self.returns(Returns::Void)
    }

    /// Set the authentication flag explicitly.
    #[must_use]
    pub fn authenticate(mut self, authenticate: bool) -> Self {
        self.authenticate = Some(authenticate);
        self
    }

    /// Set a request-level authenticator override.
    #[must_use]
    pub fn use_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Clear any authenticator and disable authentication for this request.
    #[must_use]
    pub fn anonymous(mut self) -> Self {
        self.authenticator = None;
        self.authenticate(false)
    }

    /// Snapshot the accumulated state into an immutable [`Request`].
    ///
    /// The builder stays usable: building twice yields two requests with
    /// identical content but independently owned parameter collections.
    ///
    /// # Errors
    ///
    /// Fails with a validation error when the method or resource is
    /// missing, or the resource is empty.
    pub fn build(&self) -> Result<Request> {
        let method = self
            .method
            .ok_or_else(|| Error::validation("a request requires an HTTP method"))?;
        let resource = self
            .resource
            .clone()
            .filter(|r| !r.is_empty())
            .ok_or_else(|| Error::validation("a request requires a non-empty resource"))?;

        Ok(Request {
            method,
            resource,
            parameters: self.parameters.clone(),
            authenticate: self.authenticate,
            authenticator: self.authenticator.clone(),
            returns: self.returns,
        })
    }
}
