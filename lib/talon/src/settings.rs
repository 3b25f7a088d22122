//! Client settings.
//!
//! [`ClientSettings`] is the immutable configuration shared by every
//! dispatch: base URL, content negotiation defaults, serializer registry,
//! authentication policy, handler chains, and an optional transport
//! override.

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::serializers::{FormSerializer, JsonSerializer};
use crate::{
    Authenticator, BodySerializer, ContentFormat, Error, RequestHandler, ResponseHandler, Result,
    SerializerRegistry, Transport,
};

/// Immutable client configuration.
#[derive(Clone)]
pub struct ClientSettings {
    base_url: Url,
    default_format: ContentFormat,
    default_headers: Vec<(String, String)>,
    serializers: SerializerRegistry,
    authenticator: Option<Arc<dyn Authenticator>>,
    authenticate_by_default: bool,
    request_handlers: Vec<Arc<dyn RequestHandler>>,
    response_handlers: Vec<Arc<dyn ResponseHandler>>,
    transport: Option<Arc<dyn Transport>>,
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("base_url", &self.base_url)
            .field("default_format", &self.default_format)
            .field("default_headers", &self.default_headers)
            .field("serializers", &self.serializers)
            .field("authenticate_by_default", &self.authenticate_by_default)
            .field("request_handlers", &self.request_handlers.len())
            .field("response_handlers", &self.response_handlers.len())
            .finish_non_exhaustive()
    }
}

impl ClientSettings {
    /// Create a settings builder.
    #[must_use]
    pub fn builder() -> ClientSettingsBuilder {
        ClientSettingsBuilder::default()
    }

    /// The base URL every resource is joined against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The default content format used when a body declares none.
    #[must_use]
    pub const fn default_format(&self) -> ContentFormat {
        self.default_format
    }

    /// Headers merged into every outgoing message, before request headers.
    #[must_use]
    pub fn default_headers(&self) -> &[(String, String)] {
        &self.default_headers
    }

    /// The ordered serializer registry.
    #[must_use]
    pub const fn serializers(&self) -> &SerializerRegistry {
        &self.serializers
    }

    /// The client-global authenticator, if any.
    #[must_use]
    pub fn authenticator(&self) -> Option<&Arc<dyn Authenticator>> {
        self.authenticator.as_ref()
    }

    /// Whether requests that defer the decision are authenticated.
    #[must_use]
    pub const fn authenticate_by_default(&self) -> bool {
        self.authenticate_by_default
    }

    /// Pre-send handler chain, in invocation order.
    #[must_use]
    pub fn request_handlers(&self) -> &[Arc<dyn RequestHandler>] {
        &self.request_handlers
    }

    /// Post-receive handler chain, in invocation order.
    #[must_use]
    pub fn response_handlers(&self) -> &[Arc<dyn ResponseHandler>] {
        &self.response_handlers
    }

    /// Transport override, if any.
    #[must_use]
    pub fn transport(&self) -> Option<&Arc<dyn Transport>> {
        self.transport.as_ref()
    }
}

/// Builder for [`ClientSettings`].
#[derive(Default)]
pub struct ClientSettingsBuilder {
    base_url: Option<String>,
    default_format: ContentFormat,
    default_headers: Vec<(String, String)>,
    serializers: SerializerRegistry,
    authenticator: Option<Arc<dyn Authenticator>>,
    authenticate_by_default: bool,
    request_handlers: Vec<Arc<dyn RequestHandler>>,
    response_handlers: Vec<Arc<dyn ResponseHandler>>,
    transport: Option<Arc<dyn Transport>>,
}

impl fmt::Debug for ClientSettingsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettingsBuilder")
            .field("base_url", &self.base_url)
            .field("default_format", &self.default_format)
            .field("serializers", &self.serializers)
            .finish_non_exhaustive()
    }
}

impl ClientSettingsBuilder {
    /// Set the base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the default content format.
    #[must_use]
    pub fn default_format(mut self, format: ContentFormat) -> Self {
        self.default_format = format;
        self
    }

    /// Add a header merged into every outgoing message.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Register a serializer. Registration order decides lookup priority.
    #[must_use]
    pub fn serializer(mut self, serializer: Arc<dyn BodySerializer>) -> Self {
        self.serializers.register(serializer);
        self
    }

    /// Register the shipped JSON serializer.
    #[must_use]
    pub fn use_json_serializer(self) -> Self {
        self.serializer(Arc::new(JsonSerializer))
    }

    /// Register the shipped key-value serializer.
    #[must_use]
    pub fn use_form_serializer(self) -> Self {
        self.serializer(Arc::new(FormSerializer))
    }

    /// Set the client-global authenticator.
    #[must_use]
    pub fn authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Authenticate requests that defer the decision.
    #[must_use]
    pub fn authenticate_by_default(mut self, authenticate: bool) -> Self {
        self.authenticate_by_default = authenticate;
        self
    }

    /// Append a pre-send handler.
    #[must_use]
    pub fn request_handler(mut self, handler: Arc<dyn RequestHandler>) -> Self {
        self.request_handlers.push(handler);
        self
    }

    /// Append a post-receive handler.
    #[must_use]
    pub fn response_handler(mut self, handler: Arc<dyn ResponseHandler>) -> Self {
        self.response_handlers.push(handler);
        self
    }

    /// Override the transport.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the settings.
    ///
    /// The base URL path is normalized with a trailing slash so resources
    /// join underneath it.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error when no base URL was set, or when
    /// it does not parse.
    pub fn build(self) -> Result<ClientSettings> {
        let raw = self
            .base_url
            .ok_or_else(|| Error::configuration("no base URI was set for the client"))?;
        let mut base_url = Url::parse(&raw)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        Ok(ClientSettings {
            base_url,
            default_format: self.default_format,
            default_headers: self.default_headers,
            serializers: self.serializers,
            authenticator: self.authenticator,
            authenticate_by_default: self.authenticate_by_default,
            request_handlers: self.request_handlers,
            response_handlers: self.response_handlers,
            transport: self.transport,
        })
    }
}
