//! The REST client dispatcher.
//!
//! [`RestClient::send`] runs one exchange through a strictly ordered
//! pipeline: resolve authentication, apply the authenticator, translate
//! the request into a transport message, walk the pre-send handler chain,
//! perform the single network send, wrap the response, walk the
//! post-receive chain. Status codes are never inspected here; callers map
//! them explicitly through the response.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::transport::HyperTransport;
use crate::{
    ClientSettings, ClientSettingsBuilder, Error, Request, Response, Result, Transport,
    TransportRequest, compose,
};

/// A REST client bound to a base URL and immutable settings.
///
/// Cloning is cheap; concurrent dispatches share only the settings and the
/// transport's connection pool. Cancelling a dispatch is dropping the
/// future returned by [`Self::send`].
#[derive(Clone)]
pub struct RestClient {
    settings: Arc<ClientSettings>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl RestClient {
    /// Create a client from settings, using the shipped hyper transport
    /// unless the settings override it.
    #[must_use]
    pub fn new(settings: ClientSettings) -> Self {
        let transport = settings
            .transport()
            .cloned()
            .unwrap_or_else(|| Arc::new(HyperTransport::new()) as Arc<dyn Transport>);
        Self {
            settings: Arc::new(settings),
            transport,
        }
    }

    /// Build a client by configuring settings in a closure.
    ///
    /// ```ignore
    /// let client = RestClient::build(|settings| settings
    ///     .base_url("http://example.com/api")
    ///     .use_json_serializer())?;
    /// ```
    ///
    /// # Errors
    ///
    /// Fails when the settings are incomplete (missing base URL).
    pub fn build<F>(configure: F) -> Result<Self>
    where
        F: FnOnce(ClientSettingsBuilder) -> ClientSettingsBuilder,
    {
        let settings = configure(ClientSettings::builder()).build()?;
        Ok(Self::new(settings))
    }

    /// The client settings.
    #[must_use]
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Dispatch one request and return the wrapped response.
    ///
    /// All composition and configuration failures surface before any
    /// network I/O. The response's status is not inspected; use
    /// [`Response::assert_successful`] or [`Response::status_error`] to
    /// map failures.
    ///
    /// # Errors
    ///
    /// Fails with the taxonomy errors: validation/configuration problems
    /// raised eagerly, authentication that cannot be resolved, a failing
    /// handler, or a transport failure.
    pub async fn send(&self, request: Request) -> Result<Response> {
        let mut request = request;

        // 1. Resolve the authentication decision and the authenticator.
        let authenticate = request
            .authenticate()
            .unwrap_or_else(|| self.settings.authenticate_by_default());
        if authenticate {
            let authenticator = request
                .authenticator()
                .cloned()
                .or_else(|| self.settings.authenticator().cloned());
            let Some(authenticator) = authenticator else {
                return Err(Error::authentication_required(format!(
                    "the request {} {} requires authentication but no authenticator was set",
                    request.method(),
                    request.resource(),
                )));
            };
            // 2. Applied exactly once per dispatch.
            authenticator.authenticate(&mut request)?;
        }

        // 3. Translate into a transport message.
        let mut message = self.translate(&request)?;

        // 4. Pre-send handlers, strictly sequential.
        for handler in self.settings.request_handlers() {
            handler.handle(&mut message).await?;
        }

        // 5. The single network send.
        debug!(method = %message.method, url = %message.url, "sending request");
        let wire = self.transport.send(message).await.inspect_err(|error| {
            warn!(%error, "transport failure");
        })?;

        // 6. Wrap, binding the originating request and negotiation state.
        let status = wire.status;
        let reason = wire
            .reason
            .unwrap_or_else(|| canonical_reason(status).to_string());
        info!(status, "received response");

        let headers: HashMap<String, String> = wire.headers.into_iter().collect();
        let response = Response::new(
            status,
            reason,
            headers,
            wire.body,
            request,
            self.settings.serializers().clone(),
            self.settings.default_format(),
        );

        // 7. Post-receive handlers observe the response.
        for handler in self.settings.response_handlers() {
            handler.handle(&response).await?;
        }

        Ok(response)
    }

    /// Build the outgoing message: URL, merged headers, composed content.
    fn translate(&self, request: &Request) -> Result<TransportRequest> {
        let path = request.resolved_path()?;
        let mut url = self.settings.base_url().join(&path)?;

        let query = request.query_pairs();
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &query {
                pairs.append_pair(name, value);
            }
        }

        // Client defaults merge first, request headers after.
        let mut headers = self.settings.default_headers().to_vec();
        headers.extend(request.header_pairs());

        let content = compose(
            request,
            self.settings.serializers(),
            self.settings.default_format(),
        )?;
        let body = content.map(|content| {
            headers.push(("Content-Type".to_string(), content.wire_content_type()));
            content.into_bytes()
        });

        Ok(TransportRequest {
            method: request.method(),
            url,
            headers,
            body,
        })
    }
}

/// Canonical reason phrase for a status code, for transports that do not
/// surface one.
fn canonical_reason(status: u16) -> &'static str {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use talon_core::{ContentFormat, Request};

    use super::*;

    fn client() -> RestClient {
        RestClient::build(|settings| {
            settings
                .base_url("http://example.com/api")
                .default_format(ContentFormat::Json)
                .default_header("Accept", "application/json")
                .use_json_serializer()
        })
        .expect("client")
    }

    #[test]
    fn translate_joins_resource_and_query() {
        let request = Request::get()
            .to_args("users/{0}", [42])
            .with_query("active", true)
            .build()
            .expect("request");

        let message = client().translate(&request).expect("message");
        assert_eq!(
            message.url.as_str(),
            "http://example.com/api/users/42?active=true"
        );
        assert!(message.body.is_none());
    }

    #[test]
    fn translate_merges_default_headers_first() {
        let request = Request::get()
            .to("items")
            .with_header("X-Request-Id", "abc")
            .build()
            .expect("request");

        let message = client().translate(&request).expect("message");
        assert_eq!(
            message.headers.first(),
            Some(&("Accept".to_string(), "application/json".to_string()))
        );
        assert_eq!(message.header("X-Request-Id"), Some("abc"));
    }

    #[test]
    fn translate_tags_composed_content() {
        let request = Request::post()
            .to("orders")
            .with_json_body(&serde_json::json!({"id": 1}))
            .expect("body")
            .build()
            .expect("request");

        let message = client().translate(&request).expect("message");
        assert!(message.body.is_some());
        assert!(
            message
                .header("Content-Type")
                .is_some_and(|ct| ct.starts_with("application/json"))
        );
    }

    #[test]
    fn translate_rejects_unbound_placeholders() {
        let request = Request::get()
            .to("users/{id}")
            .build()
            .expect("request");

        let err = client().translate(&request).expect_err("unbound");
        assert!(err.is_validation());
    }

    #[test]
    fn canonical_reason_lookup() {
        assert_eq!(canonical_reason(404), "Not Found");
        assert_eq!(canonical_reason(200), "OK");
        assert_eq!(canonical_reason(299), "");
    }
}
