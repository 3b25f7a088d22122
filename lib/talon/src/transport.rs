//! Default transport backed by hyper-util.
//!
//! [`HyperTransport`] is the shipped [`Transport`]: a pooled hyper client
//! over a rustls HTTPS connector. Every failure it produces is a network
//! error, which the dispatcher propagates unmodified.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};

use crate::{BoxFuture, Error, Result, Transport, TransportRequest, TransportResponse};

/// HTTP transport using hyper-util with connection pooling and TLS.
#[derive(Clone)]
pub struct HyperTransport {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport").finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Create a transport with pooled connections and HTTPS support.
    #[must_use]
    pub fn new() -> Self {
        let inner = Client::builder(TokioExecutor::new()).build(https_connector());
        Self { inner }
    }

    fn build_http_request(request: TransportRequest) -> Result<http::Request<Full<Bytes>>> {
        let mut builder = http::Request::builder()
            .method(http::Method::from(request.method))
            .uri(request.url.as_str());

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let body = request.body.map_or_else(Full::default, Full::new);
        builder
            .body(body)
            .map_err(|e| Error::network(e.to_string()))
    }

    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        let http_request = Self::build_http_request(request)?;

        let response = self
            .inner
            .request(http_request)
            .await
            .map_err(|e| Error::network(e.to_string()))?;

        let status = response.status().as_u16();
        let reason = response.status().canonical_reason().map(str::to_string);
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| Error::network(e.to_string()))?
            .to_bytes();

        Ok(TransportResponse {
            status,
            reason,
            headers,
            body,
        })
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HyperTransport {
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<TransportResponse>> {
        Box::pin(self.execute(request))
    }
}

/// HTTPS connector with rustls and the Mozilla root certificates,
/// speaking HTTP/1.1 and HTTP/2.
fn https_connector() -> HttpsConnector<HttpConnector> {
    let root_store: rustls::RootCertStore =
        webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();

    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    HttpsConnectorBuilder::new()
        .with_tls_config(tls_config)
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .build()
}
