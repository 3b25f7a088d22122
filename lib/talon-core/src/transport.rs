//! Transport contract: the sole network I/O boundary.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use url::Url;

use crate::{Method, Result};

/// Boxed future used by the dyn-compatible collaborator traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A fully translated outgoing message, ready for the wire.
///
/// Pre-send handlers receive this message mutably; everything the request
/// model knew has already been resolved into plain HTTP pieces.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URL, query string included.
    pub url: Url,
    /// Header pairs in merge order (client defaults first).
    pub headers: Vec<(String, String)>,
    /// Composed body payload, if any.
    pub body: Option<Bytes>,
}

impl TransportRequest {
    /// First header value with the given name, case-insensitive.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Replace a header, or append it when absent.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            slot.1 = value;
        } else {
            self.headers.push((name, value));
        }
    }
}

/// A raw response as produced by a transport.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase, when the transport surfaces one.
    pub reason: Option<String>,
    /// Response header pairs.
    pub headers: Vec<(String, String)>,
    /// Raw response payload.
    pub body: Bytes,
}

/// Sends one translated message over the wire.
///
/// This is the single suspension point where caller cancellation (dropping
/// the dispatch future) takes effect directly. Implementations are shared
/// across concurrent dispatches and must be reentrant.
pub trait Transport: Send + Sync {
    /// Perform the exchange.
    ///
    /// # Errors
    ///
    /// Transport failures must surface as [`crate::Error::Network`] and are
    /// propagated by the dispatcher unmodified.
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<TransportResponse>>;
}
