//! Authenticator contract.

use crate::{Request, Result};

/// Augments a request with credentials prior to send.
///
/// The dispatcher invokes an authenticator exactly once per dispatch,
/// before the request is translated into a transport message. The usual
/// implementation injects a header parameter through
/// [`Request::insert_header`]. Implementations capture whatever
/// configuration they need at construction.
pub trait Authenticator: Send + Sync {
    /// Augment the request in place.
    ///
    /// # Errors
    ///
    /// Returns an error when credentials cannot be produced; the dispatch
    /// aborts before any network I/O.
    fn authenticate(&self, request: &mut Request) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use crate::{Method, RequestBuilder};

    use super::*;

    struct HeaderStamp;

    impl Authenticator for HeaderStamp {
        fn authenticate(&self, request: &mut Request) -> Result<()> {
            request.insert_header("Authorization", "Token abc");
            Ok(())
        }
    }

    #[test]
    fn authenticator_injects_header() {
        let mut request = RequestBuilder::new()
            .method(Method::Get)
            .to("items")
            .build()
            .expect("request");

        HeaderStamp.authenticate(&mut request).expect("authenticate");

        let headers = request.header_pairs();
        assert_eq!(
            headers.first(),
            Some(&("Authorization".to_string(), "Token abc".to_string()))
        );
    }
}
