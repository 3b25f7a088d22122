//! Shipped authenticators.
//!
//! Both inject an `Authorization` header into the request during dispatch,
//! through the augmentation surface reserved for authenticators.

use std::sync::Arc;

use base64::Engine;

use crate::{Authenticator, Request, RequestBuilder, Result};

/// Basic authentication with pre-encoded credentials.
#[derive(Debug, Clone)]
pub struct BasicAuthenticator {
    /// Base64-encoded "username:password".
    encoded_credentials: Arc<str>,
}

impl BasicAuthenticator {
    /// Create a basic authenticator from a username and password.
    pub fn new(username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        let credentials = format!("{}:{}", username.as_ref(), password.as_ref());
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        Self {
            encoded_credentials: Arc::from(encoded),
        }
    }
}

impl Authenticator for BasicAuthenticator {
    fn authenticate(&self, request: &mut Request) -> Result<()> {
        request.insert_header(
            "Authorization",
            format!("Basic {}", self.encoded_credentials),
        );
        Ok(())
    }
}

/// Bearer token authentication.
#[derive(Debug, Clone)]
pub struct BearerAuthenticator {
    token: Arc<str>,
}

impl BearerAuthenticator {
    /// Create a bearer authenticator from a token.
    pub fn new(token: impl AsRef<str>) -> Self {
        Self {
            token: Arc::from(token.as_ref()),
        }
    }
}

impl Authenticator for BearerAuthenticator {
    fn authenticate(&self, request: &mut Request) -> Result<()> {
        request.insert_header("Authorization", format!("Bearer {}", self.token));
        Ok(())
    }
}

/// Builder sugar for attaching the shipped authenticators to a request.
pub trait AuthBuilderExt {
    /// Authenticate this request with basic credentials.
    #[must_use]
    fn use_basic_auth(self, username: impl AsRef<str>, password: impl AsRef<str>) -> Self;

    /// Authenticate this request with a bearer token.
    #[must_use]
    fn use_bearer_auth(self, token: impl AsRef<str>) -> Self;
}

impl AuthBuilderExt for RequestBuilder {
    fn use_basic_auth(self, username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        self.use_authenticator(Arc::new(BasicAuthenticator::new(username, password)))
    }

    fn use_bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.use_authenticator(Arc::new(BearerAuthenticator::new(token)))
    }
}

#[cfg(test)]
mod tests {
    use talon_core::Request;

    use super::*;

    #[test]
    fn basic_auth_encodes_credentials() {
        // "user:pass" -> "dXNlcjpwYXNz"
        let auth = BasicAuthenticator::new("user", "pass");
        assert_eq!(&*auth.encoded_credentials, "dXNlcjpwYXNz");
    }

    #[test]
    fn basic_auth_injects_header() {
        let mut request = Request::get().to("items").build().expect("request");
        BasicAuthenticator::new("user", "pass")
            .authenticate(&mut request)
            .expect("authenticate");

        let headers = request.header_pairs();
        assert_eq!(
            headers.first(),
            Some(&(
                "Authorization".to_string(),
                "Basic dXNlcjpwYXNz".to_string()
            ))
        );
    }

    #[test]
    fn bearer_auth_injects_header() {
        let mut request = Request::get().to("items").build().expect("request");
        BearerAuthenticator::new("token123")
            .authenticate(&mut request)
            .expect("authenticate");

        let headers = request.header_pairs();
        assert_eq!(
            headers.first(),
            Some(&("Authorization".to_string(), "Bearer token123".to_string()))
        );
    }

    #[test]
    fn builder_ext_sets_override() {
        let request = Request::get()
            .to("private")
            .use_bearer_auth("tok")
            .authenticate(true)
            .build()
            .expect("request");
        assert!(request.authenticator().is_some());
        assert_eq!(request.authenticate(), Some(true));
    }
}
