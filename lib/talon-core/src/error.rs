//! Error types for talon.

use derive_more::{Display, Error, From};

/// Classification of an HTTP failure status, derived on demand from the
/// status code by [`Error::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum StatusKind {
    /// 400 Bad Request.
    #[display("bad request")]
    BadRequest,
    /// 401 Unauthorized.
    #[display("unauthorized")]
    Unauthorized,
    /// 403 Forbidden.
    #[display("forbidden")]
    Forbidden,
    /// 404 Not Found.
    #[display("not found")]
    NotFound,
    /// 409 Conflict.
    #[display("conflict")]
    Conflict,
    /// Any other non-success status.
    #[display("http status")]
    Other,
}

impl StatusKind {
    /// Classify a status code.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            _ => Self::Other,
        }
    }
}

/// Main error type for talon operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Malformed request composition (empty method, duplicate or unnamed
    /// multipart part, nested multipart, unbound route placeholder).
    #[display("invalid request: {_0}")]
    #[from(skip)]
    Validation(#[error(not(source))] String),

    /// Missing or inconsistent client configuration (no base URL,
    /// unresolved content format, no matching serializer).
    #[display("configuration error: {_0}")]
    #[from(skip)]
    Configuration(#[error(not(source))] String),

    /// Authentication was requested but no authenticator could be resolved.
    #[display("authentication required: {_0}")]
    #[from(skip)]
    AuthenticationRequired(#[error(not(source))] String),

    /// Transport failure, propagated unmodified from the send step.
    #[display("network error: {_0}")]
    #[from(skip)]
    Network(#[error(not(source))] String),

    /// An HTTP failure status, materialized only on explicit caller request.
    #[display("{kind} ({status}): {reason}")]
    #[from(skip)]
    Status {
        /// Classification of the status code.
        kind: StatusKind,
        /// HTTP status code.
        status: u16,
        /// Reason phrase carried by the response.
        reason: String,
    },

    /// JSON serialization error.
    #[display("JSON error: {_0}")]
    #[from]
    Json(serde_json::Error),

    /// Form (key-value) serialization error.
    #[display("form encoding error: {_0}")]
    #[from]
    Form(serde_html_form::ser::Error),

    /// Body decoding error with path context.
    #[display("decode error at '{path}': {message}")]
    #[from(skip)]
    Decode {
        /// Path to the failing element (empty for syntax-level failures).
        path: String,
        /// Error message.
        message: String,
    },

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an authentication-required error.
    #[must_use]
    pub fn authentication_required(message: impl Into<String>) -> Self {
        Self::AuthenticationRequired(message.into())
    }

    /// Create a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a status error from a status code and reason phrase.
    ///
    /// The kind is derived from the code: 400, 401, 403, 404 and 409 map to
    /// their dedicated kinds, everything else to [`StatusKind::Other`].
    #[must_use]
    pub fn status(status: u16, reason: impl Into<String>) -> Self {
        Self::Status {
            kind: StatusKind::from_status(status),
            status,
            reason: reason.into(),
        }
    }

    /// Create a decode error with path context.
    #[must_use]
    pub fn decode(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the HTTP status code if this is a status error.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the status classification if this is a status error.
    #[must_use]
    pub const fn status_kind(&self) -> Option<StatusKind> {
        match self {
            Self::Status { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns `true` if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Returns `true` if this is an authentication-required error.
    #[must_use]
    pub const fn is_authentication_required(&self) -> bool {
        matches!(self, Self::AuthenticationRequired(_))
    }

    /// Returns `true` if this is a network error.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Returns `true` if this is a 404 status error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status_kind() == Some(StatusKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::validation("a part must be named");
        assert_eq!(err.to_string(), "invalid request: a part must be named");

        let err = Error::configuration("content format not set");
        assert_eq!(
            err.to_string(),
            "configuration error: content format not set"
        );

        let err = Error::status(404, "Not Found");
        assert_eq!(err.to_string(), "not found (404): Not Found");
    }

    #[test]
    fn status_kind_mapping() {
        assert_eq!(StatusKind::from_status(400), StatusKind::BadRequest);
        assert_eq!(StatusKind::from_status(401), StatusKind::Unauthorized);
        assert_eq!(StatusKind::from_status(403), StatusKind::Forbidden);
        assert_eq!(StatusKind::from_status(404), StatusKind::NotFound);
        assert_eq!(StatusKind::from_status(409), StatusKind::Conflict);
        assert_eq!(StatusKind::from_status(500), StatusKind::Other);
        assert_eq!(StatusKind::from_status(418), StatusKind::Other);
    }

    #[test]
    fn status_error_accessors() {
        let err = Error::status(409, "Conflict");
        assert_eq!(err.status_code(), Some(409));
        assert_eq!(err.status_kind(), Some(StatusKind::Conflict));
        assert!(!err.is_not_found());

        let err = Error::status(404, "Not Found");
        assert!(err.is_not_found());

        let err = Error::network("connection refused");
        assert_eq!(err.status_code(), None);
        assert!(err.is_network());
    }

    #[test]
    fn predicates() {
        assert!(Error::validation("x").is_validation());
        assert!(Error::configuration("x").is_configuration());
        assert!(Error::authentication_required("x").is_authentication_required());
        assert!(!Error::validation("x").is_configuration());
    }
}
