//! Composable REST client for Rust.
//!
//! Assemble a request declaratively from typed pieces, then dispatch it
//! through a pluggable transport; the content format and authentication
//! are resolved only when the request is sent.
//!
//! # Example
//!
//! ```ignore
//! use talon::prelude::*;
//!
//! let client = RestClient::build(|settings| settings
//!     .base_url("https://api.example.com")
//!     .default_format(ContentFormat::Json)
//!     .use_json_serializer())?;
//!
//! let request = Request::get()
//!     .to_args("users/{0}", [42])
//!     .with_query("active", true)
//!     .returns_json()
//!     .build()?;
//!
//! let response = client.send(request).await?;
//! response.assert_successful()?;
//! let user: User = response.body()?;
//! ```

mod auth;
mod client;
pub mod prelude;
mod serializers;
mod settings;
mod transport;

pub use auth::{AuthBuilderExt, BasicAuthenticator, BearerAuthenticator};
pub use client::RestClient;
pub use serializers::{FormSerializer, JsonSerializer};
pub use settings::{ClientSettings, ClientSettingsBuilder};
pub use transport::HyperTransport;

// Re-export core types
pub use talon_core::{
    Authenticator, BodyContent, BodySerializer, BoxFuture, Content, ContentFormat, ContentPart,
    Error, Method, MultipartBody, MultipartContent, ParamKind, ParamValue, Parameter, Request,
    RequestBody, RequestBuilder, RequestFile, RequestHandler, Response, ResponseFile,
    ResponseHandler, Result, Returns, SerializerRegistry, StatusKind, Transport, TransportRequest,
    TransportResponse, compose, fill_template, params_from_pairs, params_from_value,
};

// Re-export http types for status codes and headers
pub use talon_core::{StatusCode, header};
