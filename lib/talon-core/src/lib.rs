//! Core types and traits for the talon REST client.
//!
//! This crate owns the request-composition and content-negotiation engine:
//! - [`Parameter`], [`ParamValue`] - typed request parameters
//! - [`Request`] and [`RequestBuilder`] - immutable requests and their builder
//! - [`RequestBody`], [`MultipartBody`], [`RequestFile`] - body model
//! - [`compose`] and [`Content`] - content composition
//! - [`Response`] - lazy body decoding and status mapping
//! - [`Error`] and [`Result`] - the error taxonomy
//! - [`BodySerializer`], [`Authenticator`], [`RequestHandler`],
//!   [`ResponseHandler`], [`Transport`] - pluggable collaborator contracts

mod auth;
mod body;
mod compose;
mod error;
mod file;
mod format;
mod handler;
mod method;
mod multipart;
mod param;
pub mod prelude;
mod request;
mod response;
mod serializer;
mod transport;
mod value;

pub use auth::Authenticator;
pub use body::{BodyContent, MultipartBody, RequestBody};
pub use compose::{Content, compose};
pub use error::{Error, Result, StatusKind};
pub use file::RequestFile;
pub use format::ContentFormat;
pub use handler::{RequestHandler, ResponseHandler};
pub use method::Method;
pub use multipart::{ContentPart, MultipartContent};
pub use param::{ParamKind, Parameter, fill_template, params_from_pairs, params_from_value};
pub use request::{Request, RequestBuilder, Returns};
pub use response::{Response, ResponseFile};
pub use serializer::{BodySerializer, SerializerRegistry};
pub use transport::{BoxFuture, Transport, TransportRequest, TransportResponse};
pub use value::ParamValue;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
