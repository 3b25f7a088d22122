//! Prelude module for convenient imports.
//!
//! ```ignore
//! use talon::prelude::*;
//! ```

pub use crate::{
    AuthBuilderExt, Authenticator, BasicAuthenticator, BearerAuthenticator, BodySerializer,
    ClientSettings, ContentFormat, Error, FormSerializer, HyperTransport, JsonSerializer, Method,
    MultipartBody, ParamValue, Parameter, Request, RequestBody, RequestBuilder, RequestFile,
    RequestHandler, Response, ResponseHandler, RestClient, Result, Returns, StatusCode,
    StatusKind, Transport, TransportRequest, TransportResponse, header,
};
pub use serde::{Deserialize, Serialize};
