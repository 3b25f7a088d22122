//! Prelude module for convenient imports.
//!
//! ```ignore
//! use talon_core::prelude::*;
//! ```

pub use crate::{
    Authenticator, BodySerializer, Content, ContentFormat, Error, Method, MultipartBody,
    ParamValue, Parameter, Request, RequestBody, RequestBuilder, RequestFile, RequestHandler,
    Response, ResponseHandler, Result, Returns, SerializerRegistry, StatusKind, Transport,
    TransportRequest, TransportResponse, compose,
};
