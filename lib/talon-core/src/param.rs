//! Request parameters and route templating.
//!
//! A [`Parameter`] is one piece of a request under construction: a route
//! binding, a query pair, a header, a body, or a file attachment. There is
//! no other kind.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::{Error, ParamValue, RequestBody, RequestFile, Result};

/// Encoding set for route segment values: unreserved characters pass
/// through, everything that would break a path segment is escaped.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'%');

/// The kind of a request parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Route template binding.
    Route,
    /// Query string pair.
    QueryString,
    /// Header pair.
    Header,
    /// Request body.
    Body,
    /// File attachment.
    File,
}

/// One piece of a request: a named value bound to a location, a body, or a
/// file attachment.
#[derive(Debug, Clone)]
pub enum Parameter {
    /// A route template binding, filled into the resource template.
    Route {
        /// Placeholder name.
        name: String,
        /// Bound value.
        value: ParamValue,
    },
    /// A query string pair, appended to the request URL.
    QueryString {
        /// Query key.
        name: String,
        /// Query value.
        value: ParamValue,
    },
    /// A header pair.
    Header {
        /// Header name.
        name: String,
        /// Header value.
        value: ParamValue,
    },
    /// The request body.
    Body(RequestBody),
    /// A file attachment.
    File(RequestFile),
}

impl Parameter {
    /// Create a route parameter.
    pub fn route(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self::Route {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a query string parameter.
    pub fn query(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self::QueryString {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a header parameter.
    pub fn header(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self::Header {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The parameter kind.
    #[must_use]
    pub const fn kind(&self) -> ParamKind {
        match self {
            Self::Route { .. } => ParamKind::Route,
            Self::QueryString { .. } => ParamKind::QueryString,
            Self::Header { .. } => ParamKind::Header,
            Self::Body(_) => ParamKind::Body,
            Self::File(_) => ParamKind::File,
        }
    }

    /// The parameter name, when it carries one (bodies may be unnamed).
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Route { name, .. } | Self::QueryString { name, .. } | Self::Header { name, .. } => {
                Some(name.as_str())
            }
            Self::Body(body) => body.name(),
            Self::File(file) => Some(file.name()),
        }
    }
}

/// Convert key/value pairs into a parameter list of the given kind.
///
/// This is the explicit structured construction replacing runtime record
/// inspection: callers hand over a map or pair list they built themselves.
/// Body pairs become named body parts; file parameters cannot be built
/// from bare pairs because they need a payload.
pub fn params_from_pairs<I, K, V>(kind: ParamKind, pairs: I) -> Result<Vec<Parameter>>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<ParamValue>,
{
    pairs
        .into_iter()
        .map(|(name, value)| {
            let name = name.into();
            if name.is_empty() {
                return Err(Error::validation("a parameter must be named"));
            }
            let value = value.into();
            Ok(match kind {
                ParamKind::Route => Parameter::Route { name, value },
                ParamKind::QueryString => Parameter::QueryString { name, value },
                ParamKind::Header => Parameter::Header { name, value },
                ParamKind::Body => Parameter::Body(RequestBody::new(value).with_name(name)),
                ParamKind::File => {
                    return Err(Error::validation(
                        "file parameters require a payload and cannot be built from pairs",
                    ));
                }
            })
        })
        .collect()
}

/// Convert a JSON object into a parameter list of the given kind, with the
/// deterministic key order of the underlying map.
pub fn params_from_value(kind: ParamKind, values: &serde_json::Value) -> Result<Vec<Parameter>> {
    let object = values.as_object().ok_or_else(|| {
        Error::validation("bulk parameter conversion expects a JSON object of key/value pairs")
    })?;
    params_from_pairs(
        kind,
        object.iter().map(|(k, v)| (k.clone(), ParamValue::from(v.clone()))),
    )
}

/// Fill a resource template with route bindings.
///
/// Each `{name}` placeholder is replaced by the percent-encoded text of the
/// binding with that name, in binding order. A placeholder left unresolved
/// after all bindings are applied is a validation error.
pub fn fill_template(template: &str, routes: &[(String, String)]) -> Result<String> {
    let mut path = template.to_string();
    for (name, value) in routes {
        let placeholder = format!("{{{name}}}");
        let encoded = utf8_percent_encode(value, PATH_SEGMENT_ENCODE_SET).to_string();
        path = path.replace(&placeholder, &encoded);
    }

    if let Some(start) = path.find('{') {
        let rest = path.get(start..).unwrap_or_default();
        let placeholder = rest
            .find('}')
            .and_then(|end| rest.get(..=end))
            .unwrap_or(rest);
        return Err(Error::validation(format!(
            "unbound route placeholder {placeholder} in resource `{template}`"
        )));
    }

    Ok(path)
}
