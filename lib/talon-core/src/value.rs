//! Parameter values.
//!
//! [`ParamValue`] is the typed carrier for everything a caller can attach
//! to a request: route and query arguments, header values, and bodies.
//! Scalars stringify directly; structured values go through a registered
//! serializer at composition time.

use serde_json::Value;

/// A typed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Text value.
    Text(String),
    /// Integer value.
    Integer(i64),
    /// Floating-point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// A structured value (object, array, or JSON null) that requires a
    /// serializer to become wire content.
    Structured(Value),
}

impl ParamValue {
    /// Returns `true` for simple scalar values that stringify without a
    /// serializer.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::Structured(_))
    }

    /// Stringify the value for use in a route segment, query pair, header,
    /// or plain-text body.
    ///
    /// Structured values render as compact JSON; this is only used where a
    /// structured value ended up in a textual position (headers, queries).
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Structured(v) => v.to_string(),
        }
    }

    /// The structured payload, when this value carries one.
    #[must_use]
    pub const fn as_structured(&self) -> Option<&Value> {
        match self {
            Self::Structured(v) => Some(v),
            _ => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Value> for ParamValue {
    /// JSON scalars normalize into the matching scalar variant; objects,
    /// arrays and null stay structured.
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(0.0)), Self::Integer),
            other => Self::Structured(other),
        }
    }
}
