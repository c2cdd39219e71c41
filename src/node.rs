//! Raw schema node shape, validated once when a pointer target is read.

use serde_json::{Map, Value};

use crate::error::BuildError;
use crate::pointer::CanonicalPointer;

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A schema node as found in the document: either a boolean schema or a
/// keyword object.
#[derive(Debug, Clone, PartialEq)]
pub enum RawNode {
    /// `true` accepts anything, `false` accepts nothing.
    Bool(bool),
    Object(Map<String, Value>),
}

impl RawNode {
    /// Classify a value found at `pointer`.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::MalformedSchema` for anything that is not an
    /// object or a boolean.
    pub fn from_value(value: &Value, pointer: &CanonicalPointer) -> Result<Self, BuildError> {
        match value {
            Value::Bool(b) => Ok(RawNode::Bool(*b)),
            Value::Object(map) => Ok(RawNode::Object(map.clone())),
            other => Err(BuildError::malformed(
                pointer,
                format!("expected object or boolean schema, got {}", json_type_name(other)),
            )),
        }
    }

    /// The `$ref` value, if this node is a reference.
    pub fn reference(&self) -> Option<&str> {
        match self {
            RawNode::Object(map) => map.get("$ref").and_then(Value::as_str),
            RawNode::Bool(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            RawNode::Object(map) => Some(map),
            RawNode::Bool(_) => None,
        }
    }
}
