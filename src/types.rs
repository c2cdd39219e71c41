//! Core vocabulary: primitive kinds, known formats and build options.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default timeout for remote fetches (10 seconds).
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Keywords that never restrict the shape of an instance.
pub const ANNOTATION_KEYWORDS: &[&str] = &[
    "$schema",
    "$id",
    "id",
    "$comment",
    "title",
    "description",
    "examples",
    "default",
    "deprecated",
    "readOnly",
    "writeOnly",
    "definitions",
    "$defs",
];

/// Keywords the builder understands. Anything else is passed through as-is.
pub const MODELLED_KEYWORDS: &[&str] = &[
    "$ref",
    "type",
    "format",
    "enum",
    "const",
    "properties",
    "required",
    "additionalProperties",
    "items",
    "allOf",
    "anyOf",
    "oneOf",
    "not",
    "if",
    "then",
    "else",
    "minimum",
    "maximum",
    "exclusiveMinimum",
    "exclusiveMaximum",
    "multipleOf",
    "minLength",
    "maxLength",
    "pattern",
    "minItems",
    "maxItems",
    "uniqueItems",
    "minProperties",
    "maxProperties",
];

/// A JSON Schema primitive type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    /// Parse a `type` keyword value.
    ///
    /// Returns `None` for unknown names (caller should error).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "null" => Some(Kind::Null),
            "boolean" => Some(Kind::Boolean),
            "integer" => Some(Kind::Integer),
            "number" => Some(Kind::Number),
            "string" => Some(Kind::String),
            "array" => Some(Kind::Array),
            "object" => Some(Kind::Object),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }

    /// Kind of a literal value, e.g. an `enum` member. Integral numbers are
    /// `Integer`.
    pub fn of_value(value: &Value) -> Kind {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0) {
                    Kind::Integer
                } else {
                    Kind::Number
                }
            }
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Intersection of two kinds, treating `integer` as a subset of `number`.
    pub fn meet(self, other: Kind) -> Option<Kind> {
        match (self, other) {
            (a, b) if a == b => Some(a),
            (Kind::Integer, Kind::Number) | (Kind::Number, Kind::Integer) => Some(Kind::Integer),
            _ => None,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized `format` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    DateTime,
    Date,
    Time,
    Duration,
    Email,
    IdnEmail,
    Hostname,
    IdnHostname,
    Ipv4,
    Ipv6,
    Uri,
    UriReference,
    Iri,
    IriReference,
    UriTemplate,
    Uuid,
    JsonPointer,
    RelativeJsonPointer,
    Regex,
    Byte,
    Binary,
    Password,
    Int32,
    Int64,
    Float,
    Double,
}

const STRING: &[Kind] = &[Kind::String];
const INTEGRAL: &[Kind] = &[Kind::Integer, Kind::Number];
const FLOATING: &[Kind] = &[Kind::Number];

/// Format name, variant, and the kinds it applies to.
const FORMAT_TABLE: &[(&str, Format, &[Kind])] = &[
    ("date-time", Format::DateTime, STRING),
    ("date", Format::Date, STRING),
    ("time", Format::Time, STRING),
    ("duration", Format::Duration, STRING),
    ("email", Format::Email, STRING),
    ("idn-email", Format::IdnEmail, STRING),
    ("hostname", Format::Hostname, STRING),
    ("idn-hostname", Format::IdnHostname, STRING),
    ("ipv4", Format::Ipv4, STRING),
    ("ipv6", Format::Ipv6, STRING),
    ("uri", Format::Uri, STRING),
    ("uri-reference", Format::UriReference, STRING),
    ("iri", Format::Iri, STRING),
    ("iri-reference", Format::IriReference, STRING),
    ("uri-template", Format::UriTemplate, STRING),
    ("uuid", Format::Uuid, STRING),
    ("json-pointer", Format::JsonPointer, STRING),
    ("relative-json-pointer", Format::RelativeJsonPointer, STRING),
    ("regex", Format::Regex, STRING),
    ("byte", Format::Byte, STRING),
    ("binary", Format::Binary, STRING),
    ("password", Format::Password, STRING),
    ("int32", Format::Int32, INTEGRAL),
    ("int64", Format::Int64, INTEGRAL),
    ("float", Format::Float, FLOATING),
    ("double", Format::Double, FLOATING),
];

impl Format {
    /// Look up `name` for a value of `kind`.
    ///
    /// Returns `None` when the name is unknown or doesn't apply to `kind`.
    pub fn lookup(kind: Kind, name: &str) -> Option<Format> {
        FORMAT_TABLE
            .iter()
            .find(|(n, _, kinds)| *n == name && kinds.contains(&kind))
            .map(|(_, format, _)| *format)
    }

    pub fn as_str(&self) -> &'static str {
        FORMAT_TABLE
            .iter()
            .find(|(_, format, _)| format == self)
            .map(|(name, _, _)| *name)
            .unwrap_or("")
    }
}

/// Options for one graph build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Upper bound for each remote fetch.
    pub fetch_timeout: Duration,
    /// When false, remote references fail with `FetchFailure::Disabled`
    /// instead of reaching the network.
    pub allow_remote: bool,
    /// Directory for file-relative references found in in-memory documents.
    pub base_dir: PathBuf,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            allow_remote: true,
            base_dir: PathBuf::from("."),
        }
    }
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the remote fetch timeout.
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Allow or forbid remote references.
    pub fn allow_remote(mut self, allow: bool) -> Self {
        self.allow_remote = allow;
        self
    }

    /// Set the base directory for relative references in in-memory documents.
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }
}
