//! Error and warning types for schema graph construction.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Fatal errors raised while building a schema graph.
///
/// Any of these aborts the enclosing build; no partial graph is returned.
#[derive(Debug, Clone, Error)]
pub enum BuildError {
    #[error("malformed schema at {pointer}: {message}")]
    MalformedSchema { pointer: String, message: String },

    #[error("unresolvable reference \"{reference}\" (target {pointer})")]
    UnresolvableReference { pointer: String, reference: String },

    #[error("failed to fetch {url}: {reason}")]
    RemoteFetch { url: String, reason: FetchFailure },

    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("conflicting {keyword} in allOf at {pointer}: {left} vs {right} ({detail})")]
    SchemaConflict {
        pointer: String,
        keyword: String,
        left: String,
        right: String,
        detail: String,
    },
}

/// Coarse category of a [`BuildError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MalformedSchema,
    UnresolvableReference,
    RemoteFetch,
    FileNotFound,
    SchemaConflict,
}

impl BuildError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildError::MalformedSchema { .. } => ErrorKind::MalformedSchema,
            BuildError::UnresolvableReference { .. } => ErrorKind::UnresolvableReference,
            BuildError::RemoteFetch { .. } => ErrorKind::RemoteFetch,
            BuildError::FileNotFound { .. } => ErrorKind::FileNotFound,
            BuildError::SchemaConflict { .. } => ErrorKind::SchemaConflict,
        }
    }

    pub(crate) fn malformed(pointer: impl ToString, message: impl Into<String>) -> Self {
        BuildError::MalformedSchema {
            pointer: pointer.to_string(),
            message: message.into(),
        }
    }
}

/// Why a remote document could not be obtained.
///
/// `Clone` so a single in-flight fetch can hand its outcome to every waiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("timed out")]
    Timeout,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed content: {0}")]
    Malformed(String),

    #[error("remote references are disabled")]
    Disabled,
}

/// Errors from the document registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("document {uri} is already registered with different content")]
    DuplicateDocument { uri: String },

    #[error("unknown document: {uri}")]
    UnknownDocument { uri: String },
}

/// Category of a non-fatal issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    UnknownFormat,
    DeprecatedKeyword,
    IgnoredKeyword,
    RecursiveComposition,
    UnsupportedReference,
}

/// A non-fatal issue reported alongside a successful graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    /// Canonical pointer of the node the issue was found on.
    pub pointer: String,
    pub message: String,
}

impl Warning {
    pub(crate) fn new(
        kind: WarningKind,
        pointer: impl ToString,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            pointer: pointer.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.pointer, self.message)
    }
}
