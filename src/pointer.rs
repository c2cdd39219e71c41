//! Canonical node identity: a document URI paired with a JSON Pointer path.
//!
//! Every schema node is addressed by a [`CanonicalPointer`]. Two references that
//! normalize to the same pointer are the same node for caching and cycle detection.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;
use serde::{Serialize, Serializer};
use url::Url;

use crate::error::BuildError;

/// Pointer tokens that name a keyword rather than a user-chosen name.
const SKIPPED_NAME_TOKENS: &[&str] = &[
    "properties",
    "patternProperties",
    "definitions",
    "$defs",
    "allOf",
    "anyOf",
    "oneOf",
];

/// Location of a schema document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentUri {
    /// A file on disk, lexically normalized.
    File(PathBuf),
    /// An http(s) document, without fragment.
    Remote(Url),
    /// A document handed over in memory under a caller-chosen name.
    Memory(String),
}

impl DocumentUri {
    /// Create a file URI, normalizing `.` and `..` components.
    pub fn file(path: impl AsRef<Path>) -> Self {
        DocumentUri::File(normalize_path(path.as_ref()))
    }

    /// Create a remote URI, dropping any fragment.
    pub fn remote(mut url: Url) -> Self {
        url.set_fragment(None);
        DocumentUri::Remote(url)
    }

    /// Create an in-memory document name.
    pub fn memory(name: impl Into<String>) -> Self {
        DocumentUri::Memory(name.into())
    }

    /// Resolve the document part of a `$ref` against this document.
    ///
    /// In-memory documents resolve relative paths against `base_dir`.
    pub fn join(&self, reference: &str, base_dir: &Path) -> Result<DocumentUri, String> {
        if is_url(reference) || reference.starts_with("file:") {
            let url = Url::parse(reference).map_err(|e| e.to_string())?;
            return DocumentUri::from_url(url);
        }

        match self {
            DocumentUri::Remote(base) => {
                let url = base.join(reference).map_err(|e| e.to_string())?;
                DocumentUri::from_url(url)
            }
            DocumentUri::File(path) => {
                let dir = path.parent().unwrap_or_else(|| Path::new(""));
                Ok(DocumentUri::file(dir.join(reference)))
            }
            DocumentUri::Memory(_) => Ok(DocumentUri::file(base_dir.join(reference))),
        }
    }

    fn from_url(url: Url) -> Result<DocumentUri, String> {
        match url.scheme() {
            "http" | "https" => Ok(DocumentUri::remote(url)),
            "file" => url
                .to_file_path()
                .map(DocumentUri::file)
                .map_err(|()| format!("not a local file URL: {}", url)),
            other => Err(format!("unsupported URL scheme \"{}\"", other)),
        }
    }

    /// Short stem used to name a document root.
    fn stem(&self) -> String {
        let name = match self {
            DocumentUri::File(path) => path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("")
                .to_string(),
            DocumentUri::Remote(url) => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .unwrap_or("")
                .to_string(),
            DocumentUri::Memory(name) => name.clone(),
        };
        let name = name.split('.').next().unwrap_or("");
        pascal_case(name)
    }
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentUri::File(path) => write!(f, "{}", path.display()),
            DocumentUri::Remote(url) => write!(f, "{}", url),
            DocumentUri::Memory(name) => write!(f, "{}", name),
        }
    }
}

/// Normalized `(document, JSON Pointer)` identity of a schema node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalPointer {
    document: DocumentUri,
    /// RFC 6901 pointer; empty for the document root.
    path: String,
}

impl CanonicalPointer {
    /// Pointer to `path` inside `document`. `path` is an RFC 6901 pointer
    /// (empty or starting with `/`).
    pub fn new(document: DocumentUri, path: impl Into<String>) -> Self {
        Self {
            document,
            path: path.into(),
        }
    }

    /// Pointer to the root of `document`.
    pub fn root(document: DocumentUri) -> Self {
        Self::new(document, "")
    }

    pub fn document(&self) -> &DocumentUri {
        &self.document
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Pointer to a child member, escaping `~` and `/` in the token.
    pub fn child(&self, token: &str) -> Self {
        let escaped = token.replace('~', "~0").replace('/', "~1");
        Self {
            document: self.document.clone(),
            path: format!("{}/{}", self.path, escaped),
        }
    }

    /// Pointer to an array element.
    pub fn index(&self, index: usize) -> Self {
        self.child(&index.to_string())
    }

    /// Unescaped pointer tokens.
    pub fn tokens(&self) -> impl Iterator<Item = String> + '_ {
        self.path
            .split('/')
            .skip(1)
            .map(|t| t.replace("~1", "/").replace("~0", "~"))
    }

    /// Parse a `$ref` value relative to the node that holds it.
    ///
    /// Supports `#/local/path`, `relative/file.json#/path` and
    /// `http(s)://host/doc.json#/path`. The fragment is percent-decoded.
    /// Anchor fragments (`#name`) are rejected.
    pub fn parse_reference(
        reference: &str,
        base: &CanonicalPointer,
        base_dir: &Path,
    ) -> Result<CanonicalPointer, BuildError> {
        let (document_part, fragment) = match reference.find('#') {
            Some(idx) => (&reference[..idx], &reference[idx + 1..]),
            None => (reference, ""),
        };

        let unresolvable = |pointer: String| BuildError::UnresolvableReference {
            pointer,
            reference: reference.to_string(),
        };

        let document = if document_part.is_empty() {
            base.document.clone()
        } else {
            base.document
                .join(document_part, base_dir)
                .map_err(|message| unresolvable(format!("{} ({})", base, message)))?
        };

        match decode_fragment(fragment) {
            Some(path) => Ok(CanonicalPointer::new(document, path)),
            None => Err(unresolvable(format!("{}#{}", document, fragment))),
        }
    }

    /// Deterministic type-like name derived from the pointer path.
    ///
    /// `#/definitions/Node` gives `Node`, `#/properties/children/items` gives
    /// `ChildrenItems`, and the document root uses the document stem.
    pub fn derived_name(&self) -> String {
        let name: String = self
            .tokens()
            .filter(|t| !SKIPPED_NAME_TOKENS.contains(&t.as_str()))
            .map(|t| pascal_case(&t))
            .collect();

        if !name.is_empty() {
            return name;
        }
        let stem = self.document.stem();
        if stem.is_empty() {
            "Root".to_string()
        } else {
            stem
        }
    }
}

impl fmt::Display for CanonicalPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.document, self.path)
    }
}

impl Serialize for CanonicalPointer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Percent-decode a URI fragment into a JSON Pointer path. `None` for
/// anchors and fragments that are not UTF-8.
pub(crate) fn decode_fragment(fragment: &str) -> Option<String> {
    let path = percent_decode_str(fragment).decode_utf8().ok()?;
    if path.is_empty() || path.starts_with('/') {
        Some(path.into_owned())
    } else {
        None
    }
}

/// Check if a string looks like a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Lexically resolve `.` and `..` without touching the filesystem.
fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn pascal_case(s: &str) -> String {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
