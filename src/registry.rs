//! Session-scoped store of raw schema documents.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::RegistryError;
use crate::pointer::DocumentUri;

/// Raw documents keyed by canonical URI.
///
/// Holds no resolution logic. One registry belongs to one build session.
#[derive(Debug, Default)]
pub struct DocumentRegistry {
    documents: HashMap<DocumentUri, Value>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document under `uri`.
    ///
    /// Registering identical content twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateDocument` if `uri` already holds
    /// different content.
    pub fn register(&mut self, uri: DocumentUri, document: Value) -> Result<(), RegistryError> {
        match self.documents.get(&uri) {
            Some(existing) if *existing == document => Ok(()),
            Some(_) => Err(RegistryError::DuplicateDocument {
                uri: uri.to_string(),
            }),
            None => {
                self.documents.insert(uri, document);
                Ok(())
            }
        }
    }

    /// Look up a document.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownDocument` when `uri` was never registered.
    pub fn lookup(&self, uri: &DocumentUri) -> Result<&Value, RegistryError> {
        self.documents
            .get(uri)
            .ok_or_else(|| RegistryError::UnknownDocument {
                uri: uri.to_string(),
            })
    }

    pub fn contains(&self, uri: &DocumentUri) -> bool {
        self.documents.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Hand the raw documents over, e.g. to the finished graph.
    pub fn into_documents(self) -> HashMap<DocumentUri, Value> {
        self.documents
    }
}
