//! The finished schema graph and the arena it is built in.
//!
//! Nodes refer to each other by [`SchemaId`], so a self-referential schema is
//! a cycle of indices rather than of owned values.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{BuildError, Warning};
use crate::info::{SchemaId, SchemaInfo};
use crate::pointer::{CanonicalPointer, DocumentUri};

/// Read access to nodes by id.
pub trait SchemaLookup {
    /// Returns `None` for nodes that are not finished yet.
    fn lookup(&self, id: SchemaId) -> Option<&SchemaInfo>;
}

#[derive(Debug)]
enum Slot {
    Resolving {
        pointer: CanonicalPointer,
        recursive: bool,
    },
    Resolved(SchemaInfo),
}

/// Node storage during one build session.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    slots: Vec<Slot>,
}

impl Arena {
    /// Reserve an id for a node that is about to be built.
    pub(crate) fn reserve(&mut self, pointer: CanonicalPointer) -> SchemaId {
        self.slots.push(Slot::Resolving {
            pointer,
            recursive: false,
        });
        SchemaId(self.slots.len() - 1)
    }

    /// Store a finished node under its reserved id.
    pub(crate) fn fill(&mut self, id: SchemaId, mut info: SchemaInfo) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            if let Slot::Resolving { recursive, .. } = slot {
                info.recursive |= *recursive;
            }
            info.id = id;
            *slot = Slot::Resolved(info);
        }
    }

    /// Store a node that has no reserved slot (e.g. a merge result).
    pub(crate) fn push(&mut self, mut info: SchemaInfo) -> SchemaId {
        let id = SchemaId(self.slots.len());
        info.id = id;
        self.slots.push(Slot::Resolved(info));
        id
    }

    /// The id the next `push` or `reserve` will hand out.
    pub(crate) fn next_id(&self) -> SchemaId {
        SchemaId(self.slots.len())
    }

    pub(crate) fn is_resolving(&self, id: SchemaId) -> bool {
        matches!(self.slots.get(id.0), Some(Slot::Resolving { .. }))
    }

    pub(crate) fn mark_recursive(&mut self, id: SchemaId) {
        match self.slots.get_mut(id.0) {
            Some(Slot::Resolving { recursive, .. }) => *recursive = true,
            Some(Slot::Resolved(info)) => info.recursive = true,
            None => {}
        }
    }

    pub(crate) fn into_nodes(self) -> Result<Vec<SchemaInfo>, BuildError> {
        self.slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Resolved(info) => Ok(info),
                Slot::Resolving { pointer, .. } => Err(BuildError::malformed(
                    pointer,
                    "node was never finished",
                )),
            })
            .collect()
    }
}

impl SchemaLookup for Arena {
    fn lookup(&self, id: SchemaId) -> Option<&SchemaInfo> {
        match self.slots.get(id.0) {
            Some(Slot::Resolved(info)) => Some(info),
            _ => None,
        }
    }
}

/// Normalized description of every node reachable from a root schema.
#[derive(Debug, Serialize)]
pub struct SchemaGraph {
    root: SchemaId,
    nodes: Vec<SchemaInfo>,
    #[serde(skip)]
    index: HashMap<CanonicalPointer, SchemaId>,
    warnings: Vec<Warning>,
    #[serde(skip)]
    documents: HashMap<DocumentUri, Value>,
}

impl SchemaGraph {
    pub(crate) fn new(
        root: SchemaId,
        nodes: Vec<SchemaInfo>,
        index: HashMap<CanonicalPointer, SchemaId>,
        warnings: Vec<Warning>,
        documents: HashMap<DocumentUri, Value>,
    ) -> Self {
        Self {
            root,
            nodes,
            index,
            warnings,
            documents,
        }
    }

    pub fn root_id(&self) -> SchemaId {
        self.root
    }

    pub fn root(&self) -> &SchemaInfo {
        &self.nodes[self.root.0]
    }

    pub fn get(&self, id: SchemaId) -> Option<&SchemaInfo> {
        self.nodes.get(id.0)
    }

    /// Node for a declared pointer. `$ref` pointers map to their target.
    pub fn by_pointer(&self, pointer: &CanonicalPointer) -> Option<&SchemaInfo> {
        self.index.get(pointer).and_then(|id| self.get(*id))
    }

    pub fn nodes(&self) -> &[SchemaInfo] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Non-fatal issues found while building.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Nodes declared under `definitions` or `$defs` of any loaded document.
    pub fn definitions(&self) -> impl Iterator<Item = &SchemaInfo> {
        self.nodes.iter().filter(|info| {
            let mut tokens = info.pointer.tokens();
            matches!(
                (tokens.next().as_deref(), tokens.next(), tokens.next()),
                (Some("definitions" | "$defs"), Some(_), None)
            )
        })
    }

    /// The raw value at `pointer`, for keywords not reflected in the graph.
    pub fn raw(&self, pointer: &CanonicalPointer) -> Option<&Value> {
        self.documents
            .get(pointer.document())
            .and_then(|document| document.pointer(pointer.path()))
    }

    /// Documents loaded during the build.
    pub fn documents(&self) -> &HashMap<DocumentUri, Value> {
        &self.documents
    }
}

impl SchemaLookup for SchemaGraph {
    fn lookup(&self, id: SchemaId) -> Option<&SchemaInfo> {
        self.get(id)
    }
}
