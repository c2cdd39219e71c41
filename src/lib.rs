//! Schema Graph
//!
//! Builds a normalized, queryable graph from JSON Schema documents.
//!
//! The builder follows `$ref` across fragments, files and http(s) URLs,
//! merges `allOf` compositions so the most restrictive constraint wins, and
//! decides one type shape per node. Code generators, sample-data tools and
//! validators consume the resulting [`SchemaGraph`] instead of walking raw
//! JSON.
//!
//! # Example
//!
//! ```
//! use schema_graph::{BuildOptions, GraphBuilder, Kind, TypeDescriptor};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "title": "Pet",
//!     "type": "object",
//!     "required": ["name"],
//!     "properties": {
//!         "name": { "type": "string" },
//!         "age": { "$ref": "#/definitions/Count", "maximum": 40 }
//!     },
//!     "definitions": {
//!         "Count": { "type": "integer", "minimum": 0 }
//!     }
//! });
//!
//! let builder = GraphBuilder::new(BuildOptions::new().allow_remote(false));
//! let graph = builder.build_value("pet.json", schema).unwrap();
//!
//! let pet = graph.root();
//! assert_eq!(pet.name, "Pet");
//! assert!(pet.property("name").unwrap().required);
//!
//! // `$ref` siblings merge with the target
//! let age = pet.property("age").unwrap();
//! assert_eq!(age.kinds, vec![Kind::Integer]);
//! assert_eq!(age.constraints.minimum, Some(0.0));
//! assert_eq!(age.constraints.maximum, Some(40.0));
//!
//! assert_eq!(pet.descriptors, vec![TypeDescriptor::Object { schema: pet.id }]);
//! ```
//!
//! # Type Shapes
//!
//! | Schema | Descriptor |
//! |--------|------------|
//! | `{}` / `true` | `Any` |
//! | `false` | `Never` |
//! | `{"type": "string", "format": "uuid"}` | `Primitive` with format |
//! | `{"type": "array", "items": S}` | `Array` of S |
//! | `{"type": "object", "properties": ...}` | `Object` (the node itself) |
//! | `{"type": "object", "additionalProperties": S}` | `Mapping` of S |
//! | `{"type": ["string", "null"]}` | `Nullable` string |
//! | `{"oneOf": [...]}` / `{"anyOf": [...]}` | `Union`, in declaration order |
//!
//! A node reached again while it is still being built is marked
//! `recursive`, and references to it inside its own subtree are `Recursive`.
//!
//! # Features
//!
//! `remote` (default) enables the http(s) fetcher based on `reqwest`.

mod builder;
mod error;
mod graph;
mod info;
mod keywords;
mod loader;
mod mapper;
mod merge;
mod node;
mod pointer;
mod registry;
mod resolver;
mod types;

pub use builder::GraphBuilder;
pub use error::{BuildError, ErrorKind, FetchFailure, RegistryError, Warning, WarningKind};
pub use graph::{SchemaGraph, SchemaLookup};
pub use info::{
    AdditionalProperties, BranchGroup, BranchKind, Conditional, Constraints, PropertyInfo,
    SchemaId, SchemaInfo, TypeDescriptor,
};
pub use loader::{
    default_fetcher, parse_document, Fetcher, FileLoader, FsLoader, NoFetcher, RemoteCache,
};
pub use mapper::{describe, map_type};
pub use node::RawNode;
pub use pointer::{is_url, CanonicalPointer, DocumentUri};
pub use registry::DocumentRegistry;
pub use resolver::{Resolution, ResolvedNode, Resolver};
pub use types::{BuildOptions, Format, Kind, DEFAULT_FETCH_TIMEOUT};

#[cfg(feature = "remote")]
pub use loader::HttpFetcher;
