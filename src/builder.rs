//! Graph construction: resolve, merge, map and recurse.
//!
//! Each build runs in its own [`Session`], which owns the document registry,
//! the resolver caches and the node arena. A node moves from unvisited to
//! resolving (id reserved, pointer indexed) to resolved (slot filled).
//! Meeting a resolving node again marks it recursive and reuses its id.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, trace};
use url::Url;

use crate::error::{BuildError, Warning, WarningKind};
use crate::graph::{Arena, SchemaGraph, SchemaLookup};
use crate::info::{
    AdditionalProperties, BranchGroup, BranchKind, Conditional, PropertyInfo, SchemaId, SchemaInfo,
};
use crate::keywords;
use crate::loader::{default_fetcher, Fetcher, FileLoader, FsLoader, RemoteCache};
use crate::merge::Merger;
use crate::node::{json_type_name, RawNode};
use crate::pointer::{decode_fragment, is_url, CanonicalPointer, DocumentUri};
use crate::registry::DocumentRegistry;
use crate::resolver::{Resolution, Resolver};
use crate::types::{BuildOptions, Kind};

const BRANCH_KEYWORDS: &[(&str, BranchKind)] =
    &[("anyOf", BranchKind::AnyOf), ("oneOf", BranchKind::OneOf)];

const DEFINITION_KEYWORDS: &[&str] = &["definitions", "$defs"];

/// Builds [`SchemaGraph`]s. Holds only configuration, so one builder can
/// serve any number of builds, from several threads.
#[derive(Clone)]
pub struct GraphBuilder {
    options: BuildOptions,
    loader: Arc<dyn FileLoader>,
    fetcher: Arc<dyn Fetcher>,
    remote: Option<Arc<RemoteCache>>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(BuildOptions::default())
    }
}

impl GraphBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            loader: Arc::new(FsLoader),
            fetcher: default_fetcher(),
            remote: None,
        }
    }

    pub fn with_file_loader(mut self, loader: Arc<dyn FileLoader>) -> Self {
        self.loader = loader;
        self
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Share fetched remote documents across builds.
    ///
    /// Without this, every build fetches remote documents afresh.
    pub fn with_remote_cache(mut self, remote: Arc<RemoteCache>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build from an in-memory document registered under `name`.
    ///
    /// Relative file references resolve against `BuildOptions::base_dir`.
    pub fn build_value(&self, name: &str, schema: Value) -> Result<SchemaGraph, BuildError> {
        let uri = DocumentUri::memory(name);
        let mut registry = DocumentRegistry::new();
        registry
            .register(uri.clone(), schema)
            .map_err(|e| BuildError::malformed(&uri, e.to_string()))?;
        self.build_pointer(registry, CanonicalPointer::root(uri))
    }

    /// Build from a schema file.
    pub fn build_file(&self, path: impl AsRef<Path>) -> Result<SchemaGraph, BuildError> {
        let root = CanonicalPointer::root(DocumentUri::file(path));
        self.build_pointer(DocumentRegistry::new(), root)
    }

    /// Build from an http(s) URL. A `#/pointer` fragment selects the root.
    pub fn build_url(&self, url: &str) -> Result<SchemaGraph, BuildError> {
        let unresolvable = |message: String| BuildError::UnresolvableReference {
            pointer: message,
            reference: url.to_string(),
        };
        if !is_url(url) {
            return Err(unresolvable("not an http(s) URL".to_string()));
        }
        let parsed = Url::parse(url).map_err(|e| unresolvable(e.to_string()))?;
        let fragment = parsed.fragment().unwrap_or("");
        let path = decode_fragment(fragment)
            .ok_or_else(|| unresolvable(format!("unsupported fragment #{}", fragment)))?;
        let root = CanonicalPointer::new(DocumentUri::remote(parsed), path);
        self.build_pointer(DocumentRegistry::new(), root)
    }

    /// Build the node at `root`, using documents already in `registry`.
    pub fn build_pointer(
        &self,
        registry: DocumentRegistry,
        root: CanonicalPointer,
    ) -> Result<SchemaGraph, BuildError> {
        let mut resolver = Resolver::new(registry, self.options.clone())
            .with_file_loader(Arc::clone(&self.loader))
            .with_fetcher(Arc::clone(&self.fetcher));
        if let Some(remote) = &self.remote {
            resolver = resolver.with_remote_cache(Arc::clone(remote));
        }
        Session::new(resolver).build(root)
    }
}

/// State of one build.
struct Session {
    resolver: Resolver,
    arena: Arena,
    index: HashMap<CanonicalPointer, SchemaId>,
    warnings: Vec<Warning>,
}

impl Session {
    fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            arena: Arena::default(),
            index: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    fn build(mut self, root: CanonicalPointer) -> Result<SchemaGraph, BuildError> {
        debug!(%root, "building schema graph");
        let root_id = self.build_node(&root)?;
        self.build_document_definitions(&root)?;

        let Session {
            resolver,
            arena,
            index,
            warnings,
        } = self;
        let nodes = arena.into_nodes()?;
        debug!(nodes = nodes.len(), warnings = warnings.len(), "schema graph built");
        Ok(SchemaGraph::new(
            root_id,
            nodes,
            index,
            warnings,
            resolver.into_registry().into_documents(),
        ))
    }

    /// Build every definition of the root's document, referenced or not.
    fn build_document_definitions(&mut self, root: &CanonicalPointer) -> Result<(), BuildError> {
        let document = CanonicalPointer::root(root.document().clone());
        let RawNode::Object(map) = self.resolver.raw(&document)? else {
            return Ok(());
        };
        self.definitions(&map, &document)?;
        Ok(())
    }

    fn build_node(&mut self, pointer: &CanonicalPointer) -> Result<SchemaId, BuildError> {
        if let Some(id) = self.index.get(pointer).copied() {
            if self.arena.is_resolving(id) {
                trace!(%pointer, %id, "re-entered node while resolving");
                self.arena.mark_recursive(id);
            }
            return Ok(id);
        }

        match self.resolver.resolve(pointer)? {
            Resolution::Cycle { target, chain } => self.build_cycle(pointer, &target, &chain),
            Resolution::Node(resolved) => match resolved.first_target().cloned() {
                None => self.build_target(pointer, &resolved.node),
                Some(target) if resolved.siblings.is_empty() => {
                    let id = self.build_node(&target)?;
                    self.index.insert(pointer.clone(), id);
                    Ok(id)
                }
                Some(target) => self.build_with_siblings(pointer, &target, resolved.siblings),
            },
        }
    }

    fn build_target(
        &mut self,
        pointer: &CanonicalPointer,
        node: &RawNode,
    ) -> Result<SchemaId, BuildError> {
        let id = self.arena.reserve(pointer.clone());
        self.index.insert(pointer.clone(), id);
        trace!(%pointer, %id, "building node");
        let info = self.build_body(id, pointer, node)?;
        Ok(self.finish(id, info))
    }

    /// A `$ref` with constraint keywords next to it: an implicit `allOf` of
    /// the siblings and the target.
    fn build_with_siblings(
        &mut self,
        pointer: &CanonicalPointer,
        target: &CanonicalPointer,
        siblings: Map<String, Value>,
    ) -> Result<SchemaId, BuildError> {
        let id = self.arena.reserve(pointer.clone());
        self.index.insert(pointer.clone(), id);
        let mut own = self.build_body(id, pointer, &RawNode::Object(siblings))?;
        let target_id = self.build_node(target)?;

        let info = match self.arena.lookup(target_id) {
            Some(resolved) => {
                let parts = vec![own, resolved.clone()];
                Merger::new(&mut self.arena, &mut self.warnings).merge(pointer, parts)?
            }
            None => {
                self.warnings.push(Warning::new(
                    WarningKind::RecursiveComposition,
                    pointer,
                    format!(
                        "keywords next to $ref are not merged with {}, \
                         which is still being built",
                        target
                    ),
                ));
                own.unmerged.push(target_id);
                own
            }
        };
        Ok(self.finish(id, info))
    }

    /// A `$ref` loop that never reaches a schema. Built as an unconstrained
    /// recursive node.
    fn build_cycle(
        &mut self,
        pointer: &CanonicalPointer,
        target: &CanonicalPointer,
        chain: &[CanonicalPointer],
    ) -> Result<SchemaId, BuildError> {
        debug!(%pointer, %target, "reference loop without a schema");
        if let Some(id) = self.index.get(target).copied() {
            self.arena.mark_recursive(id);
            self.index.insert(pointer.clone(), id);
            return Ok(id);
        }

        let path: Vec<String> = chain.iter().map(|p| p.to_string()).collect();
        self.warnings.push(Warning::new(
            WarningKind::UnsupportedReference,
            pointer,
            format!(
                "reference loop {} -> {} never reaches a schema; treated as unconstrained",
                path.join(" -> "),
                target
            ),
        ));
        let id = self.arena.reserve(pointer.clone());
        self.index.insert(pointer.clone(), id);
        let mut info = SchemaInfo::new(id, pointer.clone());
        info.recursive = true;
        Ok(self.finish(id, info))
    }

    fn finish(&mut self, id: SchemaId, mut info: SchemaInfo) -> SchemaId {
        info.seal(&self.arena, &mut self.warnings);
        self.arena.fill(id, info);
        id
    }

    fn build_body(
        &mut self,
        id: SchemaId,
        pointer: &CanonicalPointer,
        node: &RawNode,
    ) -> Result<SchemaInfo, BuildError> {
        let mut info = SchemaInfo::new(id, pointer.clone());
        let map = match node {
            RawNode::Bool(true) => return Ok(info),
            RawNode::Bool(false) => {
                info.rejects_all = true;
                return Ok(info);
            }
            RawNode::Object(map) => map,
        };

        keywords::deprecations(map, pointer, &mut self.warnings);
        info.title = keywords::string(map, "title", pointer)?;
        info.description = keywords::string(map, "description", pointer)?;
        let declared = keywords::kinds(map, pointer)?;
        info.constraints = keywords::constraints(map, pointer, &mut self.warnings)?;
        info.required = keywords::required(map, pointer, &mut self.warnings)?;
        info.extensions = keywords::extensions(map);

        self.properties(&mut info, map, pointer)?;
        info.additional_properties = self.additional_properties(map, pointer)?;
        info.items = self.items(map, pointer)?;
        info.definitions = self.definitions(map, pointer)?;
        info.branches = self.branches(map, pointer)?;
        if let Some(value) = map.get("not") {
            let not = pointer.child("not");
            RawNode::from_value(value, &not)?;
            info.not.push(not);
        }
        info.conditionals = self.conditionals(map, pointer)?;

        match declared {
            Some(kinds) => info.kinds = kinds,
            None => {
                let mut inferred = keywords::infer_kinds(map, &info.constraints);
                if inferred.is_empty() {
                    inferred = self.branch_kinds(&info);
                }
                info.kinds_inferred = !inferred.is_empty();
                info.kinds = inferred;
            }
        }

        self.all_of(info, map, pointer)
    }

    fn properties(
        &mut self,
        info: &mut SchemaInfo,
        map: &Map<String, Value>,
        pointer: &CanonicalPointer,
    ) -> Result<(), BuildError> {
        match map.get("properties") {
            None => Ok(()),
            Some(Value::Object(properties)) => {
                let base = pointer.child("properties");
                for name in properties.keys() {
                    let schema = self.build_node(&base.child(name))?;
                    info.properties.push(PropertyInfo::new(name.clone(), schema));
                }
                Ok(())
            }
            Some(other) => Err(BuildError::malformed(
                pointer,
                format!("properties must be an object, got {}", json_type_name(other)),
            )),
        }
    }

    fn additional_properties(
        &mut self,
        map: &Map<String, Value>,
        pointer: &CanonicalPointer,
    ) -> Result<AdditionalProperties, BuildError> {
        match map.get("additionalProperties") {
            None | Some(Value::Bool(true)) => Ok(AdditionalProperties::Allowed),
            Some(Value::Bool(false)) => Ok(AdditionalProperties::Forbidden),
            Some(Value::Object(_)) => {
                let schema = self.build_node(&pointer.child("additionalProperties"))?;
                Ok(AdditionalProperties::Schema(schema))
            }
            Some(other) => Err(BuildError::malformed(
                pointer,
                format!(
                    "additionalProperties must be a boolean or schema, got {}",
                    json_type_name(other)
                ),
            )),
        }
    }

    fn items(
        &mut self,
        map: &Map<String, Value>,
        pointer: &CanonicalPointer,
    ) -> Result<Option<SchemaId>, BuildError> {
        let base = pointer.child("items");
        match map.get("items") {
            None => Ok(None),
            Some(Value::Bool(_) | Value::Object(_)) => Ok(Some(self.build_node(&base)?)),
            Some(Value::Array(entries)) if !entries.is_empty() => {
                self.warnings.push(Warning::new(
                    WarningKind::IgnoredKeyword,
                    &base,
                    "tuple-form items is described as an array of any of its entries",
                ));
                let members = (0..entries.len())
                    .map(|i| self.build_node(&base.index(i)))
                    .collect::<Result<Vec<_>, _>>()?;

                let mut tuple = SchemaInfo::new(self.arena.next_id(), base.clone());
                tuple.branches.push(BranchGroup {
                    kind: BranchKind::AnyOf,
                    pointer: base,
                    members,
                });
                tuple.kinds = self.branch_kinds(&tuple);
                tuple.kinds_inferred = !tuple.kinds.is_empty();
                tuple.seal(&self.arena, &mut self.warnings);
                Ok(Some(self.arena.push(tuple)))
            }
            Some(other) => Err(BuildError::malformed(
                pointer,
                format!(
                    "items must be a schema or non-empty array, got {}",
                    json_type_name(other)
                ),
            )),
        }
    }

    fn definitions(
        &mut self,
        map: &Map<String, Value>,
        pointer: &CanonicalPointer,
    ) -> Result<Vec<(String, SchemaId)>, BuildError> {
        let mut out = Vec::new();
        for keyword in DEFINITION_KEYWORDS {
            match map.get(*keyword) {
                None => {}
                Some(Value::Object(definitions)) => {
                    let base = pointer.child(keyword);
                    for name in definitions.keys() {
                        let id = self.build_node(&base.child(name))?;
                        out.push((name.clone(), id));
                    }
                }
                Some(other) => {
                    return Err(BuildError::malformed(
                        pointer,
                        format!("{} must be an object, got {}", keyword, json_type_name(other)),
                    ))
                }
            }
        }
        Ok(out)
    }

    fn branches(
        &mut self,
        map: &Map<String, Value>,
        pointer: &CanonicalPointer,
    ) -> Result<Vec<BranchGroup>, BuildError> {
        let mut groups = Vec::new();
        for (keyword, kind) in BRANCH_KEYWORDS {
            let Some(value) = map.get(*keyword) else {
                continue;
            };
            let entries = non_empty_array(value, keyword, pointer)?;
            let base = pointer.child(keyword);
            let members = (0..entries.len())
                .map(|i| self.build_node(&base.index(i)))
                .collect::<Result<Vec<_>, _>>()?;
            groups.push(BranchGroup {
                kind: *kind,
                pointer: base,
                members,
            });
        }
        Ok(groups)
    }

    fn conditionals(
        &mut self,
        map: &Map<String, Value>,
        pointer: &CanonicalPointer,
    ) -> Result<Vec<Conditional>, BuildError> {
        let branch = |keyword: &str| -> Result<Option<CanonicalPointer>, BuildError> {
            match map.get(keyword) {
                None => Ok(None),
                Some(value) => {
                    let at = pointer.child(keyword);
                    RawNode::from_value(value, &at)?;
                    Ok(Some(at))
                }
            }
        };
        let condition = branch("if")?;
        let then = branch("then")?;
        let otherwise = branch("else")?;

        match condition {
            Some(condition) => Ok(vec![Conditional {
                condition,
                then,
                otherwise,
            }]),
            None => {
                if then.is_some() || otherwise.is_some() {
                    self.warnings.push(Warning::new(
                        WarningKind::IgnoredKeyword,
                        pointer,
                        "then/else without if has no effect",
                    ));
                }
                Ok(Vec::new())
            }
        }
    }

    /// Kinds of a node that only lists alternatives: the union of its first
    /// group's members. Empty when any member is unconstrained or unfinished.
    fn branch_kinds(&self, info: &SchemaInfo) -> Vec<Kind> {
        let Some(group) = info.branches.first() else {
            return Vec::new();
        };
        let mut kinds = Vec::new();
        for id in &group.members {
            match self.arena.lookup(*id) {
                Some(member) if !member.kinds.is_empty() => {
                    kinds.extend(member.kinds.iter().copied())
                }
                _ => return Vec::new(),
            }
        }
        kinds.sort();
        kinds.dedup();
        kinds
    }

    /// Merge the node with its `allOf` branches, own keywords first.
    fn all_of(
        &mut self,
        info: SchemaInfo,
        map: &Map<String, Value>,
        pointer: &CanonicalPointer,
    ) -> Result<SchemaInfo, BuildError> {
        let Some(value) = map.get("allOf") else {
            return Ok(info);
        };
        let entries = non_empty_array(value, "allOf", pointer)?;
        let base = pointer.child("allOf");

        let mut unmerged = Vec::new();
        let mut parts = vec![info];
        for i in 0..entries.len() {
            let branch = base.index(i);
            let id = self.build_node(&branch)?;
            match self.arena.lookup(id) {
                Some(part) => parts.push(part.clone()),
                // the node itself; merging it in changes nothing
                None if id == parts[0].id => {}
                None => {
                    self.warnings.push(Warning::new(
                        WarningKind::RecursiveComposition,
                        &branch,
                        "allOf branch refers back to a schema still being built; not merged",
                    ));
                    unmerged.push(id);
                }
            }
        }
        parts[0].unmerged.extend(unmerged);
        Merger::new(&mut self.arena, &mut self.warnings).merge(pointer, parts)
    }
}

fn non_empty_array<'v>(
    value: &'v Value,
    keyword: &str,
    pointer: &CanonicalPointer,
) -> Result<&'v Vec<Value>, BuildError> {
    match value {
        Value::Array(entries) if !entries.is_empty() => Ok(entries),
        other => Err(BuildError::malformed(
            pointer,
            format!("{} must be a non-empty array, got {}", keyword, describe_value(other)),
        )),
    }
}

fn describe_value(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "an empty array",
        other => json_type_name(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::info::TypeDescriptor;
    use serde_json::json;

    fn build(schema: Value) -> Result<SchemaGraph, BuildError> {
        GraphBuilder::new(BuildOptions::new().allow_remote(false)).build_value("root.json", schema)
    }

    fn ptr(path: &str) -> CanonicalPointer {
        CanonicalPointer::new(DocumentUri::memory("root.json"), path)
    }

    #[test]
    fn builds_object_with_properties() {
        let graph = build(json!({
            "title": "Pet",
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": {"type": "string", "minLength": 1},
                "tag": {"type": ["string", "null"]}
            }
        }))
        .unwrap();

        let root = graph.root();
        assert_eq!(root.name, "Pet");
        assert_eq!(root.kinds, vec![Kind::Object]);
        assert_eq!(
            root.descriptors,
            vec![TypeDescriptor::Object { schema: root.id }]
        );

        let name = root.property("name").unwrap();
        assert!(name.required);
        assert_eq!(name.constraints.min_length, Some(1));
        let tag = root.property("tag").unwrap();
        assert!(!tag.required);
        assert!(matches!(tag.descriptors[0], TypeDescriptor::Nullable { .. }));
        assert!(graph.warnings().is_empty());
    }

    #[test]
    fn same_pointer_is_built_once() {
        let graph = build(json!({
            "properties": {
                "a": {"$ref": "#/definitions/Id"},
                "b": {"$ref": "#/definitions/Id"}
            },
            "definitions": {"Id": {"type": "integer"}}
        }))
        .unwrap();
        let root = graph.root();
        let a = root.property("a").unwrap().schema;
        let b = root.property("b").unwrap().schema;
        assert_eq!(a, b);
        assert_eq!(root.definition("Id"), Some(a));
        assert_eq!(graph.by_pointer(&ptr("/properties/a")).map(|n| n.id), Some(a));
    }

    #[test]
    fn self_reference_is_recursive() {
        let graph = build(json!({
            "$ref": "#/definitions/Node",
            "definitions": {
                "Node": {
                    "type": "object",
                    "properties": {
                        "children": {"type": "array", "items": {"$ref": "#/definitions/Node"}}
                    }
                }
            }
        }))
        .unwrap();
        let root = graph.root();
        assert_eq!(root.pointer, ptr("/definitions/Node"));
        assert!(root.recursive);

        let children = graph.get(root.property("children").unwrap().schema).unwrap();
        assert_eq!(children.items, Some(root.id));
        assert_eq!(
            children.descriptors,
            vec![TypeDescriptor::Array {
                element: Box::new(TypeDescriptor::Recursive { schema: root.id })
            }]
        );
    }

    #[test]
    fn reference_siblings_merge_with_target() {
        let graph = build(json!({
            "properties": {
                "age": {"$ref": "#/definitions/Count", "maximum": 120}
            },
            "definitions": {"Count": {"type": "integer", "minimum": 0}}
        }))
        .unwrap();
        let age = graph.root().property("age").unwrap();
        assert_eq!(age.kinds, vec![Kind::Integer]);
        assert_eq!(age.constraints.minimum, Some(0.0));
        assert_eq!(age.constraints.maximum, Some(120.0));
        assert_ne!(Some(age.schema), graph.root().definition("Count"));
    }

    #[test]
    fn all_of_merges_into_owner() {
        let graph = build(json!({
            "allOf": [
                {"type": "object", "properties": {"id": {"type": "integer"}}, "required": ["id"]},
                {"properties": {"name": {"type": "string"}}, "required": ["name"]}
            ]
        }))
        .unwrap();
        let root = graph.root();
        assert_eq!(root.kinds, vec![Kind::Object]);
        assert!(root.is_required("id") && root.is_required("name"));
        let names: Vec<&str> = root.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name"]);
        assert!(root.property("name").unwrap().required);
    }

    #[test]
    fn conflicting_all_of_fails() {
        let err = build(json!({"allOf": [{"type": "string"}, {"type": "integer"}]})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaConflict);
    }

    #[test]
    fn alternatives_and_opaque_keywords() {
        let graph = build(json!({
            "anyOf": [{"type": "string"}, {"type": "integer"}],
            "not": {"const": 3},
            "if": {"minimum": 0},
            "then": {"maximum": 9}
        }))
        .unwrap();
        let root = graph.root();
        assert_eq!(root.kinds, vec![Kind::Integer, Kind::String]);
        assert!(root.kinds_inferred);
        assert_eq!(root.not, vec![ptr("/not")]);
        assert_eq!(root.conditionals[0].condition, ptr("/if"));
        assert_eq!(root.conditionals[0].then, Some(ptr("/then")));
        assert!(matches!(
            root.descriptors[0],
            TypeDescriptor::Union { exclusive: false, .. }
        ));
        assert_eq!(graph.raw(&ptr("/not/const")), Some(&json!(3)));
    }

    #[test]
    fn boolean_schemas() {
        let graph = build(json!({"properties": {"any": true, "none": false}})).unwrap();
        let root = graph.root();
        assert_eq!(root.property("any").unwrap().descriptors, vec![TypeDescriptor::Any]);
        assert_eq!(root.property("none").unwrap().descriptors, vec![TypeDescriptor::Never]);
    }

    #[test]
    fn malformed_keywords_fail() {
        for schema in [
            json!({"type": "text"}),
            json!({"properties": []}),
            json!({"anyOf": []}),
            json!({"items": 3}),
            json!({"not": 1}),
            json!({"properties": {"a": 5}}),
        ] {
            let err = build(schema.clone()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedSchema, "{}", schema);
        }
    }

    #[test]
    fn tuple_items_become_alternatives() {
        let graph = build(json!({
            "type": "array",
            "items": [{"type": "string"}, {"type": "integer"}]
        }))
        .unwrap();
        let root = graph.root();
        let items = graph.get(root.items.unwrap()).unwrap();
        assert_eq!(items.branches[0].members.len(), 2);
        assert_eq!(graph.warnings()[0].kind, WarningKind::IgnoredKeyword);
    }

    #[test]
    fn pure_reference_loop_is_unconstrained() {
        let graph = build(json!({
            "$ref": "#/definitions/A",
            "definitions": {"A": {"$ref": "#/definitions/B"}, "B": {"$ref": "#/definitions/A"}}
        }))
        .unwrap();
        assert!(graph.root().recursive);
        assert!(graph
            .warnings()
            .iter()
            .any(|w| w.kind == WarningKind::UnsupportedReference));
    }

    #[test]
    fn root_definitions_are_always_built() {
        let graph = GraphBuilder::default()
            .build_pointer(
                {
                    let mut registry = DocumentRegistry::new();
                    registry
                        .register(
                            DocumentUri::memory("root.json"),
                            json!({
                                "definitions": {
                                    "Used": {"type": "string"},
                                    "Unused": {"type": "boolean"}
                                }
                            }),
                        )
                        .unwrap();
                    registry
                },
                ptr("/definitions/Used"),
            )
            .unwrap();
        let names: Vec<&str> = graph.definitions().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Used", "Unused"]);
    }
}
