//! Normalized schema description handed to generators and validators.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::Warning;
use crate::graph::SchemaLookup;
use crate::mapper::map_type;
use crate::pointer::CanonicalPointer;
use crate::types::{Format, Kind};

/// Index of a [`SchemaInfo`] in its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SchemaId(pub(crate) usize);

impl SchemaId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for SchemaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The shape a consumer should emit for a node.
///
/// Decided once by the type mapper; consumers match on the variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// Accepts anything (`{}` or `true`).
    Any,
    /// Accepts nothing (`false`).
    Never,
    Primitive {
        kind: Kind,
        #[serde(skip_serializing_if = "Option::is_none")]
        format: Option<Format>,
    },
    Array {
        element: Box<TypeDescriptor>,
    },
    /// Object with free-form keys and uniform values.
    Mapping {
        value: Box<TypeDescriptor>,
    },
    /// Object with declared properties, described by the referenced node.
    Object {
        schema: SchemaId,
    },
    /// Alternatives in declaration order. `exclusive` is true for `oneOf`.
    Union {
        exclusive: bool,
        branches: Vec<TypeDescriptor>,
    },
    Nullable {
        inner: Box<TypeDescriptor>,
    },
    /// A node that was still being built when referenced (a cycle).
    Recursive {
        schema: SchemaId,
    },
}

/// Merged constraint keywords of one node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<f64>,
    /// Every listed divisor applies.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub multiple_of: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Every listed pattern must match.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unique_items: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<Vec<Value>>,
    #[serde(rename = "const", skip_serializing_if = "Option::is_none")]
    pub constant: Option<Value>,
    /// Raw `format` name, recognized or not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Constraints {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Render the constraints back into JSON Schema keywords.
    ///
    /// Several patterns or divisors can't share one keyword, so all but the
    /// first go into an `allOf`.
    pub fn to_keywords(&self) -> Map<String, Value> {
        let mut out = Map::new();
        let mut extra = Vec::new();

        let numbers = [
            ("minimum", self.minimum),
            ("maximum", self.maximum),
            ("exclusiveMinimum", self.exclusive_minimum),
            ("exclusiveMaximum", self.exclusive_maximum),
        ];
        for (key, value) in numbers {
            if let Some(v) = value {
                out.insert(key.to_string(), json!(v));
            }
        }
        let counts = [
            ("minLength", self.min_length),
            ("maxLength", self.max_length),
            ("minItems", self.min_items),
            ("maxItems", self.max_items),
            ("minProperties", self.min_properties),
            ("maxProperties", self.max_properties),
        ];
        for (key, value) in counts {
            if let Some(v) = value {
                out.insert(key.to_string(), json!(v));
            }
        }

        for (i, divisor) in self.multiple_of.iter().enumerate() {
            if i == 0 {
                out.insert("multipleOf".to_string(), json!(divisor));
            } else {
                extra.push(json!({ "multipleOf": divisor }));
            }
        }
        for (i, pattern) in self.patterns.iter().enumerate() {
            if i == 0 {
                out.insert("pattern".to_string(), json!(pattern));
            } else {
                extra.push(json!({ "pattern": pattern }));
            }
        }

        if self.unique_items {
            out.insert("uniqueItems".to_string(), Value::Bool(true));
        }
        if let Some(values) = &self.enumeration {
            out.insert("enum".to_string(), Value::Array(values.clone()));
        }
        if let Some(value) = &self.constant {
            out.insert("const".to_string(), value.clone());
        }
        if let Some(format) = &self.format {
            out.insert("format".to_string(), json!(format));
        }
        if !extra.is_empty() {
            out.insert("allOf".to_string(), Value::Array(extra));
        }
        out
    }
}

/// What a node says about keys beyond its declared properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "schema", rename_all = "snake_case")]
pub enum AdditionalProperties {
    #[default]
    Allowed,
    Forbidden,
    Schema(SchemaId),
}

/// Label of an alternative list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BranchKind {
    /// One or more branches may match.
    AnyOf,
    /// Exactly one branch may match.
    OneOf,
}

/// An `anyOf` or `oneOf` list, kept in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchGroup {
    pub kind: BranchKind,
    pub pointer: CanonicalPointer,
    pub members: Vec<SchemaId>,
}

/// An `if`/`then`/`else` triple, recorded without evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conditional {
    #[serde(rename = "if")]
    pub condition: CanonicalPointer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub then: Option<CanonicalPointer>,
    #[serde(rename = "else", skip_serializing_if = "Option::is_none")]
    pub otherwise: Option<CanonicalPointer>,
}

/// One declared property of an object node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyInfo {
    pub name: String,
    /// The property's own node.
    pub schema: SchemaId,
    pub kinds: Vec<Kind>,
    pub constraints: Constraints,
    pub required: bool,
    pub descriptors: Vec<TypeDescriptor>,
}

impl PropertyInfo {
    pub(crate) fn new(name: impl Into<String>, schema: SchemaId) -> Self {
        Self {
            name: name.into(),
            schema,
            kinds: Vec::new(),
            constraints: Constraints::default(),
            required: false,
            descriptors: Vec::new(),
        }
    }
}

/// Normalized description of one schema node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaInfo {
    pub id: SchemaId,
    pub pointer: CanonicalPointer,
    /// The title, or a name derived from the pointer path.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared (or inferred) primitive kinds. Empty means unconstrained.
    pub kinds: Vec<Kind>,
    /// True when `kinds` was inferred from other keywords, not `type`.
    pub kinds_inferred: bool,
    pub constraints: Constraints,
    /// Declaration order is preserved.
    pub properties: Vec<PropertyInfo>,
    pub required: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<SchemaId>,
    pub additional_properties: AdditionalProperties,
    pub definitions: Vec<(String, SchemaId)>,
    pub branches: Vec<BranchGroup>,
    /// Opaque `not` nodes, for instance validation only.
    pub not: Vec<CanonicalPointer>,
    pub conditionals: Vec<Conditional>,
    /// `allOf` parts and `$ref` targets that were still being built when
    /// this node finished. Their keywords are not merged in.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmerged: Vec<SchemaId>,
    pub descriptors: Vec<TypeDescriptor>,
    /// Set when the node was re-entered while it was being built.
    pub recursive: bool,
    /// The `false` schema.
    pub rejects_all: bool,
    /// Keywords the engine doesn't model, passed through unchanged.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub extensions: Map<String, Value>,
}

impl SchemaInfo {
    pub(crate) fn new(id: SchemaId, pointer: CanonicalPointer) -> Self {
        Self {
            id,
            name: pointer.derived_name(),
            pointer,
            title: None,
            description: None,
            kinds: Vec::new(),
            kinds_inferred: false,
            constraints: Constraints::default(),
            properties: Vec::new(),
            required: BTreeSet::new(),
            items: None,
            additional_properties: AdditionalProperties::Allowed,
            definitions: Vec::new(),
            branches: Vec::new(),
            not: Vec::new(),
            conditionals: Vec::new(),
            unmerged: Vec::new(),
            descriptors: Vec::new(),
            recursive: false,
            rejects_all: false,
            extensions: Map::new(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    pub fn definition(&self, name: &str) -> Option<SchemaId> {
        self.definitions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| *id)
    }

    /// The first branch group of the given kind.
    pub fn branch_group(&self, kind: BranchKind) -> Option<&BranchGroup> {
        self.branches.iter().find(|g| g.kind == kind)
    }

    /// True for `{}`/`true`-like nodes that accept any instance shape.
    pub fn is_unconstrained(&self) -> bool {
        self.kinds.is_empty() && !self.rejects_all && self.branches.is_empty()
    }

    /// Finish a node: name, property views and type descriptors.
    pub(crate) fn seal(&mut self, nodes: &impl SchemaLookup, warnings: &mut Vec<Warning>) {
        self.name = self
            .title
            .clone()
            .unwrap_or_else(|| self.pointer.derived_name());

        for property in &mut self.properties {
            property.required = self.required.contains(&property.name);
            match nodes.lookup(property.schema) {
                Some(schema) => {
                    property.kinds = schema.kinds.clone();
                    property.constraints = schema.constraints.clone();
                    property.descriptors = schema.descriptors.clone();
                }
                None => {
                    property.descriptors = vec![TypeDescriptor::Recursive {
                        schema: property.schema,
                    }];
                }
            }
        }

        self.descriptors = map_type(self, nodes, warnings);
    }
}
