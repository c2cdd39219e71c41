//! Type mapping: decides the descriptor shape of a finished node.

use crate::error::{Warning, WarningKind};
use crate::graph::SchemaLookup;
use crate::info::{AdditionalProperties, BranchKind, SchemaId, SchemaInfo, TypeDescriptor};
use crate::types::{Format, Kind};

/// Map a node to its type descriptors.
///
/// Rules, first match wins:
/// - `false` schema: `Never`
/// - unmerged composition parts: `Recursive` links to them
/// - `anyOf`/`oneOf`: a `Union` of the first group's members, in order
/// - no kinds: `Any`
/// - otherwise one descriptor per non-null kind, wrapped in `Nullable` when
///   `null` is one of the kinds
///
/// Nodes that are not finished yet (cycles) are described as `Recursive`.
pub fn map_type(
    info: &SchemaInfo,
    nodes: &impl SchemaLookup,
    warnings: &mut Vec<Warning>,
) -> Vec<TypeDescriptor> {
    if info.rejects_all {
        return vec![TypeDescriptor::Never];
    }

    if !info.unmerged.is_empty() {
        return info
            .unmerged
            .iter()
            .map(|id| TypeDescriptor::Recursive { schema: *id })
            .collect();
    }

    if let Some(group) = info.branches.first() {
        if info.branches.len() > 1 {
            warnings.push(Warning::new(
                WarningKind::IgnoredKeyword,
                &info.pointer,
                format!(
                    "{} alternative groups; only {} shapes the type",
                    info.branches.len(),
                    group.pointer.path()
                ),
            ));
        }
        let union = TypeDescriptor::Union {
            exclusive: group.kind == BranchKind::OneOf,
            branches: group.members.iter().map(|id| describe(*id, nodes)).collect(),
        };
        return vec![union];
    }

    if info.kinds.is_empty() {
        return vec![TypeDescriptor::Any];
    }

    let nullable = info.kinds.contains(&Kind::Null);
    let concrete: Vec<Kind> = info
        .kinds
        .iter()
        .copied()
        .filter(|kind| *kind != Kind::Null)
        .collect();
    if concrete.is_empty() {
        return vec![TypeDescriptor::Primitive {
            kind: Kind::Null,
            format: None,
        }];
    }

    let format = resolve_format(info, &concrete, warnings);
    let mut descriptors: Vec<TypeDescriptor> = concrete
        .iter()
        .map(|kind| kind_descriptor(*kind, format, info, nodes))
        .collect();

    if nullable {
        let inner = if descriptors.len() == 1 {
            descriptors.remove(0)
        } else {
            TypeDescriptor::Union {
                exclusive: false,
                branches: descriptors,
            }
        };
        return vec![TypeDescriptor::Nullable {
            inner: Box::new(inner),
        }];
    }
    descriptors
}

/// Collapse a node into a single descriptor for use inside another one.
pub fn describe(id: SchemaId, nodes: &impl SchemaLookup) -> TypeDescriptor {
    let Some(info) = nodes.lookup(id) else {
        return TypeDescriptor::Recursive { schema: id };
    };
    match info.descriptors.as_slice() {
        [] => TypeDescriptor::Any,
        [single] => single.clone(),
        several => TypeDescriptor::Union {
            exclusive: false,
            branches: several.to_vec(),
        },
    }
}

/// The node's `format`, if it applies to one of its kinds. Unknown names
/// give one warning and no format.
fn resolve_format(
    info: &SchemaInfo,
    kinds: &[Kind],
    warnings: &mut Vec<Warning>,
) -> Option<(Kind, Format)> {
    let name = info.constraints.format.as_deref()?;
    let found = kinds
        .iter()
        .find_map(|kind| Format::lookup(*kind, name).map(|format| (*kind, format)));
    if found.is_none() {
        let kinds: Vec<&str> = kinds.iter().map(Kind::as_str).collect();
        warnings.push(Warning::new(
            WarningKind::UnknownFormat,
            &info.pointer,
            format!("format \"{}\" is not known for {}", name, kinds.join(", ")),
        ));
    }
    found
}

fn kind_descriptor(
    kind: Kind,
    format: Option<(Kind, Format)>,
    info: &SchemaInfo,
    nodes: &impl SchemaLookup,
) -> TypeDescriptor {
    match kind {
        Kind::Array => TypeDescriptor::Array {
            element: Box::new(
                info.items
                    .map(|id| describe(id, nodes))
                    .unwrap_or(TypeDescriptor::Any),
            ),
        },
        Kind::Object if !info.properties.is_empty() => TypeDescriptor::Object { schema: info.id },
        Kind::Object => match info.additional_properties {
            AdditionalProperties::Schema(id) => TypeDescriptor::Mapping {
                value: Box::new(describe(id, nodes)),
            },
            AdditionalProperties::Forbidden => TypeDescriptor::Object { schema: info.id },
            AdditionalProperties::Allowed => TypeDescriptor::Mapping {
                value: Box::new(TypeDescriptor::Any),
            },
        },
        _ => TypeDescriptor::Primitive {
            kind,
            format: format.and_then(|(k, f)| (k == kind).then_some(f)),
        },
    }
}
