//! Reading individual keywords off a raw schema object.
//!
//! Every reader validates the keyword's JSON shape and reports
//! `MalformedSchema` at the owning pointer when it is wrong.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::error::{BuildError, Warning, WarningKind};
use crate::info::Constraints;
use crate::node::json_type_name;
use crate::pointer::CanonicalPointer;
use crate::types::{Format, Kind, ANNOTATION_KEYWORDS, MODELLED_KEYWORDS};

/// Keyword families that imply a kind when `type` is absent.
const KIND_FAMILIES: &[(Kind, &[&str])] = &[
    (
        Kind::Object,
        &[
            "properties",
            "required",
            "additionalProperties",
            "patternProperties",
            "minProperties",
            "maxProperties",
        ],
    ),
    (Kind::Array, &["items", "minItems", "maxItems", "uniqueItems"]),
    (Kind::String, &["minLength", "maxLength", "pattern"]),
    (
        Kind::Number,
        &[
            "minimum",
            "maximum",
            "exclusiveMinimum",
            "exclusiveMaximum",
            "multipleOf",
        ],
    ),
];

/// Deprecated keywords and what replaced them.
const DEPRECATED_KEYWORDS: &[(&str, &str)] = &[
    ("id", "use $id"),
    ("dependencies", "use dependentRequired or dependentSchemas"),
];

/// Parse `type`. Returns `None` when the keyword is absent.
///
/// The result is deduplicated and sorted.
pub(crate) fn kinds(
    map: &Map<String, Value>,
    pointer: &CanonicalPointer,
) -> Result<Option<Vec<Kind>>, BuildError> {
    let Some(value) = map.get("type") else {
        return Ok(None);
    };

    let names: Vec<&Value> = match value {
        Value::String(_) => vec![value],
        Value::Array(items) => items.iter().collect(),
        other => {
            return Err(BuildError::malformed(
                pointer,
                format!("type must be a string or array, got {}", json_type_name(other)),
            ))
        }
    };

    let mut kinds = Vec::with_capacity(names.len());
    for name in names {
        let name = name
            .as_str()
            .ok_or_else(|| BuildError::malformed(pointer, "type entries must be strings"))?;
        let kind = Kind::parse(name)
            .ok_or_else(|| BuildError::malformed(pointer, format!("unknown type \"{}\"", name)))?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    if kinds.is_empty() {
        return Err(BuildError::malformed(pointer, "type must not be empty"));
    }
    kinds.sort();
    Ok(Some(kinds))
}

/// Parse the constraint keywords of one node.
///
/// Draft-04 boolean `exclusiveMinimum`/`exclusiveMaximum` are converted to
/// the numeric form with a warning.
pub(crate) fn constraints(
    map: &Map<String, Value>,
    pointer: &CanonicalPointer,
    warnings: &mut Vec<Warning>,
) -> Result<Constraints, BuildError> {
    let mut c = Constraints {
        minimum: number(map, "minimum", pointer)?,
        maximum: number(map, "maximum", pointer)?,
        min_length: count(map, "minLength", pointer)?,
        max_length: count(map, "maxLength", pointer)?,
        min_items: count(map, "minItems", pointer)?,
        max_items: count(map, "maxItems", pointer)?,
        min_properties: count(map, "minProperties", pointer)?,
        max_properties: count(map, "maxProperties", pointer)?,
        ..Constraints::default()
    };

    match map.get("exclusiveMinimum") {
        Some(Value::Bool(flag)) => {
            warnings.push(deprecated_exclusive("exclusiveMinimum", pointer));
            if *flag {
                c.exclusive_minimum = c.minimum.take();
            }
        }
        _ => c.exclusive_minimum = number(map, "exclusiveMinimum", pointer)?,
    }
    match map.get("exclusiveMaximum") {
        Some(Value::Bool(flag)) => {
            warnings.push(deprecated_exclusive("exclusiveMaximum", pointer));
            if *flag {
                c.exclusive_maximum = c.maximum.take();
            }
        }
        _ => c.exclusive_maximum = number(map, "exclusiveMaximum", pointer)?,
    }

    if let Some(divisor) = number(map, "multipleOf", pointer)? {
        if divisor <= 0.0 {
            return Err(BuildError::malformed(pointer, "multipleOf must be greater than 0"));
        }
        c.multiple_of.push(divisor);
    }

    if let Some(pattern) = string(map, "pattern", pointer)? {
        c.patterns.push(pattern);
    }

    match map.get("uniqueItems") {
        None => {}
        Some(Value::Bool(flag)) => c.unique_items = *flag,
        Some(other) => {
            return Err(BuildError::malformed(
                pointer,
                format!("uniqueItems must be a boolean, got {}", json_type_name(other)),
            ))
        }
    }

    match map.get("enum") {
        None => {}
        Some(Value::Array(values)) => c.enumeration = Some(values.clone()),
        Some(other) => {
            return Err(BuildError::malformed(
                pointer,
                format!("enum must be an array, got {}", json_type_name(other)),
            ))
        }
    }
    c.constant = map.get("const").cloned();
    c.format = string(map, "format", pointer)?;

    Ok(c)
}

/// Parse `required`.
///
/// The draft-03 boolean form is ignored with a warning.
pub(crate) fn required(
    map: &Map<String, Value>,
    pointer: &CanonicalPointer,
    warnings: &mut Vec<Warning>,
) -> Result<BTreeSet<String>, BuildError> {
    match map.get("required") {
        None => Ok(BTreeSet::new()),
        Some(Value::Array(names)) => names
            .iter()
            .map(|name| {
                name.as_str().map(str::to_owned).ok_or_else(|| {
                    BuildError::malformed(pointer, "required entries must be strings")
                })
            })
            .collect(),
        Some(Value::Bool(_)) => {
            warnings.push(Warning::new(
                WarningKind::DeprecatedKeyword,
                pointer,
                "boolean required is draft-03 syntax and is ignored; list names in the parent",
            ));
            Ok(BTreeSet::new())
        }
        Some(other) => Err(BuildError::malformed(
            pointer,
            format!("required must be an array, got {}", json_type_name(other)),
        )),
    }
}

/// Read an optional string keyword.
pub(crate) fn string(
    map: &Map<String, Value>,
    key: &str,
    pointer: &CanonicalPointer,
) -> Result<Option<String>, BuildError> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(BuildError::malformed(
            pointer,
            format!("{} must be a string, got {}", key, json_type_name(other)),
        )),
    }
}

/// Warn about deprecated keywords present on the node.
pub(crate) fn deprecations(
    map: &Map<String, Value>,
    pointer: &CanonicalPointer,
    warnings: &mut Vec<Warning>,
) {
    for (keyword, advice) in DEPRECATED_KEYWORDS {
        if map.contains_key(*keyword) {
            warnings.push(Warning::new(
                WarningKind::DeprecatedKeyword,
                pointer,
                format!("{} is deprecated; {}", keyword, advice),
            ));
        }
    }
}

/// Keywords neither modelled nor annotations, copied unchanged.
pub(crate) fn extensions(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .filter(|(key, _)| {
            let key = key.as_str();
            !MODELLED_KEYWORDS.contains(&key) && !ANNOTATION_KEYWORDS.contains(&key)
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Infer kinds for a node without `type`.
///
/// Literal values (`const`, then `enum`) win. Otherwise every keyword
/// family present contributes its kind, and a bare `format` contributes the
/// first kind it applies to. Empty when nothing hints at a kind.
pub(crate) fn infer_kinds(map: &Map<String, Value>, constraints: &Constraints) -> Vec<Kind> {
    let mut kinds: Vec<Kind> = if let Some(value) = &constraints.constant {
        vec![Kind::of_value(value)]
    } else if let Some(values) = &constraints.enumeration {
        values.iter().map(Kind::of_value).collect()
    } else {
        let mut found: Vec<Kind> = KIND_FAMILIES
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| map.contains_key(*k)))
            .map(|(kind, _)| *kind)
            .collect();
        if found.is_empty() {
            if let Some(name) = &constraints.format {
                found.extend(
                    [Kind::String, Kind::Integer, Kind::Number]
                        .into_iter()
                        .find(|kind| Format::lookup(*kind, name).is_some()),
                );
            }
        }
        found
    };
    kinds.sort();
    kinds.dedup();
    kinds
}

fn number(
    map: &Map<String, Value>,
    key: &str,
    pointer: &CanonicalPointer,
) -> Result<Option<f64>, BuildError> {
    match map.get(key) {
        None => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or_else(|| {
            BuildError::malformed(
                pointer,
                format!("{} must be a number, got {}", key, json_type_name(value)),
            )
        }),
    }
}

fn count(
    map: &Map<String, Value>,
    key: &str,
    pointer: &CanonicalPointer,
) -> Result<Option<u64>, BuildError> {
    let Some(value) = map.get(key) else {
        return Ok(None);
    };
    value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        })
        .map(Some)
        .ok_or_else(|| {
            BuildError::malformed(pointer, format!("{} must be a non-negative integer", key))
        })
}

fn deprecated_exclusive(keyword: &str, pointer: &CanonicalPointer) -> Warning {
    Warning::new(
        WarningKind::DeprecatedKeyword,
        pointer,
        format!("boolean {} is draft-04 syntax; converted to the numeric form", keyword),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::pointer::DocumentUri;
    use serde_json::json;

    fn ptr() -> CanonicalPointer {
        CanonicalPointer::root(DocumentUri::memory("root.json"))
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    #[test]
    fn type_string_and_array() {
        let single = object(json!({"type": "string"}));
        assert_eq!(kinds(&single, &ptr()).unwrap(), Some(vec![Kind::String]));

        let several = object(json!({"type": ["string", "null", "string"]}));
        assert_eq!(
            kinds(&several, &ptr()).unwrap(),
            Some(vec![Kind::Null, Kind::String])
        );

        assert_eq!(kinds(&Map::new(), &ptr()).unwrap(), None);
    }

    #[test]
    fn unknown_type_is_malformed() {
        let map = object(json!({"type": "text"}));
        let err = kinds(&map, &ptr()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedSchema);
        assert!(err.to_string().contains("text"));

        let map = object(json!({"type": 5}));
        assert!(kinds(&map, &ptr()).is_err());
    }

    #[test]
    fn reads_constraints() {
        let map = object(json!({
            "minimum": 1,
            "maximum": 9.5,
            "multipleOf": 2,
            "minLength": 3,
            "pattern": "^a",
            "uniqueItems": true,
            "enum": [2, 4],
            "format": "int32"
        }));
        let mut warnings = Vec::new();
        let c = constraints(&map, &ptr(), &mut warnings).unwrap();
        assert_eq!(c.minimum, Some(1.0));
        assert_eq!(c.maximum, Some(9.5));
        assert_eq!(c.multiple_of, vec![2.0]);
        assert_eq!(c.min_length, Some(3));
        assert_eq!(c.patterns, vec!["^a".to_string()]);
        assert!(c.unique_items);
        assert_eq!(c.enumeration, Some(vec![json!(2), json!(4)]));
        assert_eq!(c.format.as_deref(), Some("int32"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn draft04_exclusive_bounds_are_converted() {
        let map = object(json!({
            "minimum": 0,
            "exclusiveMinimum": true,
            "maximum": 10,
            "exclusiveMaximum": false
        }));
        let mut warnings = Vec::new();
        let c = constraints(&map, &ptr(), &mut warnings).unwrap();
        assert_eq!(c.minimum, None);
        assert_eq!(c.exclusive_minimum, Some(0.0));
        assert_eq!(c.maximum, Some(10.0));
        assert_eq!(c.exclusive_maximum, None);
        assert_eq!(warnings.len(), 2);
        assert!(warnings
            .iter()
            .all(|w| w.kind == WarningKind::DeprecatedKeyword));
    }

    #[test]
    fn bad_constraint_shapes() {
        let mut warnings = Vec::new();
        for schema in [
            json!({"minimum": "1"}),
            json!({"minLength": -1}),
            json!({"multipleOf": 0}),
            json!({"enum": "a"}),
            json!({"uniqueItems": "yes"}),
        ] {
            let map = object(schema.clone());
            assert!(
                constraints(&map, &ptr(), &mut warnings).is_err(),
                "accepted {}",
                schema
            );
        }
    }

    #[test]
    fn required_names() {
        let mut warnings = Vec::new();
        let map = object(json!({"required": ["b", "a"]}));
        let names = required(&map, &ptr(), &mut warnings).unwrap();
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);

        let map = object(json!({"required": true}));
        assert!(required(&map, &ptr(), &mut warnings).unwrap().is_empty());
        assert_eq!(warnings.len(), 1);

        let map = object(json!({"required": [1]}));
        assert!(required(&map, &ptr(), &mut warnings).is_err());
    }

    #[test]
    fn deprecated_keywords_warn() {
        let map = object(json!({"id": "x", "dependencies": {}}));
        let mut warnings = Vec::new();
        deprecations(&map, &ptr(), &mut warnings);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].message.contains("$id"));
    }

    #[test]
    fn unknown_keywords_pass_through() {
        let map = object(json!({
            "type": "object",
            "title": "T",
            "x-go-type": "Pet",
            "patternProperties": {"^x": {}}
        }));
        let ext = extensions(&map);
        assert_eq!(ext.len(), 2);
        assert!(ext.contains_key("x-go-type"));
        assert!(ext.contains_key("patternProperties"));
    }

    #[test]
    fn infers_kinds_from_literals_and_keywords() {
        let infer = |schema: Value| {
            let map = object(schema);
            let mut warnings = Vec::new();
            let c = constraints(&map, &ptr(), &mut warnings).unwrap();
            infer_kinds(&map, &c)
        };

        assert_eq!(
            infer(json!({"enum": ["a", 1, null]})),
            vec![Kind::Null, Kind::Integer, Kind::String]
        );
        assert_eq!(infer(json!({"const": 1.5})), vec![Kind::Number]);
        assert_eq!(infer(json!({"properties": {}})), vec![Kind::Object]);
        assert_eq!(infer(json!({"minItems": 1, "maxLength": 2})), vec![Kind::String, Kind::Array]);
        assert_eq!(infer(json!({"format": "uuid"})), vec![Kind::String]);
        assert_eq!(infer(json!({"format": "int64"})), vec![Kind::Integer]);
        assert!(infer(json!({"description": "anything"})).is_empty());
    }
}
