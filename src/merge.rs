//! `allOf` merging: the most restrictive value of every keyword wins.
//!
//! Constraints, kinds and `required` merge order-independently. An `enum`
//! intersection is sorted by its JSON text. Properties keep first-seen order.
//! Alternatives (`anyOf`/`oneOf`), `not` and conditionals are carried over
//! unevaluated.

use std::collections::HashMap;
use std::fmt::Display;

use serde_json::Value;

use crate::error::{BuildError, Warning, WarningKind};
use crate::graph::{Arena, SchemaLookup};
use crate::info::{AdditionalProperties, SchemaId, SchemaInfo};
use crate::pointer::CanonicalPointer;
use crate::types::Kind;

/// Merges parts of an `allOf` into one node, allocating synthetic nodes for
/// properties and items that need a merge of their own.
pub(crate) struct Merger<'a> {
    arena: &'a mut Arena,
    warnings: &'a mut Vec<Warning>,
}

impl<'a> Merger<'a> {
    pub(crate) fn new(arena: &'a mut Arena, warnings: &'a mut Vec<Warning>) -> Self {
        Self { arena, warnings }
    }

    /// Merge `parts` into a node located at `owner`.
    ///
    /// The result keeps the id of the first part and is not sealed.
    ///
    /// # Errors
    ///
    /// `SchemaConflict` when the parts admit no common instance: disjoint
    /// types, crossed bounds, an empty `enum` intersection, differing `const`
    /// or `format` values.
    pub(crate) fn merge(
        &mut self,
        owner: &CanonicalPointer,
        parts: Vec<SchemaInfo>,
    ) -> Result<SchemaInfo, BuildError> {
        let id = parts
            .first()
            .map(|part| part.id)
            .unwrap_or_else(|| self.arena.next_id());
        let mut acc = Accumulator::new(SchemaInfo::new(id, owner.clone()));

        for part in parts {
            acc.annotations(&part);
            acc.kinds(&part)?;
            acc.bounds(&part)?;
            acc.literals(&part)?;
            self.structure(&mut acc, part)?;
        }
        acc.finish()
    }

    fn structure(&mut self, acc: &mut Accumulator, part: SchemaInfo) -> Result<(), BuildError> {
        let owner = acc.info.pointer.child("allOf");

        for property in part.properties {
            let existing = acc
                .info
                .properties
                .iter()
                .position(|p| p.name == property.name);
            match existing {
                None => acc.info.properties.push(property),
                Some(i) if acc.info.properties[i].schema == property.schema => {}
                Some(i) => {
                    let pointer = owner.child("properties").child(&property.name);
                    let left = acc.info.properties[i].schema;
                    acc.info.properties[i].schema =
                        self.merge_nodes(&pointer, left, property.schema)?;
                }
            }
        }
        acc.info.required.extend(part.required);

        acc.info.items = match (acc.info.items, part.items) {
            (Some(left), Some(right)) if left != right => {
                Some(self.merge_nodes(&owner.child("items"), left, right)?)
            }
            (left, right) => left.or(right),
        };

        use AdditionalProperties::*;
        let additional = (acc.info.additional_properties, part.additional_properties);
        acc.info.additional_properties = match additional {
            (Forbidden, _) | (_, Forbidden) => Forbidden,
            (Allowed, other) | (other, Allowed) => other,
            (Schema(left), Schema(right)) if left == right => Schema(left),
            (Schema(left), Schema(right)) => Schema(self.merge_nodes(
                &owner.child("additionalProperties"),
                left,
                right,
            )?),
        };

        for (name, id) in part.definitions {
            if acc.info.definition(&name).is_none() {
                acc.info.definitions.push((name, id));
            }
        }
        acc.info.branches.extend(part.branches);
        acc.info.not.extend(part.not);
        acc.info.conditionals.extend(part.conditionals);
        for (key, value) in part.extensions {
            acc.info.extensions.entry(key).or_insert(value);
        }
        for id in part.unmerged {
            if !acc.info.unmerged.contains(&id) {
                acc.info.unmerged.push(id);
            }
        }
        acc.info.rejects_all |= part.rejects_all;
        Ok(())
    }

    /// Merge two finished nodes into a new synthetic node.
    fn merge_nodes(
        &mut self,
        pointer: &CanonicalPointer,
        left: SchemaId,
        right: SchemaId,
    ) -> Result<SchemaId, BuildError> {
        let (Some(l), Some(r)) = (self.arena.lookup(left), self.arena.lookup(right)) else {
            self.warnings.push(Warning::new(
                WarningKind::RecursiveComposition,
                pointer,
                "cannot merge a schema that is still being built; keeping the first",
            ));
            return Ok(left);
        };
        let parts = vec![l.clone(), r.clone()];
        let mut merged = self.merge(pointer, parts)?;
        merged.seal(&*self.arena, self.warnings);
        Ok(self.arena.push(merged))
    }
}

/// A merge in progress, remembering which part contributed each keyword.
struct Accumulator {
    info: SchemaInfo,
    sources: HashMap<&'static str, String>,
}

impl Accumulator {
    fn new(info: SchemaInfo) -> Self {
        Self {
            info,
            sources: HashMap::new(),
        }
    }

    fn annotations(&mut self, part: &SchemaInfo) {
        if self.info.title.is_none() {
            self.info.title = part.title.clone();
        }
        if self.info.description.is_none() {
            self.info.description = part.description.clone();
        }
    }

    /// Declared kinds intersect; declared beats inferred; inferred kinds
    /// only widen each other.
    fn kinds(&mut self, part: &SchemaInfo) -> Result<(), BuildError> {
        if part.kinds.is_empty() {
            return Ok(());
        }
        if self.info.kinds.is_empty() || (self.info.kinds_inferred && !part.kinds_inferred) {
            self.info.kinds = part.kinds.clone();
            self.info.kinds_inferred = part.kinds_inferred;
            self.sources.insert("type", part.pointer.to_string());
            return Ok(());
        }

        match (self.info.kinds_inferred, part.kinds_inferred) {
            (false, false) => {
                let mut common: Vec<Kind> = self
                    .info
                    .kinds
                    .iter()
                    .flat_map(|a| part.kinds.iter().filter_map(move |b| a.meet(*b)))
                    .collect();
                common.sort();
                common.dedup();
                if common.is_empty() {
                    return Err(self.conflict(
                        "type",
                        kind_list(&self.info.kinds),
                        "type",
                        kind_list(&part.kinds),
                        &part.pointer,
                        "no common type",
                    ));
                }
                self.info.kinds = common;
            }
            (false, true) => {}
            _ => {
                self.info.kinds.extend(part.kinds.iter().copied());
                self.info.kinds.sort();
                self.info.kinds.dedup();
            }
        }
        Ok(())
    }

    fn bounds(&mut self, part: &SchemaInfo) -> Result<(), BuildError> {
        let from = part.pointer.to_string();
        let c = &mut self.info.constraints;
        let p = &part.constraints;
        let sources = &mut self.sources;
        let mut note = |changed: bool, keyword: &'static str| {
            if changed {
                sources.insert(keyword, from.clone());
            }
        };

        note(raise(&mut c.minimum, p.minimum), "minimum");
        note(raise(&mut c.exclusive_minimum, p.exclusive_minimum), "exclusiveMinimum");
        note(lower(&mut c.maximum, p.maximum), "maximum");
        note(lower(&mut c.exclusive_maximum, p.exclusive_maximum), "exclusiveMaximum");
        note(raise(&mut c.min_length, p.min_length), "minLength");
        note(lower(&mut c.max_length, p.max_length), "maxLength");
        note(raise(&mut c.min_items, p.min_items), "minItems");
        note(lower(&mut c.max_items, p.max_items), "maxItems");
        note(raise(&mut c.min_properties, p.min_properties), "minProperties");
        note(lower(&mut c.max_properties, p.max_properties), "maxProperties");

        c.multiple_of.extend(p.multiple_of.iter().copied());
        c.multiple_of = reduce_divisors(&c.multiple_of);
        c.patterns.extend(p.patterns.iter().cloned());
        c.patterns.sort();
        c.patterns.dedup();
        c.unique_items |= p.unique_items;

        let c = &self.info.constraints;
        self.check_range("minimum", c.minimum, "maximum", c.maximum, false)?;
        self.check_range("exclusiveMinimum", c.exclusive_minimum, "maximum", c.maximum, true)?;
        self.check_range("minimum", c.minimum, "exclusiveMaximum", c.exclusive_maximum, true)?;
        self.check_range(
            "exclusiveMinimum",
            c.exclusive_minimum,
            "exclusiveMaximum",
            c.exclusive_maximum,
            true,
        )?;
        self.check_range("minLength", c.min_length, "maxLength", c.max_length, false)?;
        self.check_range("minItems", c.min_items, "maxItems", c.max_items, false)?;
        self.check_range(
            "minProperties",
            c.min_properties,
            "maxProperties",
            c.max_properties,
            false,
        )
    }

    fn literals(&mut self, part: &SchemaInfo) -> Result<(), BuildError> {
        let p = &part.constraints;

        if let Some(values) = &p.enumeration {
            let merged = match &self.info.constraints.enumeration {
                None => values.clone(),
                Some(current) => {
                    let mut common: Vec<Value> = current
                        .iter()
                        .filter(|v| values.contains(v))
                        .cloned()
                        .collect();
                    if common.is_empty() {
                        return Err(self.conflict(
                            "enum",
                            Value::Array(current.clone()),
                            "enum",
                            Value::Array(values.clone()),
                            &part.pointer,
                            "no common value",
                        ));
                    }
                    common.sort_by_cached_key(Value::to_string);
                    common
                }
            };
            self.info.constraints.enumeration = Some(merged);
            self.sources.insert("enum", part.pointer.to_string());
        }

        if let Some(value) = &p.constant {
            match &self.info.constraints.constant {
                Some(current) if current != value => {
                    return Err(self.conflict(
                        "const",
                        current,
                        "const",
                        value,
                        &part.pointer,
                        "values differ",
                    ))
                }
                Some(_) => {}
                None => {
                    self.info.constraints.constant = Some(value.clone());
                    self.sources.insert("const", part.pointer.to_string());
                }
            }
        }

        if let Some(format) = &p.format {
            match &self.info.constraints.format {
                Some(current) if current != format => {
                    return Err(self.conflict(
                        "format",
                        current,
                        "format",
                        format,
                        &part.pointer,
                        "formats differ",
                    ))
                }
                Some(_) => {}
                None => {
                    self.info.constraints.format = Some(format.clone());
                    self.sources.insert("format", part.pointer.to_string());
                }
            }
        }
        Ok(())
    }

    /// Cross-keyword checks once every part has been absorbed.
    fn finish(mut self) -> Result<SchemaInfo, BuildError> {
        let c = &self.info.constraints;
        if let (Some(value), Some(values)) = (&c.constant, &c.enumeration) {
            if !values.contains(value) {
                return Err(self.conflict_between(
                    "const",
                    value,
                    "enum",
                    Value::Array(values.clone()),
                    "const is not one of the enum values",
                ));
            }
        }

        if self.info.kinds.is_empty() || self.info.kinds_inferred {
            return Ok(self.info);
        }
        let kinds = &self.info.kinds;

        if let Some(value) = &c.constant {
            if !admits(kinds, value) {
                return Err(self.conflict_between(
                    "const",
                    value,
                    "type",
                    kind_list(kinds),
                    "const does not match the type",
                ));
            }
        }
        if let Some(values) = &c.enumeration {
            let kept: Vec<Value> = values.iter().filter(|v| admits(kinds, v)).cloned().collect();
            if kept.is_empty() {
                return Err(self.conflict_between(
                    "enum",
                    Value::Array(values.clone()),
                    "type",
                    kind_list(kinds),
                    "no enum value matches the type",
                ));
            }
            self.info.constraints.enumeration = Some(kept);
        }
        Ok(self.info)
    }

    fn check_range<T: PartialOrd + Display>(
        &self,
        low_key: &'static str,
        low: Option<T>,
        high_key: &'static str,
        high: Option<T>,
        exclusive: bool,
    ) -> Result<(), BuildError> {
        let (Some(low), Some(high)) = (low, high) else {
            return Ok(());
        };
        if low > high || (exclusive && low == high) {
            return Err(self.conflict_between(
                low_key,
                low,
                high_key,
                high,
                "lower bound exceeds upper bound",
            ));
        }
        Ok(())
    }

    /// Conflict between the accumulated `left_key` and a value from `from`.
    fn conflict(
        &self,
        left_key: &'static str,
        left: impl Display,
        right_key: &'static str,
        right: impl Display,
        from: &CanonicalPointer,
        detail: &str,
    ) -> BuildError {
        BuildError::SchemaConflict {
            pointer: self.info.pointer.to_string(),
            keyword: left_key.to_string(),
            left: format!("{} {} from {}", left_key, left, self.source(left_key)),
            right: format!("{} {} from {}", right_key, right, from),
            detail: detail.to_string(),
        }
    }

    /// Conflict between two accumulated keywords.
    fn conflict_between(
        &self,
        left_key: &'static str,
        left: impl Display,
        right_key: &'static str,
        right: impl Display,
        detail: &str,
    ) -> BuildError {
        BuildError::SchemaConflict {
            pointer: self.info.pointer.to_string(),
            keyword: left_key.to_string(),
            left: format!("{} {} from {}", left_key, left, self.source(left_key)),
            right: format!("{} {} from {}", right_key, right, self.source(right_key)),
            detail: detail.to_string(),
        }
    }

    fn source(&self, keyword: &str) -> &str {
        self.sources
            .get(keyword)
            .map(String::as_str)
            .unwrap_or_else(|| self.info.pointer.path())
    }
}

fn raise<T: PartialOrd + Copy>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match (*slot, value) {
        (_, None) => false,
        (Some(current), Some(v)) if current >= v => false,
        (_, Some(v)) => {
            *slot = Some(v);
            true
        }
    }
}

fn lower<T: PartialOrd + Copy>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match (*slot, value) {
        (_, None) => false,
        (Some(current), Some(v)) if current <= v => false,
        (_, Some(v)) => {
            *slot = Some(v);
            true
        }
    }
}

/// Sorted divisors with duplicates and implied divisors removed: a divisor
/// of another listed value adds nothing.
fn reduce_divisors(values: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = values
        .iter()
        .copied()
        .filter(|d| {
            !values
                .iter()
                .any(|other| other != d && (other / d).fract() == 0.0)
        })
        .collect();
    out.sort_by(f64::total_cmp);
    out.dedup();
    out
}

/// True when a literal value belongs to one of `kinds`.
fn admits(kinds: &[Kind], value: &Value) -> bool {
    let actual = Kind::of_value(value);
    kinds
        .iter()
        .any(|kind| *kind == actual || (*kind == Kind::Number && actual == Kind::Integer))
}

fn kind_list(kinds: &[Kind]) -> String {
    let names: Vec<&str> = kinds.iter().map(Kind::as_str).collect();
    format!("[{}]", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::info::{BranchGroup, BranchKind, PropertyInfo};
    use crate::pointer::DocumentUri;
    use serde_json::json;

    fn ptr(path: &str) -> CanonicalPointer {
        CanonicalPointer::new(DocumentUri::memory("root.json"), path)
    }

    fn part(index: usize, kinds: &[Kind]) -> SchemaInfo {
        let mut info = SchemaInfo::new(SchemaId(index), ptr(&format!("/allOf/{}", index)));
        info.kinds = kinds.to_vec();
        info
    }

    fn merge(parts: Vec<SchemaInfo>) -> Result<SchemaInfo, BuildError> {
        let mut arena = Arena::default();
        let mut warnings = Vec::new();
        Merger::new(&mut arena, &mut warnings).merge(&ptr(""), parts)
    }

    #[test]
    fn bounds_take_the_most_restrictive_value() {
        let mut a = part(0, &[Kind::Integer]);
        a.constraints.minimum = Some(5.0);
        a.constraints.maximum = Some(20.0);
        let mut b = part(1, &[Kind::Integer]);
        b.constraints.minimum = Some(10.0);
        b.constraints.maximum = Some(15.0);
        b.constraints.min_length = Some(2);

        let merged = merge(vec![a, b]).unwrap();
        assert_eq!(merged.constraints.minimum, Some(10.0));
        assert_eq!(merged.constraints.maximum, Some(15.0));
        assert_eq!(merged.constraints.min_length, Some(2));
        assert_eq!(merged.pointer, ptr(""));
    }

    #[test]
    fn merge_is_order_independent() {
        let mut a = part(0, &[Kind::Number, Kind::String]);
        a.constraints.minimum = Some(1.0);
        a.constraints.multiple_of = vec![2.0];
        a.required.insert("x".into());
        let mut b = part(1, &[Kind::Integer]);
        b.constraints.maximum = Some(9.0);
        b.constraints.multiple_of = vec![4.0];
        b.required.insert("y".into());
        a.constraints.enumeration = Some(vec![json!(8), json!(4), json!(2)]);
        b.constraints.enumeration = Some(vec![json!(2), json!(8)]);

        let ab = merge(vec![a.clone(), b.clone()]).unwrap();
        let ba = merge(vec![b, a]).unwrap();
        assert_eq!(ab.constraints, ba.constraints);
        assert_eq!(ab.kinds, ba.kinds);
        assert_eq!(ab.required, ba.required);
        assert_eq!(ab.kinds, vec![Kind::Integer]);
        assert_eq!(ab.constraints.multiple_of, vec![4.0]);
        assert_eq!(ab.required.len(), 2);
        assert_eq!(ab.constraints.enumeration, Some(vec![json!(2), json!(8)]));
    }

    #[test]
    fn recursive_parts_do_not_mark_the_result() {
        let a = part(0, &[Kind::Object]);
        let mut b = part(1, &[Kind::Object]);
        b.recursive = true;
        b.unmerged = vec![SchemaId(4)];
        let merged = merge(vec![a, b]).unwrap();
        assert!(!merged.recursive);
        assert_eq!(merged.unmerged, vec![SchemaId(4)]);
    }

    #[test]
    fn disjoint_types_conflict() {
        let err = merge(vec![part(0, &[Kind::String]), part(1, &[Kind::Integer])]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaConflict);
        let BuildError::SchemaConflict {
            keyword,
            left,
            right,
            ..
        } = err
        else {
            panic!("expected conflict");
        };
        assert_eq!(keyword, "type");
        assert!(left.contains("/allOf/0"));
        assert!(right.contains("/allOf/1"));
    }

    #[test]
    fn declared_kinds_beat_inferred() {
        let mut inferred = part(0, &[Kind::Number]);
        inferred.kinds_inferred = true;
        let declared = part(1, &[Kind::String]);

        let merged = merge(vec![inferred.clone(), declared.clone()]).unwrap();
        assert_eq!(merged.kinds, vec![Kind::String]);
        assert!(!merged.kinds_inferred);
        assert_eq!(merge(vec![declared, inferred]).unwrap().kinds, vec![Kind::String]);
    }

    #[test]
    fn crossed_bounds_conflict() {
        let mut a = part(0, &[]);
        a.constraints.minimum = Some(10.0);
        let mut b = part(1, &[]);
        b.constraints.maximum = Some(5.0);
        let err = merge(vec![a, b]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("minimum 10 from root.json#/allOf/0"), "{}", message);
        assert!(message.contains("maximum 5 from root.json#/allOf/1"), "{}", message);
    }

    #[test]
    fn enum_and_const() {
        let mut a = part(0, &[]);
        a.constraints.enumeration = Some(vec![json!("a"), json!("b"), json!("c")]);
        let mut b = part(1, &[]);
        b.constraints.enumeration = Some(vec![json!("c"), json!("b")]);
        let merged = merge(vec![a.clone(), b]).unwrap();
        assert_eq!(merged.constraints.enumeration, Some(vec![json!("b"), json!("c")]));

        let mut c = part(2, &[]);
        c.constraints.enumeration = Some(vec![json!("z")]);
        assert!(merge(vec![a.clone(), c]).is_err());

        let mut d = part(3, &[]);
        d.constraints.constant = Some(json!("q"));
        assert!(merge(vec![a, d]).is_err());
    }

    #[test]
    fn enum_values_outside_the_type_are_dropped() {
        let mut a = part(0, &[Kind::String]);
        a.constraints.enumeration = Some(vec![json!("a"), json!(1)]);
        let merged = merge(vec![a, part(1, &[Kind::String])]).unwrap();
        assert_eq!(merged.constraints.enumeration, Some(vec![json!("a")]));

        let mut b = part(0, &[Kind::Integer]);
        b.constraints.enumeration = Some(vec![json!("a")]);
        assert!(merge(vec![b, part(1, &[])]).is_err());
    }

    #[test]
    fn differing_formats_conflict() {
        let mut a = part(0, &[Kind::String]);
        a.constraints.format = Some("email".into());
        let mut b = part(1, &[Kind::String]);
        b.constraints.format = Some("uuid".into());
        assert!(merge(vec![a, b]).is_err());
    }

    #[test]
    fn shared_property_is_merged_into_a_synthetic_node() {
        let mut arena = Arena::default();
        let mut low = part(10, &[Kind::Integer]);
        low.constraints.minimum = Some(1.0);
        let low = arena.push(low);
        let mut high = part(11, &[Kind::Integer]);
        high.constraints.maximum = Some(3.0);
        let high = arena.push(high);

        let mut a = part(0, &[Kind::Object]);
        a.properties.push(PropertyInfo::new("n", low));
        a.required.insert("n".into());
        let mut b = part(1, &[Kind::Object]);
        b.properties.push(PropertyInfo::new("n", high));
        b.properties.push(PropertyInfo::new("m", high));

        let mut warnings = Vec::new();
        let merged = Merger::new(&mut arena, &mut warnings)
            .merge(&ptr(""), vec![a, b])
            .unwrap();
        let names: Vec<&str> = merged.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["n", "m"]);

        let synthetic = arena.lookup(merged.properties[0].schema).unwrap();
        assert_eq!(synthetic.constraints.minimum, Some(1.0));
        assert_eq!(synthetic.constraints.maximum, Some(3.0));
        assert_eq!(synthetic.pointer.path(), "/allOf/properties/n");
        assert!(!synthetic.descriptors.is_empty());
    }

    #[test]
    fn unfinished_property_is_not_merged() {
        let mut arena = Arena::default();
        let pending = arena.reserve(ptr("/definitions/Node"));
        let done = arena.push(part(5, &[Kind::String]));

        let mut a = part(0, &[]);
        a.properties.push(PropertyInfo::new("next", pending));
        let mut b = part(1, &[]);
        b.properties.push(PropertyInfo::new("next", done));

        let mut warnings = Vec::new();
        let merged = Merger::new(&mut arena, &mut warnings)
            .merge(&ptr(""), vec![a, b])
            .unwrap();
        assert_eq!(merged.properties[0].schema, pending);
        assert_eq!(warnings[0].kind, WarningKind::RecursiveComposition);
    }

    #[test]
    fn closed_objects_stay_closed() {
        let mut a = part(0, &[]);
        a.additional_properties = AdditionalProperties::Forbidden;
        let mut b = part(1, &[]);
        b.additional_properties = AdditionalProperties::Schema(SchemaId(7));
        let merged = merge(vec![b, a]).unwrap();
        assert_eq!(merged.additional_properties, AdditionalProperties::Forbidden);
    }

    #[test]
    fn alternatives_are_concatenated_not_flattened() {
        let mut a = part(0, &[]);
        a.branches.push(BranchGroup {
            kind: BranchKind::OneOf,
            pointer: ptr("/allOf/0/oneOf"),
            members: vec![SchemaId(3), SchemaId(4)],
        });
        a.title = Some("First".into());
        let mut b = part(1, &[]);
        b.branches.push(BranchGroup {
            kind: BranchKind::AnyOf,
            pointer: ptr("/allOf/1/anyOf"),
            members: vec![SchemaId(5)],
        });
        b.title = Some("Second".into());
        b.not.push(ptr("/allOf/1/not"));

        let merged = merge(vec![a, b]).unwrap();
        assert_eq!(merged.branches.len(), 2);
        assert_eq!(merged.branches[0].members, vec![SchemaId(3), SchemaId(4)]);
        assert_eq!(merged.not.len(), 1);
        assert_eq!(merged.title.as_deref(), Some("First"));
    }

    #[test]
    fn divisors_are_reduced() {
        assert_eq!(reduce_divisors(&[2.0, 4.0, 2.0]), vec![4.0]);
        assert_eq!(reduce_divisors(&[3.0, 2.0]), vec![2.0, 3.0]);
    }
}
