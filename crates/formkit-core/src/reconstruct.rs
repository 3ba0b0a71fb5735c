//! Submission reconstruction.
//!
//! A posted form is a flat list of `path = text` pairs. [`reconstruct`]
//! rebuilds the nested document in two passes:
//!
//! 1. [`unflatten`] splits every path and creates intermediate objects on
//!    demand, storing each text at its final segment;
//! 2. [`coerce`] walks the rebuilt tree alongside the type map and converts
//!    each leaf to its declared type.
//!
//! Nothing here fails. Text that does not parse as its declared type is kept
//! as text.
//!
//! When one path names a leaf and another path runs through it
//! (`a = x` and `a.b = y`), the object wins and the leaf text is dropped,
//! whichever pair came first.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::descriptor::{FieldType, ScalarType, TypeMap, TypeNode};
use crate::document::Document;
use crate::error::{kind_name, CoreError};
use crate::path;
use crate::render::{field_paths, ListEncoding};

// ---------------------------------------------------------------------------
// FlatSubmission
// ---------------------------------------------------------------------------

/// Ordered path/text pairs from one form post.
///
/// Paths are unique. When a path is inserted twice the first text is kept,
/// matching how a form body with repeated keys is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatSubmission {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl FlatSubmission {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pair. Returns `false`, leaving the submission unchanged, if the
    /// path is already present.
    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<String>) -> bool {
        let path = path.into();
        if self.positions.contains_key(&path) {
            return false;
        }
        self.positions.insert(path.clone(), self.entries.len());
        self.entries.push((path, value.into()));
        true
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.positions
            .get(path)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(path, value)| (path.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read a submission from a JSON object of `path: value` members.
    ///
    /// String members are taken as-is; any other value is stored as its JSON
    /// text.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotAnObject`] if `value` is not an object.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        let Value::Object(members) = value else {
            return Err(CoreError::NotAnObject {
                what: "submission".into(),
                found: kind_name(value),
            });
        };
        Ok(members
            .iter()
            .map(|(path, value)| (path.clone(), crate::walk::display_value(value)))
            .collect())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlatSubmission {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut flat = Self::new();
        for (path, value) in iter {
            flat.insert(path, value);
        }
        flat
    }
}

// ---------------------------------------------------------------------------
// Passes
// ---------------------------------------------------------------------------

/// Rebuild and type-coerce a submitted form.
#[must_use]
pub fn reconstruct(flat: &FlatSubmission, types: &TypeMap) -> Document {
    coerce(unflatten(flat), types)
}

/// Rebuild the nested shape of a submission; every leaf stays a string.
#[must_use]
pub fn unflatten(flat: &FlatSubmission) -> Document {
    let mut root = Map::new();
    for (raw_path, text) in flat.iter() {
        let mut segments: Vec<&str> = path::split(raw_path).collect();
        let last = segments.pop().unwrap_or_default();

        let mut current = &mut root;
        for segment in segments {
            let slot = current
                .entry(segment.to_owned())
                .or_insert_with(|| Value::Object(Map::new()));
            current = ensure_object(slot, raw_path);
        }

        if current.get(last).is_some_and(Value::is_object) {
            tracing::debug!(path = raw_path, "path also names a group; dropping its text");
            continue;
        }
        current.insert(last.to_owned(), Value::String(text.to_owned()));
    }
    root
}

fn ensure_object<'a>(slot: &'a mut Value, raw_path: &str) -> &'a mut Map<String, Value> {
    if !slot.is_object() {
        tracing::debug!(path = raw_path, "replacing text with a group");
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(members) => members,
        _ => unreachable!("slot holds an object"),
    }
}

/// Convert the string leaves of an unflattened tree to their declared types.
#[must_use]
pub fn coerce(tree: Document, types: &TypeMap) -> Document {
    tree.into_iter()
        .map(|(key, value)| {
            let value = coerce_member(&key, value, types);
            (key, value)
        })
        .collect()
}

fn coerce_member(key: &str, value: Value, types: &TypeMap) -> Value {
    match (value, types.get(key)) {
        (Value::Object(children), Some(TypeNode::Field(FieldType::List(element)))) => {
            Value::Array(indexed_list(children, *element))
        }
        (Value::Object(members), _) => Value::Object(coerce(members, types.group(key))),
        (Value::String(text), Some(TypeNode::Field(FieldType::List(element)))) => {
            Value::Array(comma_list(&text, *element))
        }
        (Value::String(text), Some(TypeNode::Field(FieldType::Scalar(kind)))) => {
            kind.coerce(&text)
        }
        (other, _) => other,
    }
}

/// Elements posted as `<path>.<index>`, in ascending index order.
///
/// Blank rows are dropped. So are members that unflattened into a group
/// (`t.0.name`): list elements are scalars, and a group element could not be
/// posted back by the form that shows the list.
fn indexed_list(children: Map<String, Value>, element: ScalarType) -> Vec<Value> {
    let mut indexed: Vec<(ListIndex, Value)> = children
        .into_iter()
        .filter_map(|(key, value)| match ListIndex::parse(&key) {
            Some(index) => Some((index, value)),
            None => {
                tracing::debug!(key = %key, "ignoring non-numeric list member");
                None
            }
        })
        .collect();
    indexed.sort_by(|(a, _), (b, _)| a.cmp(b));

    indexed
        .into_iter()
        .filter_map(|(_, value)| match value {
            Value::String(text) if text.trim().is_empty() => None,
            Value::String(text) => Some(element.coerce(&text)),
            other => {
                tracing::debug!(kind = kind_name(&other), "dropping list element that is not text");
                None
            }
        })
        .collect()
}

/// An all-digit member name, ordered by numeric value at any length.
///
/// Leading zeros are stripped, so `"007"` and `"7"` rank the same and keep
/// their submission order. Comparing length first, then digits, orders
/// indices past `u64::MAX` correctly too.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListIndex(String);

impl ListIndex {
    fn parse(key: &str) -> Option<Self> {
        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self(key.trim_start_matches('0').to_owned()))
    }
}

impl Ord for ListIndex {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for ListIndex {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Elements posted as one comma-separated text.
fn comma_list(text: &str, element: ScalarType) -> Vec<Value> {
    text.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| element.coerce(segment))
        .collect()
}

/// Flatten a document back into the submission that would reproduce it.
#[must_use]
pub fn flatten(document: &Document, types: &TypeMap, encoding: ListEncoding) -> FlatSubmission {
    field_paths(document, types, encoding)
}
