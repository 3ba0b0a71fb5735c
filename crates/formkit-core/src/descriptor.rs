//! Field type descriptors and the type map tree.
//!
//! A type map mirrors the schema document: every object becomes a
//! [`TypeNode::Group`], every descriptor string (`str`, `int`, `bool`,
//! `list[<element>]`) becomes a [`TypeNode::Field`]. Descriptor strings are
//! parsed once, when the type map is loaded, and both the renderer and the
//! reconstructor consult the parsed tree.
//!
//! Parsing is lenient. Unknown descriptors, non-string annotations and
//! malformed list descriptors all resolve to `str`; a missing annotation
//! resolves to `str` at lookup time.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{kind_name, CoreError};

// ---------------------------------------------------------------------------
// ScalarType
// ---------------------------------------------------------------------------

/// Type of a single value: a leaf field or one element of a list field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    #[default]
    Str,
    Int,
    Bool,
}

impl ScalarType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Bool => "bool",
        }
    }

    /// Recognise a scalar descriptor, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(descriptor: &str) -> Option<Self> {
        let descriptor = descriptor.trim();
        [Self::Str, Self::Int, Self::Bool]
            .into_iter()
            .find(|kind| descriptor.eq_ignore_ascii_case(kind.as_str()))
    }

    /// Convert submitted text to a JSON value of this type.
    ///
    /// - `bool`: `true` exactly when the text is `"true"` in any letter case.
    /// - `int`: the trimmed text parsed as `i64` (or `u64` above `i64::MAX`);
    ///   text that does not parse is kept unchanged as a string.
    /// - `str`: the text unchanged.
    #[must_use]
    pub fn coerce(self, raw: &str) -> Value {
        match self {
            Self::Str => Value::String(raw.to_owned()),
            Self::Bool => Value::Bool(raw.eq_ignore_ascii_case("true")),
            Self::Int => parse_int(raw).unwrap_or_else(|| {
                tracing::debug!(value = raw, "int field is not numeric; keeping text");
                Value::String(raw.to_owned())
            }),
        }
    }
}

fn parse_int(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map(Value::from)
        .or_else(|_| trimmed.parse::<u64>().map(Value::from))
        .ok()
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FieldType
// ---------------------------------------------------------------------------

/// Declared type of a leaf field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Scalar(ScalarType),
    /// A sequence whose elements all share one scalar type.
    List(ScalarType),
}

impl Default for FieldType {
    fn default() -> Self {
        Self::Scalar(ScalarType::Str)
    }
}

impl FieldType {
    /// Parse a descriptor string such as `int` or `list[bool]`.
    ///
    /// Never fails: anything unrecognised is `str`, and a list of an
    /// unrecognised element type is `list[str]`.
    #[must_use]
    pub fn parse(descriptor: &str) -> Self {
        let trimmed = descriptor.trim();
        if let Some(inner) = strip_list_brackets(trimmed) {
            return Self::List(ScalarType::parse(inner).unwrap_or_default());
        }
        ScalarType::parse(trimmed).map_or_else(Self::default, Self::Scalar)
    }

    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::List(_))
    }

    /// The scalar type of the field itself, or of each list element.
    #[must_use]
    pub const fn scalar(self) -> ScalarType {
        match self {
            Self::Scalar(kind) | Self::List(kind) => kind,
        }
    }
}

fn strip_list_brackets(descriptor: &str) -> Option<&str> {
    let prefix = descriptor.get(..5)?;
    if !prefix.eq_ignore_ascii_case("list[") {
        return None;
    }
    descriptor[5..].strip_suffix(']')
}

impl FromStr for FieldType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::List(kind) => write!(f, "list[{kind}]"),
        }
    }
}

// ---------------------------------------------------------------------------
// TypeNode / TypeMap
// ---------------------------------------------------------------------------

/// One entry of a type map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    Field(FieldType),
    Group(TypeMap),
}

impl TypeNode {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(members) => Self::Group(TypeMap::from_object(members)),
            Value::String(descriptor) => Self::Field(FieldType::parse(descriptor)),
            _ => Self::Field(FieldType::default()),
        }
    }
}

/// Type annotations for the members of one object, keyed by member name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeMap {
    entries: BTreeMap<String, TypeNode>,
}

static EMPTY_GROUP: TypeMap = TypeMap {
    entries: BTreeMap::new(),
};

impl TypeMap {
    /// The type map with no annotations; every field resolves to `str`.
    #[must_use]
    pub fn empty() -> &'static Self {
        &EMPTY_GROUP
    }

    /// Build a type map from a parsed type document.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotAnObject`] if the document root is not an object.
    pub fn from_value(value: &Value) -> Result<Self, CoreError> {
        match value {
            Value::Object(members) => Ok(Self::from_object(members)),
            other => Err(CoreError::NotAnObject {
                what: "type map".into(),
                found: kind_name(other),
            }),
        }
    }

    fn from_object(members: &Map<String, Value>) -> Self {
        let entries = members
            .iter()
            .map(|(key, value)| (key.clone(), TypeNode::from_value(value)))
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TypeNode> {
        self.entries.get(key)
    }

    /// Declared type of a leaf member; `str` when absent or annotated as a group.
    #[must_use]
    pub fn field_type(&self, key: &str) -> FieldType {
        match self.entries.get(key) {
            Some(TypeNode::Field(field_type)) => *field_type,
            Some(TypeNode::Group(_)) | None => FieldType::default(),
        }
    }

    /// Annotations for a nested object member; empty when absent or annotated as a field.
    #[must_use]
    pub fn group(&self, key: &str) -> &Self {
        match self.entries.get(key) {
            Some(TypeNode::Group(group)) => group,
            Some(TypeNode::Field(_)) | None => Self::empty(),
        }
    }

    /// Add or replace an annotation.
    pub fn insert(&mut self, key: impl Into<String>, node: TypeNode) {
        self.entries.insert(key.into(), node);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
