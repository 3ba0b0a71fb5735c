//! Schema-driven traversal shared by rendering, flattening and summaries.
//!
//! [`walk`] visits the schema document in member order, pairing every member
//! with its annotation. Objects become groups; everything else is a leaf field.
//! Annotations for keys the schema does not contain are never visited.

use serde_json::{Map, Value};

use crate::descriptor::{FieldType, TypeMap};
use crate::path::FieldPath;

/// One leaf of the schema, as seen during a walk.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    /// Member name within its parent object.
    pub key: &'a str,
    pub path: &'a FieldPath,
    pub field_type: FieldType,
    /// Stored (default) value from the schema document.
    pub value: &'a Value,
}

impl Field<'_> {
    /// The stored value as form text.
    #[must_use]
    pub fn text(&self) -> String {
        display_value(self.value)
    }

    /// The stored list elements as form text; a non-array value has none.
    #[must_use]
    pub fn items(&self) -> Vec<String> {
        self.value
            .as_array()
            .map(|items| items.iter().map(display_value).collect())
            .unwrap_or_default()
    }
}

/// Callbacks for [`walk`].
pub trait FormVisitor {
    fn enter_group(&mut self, key: &str, path: &FieldPath);

    fn field(&mut self, field: Field<'_>);

    fn exit_group(&mut self, key: &str, path: &FieldPath);
}

/// Visit every group and field of `schema` below `prefix`.
pub fn walk<V: FormVisitor + ?Sized>(
    schema: &Map<String, Value>,
    types: &TypeMap,
    prefix: &FieldPath,
    visitor: &mut V,
) {
    for (key, value) in schema {
        let path = prefix.child(key);
        match value {
            Value::Object(members) => {
                visitor.enter_group(key, &path);
                walk(members, types.group(key), &path, visitor);
                visitor.exit_group(key, &path);
            }
            _ => visitor.field(Field {
                key,
                path: &path,
                field_type: types.field_type(key),
                value,
            }),
        }
    }
}

/// Text shown in a form control for a stored value.
///
/// Strings appear without quotes, `null` as empty text, everything else as
/// its JSON text.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
