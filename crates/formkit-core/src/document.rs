//! Loaded form definitions and document serialization.

use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::descriptor::TypeMap;
use crate::error::{kind_name, CoreError};
use crate::reconstruct::{reconstruct, FlatSubmission};
use crate::render::{field_paths, render, FormSummary, ListEncoding};

/// A JSON object: a schema document, or a reconstructed submission.
pub type Document = Map<String, Value>;

/// A schema document together with its parsed type map.
///
/// Loaded once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDefinition {
    pub schema: Document,
    pub types: TypeMap,
}

impl FormDefinition {
    #[must_use]
    pub const fn new(schema: Document, types: TypeMap) -> Self {
        Self { schema, types }
    }

    /// Parse a schema document and a type document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Json`] for invalid JSON and
    /// [`CoreError::NotAnObject`] when either root is not an object.
    pub fn from_json_str(schema: &str, types: &str) -> Result<Self, CoreError> {
        let schema = parse_object(schema, "schema")?;
        let types = TypeMap::from_value(&parse_json(types, "type map")?)?;
        Ok(Self { schema, types })
    }

    /// Read and parse the schema and type documents from disk.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`] when a file cannot be read, otherwise as
    /// [`FormDefinition::from_json_str`].
    pub fn load(schema_path: &Path, types_path: &Path) -> Result<Self, CoreError> {
        let schema = read(schema_path)?;
        let types = read(types_path)?;
        let definition = Self::from_json_str(&schema, &types)?;
        tracing::debug!(
            schema = %schema_path.display(),
            types = %types_path.display(),
            members = definition.schema.len(),
            "loaded form definition"
        );
        Ok(definition)
    }

    /// Form controls for the whole schema.
    #[must_use]
    pub fn render(&self, encoding: ListEncoding) -> String {
        render(&self.schema, &self.types, encoding)
    }

    /// The submission an untouched form would post.
    #[must_use]
    pub fn field_paths(&self, encoding: ListEncoding) -> FlatSubmission {
        field_paths(&self.schema, &self.types, encoding)
    }

    /// Rebuild a typed document from a submission.
    #[must_use]
    pub fn reconstruct(&self, flat: &FlatSubmission) -> Document {
        reconstruct(flat, &self.types)
    }

    #[must_use]
    pub fn summary(&self) -> FormSummary {
        FormSummary::of(&self.schema, &self.types)
    }
}

fn read(path: &Path) -> Result<String, CoreError> {
    std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_json(text: &str, what: &str) -> Result<Value, CoreError> {
    serde_json::from_str(text).map_err(|source| CoreError::Json {
        what: what.to_owned(),
        source,
    })
}

fn parse_object(text: &str, what: &str) -> Result<Document, CoreError> {
    match parse_json(text, what)? {
        Value::Object(members) => Ok(members),
        other => Err(CoreError::NotAnObject {
            what: what.to_owned(),
            found: kind_name(&other),
        }),
    }
}

/// Serialize a document as JSON indented with four spaces.
///
/// # Errors
///
/// Returns [`CoreError::Json`] if serialization fails.
pub fn to_json_pretty(document: &Document) -> Result<String, CoreError> {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    document
        .serialize(&mut serializer)
        .map_err(|source| CoreError::Json {
            what: "document".into(),
            source,
        })?;
    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&out).into_owned())
}
