//! Error types for loading form definitions.
//!
//! Rendering and reconstruction never fail; only reading and parsing the
//! schema and type documents can.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A schema or type document could not be read from disk.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document is not valid JSON, or a document could not be serialized.
    #[error("Invalid JSON in {what}: {source}")]
    Json {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// The top level of a schema, type map or submission is not an object.
    #[error("{what} must be a JSON object at the top level, found {found}")]
    NotAnObject { what: String, found: &'static str },
}

/// Name of a JSON value's kind, for error messages.
pub(crate) const fn kind_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
