//! Form document locations and rendering options.

use std::path::PathBuf;

use formkit_core::ListEncoding;
use serde::{Deserialize, Serialize};

fn default_schema_path() -> PathBuf {
    PathBuf::from("form.json")
}

fn default_types_path() -> PathBuf {
    PathBuf::from("form-type.json")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("submitted_form.json")
}

fn default_title() -> String {
    "Dynamic Form".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormConfig {
    /// Schema document: form shape and default values.
    #[serde(default = "default_schema_path")]
    pub schema_path: PathBuf,

    /// Type document, structurally parallel to the schema.
    #[serde(default = "default_types_path")]
    pub types_path: PathBuf,

    /// Where the latest submission is written.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Page title and heading.
    #[serde(default = "default_title")]
    pub title: String,

    /// How list fields are edited: `rows` or `comma`.
    #[serde(default)]
    pub list_encoding: ListEncoding,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            schema_path: default_schema_path(),
            types_path: default_types_path(),
            output_path: default_output_path(),
            title: default_title(),
            list_encoding: ListEncoding::default(),
        }
    }
}
