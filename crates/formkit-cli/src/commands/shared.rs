use std::path::Path;

use anyhow::Context;
use formkit_config::FormkitConfig;
use formkit_core::{FormDefinition, TypeMap};

use crate::cli::FormArgs;

/// Layer command-line overrides on top of the loaded `[form]` section.
pub fn apply_form_args(config: &mut FormkitConfig, args: &FormArgs) {
    if let Some(schema) = &args.schema {
        config.form.schema_path.clone_from(schema);
    }
    if let Some(types) = &args.types {
        config.form.types_path.clone_from(types);
    }
    if let Some(encoding) = args.list_encoding {
        config.form.list_encoding = encoding;
    }
}

/// Load the schema and type documents named by `config`.
pub fn load_form(config: &FormkitConfig) -> anyhow::Result<FormDefinition> {
    FormDefinition::load(&config.form.schema_path, &config.form.types_path).with_context(|| {
        format!(
            "failed to load form from {} and {}",
            config.form.schema_path.display(),
            config.form.types_path.display()
        )
    })
}

/// Load a type document on its own.
pub fn load_types(path: &Path) -> anyhow::Result<TypeMap> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;
    TypeMap::from_value(&value).with_context(|| format!("invalid type map in {}", path.display()))
}
