use std::io::Read;
use std::path::Path;

use anyhow::Context;
use formkit_config::FormkitConfig;
use formkit_core::{reconstruct, to_json_pretty, FlatSubmission};

use crate::cli::ReconstructArgs;
use crate::commands::shared::load_types;

/// Handle `formkit reconstruct`.
pub fn handle(args: &ReconstructArgs, config: FormkitConfig) -> anyhow::Result<()> {
    println!("{}", run(args, config)?);
    Ok(())
}

/// The reconstructed document as 4-space-indented JSON.
fn run(args: &ReconstructArgs, config: FormkitConfig) -> anyhow::Result<String> {
    let types_path = args.types.clone().unwrap_or(config.form.types_path);
    let types = load_types(&types_path)?;

    let text = read_input(args.input.as_deref())?;
    let value: serde_json::Value =
        serde_json::from_str(&text).context("submission is not valid JSON")?;
    let flat = FlatSubmission::from_json(&value)?;

    Ok(to_json_pretty(&reconstruct(&flat, &types))?)
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read submission from stdin")?;
            Ok(text)
        }
    }
}
