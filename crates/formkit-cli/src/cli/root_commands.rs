use std::path::PathBuf;

use clap::{Args, Subcommand};
use formkit_core::ListEncoding;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Serve the form over HTTP and persist submissions.
    Serve(ServeArgs),
    /// Print the rendered form to stdout.
    Render(RenderArgs),
    /// Rebuild a typed document from a flat `{path: value}` JSON object.
    Reconstruct(ReconstructArgs),
    /// Load the schema and type documents and report what the form contains.
    Check(CheckArgs),
}

/// Overrides for the `[form]` config section.
#[derive(Clone, Debug, Default, Args)]
pub struct FormArgs {
    /// Schema document (form shape and defaults)
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Type document, parallel to the schema
    #[arg(long)]
    pub types: Option<PathBuf>,

    /// List field editing: rows or comma
    #[arg(long, value_parser = parse_list_encoding)]
    pub list_encoding: Option<ListEncoding>,
}

fn parse_list_encoding(raw: &str) -> Result<ListEncoding, String> {
    raw.parse()
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub form: FormArgs,

    /// Address to listen on
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,

    /// File the latest submission is written to
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub form: FormArgs,

    /// Print the whole HTML page instead of the form fields
    #[arg(long)]
    pub page: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ReconstructArgs {
    /// Type document, parallel to the schema
    #[arg(long)]
    pub types: Option<PathBuf>,

    /// Flat submission JSON file (reads stdin when omitted)
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub form: FormArgs,
}
