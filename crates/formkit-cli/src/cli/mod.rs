use clap::Parser;

pub mod root_commands;

pub use root_commands::{CheckArgs, Commands, FormArgs, ReconstructArgs, RenderArgs, ServeArgs};

/// Top-level CLI parser for the `formkit` binary.
#[derive(Debug, Parser)]
#[command(
    name = "formkit",
    version,
    about = "formkit - HTML forms from JSON schemas, typed JSON from submissions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}
