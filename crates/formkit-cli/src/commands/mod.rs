use formkit_config::FormkitConfig;

use crate::cli::Commands;

pub mod check;
pub mod reconstruct;
pub mod render;
pub mod serve;
pub mod shared;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, config: FormkitConfig) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => serve::handle(&args, config).await,
        Commands::Render(args) => render::handle(&args, config),
        Commands::Reconstruct(args) => reconstruct::handle(&args, config),
        Commands::Check(args) => check::handle(&args, config),
    }
}
