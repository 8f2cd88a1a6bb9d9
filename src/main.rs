// src/main.rs

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise info, or debug with -v
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Info { recipe } => commands::cmd_info(&recipe),
        Commands::Resolve { recipe, json } => commands::cmd_resolve(&recipe, json),
        Commands::Source { recipe } => commands::cmd_source(&recipe),
        Commands::Build { recipe } => commands::cmd_build(&recipe),
        Commands::Package { recipe } => commands::cmd_package(&recipe),
        Commands::Create { recipe } => commands::cmd_create(&recipe),
    }
}
