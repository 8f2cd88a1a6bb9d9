// src/cli/mod.rs
//! CLI definitions for the Poppler recipe
//!
//! This module contains the command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.
//!
//! Each command runs option resolution first, then the lifecycle steps it
//! names:
//! - `info` - Recipe metadata, options and settings
//! - `resolve` - Requirements, dependency options and CMake definitions
//! - `source` / `build` / `package` - A single lifecycle step
//! - `create` - Every step in order

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "poppler-recipe")]
#[command(author = "Poppler Recipe Contributors")]
#[command(version)]
#[command(about = "Build and package the Poppler PDF library from source", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct RecipeArgs {
    /// Set an option, e.g. `-o with_qt=True` (repeatable)
    #[arg(short = 'o', long = "option", value_name = "NAME=VALUE")]
    pub options: Vec<String>,

    /// Set a setting, e.g. `-s os=Windows` (repeatable)
    #[arg(short = 's', long = "setting", value_name = "KEY=VALUE")]
    pub settings: Vec<String>,

    /// Recipe configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Working directory for sources, build and package folders
    #[arg(long, value_name = "DIR", default_value = "poppler-build")]
    pub workdir: String,

    /// Number of parallel build jobs (default: all cores)
    #[arg(short, long)]
    pub jobs: Option<u32>,

    /// Hide the download progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show recipe metadata, effective options and settings
    Info {
        #[command(flatten)]
        recipe: RecipeArgs,
    },

    /// Resolve options and show requirements and CMake definitions
    Resolve {
        #[command(flatten)]
        recipe: RecipeArgs,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch and stage the upstream sources
    Source {
        #[command(flatten)]
        recipe: RecipeArgs,
    },

    /// Configure and build with CMake (sources must be staged)
    Build {
        #[command(flatten)]
        recipe: RecipeArgs,
    },

    /// Install into the package folder and report link libraries
    Package {
        #[command(flatten)]
        recipe: RecipeArgs,
    },

    /// Run source, build, package and package info in order
    Create {
        #[command(flatten)]
        recipe: RecipeArgs,
    },
}
