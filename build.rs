// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Arguments every subcommand accepts
fn recipe_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("option")
            .short('o')
            .long("option")
            .value_name("NAME=VALUE")
            .action(ArgAction::Append)
            .help("Set an option, e.g. with_qt=True (repeatable)"),
    )
    .arg(
        Arg::new("setting")
            .short('s')
            .long("setting")
            .value_name("KEY=VALUE")
            .action(ArgAction::Append)
            .help("Set a setting, e.g. os=Windows (repeatable)"),
    )
    .arg(
        Arg::new("config")
            .long("config")
            .value_name("FILE")
            .help("Recipe configuration file (TOML)"),
    )
    .arg(
        Arg::new("workdir")
            .long("workdir")
            .value_name("DIR")
            .default_value("poppler-build")
            .help("Working directory for sources, build and package folders"),
    )
    .arg(
        Arg::new("jobs")
            .short('j')
            .long("jobs")
            .help("Number of parallel build jobs"),
    )
    .arg(
        Arg::new("no_progress")
            .long("no-progress")
            .action(ArgAction::SetTrue)
            .help("Hide the download progress bar"),
    )
}

fn build_cli() -> Command {
    Command::new("poppler-recipe")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Poppler Recipe Contributors")
        .about("Build and package the Poppler PDF library from source")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(recipe_args(
            Command::new("info").about("Show recipe metadata, effective options and settings"),
        ))
        .subcommand(recipe_args(
            Command::new("resolve")
                .about("Resolve options and show requirements and CMake definitions")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print machine-readable JSON"),
                ),
        ))
        .subcommand(recipe_args(
            Command::new("source").about("Fetch and stage the upstream sources"),
        ))
        .subcommand(recipe_args(
            Command::new("build").about("Configure and build with CMake"),
        ))
        .subcommand(recipe_args(
            Command::new("package").about("Install into the package folder and report link libraries"),
        ))
        .subcommand(recipe_args(
            Command::new("create").about("Run source, build, package and package info in order"),
        ))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("poppler-recipe.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
