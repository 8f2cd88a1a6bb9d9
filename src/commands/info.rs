// src/commands/info.rs

//! Info command - show recipe metadata, options and settings

use super::{bool_str, load_context};
use crate::cli::RecipeArgs;
use anyhow::Result;
use poppler_recipe::recipe::OptionName;

/// Print recipe metadata and the effective option values
pub fn cmd_info(args: &RecipeArgs) -> Result<()> {
    let ctx = load_context(args)?;
    let recipe = ctx.kitchen.recipe();
    let package = &recipe.package;

    println!("{} {}", package.name, package.version);
    println!("  {}", package.description);
    println!("  License: {}", package.license);
    println!("  Homepage: {}", package.homepage);
    println!("  Recipe URL: {}", package.url);
    println!("  Author: {}", package.author);
    println!("  Topics: {}", package.topics.join(", "));
    println!("  Source: {}", recipe.archive_url());
    if let Some(checksum) = &recipe.source.checksum {
        println!("  Checksum: {}", checksum);
    }

    println!("\nSettings:");
    println!("  os={}", ctx.settings.os);
    println!("  compiler={}", ctx.settings.compiler);
    println!("  arch={}", ctx.settings.arch);
    println!("  build_type={}", ctx.settings.build_type);

    println!("\nOptions:");
    for name in OptionName::ALL {
        let marker = if ctx.options.is_explicit(*name) { " (set)" } else { "" };
        println!(
            "  {}={} [default {}]{}",
            name,
            bool_str(ctx.options.get(*name)),
            bool_str(name.default_value()),
            marker
        );
    }

    let layout = ctx.kitchen.layout();
    println!("\nFolders:");
    println!("  source:  {}", layout.source_folder.display());
    println!("  build:   {}", layout.build_folder.display());
    println!("  package: {}", layout.package_folder.display());

    Ok(())
}
