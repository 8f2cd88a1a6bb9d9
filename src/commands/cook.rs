// src/commands/cook.rs

//! Lifecycle commands - source, build, package and create

use super::{load_context, RecipeContext};
use crate::cli::RecipeArgs;
use anyhow::{Context, Result};
use poppler_recipe::recipe::{PackageInfo, ResolvedRecipe};
use tracing::info;

/// Load the context and run option resolution
///
/// Every lifecycle command goes through here, so a contradictory
/// configuration stops before anything is downloaded or built.
fn resolve(args: &RecipeArgs) -> Result<(RecipeContext, ResolvedRecipe)> {
    let ctx = load_context(args)?;
    let resolved = ctx
        .kitchen
        .resolve(ctx.options.clone(), ctx.settings)
        .context("Option resolution failed")?;
    Ok((ctx, resolved))
}

fn print_package_info(info: &PackageInfo) {
    println!("\nPackage info:");
    println!("  libs: {}", info.libs.join(", "));
    println!("  include dirs: {}", info.include_dirs.join(", "));
    println!("  lib dirs: {}", info.lib_dirs.join(", "));
    if !info.bin_dirs.is_empty() {
        println!("  bin dirs: {}", info.bin_dirs.join(", "));
    }
}

/// Fetch and stage the upstream sources
pub fn cmd_source(args: &RecipeArgs) -> Result<()> {
    let (ctx, resolved) = resolve(args)?;
    let recipe = ctx.kitchen.recipe();

    println!("Fetching {}", recipe.archive_url());
    let staged = ctx
        .kitchen
        .source(&resolved)
        .with_context(|| format!("Failed to fetch sources for {}", recipe.package.name))?;

    println!("[COMPLETE] Sources staged in {}", staged.display());
    Ok(())
}

/// Configure and build
pub fn cmd_build(args: &RecipeArgs) -> Result<()> {
    let (ctx, resolved) = resolve(args)?;
    let name = &ctx.kitchen.recipe().package.name;

    println!(
        "Building {} with {} parallel jobs...",
        name,
        ctx.kitchen.config().jobs
    );
    let log = ctx
        .kitchen
        .build(&resolved)
        .with_context(|| format!("Failed to build {}", name))?;
    info!("Build log: {} bytes", log.len());

    println!("[COMPLETE] Build folder: {}", ctx.kitchen.layout().build_folder.display());
    Ok(())
}

/// Install, copy artifacts and report link libraries
pub fn cmd_package(args: &RecipeArgs) -> Result<()> {
    let (ctx, resolved) = resolve(args)?;
    let name = &ctx.kitchen.recipe().package.name;

    let (files, _log) = ctx
        .kitchen
        .package(&resolved)
        .with_context(|| format!("Failed to package {}", name))?;
    let info = ctx
        .kitchen
        .package_info(&resolved)
        .with_context(|| format!("Failed to collect package info for {}", name))?;

    println!(
        "[COMPLETE] Packaged {} file(s) into {}",
        files.len(),
        ctx.kitchen.layout().package_folder.display()
    );
    print_package_info(&info);
    Ok(())
}

/// Run every lifecycle step in order
pub fn cmd_create(args: &RecipeArgs) -> Result<()> {
    let (ctx, resolved) = resolve(args)?;
    let recipe = ctx.kitchen.recipe();

    println!(
        "Cooking {} version {} ({})",
        recipe.package.name, recipe.package.version, resolved.settings
    );
    println!("  Requirements: {}", resolved.requires.names().join(", "));

    let result = ctx
        .kitchen
        .cook(&resolved)
        .with_context(|| format!("Failed to cook {}", recipe.package.name))?;

    println!("\n[COMPLETE] Package folder: {}", result.package_folder.display());
    print_package_info(&result.info);
    Ok(())
}
