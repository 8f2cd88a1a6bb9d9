// src/commands/resolve.rs

//! Resolve command - show what a configuration resolves to

use super::{bool_str, load_context};
use crate::cli::RecipeArgs;
use anyhow::{Context, Result};
use poppler_recipe::recipe::{Definitions, ResolvedRecipe};
use serde::Serialize;

/// Machine-readable resolution output
#[derive(Serialize)]
struct ResolveReport<'a> {
    #[serde(flatten)]
    resolved: &'a ResolvedRecipe,
    definitions: &'a Definitions,
}

/// Run option resolution and print the outcome
pub fn cmd_resolve(args: &RecipeArgs, json: bool) -> Result<()> {
    let ctx = load_context(args)?;
    let resolved = ctx
        .kitchen
        .resolve(ctx.options, ctx.settings)
        .context("Option resolution failed")?;
    let cmake = ctx.kitchen.cmake(&resolved);

    if json {
        let report = ResolveReport {
            resolved: &resolved,
            definitions: &cmake.definitions,
        };
        let output = serde_json::to_string_pretty(&report)
            .context("Failed to serialize resolution")?;
        println!("{}", output);
        return Ok(());
    }

    println!("Settings: {}", resolved.settings);

    println!("\nOptions:");
    for (name, value) in resolved.options.iter() {
        println!("  {}={}", name, bool_str(value));
    }

    println!("\nRequirements ({}):", resolved.requires.len());
    for requirement in &resolved.requires {
        println!("  {}", requirement);
    }

    println!("\nDependency options:");
    for option in &resolved.dependency_options {
        println!("  {}", option);
    }

    println!("\nCMake definitions:");
    for (name, value) in &cmake.definitions {
        println!("  {}={}", name, value);
    }

    Ok(())
}
