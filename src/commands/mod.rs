// src/commands/mod.rs
//! Command handlers for the Poppler recipe CLI

mod cook;
mod info;
mod resolve;

pub use cook::{cmd_build, cmd_create, cmd_package, cmd_source};
pub use info::cmd_info;
pub use resolve::cmd_resolve;

use crate::cli::RecipeArgs;
use anyhow::{Context, Result};
use poppler_recipe::recipe::{load_config, Kitchen, KitchenConfig, OptionSet, RecipeConfig};
use poppler_recipe::settings::Settings;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything a command needs before option resolution
pub struct RecipeContext {
    pub kitchen: Kitchen,
    pub options: OptionSet,
    pub settings: Settings,
}

/// Build the kitchen, options and settings for a command
///
/// Precedence: built-in defaults < configuration file < command line.
pub fn load_context(args: &RecipeArgs) -> Result<RecipeContext> {
    let recipe = match &args.config {
        Some(path) => {
            debug!("Loading recipe configuration from {}", path);
            load_config(Path::new(path))
                .with_context(|| format!("Failed to load recipe configuration: {}", path))?
        }
        None => RecipeConfig::default(),
    };

    let mut options = recipe
        .option_set()
        .context("Invalid options in recipe configuration")?;
    for assignment in &args.options {
        options
            .apply_override(assignment)
            .with_context(|| format!("Invalid option override: {}", assignment))?;
    }

    let mut settings = recipe.settings();
    for assignment in &args.settings {
        settings
            .apply_override(assignment)
            .with_context(|| format!("Invalid setting override: {}", assignment))?;
    }

    let mut config = KitchenConfig::in_workdir(&PathBuf::from(&args.workdir));
    if let Some(jobs) = args.jobs {
        config.jobs = jobs.max(1);
    }
    config.progress = !args.no_progress;

    Ok(RecipeContext {
        kitchen: Kitchen::new(recipe, config),
        options,
        settings,
    })
}

/// Render a boolean the way recipe options are written
pub(crate) fn bool_str(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poppler_recipe::recipe::OptionName;
    use poppler_recipe::settings::Os;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_overrides_config_file() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("recipe.toml");
        fs::write(
            &config,
            "[options]\nwith_qt = true\nwith_cpp = true\n\n[settings]\nos = \"Linux\"\n",
        )
        .unwrap();

        let args = RecipeArgs {
            options: vec!["with_qt=False".to_string()],
            settings: vec!["build_type=Debug".to_string()],
            config: Some(config.display().to_string()),
            workdir: temp.path().join("w").display().to_string(),
            jobs: Some(3),
            no_progress: true,
        };
        let ctx = load_context(&args).unwrap();

        assert!(!ctx.options.get(OptionName::WithQt));
        assert!(ctx.options.get(OptionName::WithCpp));
        assert_eq!(ctx.settings.os, Os::Linux);
        assert_eq!(ctx.settings.build_type.as_str(), "Debug");
        assert_eq!(ctx.kitchen.config().jobs, 3);
        assert!(!ctx.kitchen.config().progress);
    }

    #[test]
    fn test_bad_override_is_reported() {
        let args = RecipeArgs {
            options: vec!["with_pdf=True".to_string()],
            workdir: "w".to_string(),
            ..Default::default()
        };
        assert!(load_context(&args).is_err());
    }
}
