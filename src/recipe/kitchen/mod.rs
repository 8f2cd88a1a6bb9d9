// src/recipe/kitchen/mod.rs

//! Kitchen: runs the recipe's lifecycle steps
//!
//! The Kitchen drives the recipe in a fixed order:
//! 1. **Resolve**: validate options against the settings and compute the
//!    requirement list (no I/O)
//! 2. **Source**: fetch the upstream archive and stage it
//! 3. **Build**: configure and build with CMake
//! 4. **Package**: install and copy artifacts into the package folder
//! 5. **Package info**: report the libraries consumers link
//!
//! Steps 2-5 take a [`ResolvedRecipe`], which only option resolution
//! produces, so nothing touches the network or filesystem before the
//! configuration has been validated.

pub mod archive;
pub mod cmake;
pub mod collect;
mod config;
mod cook;
pub mod generator;
pub mod package;
pub mod source;

pub use collect::PackageInfo;
pub use config::{CookResult, KitchenConfig, Layout};
pub use cook::Cook;

use crate::error::Result;
use crate::recipe::format::RecipeConfig;
use crate::recipe::options::OptionSet;
use crate::recipe::resolve::{resolve, ResolvedRecipe};
use crate::settings::Settings;
use cmake::CMake;
use std::path::PathBuf;
use tracing::info;

/// The Kitchen: where the recipe is cooked
pub struct Kitchen {
    pub(crate) recipe: RecipeConfig,
    pub(crate) config: KitchenConfig,
}

impl Kitchen {
    pub fn new(recipe: RecipeConfig, config: KitchenConfig) -> Self {
        Self { recipe, config }
    }

    /// Kitchen for the stock recipe with default configuration
    pub fn with_defaults() -> Self {
        Self::new(RecipeConfig::default(), KitchenConfig::default())
    }

    pub fn recipe(&self) -> &RecipeConfig {
        &self.recipe
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    pub fn layout(&self) -> Layout {
        self.config.layout()
    }

    /// Option resolution
    pub fn resolve(&self, options: OptionSet, settings: Settings) -> Result<ResolvedRecipe> {
        info!(
            "Resolving {} {} for {}",
            self.recipe.package.name, self.recipe.package.version, settings
        );
        resolve(options, settings)
    }

    /// CMake invocation the build and package steps use
    pub fn cmake(&self, resolved: &ResolvedRecipe) -> CMake {
        Cook::new(self, resolved).cmake()
    }

    /// Source acquisition; returns the staged source directory
    pub fn source(&self, resolved: &ResolvedRecipe) -> Result<PathBuf> {
        info!(
            "Fetching sources for {} {} ({})",
            self.recipe.package.name, self.recipe.package.version, resolved.settings.os
        );
        source::stage_source(&self.recipe, &self.config)
    }

    /// Build step; returns the build log
    pub fn build(&self, resolved: &ResolvedRecipe) -> Result<String> {
        info!("Building {}", self.recipe.package.name);
        let mut cook = Cook::new(self, resolved);
        cook.build()?;
        Ok(cook.log)
    }

    /// Package step; returns the packaged files and the install log
    pub fn package(&self, resolved: &ResolvedRecipe) -> Result<(Vec<PathBuf>, String)> {
        info!("Packaging {}", self.recipe.package.name);
        let mut cook = Cook::new(self, resolved);
        let files = cook.package()?;
        Ok((files, cook.log))
    }

    /// Consumption metadata, derived from the package folder
    pub fn package_info(&self, _resolved: &ResolvedRecipe) -> Result<PackageInfo> {
        let package_folder = self.layout().package_folder;
        let info = collect::package_info(
            &self.recipe.package.name,
            &self.recipe.package.version,
            &package_folder,
        )?;
        collect::write_package_info(&info, &package_folder)?;
        info!("Libraries: {}", info.libs.join(", "));
        Ok(info)
    }

    /// Run source, build, package and package info in order
    pub fn cook(&self, resolved: &ResolvedRecipe) -> Result<CookResult> {
        info!(
            "Cooking {} version {}",
            self.recipe.package.name, self.recipe.package.version
        );

        self.source(resolved)?;

        let mut cook = Cook::new(self, resolved);
        cook.build()?;
        cook.package()?;

        let info = self.package_info(resolved)?;
        Ok(CookResult {
            package_folder: self.layout().package_folder,
            info,
            log: cook.log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::recipe::options::OptionName;
    use crate::settings::Os;
    use tempfile::TempDir;

    #[test]
    fn test_build_without_sources_fails() {
        let temp = TempDir::new().unwrap();
        let kitchen = Kitchen::new(RecipeConfig::default(), KitchenConfig::in_workdir(temp.path()));
        let resolved = kitchen
            .resolve(OptionSet::new(), Settings::for_os(Os::Linux))
            .unwrap();

        let result = kitchen.build(&resolved);
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_cmake_uses_layout() {
        let temp = TempDir::new().unwrap();
        let kitchen = Kitchen::new(RecipeConfig::default(), KitchenConfig::in_workdir(temp.path()));
        let mut options = OptionSet::new();
        options.set(OptionName::WithCpp, true);
        let resolved = kitchen.resolve(options, Settings::for_os(Os::Linux)).unwrap();

        let cmake = kitchen.cmake(&resolved);
        assert_eq!(cmake.source_dir, temp.path().join("source/poppler-src"));
        assert_eq!(cmake.build_dir, temp.path().join("build"));
        assert!(cmake.configure_args().contains(&"-DENABLE_CPP=ON".to_string()));
    }

    #[test]
    fn test_package_info_on_empty_package() {
        let temp = TempDir::new().unwrap();
        let kitchen = Kitchen::new(RecipeConfig::default(), KitchenConfig::in_workdir(temp.path()));
        let resolved = kitchen
            .resolve(OptionSet::new(), Settings::for_os(Os::Linux))
            .unwrap();

        let info = kitchen.package_info(&resolved).unwrap();
        assert!(info.libs.is_empty());
        assert!(temp.path().join("package/package_info.json").exists());
    }
}
