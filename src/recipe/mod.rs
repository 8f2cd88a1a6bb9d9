// src/recipe/mod.rs

//! Recipe for building Poppler from source
//!
//! The recipe describes how to obtain, build and package Poppler 0.71.0:
//! - Options: user-facing feature toggles (`shared`, `with_qt`, ...)
//! - Settings: the target platform (os, compiler, arch, build type)
//! - Requirements: the packages the build depends on
//! - Source: the upstream archive and the CMakeLists.txt overlay
//!
//! # Culinary Terminology
//!
//! - **Recipe**: The build specification
//! - **Kitchen**: Drives the lifecycle steps for a recipe
//! - **Cook**: A single build/package run
//!
//! # Example Configuration
//!
//! ```toml
//! [source]
//! checksum = "sha256:..."
//!
//! [build]
//! generator = "Ninja"
//! deps_root = "/opt/deps"
//!
//! [options]
//! with_cpp = true
//! with_qt = false
//! ```

mod format;
mod kitchen;
pub mod options;
pub mod requirements;
pub mod resolve;

pub use format::{
    load_config, parse_config, BuildSection, PackageSection, RecipeConfig, SettingsSection,
    SourceSection,
};
pub use kitchen::cmake::{recipe_definitions, CMake, CMakeValue, Definitions};
pub use kitchen::collect::{collect_libs, link_name, read_package_info, PACKAGE_INFO_FILE};
pub use kitchen::package::{
    apply_rule, copy_matching, CopyRule, CopySource, ARTIFACT_RULES, LICENSE_RULE,
};
pub use kitchen::source::{
    cached_archive_path, stage_source, ORIGINAL_CMAKE_LISTS, WRAPPER_CMAKE_LISTS,
};
pub use kitchen::{Cook, CookResult, Kitchen, KitchenConfig, Layout, PackageInfo};
pub use options::{OptionName, OptionSet, ScopedOption};
pub use requirements::{Requirement, RequirementList};
pub use resolve::{resolve, ResolvedRecipe};
