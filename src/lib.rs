// src/lib.rs

//! Poppler Recipe
//!
//! Builds and packages the Poppler PDF rendering library from source.
//!
//! # Architecture
//!
//! - Validation first: option resolution runs before any network or
//!   filesystem work and yields a [`recipe::ResolvedRecipe`]
//! - Kitchen: the lifecycle steps (source, build, package, package info)
//!   all take a resolved recipe
//! - CMake: options translate to cache entries through a pure table
//! - Package info: link libraries are discovered from the package folder

mod error;
pub mod hash;
pub mod recipe;
pub mod settings;

pub use error::{Error, Result};
pub use recipe::{Kitchen, KitchenConfig, OptionName, OptionSet, RecipeConfig, ResolvedRecipe};
pub use settings::{Arch, BuildType, Compiler, Os, Settings};
