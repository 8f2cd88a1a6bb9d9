// src/recipe/kitchen/source.rs

//! Source acquisition: fetch, extract and lay out the upstream tree
//!
//! The archive extracts to `<name>-<version>/` inside the source folder and
//! is then moved to the recipe's source subfolder. The upstream
//! `CMakeLists.txt` is kept as `CMakeListsOriginal.txt` and replaced by the
//! recipe's wrapper, which includes it.

use crate::error::{Error, Result};
use crate::hash::{sha256_hex, verify_file};
use crate::recipe::format::RecipeConfig;
use crate::recipe::kitchen::archive::{extract_archive, fetch_archive, ArchiveLocation};
use crate::recipe::kitchen::config::KitchenConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The bundled replacement for the upstream CMakeLists.txt
pub const WRAPPER_CMAKE_LISTS: &str = include_str!("../../../data/CMakeLists.txt");

/// Name the upstream CMakeLists.txt is moved to
pub const ORIGINAL_CMAKE_LISTS: &str = "CMakeListsOriginal.txt";

/// Directory holding the staged sources
pub fn staged_dir(recipe: &RecipeConfig, kitchen: &KitchenConfig) -> PathBuf {
    kitchen.layout().source_folder.join(&recipe.source.subfolder)
}

/// Length of the location digest naming a cache subdirectory
const CACHE_KEY_LEN: usize = 16;

/// Where the archive for this recipe is cached
///
/// Archives live under `<source_cache>/<key>/<filename>`, where `key` is
/// derived from the full archive location. Two locations serving the same
/// file name never share a cache entry.
pub fn cached_archive_path(recipe: &RecipeConfig, kitchen: &KitchenConfig) -> PathBuf {
    let digest = sha256_hex(recipe.archive_url().as_bytes());
    kitchen
        .source_cache
        .join(&digest[..CACHE_KEY_LEN])
        .join(recipe.archive_filename())
}

/// Fetch the archive into the source cache, reusing a cached copy
///
/// When a checksum is configured, cached and fresh archives are verified.
/// A cached archive that fails verification is discarded and fetched again.
pub fn fetch_source(recipe: &RecipeConfig, kitchen: &KitchenConfig) -> Result<PathBuf> {
    let cached_path = cached_archive_path(recipe, kitchen);
    let cache_dir = cached_path.parent().unwrap_or(kitchen.source_cache.as_path());
    fs::create_dir_all(cache_dir)?;

    let filename = recipe.archive_filename();
    let checksum = recipe.source.checksum.as_deref();

    if cached_path.exists() {
        match checksum {
            None => {
                info!("Using cached source: {}", cached_path.display());
                return Ok(cached_path);
            }
            Some(expected) => match verify_file(&cached_path, expected) {
                Ok(()) => {
                    info!("Using cached source: {}", cached_path.display());
                    return Ok(cached_path);
                }
                Err(Error::ChecksumMismatch { .. }) => {
                    warn!("Cached file checksum mismatch, fetching again");
                    fs::remove_file(&cached_path)?;
                }
                Err(e) => return Err(e),
            },
        }
    }

    let location = ArchiveLocation::parse(&recipe.archive_url());
    let temp_path = cache_dir.join(format!("{}.part", filename));
    fetch_archive(&location, &temp_path, kitchen.progress)?;

    if let Some(expected) = checksum
        && let Err(e) = verify_file(&temp_path, expected)
    {
        fs::remove_file(&temp_path)?;
        return Err(e);
    }

    fs::rename(&temp_path, &cached_path)?;
    Ok(cached_path)
}

/// Remove a directory left over from an earlier run
fn clear_dir(path: &Path) -> Result<()> {
    if path.exists() {
        debug!("Removing stale directory {}", path.display());
        fs::remove_dir_all(path).map_err(|e| {
            Error::IoError(format!("Failed to remove {}: {}", path.display(), e))
        })?;
    }
    Ok(())
}

/// Write the recipe's CMakeLists.txt over the upstream one
pub fn overlay_cmake_lists(recipe: &RecipeConfig, staged: &Path) -> Result<()> {
    let upstream = staged.join("CMakeLists.txt");
    if !upstream.exists() {
        return Err(Error::NotFound(format!(
            "Upstream CMakeLists.txt not found in {}",
            staged.display()
        )));
    }
    fs::rename(&upstream, staged.join(ORIGINAL_CMAKE_LISTS))?;

    match &recipe.source.cmake_lists {
        Some(path) => {
            fs::copy(path, &upstream).map_err(|e| {
                Error::IoError(format!(
                    "Failed to copy replacement CMakeLists.txt from {}: {}",
                    path.display(),
                    e
                ))
            })?;
        }
        None => fs::write(&upstream, WRAPPER_CMAKE_LISTS)?,
    }
    Ok(())
}

/// Fetch and stage the upstream sources
///
/// Returns the staged source directory. Any previously staged tree is
/// removed first, so a re-run replaces it instead of merging into it.
pub fn stage_source(recipe: &RecipeConfig, kitchen: &KitchenConfig) -> Result<PathBuf> {
    let source_folder = kitchen.layout().source_folder;
    fs::create_dir_all(&source_folder)?;

    let archive = fetch_source(recipe, kitchen)?;

    let extracted = source_folder.join(recipe.extracted_dir());
    clear_dir(&extracted)?;
    extract_archive(&archive, &source_folder)?;

    if !extracted.is_dir() {
        return Err(Error::NotFound(format!(
            "Archive {} did not contain {}/",
            archive.display(),
            recipe.extracted_dir()
        )));
    }

    let staged = staged_dir(recipe, kitchen);
    clear_dir(&staged)?;
    fs::rename(&extracted, &staged)?;

    overlay_cmake_lists(recipe, &staged)?;

    info!("Staged sources in {}", staged.display());
    Ok(staged)
}
