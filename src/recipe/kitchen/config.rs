// src/recipe/kitchen/config.rs

//! Configuration types for the Kitchen

use crate::recipe::kitchen::collect::PackageInfo;
use std::path::{Path, PathBuf};

/// Runtime configuration of a Kitchen
#[derive(Debug, Clone)]
pub struct KitchenConfig {
    /// Root of the source, build and package folders
    pub workdir: PathBuf,
    /// Directory for downloaded source archives
    pub source_cache: PathBuf,
    /// Number of parallel build jobs
    pub jobs: u32,
    /// Show a progress bar while downloading
    pub progress: bool,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        let jobs = std::thread::available_parallelism()
            .map(|p| p.get() as u32)
            .unwrap_or(4);

        let workdir = absolute_dir(Path::new("poppler-build"));
        Self {
            source_cache: workdir.join("downloads"),
            workdir,
            jobs,
            progress: true,
        }
    }
}

impl KitchenConfig {
    /// Configuration rooted at a working directory
    ///
    /// A relative `workdir` is taken from the current directory. External
    /// build steps run inside the build folder, so every path handed to them
    /// must be absolute.
    pub fn in_workdir(workdir: &Path) -> Self {
        let workdir = absolute_dir(workdir);
        Self {
            source_cache: workdir.join("downloads"),
            workdir,
            ..Self::default()
        }
    }

    pub fn layout(&self) -> Layout {
        Layout::new(&self.workdir)
    }
}

/// `path` made absolute against the current directory, without touching
/// the filesystem
fn absolute_dir(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Folder layout of one recipe invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Where the archive is extracted and the staged sources live
    pub source_folder: PathBuf,
    /// CMake binary directory
    pub build_folder: PathBuf,
    /// Packaged artifacts
    pub package_folder: PathBuf,
}

impl Layout {
    pub fn new(workdir: &Path) -> Self {
        Self {
            source_folder: workdir.join("source"),
            build_folder: workdir.join("build"),
            package_folder: workdir.join("package"),
        }
    }
}

/// Result of running the full recipe
#[derive(Debug)]
pub struct CookResult {
    /// Packaged artifacts
    pub package_folder: PathBuf,
    /// Linkage metadata for consumers
    pub info: PackageInfo,
    /// Output of the external build steps
    pub log: String,
}
