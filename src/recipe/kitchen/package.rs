// src/recipe/kitchen/package.rs

//! Pattern-based artifact copy into the package folder
//!
//! Each rule copies the files under a source root whose relative path
//! matches a glob into a destination subfolder, either keeping the relative
//! path or flattening to the file name. Files are copied, never changed.

use crate::error::{Error, Result};
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Where a rule looks for files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopySource {
    /// The CMake build folder
    Build,
    /// A path relative to the staged source tree
    Staged(&'static str),
}

/// A single copy rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRule {
    pub pattern: &'static str,
    pub src: CopySource,
    /// Destination relative to the package folder
    pub dst: &'static str,
    /// Keep the path relative to the source root instead of flattening
    pub keep_path: bool,
}

impl CopyRule {
    const fn new(pattern: &'static str, src: CopySource, dst: &'static str, keep_path: bool) -> Self {
        Self {
            pattern,
            src,
            dst,
            keep_path,
        }
    }
}

/// License text, copied before the install step
pub const LICENSE_RULE: CopyRule = CopyRule::new("LICENSE", CopySource::Staged(""), "licenses", true);

/// Artifact rules, applied after the install step
pub const ARTIFACT_RULES: &[CopyRule] = &[
    CopyRule::new("*", CopySource::Staged("include"), "include", true),
    CopyRule::new("*.dll", CopySource::Build, "bin", false),
    CopyRule::new("*.lib", CopySource::Build, "lib", false),
    CopyRule::new("*.a", CopySource::Build, "lib", false),
    CopyRule::new("*.so*", CopySource::Build, "lib", false),
    CopyRule::new("*.dylib", CopySource::Build, "lib", false),
];

/// `*` may cross directory separators, as in fnmatch
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Resolve a rule's source root
pub fn rule_root(rule: &CopyRule, staged: &Path, build_folder: &Path) -> PathBuf {
    match rule.src {
        CopySource::Build => build_folder.to_path_buf(),
        CopySource::Staged("") => staged.to_path_buf(),
        CopySource::Staged(sub) => staged.join(sub),
    }
}

/// Copy every file under `src_root` matching `pattern` into `dst`
///
/// A missing `src_root` copies nothing. Returns the destination paths.
pub fn copy_matching(
    src_root: &Path,
    pattern: &str,
    dst: &Path,
    keep_path: bool,
) -> Result<Vec<PathBuf>> {
    let pattern = Pattern::new(pattern)
        .map_err(|e| Error::ParseError(format!("Invalid copy pattern '{}': {}", pattern, e)))?;

    if !src_root.is_dir() {
        debug!("Copy source {} does not exist", src_root.display());
        return Ok(Vec::new());
    }

    let mut copied = Vec::new();
    for entry in WalkDir::new(src_root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            Error::IoError(format!("Failed to walk {}: {}", src_root.display(), e))
        })?;
        if entry.file_type().is_dir() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(src_root)
            .map_err(|e| Error::IoError(e.to_string()))?;
        let relative_str = relative.to_string_lossy().replace('\\', "/");
        if !pattern.matches_with(&relative_str, MATCH_OPTIONS) {
            continue;
        }

        let target = if keep_path {
            dst.join(relative)
        } else {
            match relative.file_name() {
                Some(name) => dst.join(name),
                None => continue,
            }
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target).map_err(|e| {
            Error::IoError(format!(
                "Failed to copy {} to {}: {}",
                entry.path().display(),
                target.display(),
                e
            ))
        })?;
        copied.push(target);
    }

    Ok(copied)
}

/// Apply a rule into the package folder
pub fn apply_rule(
    rule: &CopyRule,
    staged: &Path,
    build_folder: &Path,
    package_folder: &Path,
) -> Result<Vec<PathBuf>> {
    let root = rule_root(rule, staged, build_folder);
    let copied = copy_matching(&root, rule.pattern, &package_folder.join(rule.dst), rule.keep_path)?;
    debug!(
        "Copied {} file(s) matching {} into {}/",
        copied.len(),
        rule.pattern,
        rule.dst
    );
    Ok(copied)
}
