// src/recipe/kitchen/collect.rs

//! Consumption metadata
//!
//! The libraries consumers link are found by looking at what the package
//! folder actually contains, not tracked during the build.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions of linkable libraries
pub const LIB_EXTENSIONS: &[&str] = &["so", "lib", "a", "dylib", "bc"];

/// File written next to the packaged artifacts
pub const PACKAGE_INFO_FILE: &str = "package_info.json";

/// Linkage metadata reported to consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    /// Library names to link, without prefix or extension
    pub libs: Vec<String>,
    pub include_dirs: Vec<String>,
    pub lib_dirs: Vec<String>,
    pub bin_dirs: Vec<String>,
}

/// Link name for a library file name, if it is one
///
/// `libpoppler.a` gives `poppler`; `poppler.lib` keeps its name. Versioned
/// names such as `libpoppler.so.82` are not link names.
pub fn link_name(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || !LIB_EXTENSIONS.contains(&ext) {
        return None;
    }
    let name = match stem.strip_prefix("lib") {
        Some(rest) if ext != "lib" && !rest.is_empty() => rest,
        _ => stem,
    };
    Some(name.to_string())
}

/// Library names found directly in `<package>/lib`, sorted
pub fn collect_libs(package_folder: &Path) -> Result<Vec<String>> {
    let lib_dir = package_folder.join("lib");
    if !lib_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut libs = Vec::new();
    let entries = fs::read_dir(&lib_dir)
        .map_err(|e| Error::IoError(format!("Failed to read {}: {}", lib_dir.display(), e)))?;
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str().and_then(link_name) {
            libs.push(name);
        }
    }

    libs.sort();
    libs.dedup();
    Ok(libs)
}

/// Build the consumption metadata for a package folder
pub fn package_info(name: &str, version: &str, package_folder: &Path) -> Result<PackageInfo> {
    let existing = |dir: &str| -> Vec<String> {
        if package_folder.join(dir).is_dir() {
            vec![dir.to_string()]
        } else {
            Vec::new()
        }
    };

    Ok(PackageInfo {
        name: name.to_string(),
        version: version.to_string(),
        libs: collect_libs(package_folder)?,
        include_dirs: existing("include"),
        lib_dirs: existing("lib"),
        bin_dirs: existing("bin"),
    })
}

/// Write the metadata as JSON into the package folder
pub fn write_package_info(info: &PackageInfo, package_folder: &Path) -> Result<PathBuf> {
    let path = package_folder.join(PACKAGE_INFO_FILE);
    let json = serde_json::to_string_pretty(info)
        .map_err(|e| Error::IoError(format!("Failed to serialize package info: {}", e)))?;
    fs::create_dir_all(package_folder)?;
    fs::write(&path, json)?;
    Ok(path)
}

/// Read metadata written by [`write_package_info`]
pub fn read_package_info(package_folder: &Path) -> Result<PackageInfo> {
    let path = package_folder.join(PACKAGE_INFO_FILE);
    let content = fs::read_to_string(&path)
        .map_err(|e| Error::NotFound(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::ParseError(format!("Invalid {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_link_name() {
        assert_eq!(link_name("libpoppler.a").as_deref(), Some("poppler"));
        assert_eq!(link_name("libpoppler-cpp.so").as_deref(), Some("poppler-cpp"));
        assert_eq!(link_name("libpoppler.dylib").as_deref(), Some("poppler"));
        assert_eq!(link_name("poppler.lib").as_deref(), Some("poppler"));
        assert_eq!(link_name("libfoo.lib").as_deref(), Some("libfoo"));
        assert_eq!(link_name("libpoppler.so.82"), None);
        assert_eq!(link_name("poppler.pc"), None);
        assert_eq!(link_name("README"), None);
        assert_eq!(link_name("lib.a").as_deref(), Some("lib"));
    }

    #[test]
    fn test_collect_libs() {
        let temp = TempDir::new().unwrap();
        let lib = temp.path().join("lib");
        fs::create_dir_all(lib.join("pkgconfig")).unwrap();
        for name in [
            "libpoppler.so",
            "libpoppler.so.82",
            "libpoppler.a",
            "libpoppler-cpp.so",
        ] {
            fs::write(lib.join(name), b"").unwrap();
        }

        assert_eq!(collect_libs(temp.path()).unwrap(), vec!["poppler", "poppler-cpp"]);
    }

    #[test]
    fn test_collect_libs_without_lib_dir() {
        let temp = TempDir::new().unwrap();
        assert!(collect_libs(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_package_info_roundtrip_file() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("include")).unwrap();
        fs::create_dir_all(temp.path().join("lib")).unwrap();
        fs::write(temp.path().join("lib/libpoppler.a"), b"").unwrap();

        let info = package_info("poppler", "0.71.0", temp.path()).unwrap();
        assert_eq!(info.libs, vec!["poppler"]);
        assert_eq!(info.include_dirs, vec!["include"]);
        assert!(info.bin_dirs.is_empty());

        write_package_info(&info, temp.path()).unwrap();
        assert_eq!(read_package_info(temp.path()).unwrap(), info);
    }
}
