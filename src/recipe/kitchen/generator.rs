// src/recipe/kitchen/generator.rs

//! Dependency information for the CMake build
//!
//! Writes `buildinfo.cmake` into the build folder. The recipe's wrapper
//! CMakeLists.txt includes it and appends `RECIPE_PREFIX_PATH` to
//! `CMAKE_PREFIX_PATH`, so Poppler's `find_package` calls see the installed
//! requirements.

use crate::error::Result;
use crate::recipe::kitchen::cmake::cmake_path;
use crate::recipe::resolve::ResolvedRecipe;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const BUILDINFO_FILE: &str = "buildinfo.cmake";

/// Installed prefixes of the requirements found under `deps_root`
pub fn dependency_prefixes(resolved: &ResolvedRecipe, deps_root: &Path) -> Vec<PathBuf> {
    resolved
        .requires
        .iter()
        .filter_map(|req| {
            let prefix = deps_root.join(&req.name);
            if prefix.is_dir() {
                Some(prefix)
            } else {
                warn!("Requirement {} not found under {}", req, deps_root.display());
                None
            }
        })
        .collect()
}

fn cmake_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().replace(';', "\\;"))
        .collect::<Vec<_>>()
        .join(";")
}

/// Render the contents of `buildinfo.cmake`
pub fn render_buildinfo(resolved: &ResolvedRecipe, prefixes: &[PathBuf]) -> String {
    let requires = cmake_list(resolved.requires.iter().map(|r| r.to_string()));
    let dep_options = cmake_list(resolved.dependency_options.iter().map(|o| o.to_string()));
    let prefix_paths = cmake_list(prefixes.iter().map(|p| cmake_path(p)));
    let include_dirs = cmake_list(
        prefixes
            .iter()
            .map(|p| p.join("include"))
            .filter(|p| p.is_dir())
            .map(|p| cmake_path(&p)),
    );
    let lib_dirs = cmake_list(
        prefixes
            .iter()
            .map(|p| p.join("lib"))
            .filter(|p| p.is_dir())
            .map(|p| cmake_path(&p)),
    );

    let mut out = String::new();
    out.push_str("# Generated by poppler-recipe; do not edit.\n\n");
    out.push_str(&format!("set(RECIPE_SETTINGS \"{}\")\n", resolved.settings));
    out.push_str(&format!("set(RECIPE_OPTIONS \"{}\")\n", resolved.options));
    out.push_str(&format!("set(RECIPE_REQUIRES \"{}\")\n", requires));
    out.push_str(&format!("set(RECIPE_DEPENDENCY_OPTIONS \"{}\")\n", dep_options));
    out.push_str(&format!("set(RECIPE_PREFIX_PATH \"{}\")\n", prefix_paths));
    out.push_str(&format!("set(RECIPE_INCLUDE_DIRS \"{}\")\n", include_dirs));
    out.push_str(&format!("set(RECIPE_LIB_DIRS \"{}\")\n", lib_dirs));
    out
}

/// Write `buildinfo.cmake` into the build folder
pub fn write_buildinfo(
    resolved: &ResolvedRecipe,
    deps_root: Option<&Path>,
    build_folder: &Path,
) -> Result<PathBuf> {
    // CMake runs inside the build folder; a relative root would resolve there
    let prefixes = match deps_root {
        Some(root) => dependency_prefixes(resolved, &std::path::absolute(root)?),
        None => Vec::new(),
    };

    fs::create_dir_all(build_folder)?;
    let path = build_folder.join(BUILDINFO_FILE);
    fs::write(&path, render_buildinfo(resolved, &prefixes))?;
    debug!("Wrote {} ({} dependency prefixes)", path.display(), prefixes.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::options::OptionSet;
    use crate::recipe::resolve::resolve;
    use crate::settings::{Os, Settings};
    use tempfile::TempDir;

    fn resolved() -> ResolvedRecipe {
        resolve(OptionSet::new(), Settings::for_os(Os::Linux)).unwrap()
    }

    #[test]
    fn test_render_lists_requirements() {
        let text = render_buildinfo(&resolved(), &[]);
        assert!(text.contains("zlib/1.2.11@conan/stable;libpng/1.6.34@bincrafters/stable"));
        assert!(text.contains("libpng:shared=False;freetype:with_png=False"));
        assert!(text.contains("set(RECIPE_PREFIX_PATH \"\")"));
        assert!(text.contains("os=Linux"));
    }

    #[test]
    fn test_prefixes_found_under_deps_root() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("zlib/include")).unwrap();
        fs::create_dir_all(temp.path().join("zlib/lib")).unwrap();
        fs::create_dir_all(temp.path().join("freetype")).unwrap();

        let resolved = resolved();
        let prefixes = dependency_prefixes(&resolved, temp.path());
        assert_eq!(
            prefixes,
            vec![temp.path().join("zlib"), temp.path().join("freetype")]
        );

        let text = render_buildinfo(&resolved, &prefixes);
        let zlib = cmake_path(&temp.path().join("zlib"));
        assert!(text.contains(&format!("set(RECIPE_INCLUDE_DIRS \"{}/include\")", zlib)));
        assert!(text.contains(&format!("set(RECIPE_LIB_DIRS \"{}/lib\")", zlib)));
    }

    #[test]
    fn test_write_buildinfo() {
        let temp = TempDir::new().unwrap();
        let build = temp.path().join("build");
        let path = write_buildinfo(&resolved(), None, &build).unwrap();
        assert_eq!(path, build.join(BUILDINFO_FILE));
        assert!(fs::read_to_string(path).unwrap().starts_with("# Generated"));
    }
}
