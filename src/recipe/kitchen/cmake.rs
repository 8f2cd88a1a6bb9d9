// src/recipe/kitchen/cmake.rs

//! CMake invocation
//!
//! [`recipe_definitions`] is the translation table from recipe options to
//! Poppler's CMake cache entries. It is a pure function of the option set
//! and settings. [`CMake`] adds the generic entries every configure needs
//! and turns them into command lines for configure, build and install.

use crate::recipe::format::BuildSection;
use crate::recipe::options::{OptionName, OptionSet};
use crate::settings::{BuildType, Compiler, Settings};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Value of a CMake cache entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CMakeValue {
    Bool(bool),
    String(String),
}

impl fmt::Display for CMakeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("ON"),
            Self::Bool(false) => f.write_str("OFF"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for CMakeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for CMakeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// CMake cache entries, ordered by name
pub type Definitions = BTreeMap<String, CMakeValue>;

fn define(defs: &mut Definitions, name: &str, value: impl Into<CMakeValue>) {
    defs.insert(name.to_string(), value.into());
}

/// Poppler's cache entries for an option set on a platform
pub fn recipe_definitions(options: &OptionSet, settings: &Settings) -> Definitions {
    let mut defs = Definitions::new();

    define(&mut defs, "ENABLE_SPLASH", options.get(OptionName::WithSplash));
    define(&mut defs, "ENABLE_ZLIB", true);
    define(&mut defs, "BUILD_QT5_TESTS", false);
    define(&mut defs, "ENABLE_CPP", options.get(OptionName::WithCpp));
    define(
        &mut defs,
        "ENABLE_CMS",
        if options.get(OptionName::WithLcms) { "lcms2" } else { "none" },
    );
    define(&mut defs, "ENABLE_LIBCURL", options.get(OptionName::WithCurl));

    // Platform overrides go last
    if settings.os.is_windows() {
        define(&mut defs, "LIB_SUFFIX", "");
        define(&mut defs, "FONT_CONFIGURATION", "win32");
    }

    define(&mut defs, "BUILD_SHARED_LIBS", options.get(OptionName::Shared));
    defs
}

/// A configured CMake project: source tree, binary tree and cache entries
#[derive(Debug, Clone)]
pub struct CMake {
    pub program: String,
    pub generator: Option<String>,
    pub build_type: BuildType,
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    pub definitions: Definitions,
    pub jobs: u32,
    multi_config: bool,
}

impl CMake {
    /// Set up CMake for the recipe
    ///
    /// `install_prefix` becomes `CMAKE_INSTALL_PREFIX`, so the install
    /// step lands in the package folder.
    pub fn new(
        build: &BuildSection,
        options: &OptionSet,
        settings: &Settings,
        source_dir: &Path,
        build_dir: &Path,
        install_prefix: &Path,
        jobs: u32,
    ) -> Self {
        let multi_config = is_multi_config(build.generator.as_deref(), settings);

        let mut definitions = recipe_definitions(options, settings);
        if !multi_config {
            define(&mut definitions, "CMAKE_BUILD_TYPE", settings.build_type.as_str());
        }
        define(
            &mut definitions,
            "CMAKE_INSTALL_PREFIX",
            cmake_path(install_prefix).as_str(),
        );
        if build.verbose {
            define(&mut definitions, "CMAKE_VERBOSE_MAKEFILE", true);
        }

        Self {
            program: build.cmake.clone(),
            generator: build.generator.clone(),
            build_type: settings.build_type,
            source_dir: source_dir.to_path_buf(),
            build_dir: build_dir.to_path_buf(),
            definitions,
            jobs: build.jobs.unwrap_or(jobs).max(1),
            multi_config,
        }
    }

    pub fn is_multi_config(&self) -> bool {
        self.multi_config
    }

    /// Arguments for the configure step
    pub fn configure_args(&self) -> Vec<String> {
        let mut args = vec![
            "-S".to_string(),
            self.source_dir.to_string_lossy().to_string(),
            "-B".to_string(),
            self.build_dir.to_string_lossy().to_string(),
        ];
        if let Some(generator) = &self.generator {
            args.push("-G".to_string());
            args.push(generator.clone());
        }
        for (name, value) in &self.definitions {
            args.push(format!("-D{}={}", name, value));
        }
        args
    }

    /// Arguments for the build step, optionally for a single target
    pub fn build_args(&self, target: Option<&str>) -> Vec<String> {
        let mut args = vec![
            "--build".to_string(),
            self.build_dir.to_string_lossy().to_string(),
        ];
        if self.multi_config {
            args.push("--config".to_string());
            args.push(self.build_type.as_str().to_string());
        }
        if let Some(target) = target {
            args.push("--target".to_string());
            args.push(target.to_string());
        }
        args.push("--parallel".to_string());
        args.push(self.jobs.to_string());
        args
    }

    /// Arguments for the install step
    pub fn install_args(&self) -> Vec<String> {
        self.build_args(Some("install"))
    }
}

/// Whether the generator builds several configurations from one tree
///
/// Without an explicit generator, CMake picks Visual Studio for MSVC.
fn is_multi_config(generator: Option<&str>, settings: &Settings) -> bool {
    match generator {
        Some(g) => g.starts_with("Visual Studio") || g == "Xcode" || g.contains("Multi-Config"),
        None => settings.compiler == Compiler::Msvc,
    }
}

/// Render a path the way CMake expects it on every platform
pub fn cmake_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Os;

    fn options(overrides: &[&str]) -> OptionSet {
        let mut options = OptionSet::new();
        for o in overrides {
            options.apply_override(o).unwrap();
        }
        options
    }

    fn value(defs: &Definitions, name: &str) -> String {
        defs.get(name).map(|v| v.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_default_definitions_linux() {
        let defs = recipe_definitions(&OptionSet::new(), &Settings::for_os(Os::Linux));
        assert_eq!(value(&defs, "ENABLE_SPLASH"), "ON");
        assert_eq!(value(&defs, "ENABLE_ZLIB"), "ON");
        assert_eq!(value(&defs, "BUILD_QT5_TESTS"), "OFF");
        assert_eq!(value(&defs, "ENABLE_CPP"), "OFF");
        assert_eq!(value(&defs, "ENABLE_CMS"), "none");
        assert_eq!(value(&defs, "ENABLE_LIBCURL"), "OFF");
        assert_eq!(value(&defs, "BUILD_SHARED_LIBS"), "OFF");
        assert!(!defs.contains_key("LIB_SUFFIX"));
        assert!(!defs.contains_key("FONT_CONFIGURATION"));
        assert_eq!(defs.len(), 7);
    }

    #[test]
    fn test_enabled_features() {
        let defs = recipe_definitions(
            &options(&["with_lcms=True", "with_cpp=True", "with_curl=True", "shared=True"]),
            &Settings::for_os(Os::Linux),
        );
        assert_eq!(value(&defs, "ENABLE_CMS"), "lcms2");
        assert_eq!(value(&defs, "ENABLE_CPP"), "ON");
        assert_eq!(value(&defs, "ENABLE_LIBCURL"), "ON");
        assert_eq!(value(&defs, "BUILD_SHARED_LIBS"), "ON");
    }

    #[test]
    fn test_windows_overrides() {
        let defs = recipe_definitions(&OptionSet::new(), &Settings::for_os(Os::Windows));
        assert_eq!(defs.get("LIB_SUFFIX"), Some(&CMakeValue::String(String::new())));
        assert_eq!(value(&defs, "FONT_CONFIGURATION"), "win32");
    }

    #[test]
    fn test_definitions_are_deterministic() {
        let opts = options(&["with_qt=True", "with_lcms=True"]);
        let settings = Settings::for_os(Os::Windows);
        assert_eq!(
            recipe_definitions(&opts, &settings),
            recipe_definitions(&opts, &settings)
        );
    }

    #[test]
    fn test_configure_args_single_config() {
        let settings = Settings::for_os(Os::Linux);
        let cmake = CMake::new(
            &BuildSection::default(),
            &OptionSet::new(),
            &settings,
            Path::new("/w/source/poppler-src"),
            Path::new("/w/build"),
            Path::new("/w/package"),
            4,
        );
        let args = cmake.configure_args();
        assert_eq!(&args[..4], &["-S", "/w/source/poppler-src", "-B", "/w/build"]);
        assert!(args.contains(&"-DCMAKE_BUILD_TYPE=Release".to_string()));
        assert!(args.contains(&"-DCMAKE_INSTALL_PREFIX=/w/package".to_string()));
        assert!(args.contains(&"-DCMAKE_VERBOSE_MAKEFILE=ON".to_string()));
        assert!(args.contains(&"-DENABLE_SPLASH=ON".to_string()));
        assert!(!args.contains(&"-G".to_string()));

        assert_eq!(
            cmake.build_args(None),
            vec!["--build", "/w/build", "--parallel", "4"]
        );
        assert_eq!(
            cmake.install_args(),
            vec!["--build", "/w/build", "--target", "install", "--parallel", "4"]
        );
    }

    #[test]
    fn test_multi_config_generator() {
        let build = BuildSection {
            generator: Some("Visual Studio 15 2017 Win64".to_string()),
            jobs: Some(2),
            ..BuildSection::default()
        };
        let mut settings = Settings::for_os(Os::Windows);
        settings.build_type = BuildType::Debug;
        let cmake = CMake::new(
            &build,
            &OptionSet::new(),
            &settings,
            Path::new("src"),
            Path::new("bld"),
            Path::new("pkg"),
            8,
        );

        assert!(cmake.is_multi_config());
        assert!(!cmake.definitions.contains_key("CMAKE_BUILD_TYPE"));
        let args = cmake.configure_args();
        assert!(args.contains(&"-G".to_string()));
        assert!(args.contains(&"-DLIB_SUFFIX=".to_string()));
        assert_eq!(
            cmake.build_args(None),
            vec!["--build", "bld", "--config", "Debug", "--parallel", "2"]
        );
    }

    #[test]
    fn test_cmake_path_separators() {
        assert_eq!(cmake_path(Path::new(r"C:\work\package")), "C:/work/package");
    }
}
