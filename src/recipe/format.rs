// src/recipe/format.rs

//! Recipe configuration file format
//!
//! Every field is optional: an empty file describes the stock Poppler
//! 0.71.0 recipe. A file can pin another version, point at a mirror or a
//! local archive, tune the CMake invocation, and preset options and
//! settings. Command-line flags are applied on top.
//!
//! ```toml
//! [package]
//! version = "0.71.0"
//!
//! [source]
//! archive = "https://poppler.freedesktop.org/poppler-%(version)s.tar.xz"
//! checksum = "sha256:..."
//!
//! [build]
//! generator = "Ninja"
//! jobs = 8
//!
//! [options]
//! with_cpp = true
//!
//! [settings]
//! build_type = "Debug"
//! ```

use crate::error::{Error, Result};
use crate::recipe::options::{OptionName, OptionSet};
use crate::settings::{Arch, BuildType, Compiler, Os, Settings};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Recipe configuration, as read from a TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeConfig {
    pub package: PackageSection,
    pub source: SourceSection,
    pub build: BuildSection,
    /// Option presets, by option name
    pub options: BTreeMap<String, bool>,
    pub settings: SettingsSection,
}

/// Package metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageSection {
    pub name: String,
    pub version: String,
    pub description: String,
    /// SPDX license identifier
    pub license: String,
    pub homepage: String,
    /// Where the recipe itself lives
    pub url: String,
    pub author: String,
    pub topics: Vec<String>,
}

impl Default for PackageSection {
    fn default() -> Self {
        Self {
            name: "poppler".to_string(),
            version: "0.71.0".to_string(),
            description: "Poppler is a PDF rendering library based on the xpdf-3.0 code base"
                .to_string(),
            license: "GPL-3.0-only".to_string(),
            homepage: "https://poppler.freedesktop.org/".to_string(),
            url: "https://github.com/zehome/conan-poppler".to_string(),
            author: "Laurent Coustet <ed@zehome.com>".to_string(),
            topics: ["conan", "libpoppler", "poppler", "pdf"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Upstream source location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSection {
    /// Archive URL or local path
    ///
    /// Supports `%(version)s` and `%(name)s` substitution.
    pub archive: String,

    /// Optional `sha256:<hex>` checksum of the archive
    pub checksum: Option<String>,

    /// Directory the staged sources are moved to
    pub subfolder: String,

    /// Replacement CMakeLists.txt; the bundled one is used when unset
    pub cmake_lists: Option<PathBuf>,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            archive: "https://poppler.freedesktop.org/poppler-%(version)s.tar.xz".to_string(),
            checksum: None,
            subfolder: "poppler-src".to_string(),
            cmake_lists: None,
        }
    }
}

/// CMake invocation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    /// CMake executable
    pub cmake: String,
    /// CMake generator (`-G`); CMake picks one when unset
    pub generator: Option<String>,
    /// Parallel build jobs; the kitchen default when unset
    pub jobs: Option<u32>,
    /// Directory holding installed dependencies as `<deps_root>/<name>`
    pub deps_root: Option<PathBuf>,
    /// Verbose makefiles
    pub verbose: bool,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            cmake: "cmake".to_string(),
            generator: None,
            jobs: None,
            deps_root: None,
            verbose: true,
        }
    }
}

/// Settings presets; unset fields come from the host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsSection {
    pub os: Option<Os>,
    pub compiler: Option<Compiler>,
    pub arch: Option<Arch>,
    pub build_type: Option<BuildType>,
}

impl RecipeConfig {
    /// Replace `%(name)s` and `%(version)s` in a template
    pub fn substitute(&self, template: &str) -> String {
        template
            .replace("%(version)s", &self.package.version)
            .replace("%(name)s", &self.package.name)
    }

    /// Archive location with variables substituted
    pub fn archive_url(&self) -> String {
        self.substitute(&self.source.archive)
    }

    /// File name of the archive, taken from its URL or path
    pub fn archive_filename(&self) -> String {
        self.archive_url()
            .rsplit(['/', '\\'])
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}-{}.tar.xz", self.package.name, self.package.version))
    }

    /// Top-level directory the upstream archive extracts to
    pub fn extracted_dir(&self) -> String {
        format!("{}-{}", self.package.name, self.package.version)
    }

    /// Option set with this file's presets applied over the defaults
    pub fn option_set(&self) -> Result<OptionSet> {
        let mut options = OptionSet::new();
        for (name, value) in &self.options {
            let name: OptionName = name.parse()?;
            options.set(name, *value);
        }
        Ok(options)
    }

    /// Settings with this file's presets applied over the host defaults
    pub fn settings(&self) -> Settings {
        let mut settings = match self.settings.os {
            Some(os) => Settings::for_os(os),
            None => Settings::detect(),
        };
        if let Some(compiler) = self.settings.compiler {
            settings.compiler = compiler;
        }
        if let Some(arch) = self.settings.arch {
            settings.arch = arch;
        }
        if let Some(build_type) = self.settings.build_type {
            settings.build_type = build_type;
        }
        settings
    }
}

/// Parse a recipe configuration from a TOML string
pub fn parse_config(content: &str) -> Result<RecipeConfig> {
    let config: RecipeConfig = toml::from_str(content)
        .map_err(|e| Error::ParseError(format!("Invalid recipe configuration: {}", e)))?;
    validate_config(&config)?;
    Ok(config)
}

/// Load a recipe configuration file
pub fn load_config(path: &Path) -> Result<RecipeConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::IoError(format!(
            "Failed to read recipe configuration {}: {}",
            path.display(),
            e
        ))
    })?;
    parse_config(&content)
}

fn validate_config(config: &RecipeConfig) -> Result<()> {
    if config.package.name.is_empty() {
        return Err(Error::ParseError("Package name cannot be empty".to_string()));
    }
    if config.package.version.is_empty() {
        return Err(Error::ParseError("Package version cannot be empty".to_string()));
    }
    if config.source.subfolder.is_empty() || config.source.subfolder.contains(['/', '\\']) {
        return Err(Error::ParseError(format!(
            "Invalid source subfolder '{}'",
            config.source.subfolder
        )));
    }
    if let Some(checksum) = &config.source.checksum
        && !checksum.starts_with("sha256:")
    {
        return Err(Error::ParseError(format!(
            "Invalid checksum format: {}. Expected sha256:...",
            checksum
        )));
    }
    if config.build.jobs == Some(0) {
        return Err(Error::ParseError("Build jobs must be at least 1".to_string()));
    }
    // Reject unknown option names up front
    config.option_set()?;
    Ok(())
}
