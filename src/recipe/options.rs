// src/recipe/options.rs

//! Recipe option set
//!
//! Options are the user-facing feature toggles of the recipe. Every option
//! is boolean, has a default, and may be overridden with `name=value`.
//! Options can also be removed for a platform, after which they read as
//! disabled.

use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Names of the recipe's options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionName {
    Shared,
    WithLcms,
    WithCpp,
    WithCairo,
    WithQt,
    WithSplash,
    WithCurl,
}

impl OptionName {
    /// All options in declaration order
    pub const ALL: &'static [OptionName] = &[
        Self::Shared,
        Self::WithLcms,
        Self::WithCpp,
        Self::WithCairo,
        Self::WithQt,
        Self::WithSplash,
        Self::WithCurl,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::WithLcms => "with_lcms",
            Self::WithCpp => "with_cpp",
            Self::WithCairo => "with_cairo",
            Self::WithQt => "with_qt",
            Self::WithSplash => "with_splash",
            Self::WithCurl => "with_curl",
        }
    }

    /// Default value of the option
    ///
    /// `with_splash` has no declared default and takes its first allowed
    /// value, which is `True`.
    pub const fn default_value(&self) -> bool {
        matches!(self, Self::WithSplash)
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionName {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|n| n.as_str()).collect();
                Error::ParseError(format!(
                    "Unknown option '{}' (possible options: {})",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

impl Serialize for OptionName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Parse a boolean option value
///
/// Accepts the Python spellings (`True`, `False`) as well as the usual
/// lowercase forms.
pub fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(Error::ParseError(format!(
            "Invalid boolean value '{}' (expected True or False)",
            other
        ))),
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// The recipe's option values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    values: BTreeMap<OptionName, bool>,
    /// Options set explicitly by the user (config file or command line)
    explicit: BTreeSet<OptionName>,
}

impl OptionSet {
    /// Option set holding every option at its default
    pub fn new() -> Self {
        Self {
            values: OptionName::ALL
                .iter()
                .map(|name| (*name, name.default_value()))
                .collect(),
            explicit: BTreeSet::new(),
        }
    }

    /// Value of an option; removed options read as disabled
    pub fn get(&self, name: OptionName) -> bool {
        self.values.get(&name).copied().unwrap_or(false)
    }

    /// Set an option explicitly
    pub fn set(&mut self, name: OptionName, value: bool) -> &mut Self {
        self.values.insert(name, value);
        self.explicit.insert(name);
        self
    }

    /// Apply a `name=value` override, e.g. `with_qt=True`
    pub fn apply_override(&mut self, assignment: &str) -> Result<()> {
        let (name, value) = assignment.split_once('=').ok_or_else(|| {
            Error::ParseError(format!(
                "Invalid option '{}', expected name=value",
                assignment
            ))
        })?;
        let name: OptionName = name.parse()?;
        let value = parse_bool(value)?;
        self.set(name, value);
        Ok(())
    }

    /// Remove an option for the current platform
    pub fn remove(&mut self, name: OptionName) {
        self.values.remove(&name);
    }

    /// Whether the option still exists (was not removed)
    pub fn contains(&self, name: OptionName) -> bool {
        self.values.contains_key(&name)
    }

    /// Whether the user set the option rather than relying on the default
    pub fn is_explicit(&self, name: OptionName) -> bool {
        self.explicit.contains(&name)
    }

    /// Present options and their values in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (OptionName, bool)> + '_ {
        self.values.iter().map(|(name, value)| (*name, *value))
    }
}

impl Default for OptionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(name, value)| format!("{}={}", name, bool_str(value)))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl Serialize for OptionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(name, value)| (name.as_str(), value)))
    }
}

/// An option default scoped to one of the recipe's dependencies,
/// e.g. `freetype:with_png=False`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedOption {
    pub package: String,
    pub name: String,
    pub value: String,
}

impl ScopedOption {
    pub fn new(package: &str, name: &str, value: &str) -> Self {
        Self {
            package: package.to_string(),
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ScopedOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}={}", self.package, self.name, self.value)
    }
}

impl FromStr for ScopedOption {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || {
            Error::ParseError(format!(
                "Invalid scoped option '{}', expected package:name=value",
                s
            ))
        };
        let (package, rest) = s.trim().split_once(':').ok_or_else(invalid)?;
        let (name, value) = rest.split_once('=').ok_or_else(invalid)?;
        if package.is_empty() || name.is_empty() || value.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(package, name, value))
    }
}

impl Serialize for ScopedOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
