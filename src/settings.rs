// src/settings.rs

//! Target platform settings
//!
//! Settings describe the platform the package is built for: operating
//! system, compiler, architecture and build type. They are spelled the way
//! Conan spells them (`Windows`, `Visual Studio`, `x86_64`, `Release`) so
//! that overrides like `-s os=Windows` read naturally.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Implements `as_str`, `Display`, `FromStr` and serde for a settings enum
/// from a table of (variant, canonical name, accepted aliases).
macro_rules! setting_enum {
    ($ty:ident, $what:literal, { $($variant:ident => $name:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $ty {
            /// Canonical spelling
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// All accepted values, in declaration order
            pub const ALL: &'static [$ty] = &[$(Self::$variant),+];
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($name) $(|| s.eq_ignore_ascii_case($alias))* {
                        return Ok(Self::$variant);
                    }
                )+
                let valid: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                Err(Error::ParseError(format!(
                    "Invalid {} '{}' (possible values: {})",
                    $what,
                    s,
                    valid.join(", ")
                )))
            }
        }

        impl Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Target operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Windows,
    Linux,
    Macos,
    FreeBsd,
    Android,
    Ios,
}

setting_enum!(Os, "os", {
    Windows => "Windows",
    Linux => "Linux",
    Macos => "Macos" | "macOS" | "Darwin",
    FreeBsd => "FreeBSD",
    Android => "Android",
    Ios => "iOS",
});

impl Os {
    /// Operating system of the running host
    pub fn host() -> Self {
        match std::env::consts::OS {
            "windows" => Self::Windows,
            "macos" => Self::Macos,
            "freebsd" => Self::FreeBsd,
            "android" => Self::Android,
            "ios" => Self::Ios,
            _ => Self::Linux,
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }
}

/// Compiler family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compiler {
    Gcc,
    Clang,
    AppleClang,
    Msvc,
}

setting_enum!(Compiler, "compiler", {
    Gcc => "gcc",
    Clang => "clang",
    AppleClang => "apple-clang",
    Msvc => "Visual Studio" | "msvc",
});

impl Compiler {
    /// Usual compiler for an operating system
    pub fn default_for(os: Os) -> Self {
        match os {
            Os::Windows => Self::Msvc,
            Os::Macos | Os::Ios => Self::AppleClang,
            Os::FreeBsd | Os::Android => Self::Clang,
            Os::Linux => Self::Gcc,
        }
    }
}

/// Target architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X86,
    X86_64,
    Armv7,
    Armv8,
}

setting_enum!(Arch, "arch", {
    X86 => "x86" | "i686",
    X86_64 => "x86_64" | "amd64",
    Armv7 => "armv7" | "arm",
    Armv8 => "armv8" | "aarch64" | "arm64",
});

impl Arch {
    pub fn host() -> Self {
        match std::env::consts::ARCH {
            "x86" => Self::X86,
            "arm" => Self::Armv7,
            "aarch64" => Self::Armv8,
            _ => Self::X86_64,
        }
    }
}

/// CMake build type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

setting_enum!(BuildType, "build_type", {
    Debug => "Debug",
    Release => "Release",
    RelWithDebInfo => "RelWithDebInfo",
    MinSizeRel => "MinSizeRel",
});

/// The full platform descriptor a recipe is resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Settings {
    pub os: Os,
    pub compiler: Compiler,
    pub arch: Arch,
    pub build_type: BuildType,
}

impl Settings {
    /// Settings for the running host, in Release mode
    pub fn detect() -> Self {
        let os = Os::host();
        Self {
            os,
            compiler: Compiler::default_for(os),
            arch: Arch::host(),
            build_type: BuildType::default(),
        }
    }

    /// Settings for a given operating system, other fields from the host
    pub fn for_os(os: Os) -> Self {
        Self {
            os,
            compiler: Compiler::default_for(os),
            ..Self::detect()
        }
    }

    /// Apply a `key=value` override such as `os=Windows`
    ///
    /// Changing `os` also resets the compiler to that platform's default,
    /// unless the compiler is overridden separately afterwards.
    pub fn apply_override(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            Error::ParseError(format!(
                "Invalid setting '{}', expected key=value",
                assignment
            ))
        })?;

        match key.trim() {
            "os" => {
                self.os = value.parse()?;
                self.compiler = Compiler::default_for(self.os);
            }
            "compiler" => self.compiler = value.parse()?,
            "arch" => self.arch = value.parse()?,
            "build_type" => self.build_type = value.parse()?,
            other => {
                return Err(Error::ParseError(format!(
                    "Unknown setting '{}' (expected os, compiler, arch or build_type)",
                    other
                )))
            }
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::detect()
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "os={} compiler={} arch={} build_type={}",
            self.os, self.compiler, self.arch, self.build_type
        )
    }
}
