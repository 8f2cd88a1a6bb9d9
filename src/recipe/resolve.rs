// src/recipe/resolve.rs

//! Option resolution
//!
//! Resolution runs before any network or filesystem work. It removes
//! options that do not exist on the target platform, rejects invalid
//! option/platform combinations, and computes the requirement list.

use crate::error::{Error, Result};
use crate::recipe::options::{OptionName, OptionSet, ScopedOption};
use crate::recipe::requirements::RequirementList;
use crate::settings::Settings;
use serde::Serialize;
use tracing::debug;

/// Requirements every build has, in order
pub const BASE_REQUIRES: &[&str] = &[
    "zlib/1.2.11@conan/stable",
    "libpng/1.6.34@bincrafters/stable",
    "libjpeg/9c@bincrafters/stable",
    "openjpeg/2.3.0@bincrafters/stable",
    "libtiff/4.0.9@bincrafters/stable",
    "freetype/2.9.0@bincrafters/stable",
];

pub const LCMS_REQUIRE: &str = "lcms/2.9@bincrafters/stable";
pub const QT_REQUIRE: &str = "Qt/5.11.2@bincrafters/testing";
pub const CAIRO_REQUIRES: &[&str] = &[
    "cairo/1.15.14@bincrafters/stable",
    "glib/2.56.1@bincrafters/stable",
];
pub const CURL_REQUIRE: &str = "libcurl/7.61.1@bincrafters/stable";

/// Option defaults handed down to dependencies
pub const DEPENDENCY_OPTIONS: &[(&str, &str, &str)] = &[
    ("libpng", "shared", "False"),
    ("freetype", "with_png", "False"),
    ("freetype", "shared", "False"),
    ("freetype", "with_zlib", "False"),
    ("zlib", "shared", "False"),
    ("openjpeg", "shared", "False"),
    ("cairo", "shared", "False"),
    ("glib", "shared", "False"),
    ("libcurl", "shared", "False"),
    ("OpenSSL", "shared", "False"),
    ("Qt", "opengl", "desktop"),
    ("Qt", "qtxmlpatterns", "True"),
    ("Qt", "shared", "True"),
];

/// Outcome of option resolution; fixed for the rest of the invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRecipe {
    pub options: OptionSet,
    pub settings: Settings,
    pub requires: RequirementList,
    pub dependency_options: Vec<ScopedOption>,
}

impl ResolvedRecipe {
    pub fn option(&self, name: OptionName) -> bool {
        self.options.get(name)
    }
}

/// Drop options that do not exist on the target platform
///
/// Cairo is unavailable on Windows. Asking for it explicitly there is an
/// error rather than being silently ignored.
pub fn config_options(options: &mut OptionSet, settings: &Settings) -> Result<()> {
    if settings.os.is_windows() && options.contains(OptionName::WithCairo) {
        if options.is_explicit(OptionName::WithCairo) && options.get(OptionName::WithCairo) {
            return Err(Error::InvalidConfiguration(
                "Option with_cairo is not available on windows".to_string(),
            ));
        }
        debug!("Removing option with_cairo for {}", settings.os);
        options.remove(OptionName::WithCairo);
    }
    Ok(())
}

/// Reject contradictory option/platform combinations
pub fn validate(options: &OptionSet, settings: &Settings) -> Result<()> {
    if settings.os.is_windows() && !options.get(OptionName::WithSplash) {
        return Err(Error::InvalidConfiguration(
            "Option with_splash=True is mandatory on windows".to_string(),
        ));
    }
    Ok(())
}

/// Validate the option set and append conditional requirements
///
/// Requirements already present are not added again, so calling this
/// repeatedly on the same list leaves it unchanged.
pub fn configure(
    options: &OptionSet,
    settings: &Settings,
    requires: &mut RequirementList,
) -> Result<()> {
    validate(options, settings)?;

    if options.get(OptionName::WithLcms) {
        requires.add_reference(LCMS_REQUIRE)?;
    }
    if options.get(OptionName::WithQt) {
        requires.add_reference(QT_REQUIRE)?;
    }
    if !settings.os.is_windows() && options.get(OptionName::WithCairo) {
        for reference in CAIRO_REQUIRES {
            requires.add_reference(reference)?;
        }
    }
    if options.get(OptionName::WithCurl) {
        requires.add_reference(CURL_REQUIRE)?;
    }
    Ok(())
}

/// The unconditional requirements
pub fn base_requirements() -> Result<RequirementList> {
    let mut requires = RequirementList::new();
    for reference in BASE_REQUIRES {
        requires.add_reference(reference)?;
    }
    Ok(requires)
}

/// Scoped dependency option defaults
pub fn dependency_options() -> Vec<ScopedOption> {
    DEPENDENCY_OPTIONS
        .iter()
        .map(|(package, name, value)| ScopedOption::new(package, name, value))
        .collect()
}

/// Run the whole option resolution for a user option set
pub fn resolve(options: OptionSet, settings: Settings) -> Result<ResolvedRecipe> {
    let mut options = options;
    config_options(&mut options, &settings)?;

    let mut requires = base_requirements()?;
    configure(&options, &settings, &mut requires)?;

    debug!("Resolved options: {}", options);
    debug!("Resolved requirements: {}", requires.names().join(", "));

    Ok(ResolvedRecipe {
        options,
        settings,
        requires,
        dependency_options: dependency_options(),
    })
}
