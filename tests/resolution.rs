// tests/resolution.rs

//! Integration tests for option resolution and build configuration

mod common;

use poppler_recipe::recipe::{
    recipe_definitions, resolve, resolve::configure, CMakeValue, OptionName, OptionSet,
    RequirementList,
};
use poppler_recipe::settings::{Os, Settings};

fn options(overrides: &[&str]) -> OptionSet {
    let mut options = OptionSet::new();
    for assignment in overrides {
        options.apply_override(assignment).unwrap();
    }
    options
}

#[test]
fn test_base_requirements_only() {
    let resolved = resolve(
        options(&["shared=False", "with_cairo=False", "with_qt=False"]),
        Settings::for_os(Os::Linux),
    )
    .unwrap();

    assert_eq!(
        resolved.requires.names(),
        vec!["zlib", "libpng", "libjpeg", "openjpeg", "libtiff", "freetype"]
    );
}

#[test]
fn test_windows_requires_splash() {
    let err = resolve(options(&["with_splash=False"]), Settings::for_os(Os::Windows)).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("with_splash=True is mandatory on windows"));
}

#[test]
fn test_windows_never_requires_cairo() {
    let resolved = resolve(OptionSet::new(), Settings::for_os(Os::Windows)).unwrap();
    assert!(!resolved.options.contains(OptionName::WithCairo));
    assert!(!resolved.requires.contains("cairo"));
    assert!(!resolved.requires.contains("glib"));

    let err = resolve(options(&["with_cairo=True"]), Settings::for_os(Os::Windows)).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_all_features_on_linux() {
    let resolved = resolve(
        options(&["with_lcms=True", "with_qt=True", "with_cairo=True", "with_curl=True"]),
        Settings::for_os(Os::Linux),
    )
    .unwrap();

    assert_eq!(
        resolved.requires.names(),
        vec![
            "zlib", "libpng", "libjpeg", "openjpeg", "libtiff", "freetype", "lcms", "Qt",
            "cairo", "glib", "libcurl"
        ]
    );
    assert_eq!(
        resolved.requires.get("Qt").unwrap().to_string(),
        "Qt/5.11.2@bincrafters/testing"
    );
}

#[test]
fn test_repeated_configure_adds_nothing() {
    let opts = options(&["with_qt=True", "with_curl=True"]);
    let settings = Settings::for_os(Os::Linux);
    let mut requires = RequirementList::new();

    configure(&opts, &settings, &mut requires).unwrap();
    let first = requires.clone();
    configure(&opts, &settings, &mut requires).unwrap();

    assert_eq!(requires, first);
    assert_eq!(requires.iter().filter(|r| r.name == "Qt").count(), 1);
}

#[test]
fn test_definitions_are_deterministic() {
    let opts = options(&["with_cpp=True", "with_lcms=True"]);
    let settings = Settings::for_os(Os::Linux);

    let first = recipe_definitions(&opts, &settings);
    let second = recipe_definitions(&opts.clone(), &settings);
    assert_eq!(first, second);

    assert_eq!(first["ENABLE_CMS"], CMakeValue::from("lcms2"));
    assert_eq!(first["ENABLE_CPP"], CMakeValue::Bool(true));
    assert_eq!(first["ENABLE_SPLASH"], CMakeValue::Bool(true));
    assert_eq!(first["BUILD_SHARED_LIBS"], CMakeValue::Bool(false));
    assert!(!first.contains_key("FONT_CONFIGURATION"));
}

#[test]
fn test_windows_definitions() {
    let resolved = resolve(OptionSet::new(), Settings::for_os(Os::Windows)).unwrap();
    let defs = recipe_definitions(&resolved.options, &resolved.settings);

    assert_eq!(defs["FONT_CONFIGURATION"], CMakeValue::from("win32"));
    assert_eq!(defs["LIB_SUFFIX"], CMakeValue::from(""));
    assert_eq!(defs["ENABLE_CMS"], CMakeValue::from("none"));
}
