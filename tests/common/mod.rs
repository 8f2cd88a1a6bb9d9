// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use poppler_recipe::recipe::{Kitchen, KitchenConfig, RecipeConfig};
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Upstream CMakeLists.txt shipped in the fixture archive
pub const UPSTREAM_CMAKE_LISTS: &str = "project(poppler)\n";

/// Files of a minimal poppler source tree
pub const FIXTURE_FILES: &[(&str, &str)] = &[
    ("poppler-0.71.0/CMakeLists.txt", UPSTREAM_CMAKE_LISTS),
    ("poppler-0.71.0/LICENSE", "GNU GENERAL PUBLIC LICENSE\n"),
    ("poppler-0.71.0/poppler/Object.h", "// Object.h\n"),
    ("poppler-0.71.0/include/poppler/poppler-config.h", "// config\n"),
];

/// Write a tar.xz archive holding `entries`
pub fn write_tar_xz(path: &Path, entries: &[(&str, &str)]) {
    let file = File::create(path).unwrap();
    let encoder = xz2::write::XzEncoder::new(file, 6);
    let mut builder = tar::Builder::new(encoder);
    for (name, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, data.as_bytes()).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}

/// Create a fixture archive named like the upstream release.
///
/// Returns (TempDir, archive_path) - keep the TempDir alive to prevent cleanup.
pub fn fixture_archive() -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().unwrap();
    let archive = temp_dir.path().join("poppler-0.71.0.tar.xz");
    write_tar_xz(&archive, FIXTURE_FILES);
    (temp_dir, archive)
}

/// Recipe configuration pointing at a local archive
pub fn local_recipe(archive: &Path) -> RecipeConfig {
    let mut recipe = RecipeConfig::default();
    recipe.source.archive = archive.display().to_string();
    recipe
}

/// Kitchen working in `workdir`, fetching from a local archive, no progress bar
pub fn local_kitchen(archive: &Path, workdir: &Path) -> Kitchen {
    let mut config = KitchenConfig::in_workdir(workdir);
    config.progress = false;
    Kitchen::new(local_recipe(archive), config)
}

/// Recorded CMake invocations of a [`StubCMake`]
#[cfg(unix)]
pub struct StubCMake {
    /// Executable to put in `[build] cmake`
    pub program: PathBuf,
    /// One line per invocation, arguments joined by spaces
    pub calls: PathBuf,
    /// While this file exists every invocation fails
    pub fail_marker: PathBuf,
}

#[cfg(unix)]
impl StubCMake {
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(&self.calls)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn fail_from_now_on(&self) {
        std::fs::write(&self.fail_marker, b"").unwrap();
    }
}

/// Write a shell script standing in for cmake into `dir`.
///
/// Configure checks that the source dir exists from the build folder and
/// that `buildinfo.cmake` was written first; build drops shared objects into
/// the build folder; install requires an absolute prefix and installs
/// `lib/libpoppler.so` there.
#[cfg(unix)]
pub fn stub_cmake(dir: &Path) -> StubCMake {
    use std::os::unix::fs::PermissionsExt;

    let program = dir.join("cmake-stub");
    let calls = dir.join("cmake-calls.log");
    let fail_marker = dir.join("cmake-fail");

    let script = format!(
        r#"#!/bin/sh
echo "$*" >> '{calls}'
if [ -e '{fail}' ]; then
  echo "stub cmake: requested failure" >&2
  exit 3
fi
case "$1" in
  -S)
    [ -d "$2" ] || {{ echo "source dir $2 not found from $(pwd)" >&2; exit 1; }}
    [ -f "$4/buildinfo.cmake" ] || {{ echo "buildinfo.cmake missing" >&2; exit 1; }}
    for arg in "$@"; do
      case "$arg" in
        -DCMAKE_INSTALL_PREFIX=*) echo "${{arg#-DCMAKE_INSTALL_PREFIX=}}" > "$4/stub_prefix" ;;
      esac
    done
    echo "-- Configuring done"
    ;;
  --build)
    case "$*" in
      *"--target install"*)
        prefix=$(cat "$2/stub_prefix")
        case "$prefix" in
          /*) ;;
          *) echo "relative install prefix $prefix" >&2; exit 1 ;;
        esac
        mkdir -p "$prefix/lib" && : > "$prefix/lib/libpoppler.so"
        echo "-- Installing: $prefix/lib/libpoppler.so"
        ;;
      *)
        mkdir -p "$2/poppler" "$2/cpp"
        : > "$2/poppler/libpoppler.so.82"
        : > "$2/cpp/libpoppler-cpp.so"
        echo "[100%] Built target poppler"
        ;;
    esac
    ;;
esac
"#,
        calls = calls.display(),
        fail = fail_marker.display(),
    );
    std::fs::write(&program, script).unwrap();
    std::fs::set_permissions(&program, std::fs::Permissions::from_mode(0o755)).unwrap();

    StubCMake {
        program,
        calls,
        fail_marker,
    }
}

/// Kitchen fetching from a local archive and building with a stub cmake
#[cfg(unix)]
pub fn stub_kitchen(archive: &Path, workdir: &Path, stub: &StubCMake) -> Kitchen {
    let mut recipe = local_recipe(archive);
    recipe.build.cmake = stub.program.display().to_string();
    let mut config = KitchenConfig::in_workdir(workdir);
    config.progress = false;
    config.jobs = 2;
    Kitchen::new(recipe, config)
}

/// `path` (absolute) spelled relative to the current directory
pub fn relative_to_cwd(path: &Path) -> PathBuf {
    let cwd = std::env::current_dir().unwrap();
    let mut relative = PathBuf::new();
    for _ in cwd.components().skip(1) {
        relative.push("..");
    }
    relative.push(path.strip_prefix("/").unwrap());
    relative
}
