// src/recipe/kitchen/cook.rs

//! Cook: the build and package steps for one resolved recipe

use crate::error::{Error, Result};
use crate::recipe::kitchen::cmake::CMake;
use crate::recipe::kitchen::config::Layout;
use crate::recipe::kitchen::generator::write_buildinfo;
use crate::recipe::kitchen::package::{apply_rule, ARTIFACT_RULES, LICENSE_RULE};
use crate::recipe::kitchen::source::staged_dir;
use crate::recipe::resolve::ResolvedRecipe;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

use super::Kitchen;

/// A single cook operation
pub struct Cook<'a> {
    pub(super) kitchen: &'a Kitchen,
    pub(super) resolved: &'a ResolvedRecipe,
    pub(super) layout: Layout,
    /// Staged upstream sources
    pub(super) staged: PathBuf,
    /// Build log accumulator
    pub(super) log: String,
}

impl<'a> Cook<'a> {
    pub(super) fn new(kitchen: &'a Kitchen, resolved: &'a ResolvedRecipe) -> Self {
        Self {
            kitchen,
            resolved,
            layout: kitchen.config.layout(),
            staged: staged_dir(&kitchen.recipe, &kitchen.config),
            log: String::new(),
        }
    }

    /// CMake set up for this recipe and layout
    pub(super) fn cmake(&self) -> CMake {
        CMake::new(
            &self.kitchen.recipe.build,
            &self.resolved.options,
            &self.resolved.settings,
            &self.staged,
            &self.layout.build_folder,
            &self.layout.package_folder,
            self.kitchen.config.jobs,
        )
    }

    fn require_staged(&self) -> Result<()> {
        if !self.staged.join("CMakeLists.txt").exists() {
            return Err(Error::NotFound(format!(
                "No staged sources in {}; run the source step first",
                self.staged.display()
            )));
        }
        Ok(())
    }

    fn require_cmake(&mut self, cmake: &CMake) -> Result<()> {
        let path = which::which(&cmake.program)
            .map_err(|e| Error::NotFound(format!("{} not found in PATH: {}", cmake.program, e)))?;
        self.log_line(&format!("Using {}", path.display()));
        Ok(())
    }

    /// Write dependency info and run the CMake configure step
    fn configure(&mut self, cmake: &CMake) -> Result<()> {
        self.require_staged()?;
        self.require_cmake(cmake)?;
        let deps_root = self.kitchen.recipe.build.deps_root.as_deref();
        let buildinfo = write_buildinfo(self.resolved, deps_root, &self.layout.build_folder)?;
        self.log_line(&format!("Wrote {}", buildinfo.display()));

        self.run_build_step("configure", &cmake.program, &cmake.configure_args())
    }

    /// Configure and build
    pub(super) fn build(&mut self) -> Result<()> {
        let cmake = self.cmake();
        self.configure(&cmake)?;
        self.run_build_step("build", &cmake.program, &cmake.build_args(None))
    }

    /// Copy the license, install, then collect artifacts by pattern
    pub(super) fn package(&mut self) -> Result<Vec<PathBuf>> {
        let package_folder = self.layout.package_folder.clone();
        let build_folder = self.layout.build_folder.clone();
        fs::create_dir_all(&package_folder)?;

        let mut copied = apply_rule(&LICENSE_RULE, &self.staged, &build_folder, &package_folder)?;

        let cmake = self.cmake();
        self.configure(&cmake)?;
        self.run_build_step("install", &cmake.program, &cmake.install_args())?;

        for rule in ARTIFACT_RULES {
            copied.extend(apply_rule(rule, &self.staged, &build_folder, &package_folder)?);
        }

        self.log_line(&format!(
            "Packaged {} file(s) into {}",
            copied.len(),
            package_folder.display()
        ));
        Ok(copied)
    }

    /// Run an external build command in the build folder
    fn run_build_step(&mut self, phase: &str, program: &str, args: &[String]) -> Result<()> {
        info!("Running {} phase", phase);
        debug!("Command: {} {}", program, args.join(" "));

        let workdir: &Path = &self.layout.build_folder;
        fs::create_dir_all(workdir)?;

        let output = Command::new(program)
            .args(args)
            .current_dir(workdir)
            .output()
            .map_err(|e| Error::BuildError(format!("Failed to run {} phase: {}", phase, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        self.log_build_output(phase, &stdout, &stderr);

        if !output.status.success() {
            return Err(Error::BuildError(format!(
                "{} phase failed with exit code {:?}\nstderr: {}",
                phase,
                output.status.code(),
                stderr
            )));
        }

        Ok(())
    }

    fn log_line(&mut self, line: &str) {
        self.log.push_str(line);
        self.log.push('\n');
    }

    /// Log build step output (stdout/stderr) with a phase header
    fn log_build_output(&mut self, phase: &str, stdout: &str, stderr: &str) {
        self.log_line(&format!("=== {} ===", phase));
        if !stdout.is_empty() {
            self.log.push_str(stdout);
            self.log.push('\n');
        }
        if !stderr.is_empty() {
            self.log.push_str(stderr);
            self.log.push('\n');
        }
    }
}
