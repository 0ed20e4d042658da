//! Environment bootstrapping
//!
//! Drives the step sequence that produces a clean virtual environment:
//! validate the requirements manifest, delete any pre-existing environment,
//! create a fresh one with the resolved interpreter, upgrade pip, then
//! install the manifest. The first failing step aborts the run with a
//! structured error; there is no rollback, but the manifest is validated
//! before the old environment is destroyed so a missing requirements file
//! never costs the user a working setup.
//!
//! Activation is never needed: every in-environment step invokes the
//! environment's own interpreter directly.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::execution::CommandRunner;
use crate::interpreter::ResolvedInterpreter;
use crate::requirements::Manifest;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Record of one finished bootstrap step
#[derive(Debug, Clone)]
pub struct StepRecord {
    /// Step name (e.g. "create-venv")
    pub name: String,
    /// When the step started
    pub started: DateTime<Utc>,
    /// How long the step took
    pub duration: Duration,
}

/// Summary of a completed bootstrap run
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    /// The interpreter the environment was created with
    pub interpreter: ResolvedInterpreter,
    /// Absolute path to the environment's own interpreter
    pub venv_python: PathBuf,
    /// Number of packages listed in the manifest
    pub package_count: usize,
    /// Whether a previous environment was removed
    pub removed_previous: bool,
    /// Completed steps, in execution order
    pub steps: Vec<StepRecord>,
}

impl BootstrapReport {
    /// Total wall-clock time across all steps
    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }
}

/// Environment bootstrapper
pub struct Bootstrapper<'a> {
    config: &'a Config,
    runner: &'a dyn CommandRunner,
    /// Project root the venv and requirements paths are resolved against
    project_root: PathBuf,
}

impl<'a> Bootstrapper<'a> {
    /// Create a bootstrapper rooted at the given project directory
    pub fn new(config: &'a Config, runner: &'a dyn CommandRunner, project_root: PathBuf) -> Self {
        Self {
            config,
            runner,
            project_root,
        }
    }

    /// Absolute path of the virtual-environment directory
    pub fn venv_path(&self) -> PathBuf {
        self.project_root.join(&self.config.environment.venv_dir)
    }

    /// Absolute path of the requirements manifest
    pub fn requirements_path(&self) -> PathBuf {
        self.project_root.join(&self.config.environment.requirements)
    }

    /// Path of the interpreter inside the environment
    pub fn venv_python(&self) -> PathBuf {
        #[cfg(windows)]
        {
            self.venv_path().join("Scripts").join("python.exe")
        }
        #[cfg(not(windows))]
        {
            self.venv_path().join("bin").join("python")
        }
    }

    /// Run the full bootstrap sequence
    pub fn run(&self, interpreter: &ResolvedInterpreter) -> Result<BootstrapReport> {
        let mut steps = Vec::new();

        // Fail fast on a broken manifest while the old environment still works
        let manifest = self.timed("read-manifest", &mut steps, || {
            Manifest::load(&self.requirements_path())
        })?;
        if manifest.is_empty() {
            warn!(
                "Requirements file '{}' lists no packages",
                self.requirements_path().display()
            );
        }

        let removed_previous = self.timed("remove-existing", &mut steps, || {
            self.remove_existing()
        })?;

        self.timed("create-venv", &mut steps, || self.create_venv(interpreter))?;

        if self.config.install.upgrade_pip {
            self.timed("upgrade-pip", &mut steps, || self.upgrade_pip())?;
        }

        self.timed("install-requirements", &mut steps, || {
            self.install_requirements(&manifest)
        })?;

        let report = BootstrapReport {
            interpreter: interpreter.clone(),
            venv_python: self.venv_python(),
            package_count: manifest.package_count(),
            removed_previous,
            steps,
        };

        info!(
            "✅ Environment ready at {} ({} packages, {:.1}s)",
            self.venv_path().display(),
            report.package_count,
            report.total_duration().as_secs_f64()
        );
        Ok(report)
    }

    /// Delete any pre-existing environment directory
    ///
    /// Unconditional, no confirmation. Returns whether anything was removed.
    fn remove_existing(&self) -> Result<bool> {
        let venv = self.venv_path();
        if !venv.exists() {
            debug!("No existing environment at {}", venv.display());
            return Ok(false);
        }

        info!("Removing existing environment: {}", venv.display());
        fs::remove_dir_all(&venv).map_err(|e| Error::VenvRemovalFailed {
            path: venv.clone(),
            reason: e.to_string(),
        })?;
        Ok(true)
    }

    /// Create the virtual environment with the resolved interpreter
    fn create_venv(&self, interpreter: &ResolvedInterpreter) -> Result<()> {
        let venv = self.venv_path();
        info!(
            "Creating virtual environment with {} ({})",
            interpreter.path.display(),
            interpreter.source
        );

        let venv_arg = venv.display().to_string();
        self.runner.stream(
            &interpreter.path,
            &["-m", "venv", &venv_arg],
            &self.project_root,
        )
    }

    /// Upgrade pip inside the fresh environment
    fn upgrade_pip(&self) -> Result<()> {
        info!("Upgrading pip");
        self.runner.stream(
            &self.venv_python(),
            &["-m", "pip", "install", "--upgrade", "pip"],
            &self.project_root,
        )
    }

    /// Install the requirements manifest into the environment
    fn install_requirements(&self, manifest: &Manifest) -> Result<()> {
        info!(
            "Installing {} packages from {}",
            manifest.package_count(),
            manifest.path.display()
        );

        let requirements_arg = manifest.path.display().to_string();
        let mut args: Vec<&str> = vec!["-m", "pip", "install", "-r", &requirements_arg];
        for extra in &self.config.install.extra_pip_args {
            args.push(extra);
        }

        self.runner
            .stream(&self.venv_python(), &args, &self.project_root)
    }

    /// Run a step closure, appending its timing record on success
    fn timed<T, F>(&self, name: &str, steps: &mut Vec<StepRecord>, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let started = Utc::now();
        let clock = Instant::now();
        debug!("Step '{}' started", name);

        let value = f()?;
        let duration = clock.elapsed();
        debug!("Step '{}' finished in {:?}", name, duration);

        steps.push(StepRecord {
            name: name.to_string(),
            started,
            duration,
        });
        Ok(value)
    }
}
