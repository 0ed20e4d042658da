//! venvup - Bootstrap a clean Python virtual environment
//!
//! This library provides the core functionality for venvup, a small CLI that
//! automates local development-environment setup for a Python backend.
//!
//! ## What it does
//!
//! - **Interpreter resolution:** Prefers a well-known Python 3.10 install
//!   path, then `python3.10`/`python3.9` on PATH, then generic `python3`
//!   with a warning
//! - **Clean environments:** Any pre-existing environment directory is
//!   removed unconditionally before a fresh one is created
//! - **Dependency install:** Upgrades pip inside the new environment, then
//!   installs the requirements manifest
//! - **Editor follow-up:** Prints manual interpreter-selection instructions
//!   once installation has succeeded
//! - **Configuration:** TOML/JSON configuration files with sensible defaults
//!
//! ## Module Organization
//!
//! - [`config`] - Configuration loading and validation
//! - [`interpreter`] - Python interpreter resolution
//! - [`bootstrap`] - Environment creation and dependency installation
//! - [`requirements`] - Requirements manifest parsing
//! - [`execution`] - External command execution seam
//! - [`notice`] - Post-setup follow-up text
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use venvup::bootstrap::Bootstrapper;
//! use venvup::config::Config;
//! use venvup::execution::SystemRunner;
//! use venvup::interpreter::InterpreterResolver;
//!
//! # fn main() -> venvup::Result<()> {
//! let config = Config::default();
//! let interpreter = InterpreterResolver::from_config(&config.environment).resolve()?;
//!
//! let runner = SystemRunner::new();
//! let root = std::env::current_dir()?;
//! let report = Bootstrapper::new(&config, &runner, root).run(&interpreter)?;
//! println!("installed {} packages", report.package_count);
//! # Ok(())
//! # }
//! ```
//!
//! ## Execution model
//!
//! Everything is single-threaded, sequential, and blocking: each step waits
//! for the previous external command to finish. The first failing step aborts
//! the run with a structured error; the requirements manifest is validated
//! before the old environment is deleted, so a broken manifest never destroys
//! a working setup.

#![allow(unexpected_cfgs)]

#[macro_use]
extern crate tracing;

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod execution;
pub mod interpreter;
pub mod notice;
pub mod requirements;

// Re-exports for core functionality
pub use config::Config;
pub use error::{Error, Result};

// Version information
/// The current version of venvup from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The application description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Validate system requirements before bootstrapping
///
/// Checks the ambient environment for conditions that will make a bootstrap
/// run fail or behave oddly. Issues are advisory; the caller decides whether
/// to proceed.
pub fn validate_system(config: &Config, project_root: &std::path::Path) -> SystemValidation {
    info!("🔍 Validating system requirements...");

    let mut issues = Vec::new();

    if std::env::var("HOME").is_err() {
        issues.push(ValidationIssue::MissingEnvironment("HOME".to_string()));
    }

    if !project_root.is_dir() {
        issues.push(ValidationIssue::MissingProjectRoot(
            project_root.to_path_buf(),
        ));
    }

    let requirements = project_root.join(&config.environment.requirements);
    if !requirements.is_file() {
        issues.push(ValidationIssue::MissingRequirements(requirements));
    }

    let is_valid = issues.is_empty();
    if is_valid {
        info!("✅ System validation passed");
    } else {
        warn!("⚠️  System validation found {} issues", issues.len());
    }

    SystemValidation { is_valid, issues }
}

/// System validation result
#[derive(Debug, Clone)]
pub struct SystemValidation {
    /// Whether the system meets all requirements
    pub is_valid: bool,
    /// List of validation issues found (empty if `is_valid` is true)
    pub issues: Vec<ValidationIssue>,
}

/// Validation issues that can be found before bootstrapping
#[derive(Debug, Clone)]
pub enum ValidationIssue {
    /// A required environment variable is not set
    MissingEnvironment(String),
    /// The project root directory does not exist
    MissingProjectRoot(std::path::PathBuf),
    /// The requirements manifest is missing
    MissingRequirements(std::path::PathBuf),
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::MissingEnvironment(var) => {
                write!(f, "environment variable '{}' is not set", var)
            }
            ValidationIssue::MissingProjectRoot(path) => {
                write!(f, "project root '{}' does not exist", path.display())
            }
            ValidationIssue::MissingRequirements(path) => {
                write!(f, "requirements file '{}' does not exist", path.display())
            }
        }
    }
}
