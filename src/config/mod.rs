//! Configuration management for venvup
//!
//! This module provides configuration management for venvup, including
//! loading/saving configuration files and validation of the settings that
//! drive environment bootstrapping.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for venvup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Virtual-environment configuration
    pub environment: EnvironmentConfig,

    /// Package installation configuration
    pub install: InstallConfig,

    /// Editor follow-up configuration
    pub editor: EditorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: EnvironmentConfig::default(),
            install: InstallConfig::default(),
            editor: EditorConfig::default(),
        }
    }
}

impl Config {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.environment.validate()?;
        self.install.validate()?;
        Ok(())
    }
}

/// Virtual-environment related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Directory the virtual environment is created in, relative to the
    /// project root
    pub venv_dir: PathBuf,

    /// Requirements manifest, relative to the project root
    pub requirements: PathBuf,

    /// Fixed install path checked before any PATH lookup
    pub well_known_interpreter: PathBuf,

    /// Interpreter versions probed on PATH, in preference order
    pub preferred_versions: Vec<String>,

    /// Generic interpreter name used when no preferred version is found
    pub fallback_interpreter: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            venv_dir: PathBuf::from("venv"),
            requirements: PathBuf::from("requirements.txt"),
            well_known_interpreter: PathBuf::from("/usr/local/bin/python3.10"),
            preferred_versions: vec!["3.10".to_string(), "3.9".to_string()],
            fallback_interpreter: "python3".to_string(),
        }
    }
}

impl EnvironmentConfig {
    /// Validate the environment configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.venv_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyVenvDir);
        }
        if self.venv_dir.is_absolute() {
            return Err(ConfigError::AbsoluteVenvDir(self.venv_dir.clone()));
        }
        if self.requirements.as_os_str().is_empty() {
            return Err(ConfigError::EmptyRequirementsPath);
        }
        if self.preferred_versions.is_empty() {
            return Err(ConfigError::NoPreferredVersions);
        }
        for version in &self.preferred_versions {
            if !is_version_string(version) {
                return Err(ConfigError::InvalidVersion(version.clone()));
            }
        }
        if self.fallback_interpreter.trim().is_empty() {
            return Err(ConfigError::EmptyFallbackInterpreter);
        }
        Ok(())
    }

    /// Interpreter command names probed on PATH, in preference order
    pub fn preferred_commands(&self) -> Vec<String> {
        self.preferred_versions
            .iter()
            .map(|v| format!("python{}", v))
            .collect()
    }
}

/// Package installation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Upgrade pip inside the fresh environment before installing packages
    pub upgrade_pip: bool,

    /// Additional arguments appended to every `pip install` invocation
    pub extra_pip_args: Vec<String>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            upgrade_pip: true,
            extra_pip_args: Vec::new(),
        }
    }
}

impl InstallConfig {
    /// Validate the install configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for arg in &self.extra_pip_args {
            if arg.trim().is_empty() {
                return Err(ConfigError::EmptyPipArg);
            }
        }
        Ok(())
    }
}

/// Editor follow-up configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Print manual interpreter-selection instructions after a successful run
    pub show_instructions: bool,

    /// Editor name used in the instructions
    pub name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            show_instructions: true,
            name: "VS Code".to_string(),
        }
    }
}

/// Check a "major.minor" version string such as "3.10"
fn is_version_string(version: &str) -> bool {
    let mut parts = version.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(major), Some(minor), None) => {
            !major.is_empty()
                && !minor.is_empty()
                && major.chars().all(|c| c.is_ascii_digit())
                && minor.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("venv_dir must not be empty")]
    EmptyVenvDir,

    #[error("venv_dir must be relative to the project root: {0}")]
    AbsoluteVenvDir(PathBuf),

    #[error("requirements path must not be empty")]
    EmptyRequirementsPath,

    #[error("preferred_versions must list at least one version")]
    NoPreferredVersions,

    #[error("Invalid interpreter version '{0}' (expected major.minor, e.g. 3.10)")]
    InvalidVersion(String),

    #[error("fallback_interpreter must not be empty")]
    EmptyFallbackInterpreter,

    #[error("extra_pip_args must not contain empty arguments")]
    EmptyPipArg,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
