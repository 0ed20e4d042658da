//! Python interpreter resolution
//!
//! Locates a usable Python interpreter for environment creation. Resolution
//! prefers a fixed well-known 3.10 install path, then probes PATH for the
//! preferred versions in order, and finally falls back to the generic
//! `python3` name with a warning (a newer unsupported interpreter may break
//! dependency installation).
//!
//! The resolver deliberately does NOT verify the version the resolved binary
//! actually reports; the chosen candidate is trusted as-is.

use crate::config::EnvironmentConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// How the interpreter was located
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpreterSource {
    /// Found at the fixed well-known install path
    WellKnownPath,
    /// Found by probing PATH for a preferred versioned name
    PathLookup,
    /// Generic `python3` fallback; version is unknown
    GenericFallback,
    /// Supplied explicitly by the user (e.g. `--python`)
    Explicit,
}

impl fmt::Display for InterpreterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpreterSource::WellKnownPath => write!(f, "well-known install path"),
            InterpreterSource::PathLookup => write!(f, "PATH lookup"),
            InterpreterSource::GenericFallback => write!(f, "generic fallback"),
            InterpreterSource::Explicit => write!(f, "explicit override"),
        }
    }
}

/// A resolved Python interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInterpreter {
    /// Absolute path to the interpreter executable
    pub path: PathBuf,
    /// How the interpreter was located
    pub source: InterpreterSource,
    /// The command name the candidate was resolved from
    pub command_name: String,
}

impl ResolvedInterpreter {
    /// Build an explicit interpreter from a user-supplied path
    pub fn explicit(path: PathBuf) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::InterpreterNotUsable {
                path,
                reason: "file does not exist".to_string(),
            });
        }
        if !is_executable(&path) {
            return Err(Error::InterpreterNotUsable {
                path,
                reason: "file is not executable".to_string(),
            });
        }

        let command_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("python")
            .to_string();

        Ok(Self {
            path,
            source: InterpreterSource::Explicit,
            command_name,
        })
    }

    /// Whether the choice came from the unversioned fallback
    pub fn is_fallback(&self) -> bool {
        self.source == InterpreterSource::GenericFallback
    }
}

/// Interpreter resolver configured with candidate locations
pub struct InterpreterResolver {
    /// Fixed install path checked first
    well_known: PathBuf,
    /// Versioned command names probed on PATH, in preference order
    preferred_commands: Vec<String>,
    /// Generic command name used as a last resort
    fallback: String,
}

impl InterpreterResolver {
    /// Create a resolver from the environment configuration
    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Self {
            well_known: config.well_known_interpreter.clone(),
            preferred_commands: config.preferred_commands(),
            fallback: config.fallback_interpreter.clone(),
        }
    }

    /// Create a resolver from explicit candidates (used by tests)
    pub fn new(well_known: PathBuf, preferred_commands: Vec<String>, fallback: String) -> Self {
        Self {
            well_known,
            preferred_commands,
            fallback,
        }
    }

    /// Resolve an interpreter using the process PATH
    pub fn resolve(&self) -> Result<ResolvedInterpreter> {
        let path_var = env::var("PATH").unwrap_or_default();
        self.resolve_with_path(&path_var)
    }

    /// Resolve an interpreter against an explicit PATH string
    pub fn resolve_with_path(&self, path_var: &str) -> Result<ResolvedInterpreter> {
        // (a) Fixed well-known install path wins over any PATH candidate
        if self.well_known.is_file() && is_executable(&self.well_known) {
            debug!(
                "Interpreter found at well-known path: {}",
                self.well_known.display()
            );
            let command_name = self
                .well_known
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("python")
                .to_string();
            return Ok(ResolvedInterpreter {
                path: self.well_known.clone(),
                source: InterpreterSource::WellKnownPath,
                command_name,
            });
        }

        // (b)/(c) Preferred versioned names, probed on PATH in order
        for command in &self.preferred_commands {
            if let Some(path) = find_in_path(command, path_var) {
                debug!("Interpreter '{}' found on PATH: {}", command, path.display());
                return Ok(ResolvedInterpreter {
                    path,
                    source: InterpreterSource::PathLookup,
                    command_name: command.clone(),
                });
            }
        }

        // (d) Generic fallback; the version is whatever the host provides
        if let Some(path) = find_in_path(&self.fallback, path_var) {
            warn!(
                "No {} interpreter found; falling back to '{}' ({}). \
                 Dependency installation may fail if this is an unsupported newer version",
                self.preferred_commands.join("/"),
                self.fallback,
                path.display()
            );
            return Ok(ResolvedInterpreter {
                path,
                source: InterpreterSource::GenericFallback,
                command_name: self.fallback.clone(),
            });
        }

        let mut searched = vec![self.well_known.display().to_string()];
        searched.extend(self.preferred_commands.iter().cloned());
        searched.push(self.fallback.clone());
        Err(Error::InterpreterNotFound { searched })
    }
}

/// Find an executable by name in a PATH-style string
pub fn find_in_path(name: &str, path_var: &str) -> Option<PathBuf> {
    for dir in env::split_paths(path_var) {
        if dir.as_os_str().is_empty() {
            continue;
        }

        let candidate = dir.join(name);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }

        #[cfg(windows)]
        {
            let exe = dir.join(format!("{}.exe", name));
            if exe.is_file() {
                return Some(exe);
            }
        }
    }

    None
}

/// Check whether a path points at an executable file
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}
