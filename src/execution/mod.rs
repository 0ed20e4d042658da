//! External command execution
//!
//! Bootstrapping is a linear sequence of external commands (interpreter
//! probing, `python -m venv`, `pip install`), each of which blocks until it
//! finishes. This module provides a small runner seam so the bootstrap steps
//! can be exercised against a recording double in tests.

use crate::error::{Error, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Captured result of a finished command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Exit code, if the process exited normally
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    /// Whether the command exited with code 0
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Seam for running external commands
///
/// `run` captures output for programmatic use; `stream` inherits the parent's
/// stdio so long-running installer output stays visible to the user.
pub trait CommandRunner {
    /// Run a command and capture its output
    fn run(&self, program: &Path, args: &[&str], cwd: &Path) -> Result<CommandOutput>;

    /// Run a command with inherited stdio, returning once it finishes
    fn stream(&self, program: &Path, args: &[&str], cwd: &Path) -> Result<()>;
}

/// Runner backed by `std::process::Command`
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        let rendered = render_command(program, args);
        debug!("Running: {}", rendered);

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| Error::CommandSpawnFailed {
                command: rendered.clone(),
                reason: e.to_string(),
            })?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        };

        if !result.success() {
            return Err(Error::CommandFailed {
                command: rendered,
                exit_code: result.exit_code,
                stderr: result.stderr,
            });
        }

        Ok(result)
    }

    fn stream(&self, program: &Path, args: &[&str], cwd: &Path) -> Result<()> {
        let rendered = render_command(program, args);
        debug!("Running (streaming): {}", rendered);

        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::CommandSpawnFailed {
                command: rendered.clone(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(Error::CommandFailed {
                command: rendered,
                exit_code: status.code(),
                stderr: String::new(),
            });
        }

        Ok(())
    }
}

/// Render a command line for diagnostics
pub fn render_command(program: &Path, args: &[&str]) -> String {
    let mut rendered = program.display().to_string();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(arg);
    }
    rendered
}
