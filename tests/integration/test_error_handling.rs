//! Integration tests for error propagation through the bootstrap sequence
//!
//! Each failing step must abort the run with a structured error and must not
//! execute any later step.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use venvup::bootstrap::Bootstrapper;
use venvup::config::Config;
use venvup::error::{Error, Result};
use venvup::execution::{render_command, CommandOutput, CommandRunner, SystemRunner};
use venvup::interpreter::{InterpreterSource, ResolvedInterpreter};

/// Runner double that fails any command containing the given fragment
struct FailingRunner {
    fail_on: String,
    invocations: Mutex<Vec<String>>,
}

impl FailingRunner {
    fn new(fail_on: &str) -> Self {
        Self {
            fail_on: fail_on.to_string(),
            invocations: Mutex::new(Vec::new()),
        }
    }

    fn commands(&self) -> Vec<String> {
        self.invocations.lock().unwrap().clone()
    }

    fn check(&self, program: &Path, args: &[&str]) -> Result<()> {
        let rendered = render_command(program, args);
        self.invocations.lock().unwrap().push(rendered.clone());
        if rendered.contains(&self.fail_on) {
            return Err(Error::CommandFailed {
                command: rendered,
                exit_code: Some(1),
                stderr: "simulated failure".to_string(),
            });
        }
        Ok(())
    }
}

impl CommandRunner for FailingRunner {
    fn run(&self, program: &Path, args: &[&str], _cwd: &Path) -> Result<CommandOutput> {
        self.check(program, args)?;
        Ok(CommandOutput {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: Some(0),
        })
    }

    fn stream(&self, program: &Path, args: &[&str], _cwd: &Path) -> Result<()> {
        self.check(program, args)
    }
}

fn interpreter() -> ResolvedInterpreter {
    ResolvedInterpreter {
        path: PathBuf::from("/usr/bin/python3.10"),
        source: InterpreterSource::PathLookup,
        command_name: "python3.10".to_string(),
    }
}

fn project(requirements: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("requirements.txt"), requirements).unwrap();
    dir
}

#[test]
fn test_venv_creation_failure_stops_pipeline() {
    let dir = project("fastapi\n");
    let config = Config::default();
    let runner = FailingRunner::new("-m venv");
    let bootstrapper = Bootstrapper::new(&config, &runner, dir.path().to_path_buf());

    let result = bootstrapper.run(&interpreter());
    assert!(matches!(result, Err(Error::CommandFailed { .. })));
    assert_eq!(runner.commands().len(), 1);
}

#[test]
fn test_pip_upgrade_failure_stops_before_install() {
    let dir = project("fastapi\n");
    let config = Config::default();
    let runner = FailingRunner::new("--upgrade pip");
    let bootstrapper = Bootstrapper::new(&config, &runner, dir.path().to_path_buf());

    let result = bootstrapper.run(&interpreter());
    assert!(result.is_err());

    let commands = runner.commands();
    assert_eq!(commands.len(), 2);
    assert!(!commands.iter().any(|c| c.contains("install -r")));
}

#[test]
fn test_install_failure_is_reported_with_command() {
    let dir = project("fastapi\n");
    let config = Config::default();
    let runner = FailingRunner::new("install -r");
    let bootstrapper = Bootstrapper::new(&config, &runner, dir.path().to_path_buf());

    match bootstrapper.run(&interpreter()) {
        Err(Error::CommandFailed { command, exit_code, .. }) => {
            assert!(command.contains("install -r"));
            assert_eq!(exit_code, Some(1));
        }
        other => panic!("expected CommandFailed, got {:?}", other),
    }
}

#[test]
fn test_malformed_manifest_fails_before_removal() {
    let dir = project("=== not a requirement ===\n");
    let config = Config::default();

    // A previous environment exists and must survive the failed run
    let venv = dir.path().join("venv");
    fs::create_dir_all(&venv).unwrap();

    let runner = FailingRunner::new("never-matches");
    let bootstrapper = Bootstrapper::new(&config, &runner, dir.path().to_path_buf());

    let result = bootstrapper.run(&interpreter());
    assert!(matches!(
        result,
        Err(Error::RequirementsParseFailed { .. })
    ));
    assert!(venv.exists());
    assert!(runner.commands().is_empty());
}

#[test]
fn test_spawn_failure_surfaces_as_structured_error() {
    let dir = project("fastapi\n");
    let config = Config::default();
    let runner = SystemRunner::new();
    let bootstrapper = Bootstrapper::new(&config, &runner, dir.path().to_path_buf());

    // The interpreter path does not exist, so venv creation cannot spawn
    let missing = ResolvedInterpreter {
        path: PathBuf::from("/nonexistent/python3.10"),
        source: InterpreterSource::WellKnownPath,
        command_name: "python3.10".to_string(),
    };

    let result = bootstrapper.run(&missing);
    assert!(matches!(result, Err(Error::CommandSpawnFailed { .. })));
}

#[test]
fn test_error_display_is_informative() {
    let error = Error::CommandFailed {
        command: "/usr/bin/python3 -m venv venv".to_string(),
        exit_code: Some(2),
        stderr: "No module named venv".to_string(),
    };
    let text = error.to_string();
    assert!(text.contains("exit code 2"));
    assert!(text.contains("No module named venv"));

    let error = Error::InterpreterNotFound {
        searched: vec!["python3.10".to_string(), "python3".to_string()],
    };
    assert!(error.to_string().contains("python3.10"));
}
