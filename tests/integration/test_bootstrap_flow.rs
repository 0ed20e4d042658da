//! Integration tests for the bootstrap step sequence
//!
//! Runs the bootstrapper against a recording command runner so the exact
//! external commands and their order can be asserted without touching a real
//! Python installation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use venvup::bootstrap::Bootstrapper;
use venvup::config::Config;
use venvup::error::{Error, Result};
use venvup::execution::{render_command, CommandOutput, CommandRunner};
use venvup::interpreter::{InterpreterSource, ResolvedInterpreter};

/// Runner double recording every invocation in order
#[derive(Default)]
struct RecordingRunner {
    invocations: Mutex<Vec<String>>,
}

impl RecordingRunner {
    fn commands(&self) -> Vec<String> {
        self.invocations.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, program: &Path, args: &[&str], _cwd: &Path) -> Result<CommandOutput> {
        self.invocations
            .lock()
            .unwrap()
            .push(render_command(program, args));
        Ok(CommandOutput {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: Some(0),
        })
    }

    fn stream(&self, program: &Path, args: &[&str], _cwd: &Path) -> Result<()> {
        self.invocations
            .lock()
            .unwrap()
            .push(render_command(program, args));
        Ok(())
    }
}

fn interpreter_at(path: &str) -> ResolvedInterpreter {
    ResolvedInterpreter {
        path: PathBuf::from(path),
        source: InterpreterSource::WellKnownPath,
        command_name: "python3.10".to_string(),
    }
}

fn project(requirements: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("requirements.txt"), requirements).unwrap();
    dir
}

#[test]
fn test_full_sequence_in_order() {
    let dir = project("fastapi==0.110.0\nuvicorn[standard]\nrequests\n");
    let config = Config::default();
    let runner = RecordingRunner::default();
    let bootstrapper = Bootstrapper::new(&config, &runner, dir.path().to_path_buf());

    let report = bootstrapper
        .run(&interpreter_at("/usr/local/bin/python3.10"))
        .unwrap();

    let commands = runner.commands();
    assert_eq!(commands.len(), 3);

    // 1. venv creation with the resolved interpreter
    assert!(commands[0].starts_with("/usr/local/bin/python3.10 -m venv"));
    // 2. pip self-upgrade through the environment's own interpreter
    assert!(commands[1].contains("venv/bin/python") || commands[1].contains("python.exe"));
    assert!(commands[1].ends_with("-m pip install --upgrade pip"));
    // 3. requirements install last
    assert!(commands[2].contains("-m pip install -r"));
    assert!(commands[2].contains("requirements.txt"));

    assert_eq!(report.package_count, 3);
    assert_eq!(report.steps.len(), 5);
    assert_eq!(
        report
            .steps
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>(),
        vec![
            "read-manifest",
            "remove-existing",
            "create-venv",
            "upgrade-pip",
            "install-requirements"
        ]
    );
}

#[test]
fn test_rerun_removes_previous_environment() {
    let dir = project("fastapi\n");
    let config = Config::default();
    let runner = RecordingRunner::default();
    let bootstrapper = Bootstrapper::new(&config, &runner, dir.path().to_path_buf());

    // First run: nothing to remove
    let report = bootstrapper
        .run(&interpreter_at("/usr/bin/python3.9"))
        .unwrap();
    assert!(!report.removed_previous);

    // Simulate the venv the first run would have produced
    let venv = dir.path().join("venv");
    fs::create_dir_all(venv.join("bin")).unwrap();
    fs::write(venv.join("pyvenv.cfg"), "home = /usr\n").unwrap();

    // Second run deletes it before recreating
    let report = bootstrapper
        .run(&interpreter_at("/usr/bin/python3.9"))
        .unwrap();
    assert!(report.removed_previous);
    assert!(!venv.exists());
}

#[test]
fn test_custom_venv_dir_used_throughout() {
    let dir = project("fastapi\n");
    let mut config = Config::default();
    config.environment.venv_dir = PathBuf::from(".venv");

    let runner = RecordingRunner::default();
    let bootstrapper = Bootstrapper::new(&config, &runner, dir.path().to_path_buf());
    let report = bootstrapper
        .run(&interpreter_at("/usr/bin/python3.10"))
        .unwrap();

    let commands = runner.commands();
    assert!(commands[0].contains(".venv"));
    assert!(report.venv_python.to_string_lossy().contains(".venv"));
}

#[test]
fn test_report_total_duration_sums_steps() {
    let dir = project("fastapi\n");
    let config = Config::default();
    let runner = RecordingRunner::default();
    let bootstrapper = Bootstrapper::new(&config, &runner, dir.path().to_path_buf());

    let report = bootstrapper
        .run(&interpreter_at("/usr/bin/python3.10"))
        .unwrap();
    let summed: std::time::Duration = report.steps.iter().map(|s| s.duration).sum();
    assert_eq!(report.total_duration(), summed);
}

#[test]
fn test_empty_manifest_still_runs() {
    let dir = project("# nothing pinned yet\n");
    let config = Config::default();
    let runner = RecordingRunner::default();
    let bootstrapper = Bootstrapper::new(&config, &runner, dir.path().to_path_buf());

    let report = bootstrapper
        .run(&interpreter_at("/usr/bin/python3.10"))
        .unwrap();
    assert_eq!(report.package_count, 0);
    // The environment is still created and pip still runs
    assert_eq!(runner.commands().len(), 3);
}

#[test]
fn test_missing_manifest_aborts_before_any_command() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let runner = RecordingRunner::default();
    let bootstrapper = Bootstrapper::new(&config, &runner, dir.path().to_path_buf());

    let result = bootstrapper.run(&interpreter_at("/usr/bin/python3.10"));
    assert!(matches!(result, Err(Error::RequirementsNotFound { .. })));
    assert!(runner.commands().is_empty());
}
