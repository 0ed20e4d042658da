//! venvup - Bootstrap a clean Python virtual environment
//!
//! This binary wires configuration, interpreter resolution, and the
//! bootstrap step sequence into a linear CLI run.

use std::env;
use std::path::PathBuf;
use std::process;

use tracing::{debug, error, info, warn};

use venvup::bootstrap::Bootstrapper;
use venvup::config::loader::ConfigLoader;
use venvup::config::Config;
use venvup::error::{Error, Result};
use venvup::execution::SystemRunner;
use venvup::interpreter::{InterpreterResolver, ResolvedInterpreter};
use venvup::notice;

/// Application configuration
#[derive(Debug, Default)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Virtual-environment directory override
    venv_dir: Option<PathBuf>,
    /// Requirements file override
    requirements: Option<PathBuf>,
    /// Explicit interpreter override
    python: Option<PathBuf>,
    /// Skip the pip self-upgrade step
    no_upgrade_pip: bool,
    /// Enable debug mode
    debug: bool,
}

impl AppArgs {
    /// Parse command line arguments
    fn parse() -> Result<Self> {
        let args: Vec<String> = env::args().collect();
        let mut app_args = AppArgs::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    if i + 1 < args.len() {
                        app_args.config_path = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    } else {
                        return Err("Missing config file path".into());
                    }
                }
                "--venv-dir" => {
                    if i + 1 < args.len() {
                        app_args.venv_dir = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    } else {
                        return Err("Missing venv directory path".into());
                    }
                }
                "--requirements" | "-r" => {
                    if i + 1 < args.len() {
                        app_args.requirements = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    } else {
                        return Err("Missing requirements file path".into());
                    }
                }
                "--python" | "-p" => {
                    if i + 1 < args.len() {
                        app_args.python = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    } else {
                        return Err("Missing interpreter path".into());
                    }
                }
                "--no-upgrade-pip" => {
                    app_args.no_upgrade_pip = true;
                }
                "--debug" | "-d" => {
                    app_args.debug = true;
                }
                "--help" | "-h" => {
                    print_help();
                    process::exit(0);
                }
                "--version" | "-v" => {
                    println!("venvup v{}", env!("CARGO_PKG_VERSION"));
                    process::exit(0);
                }
                arg if arg.starts_with('-') => {
                    return Err(format!("Unknown option: {}", arg).into());
                }
                _ => {
                    warn!("Ignoring positional argument: {}", args[i]);
                }
            }
            i += 1;
        }

        Ok(app_args)
    }
}

/// Print help information
fn print_help() {
    println!("venvup - Bootstrap a clean Python virtual environment");
    println!();
    println!("USAGE:");
    println!("    venvup [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>        Path to configuration file");
    println!("        --venv-dir <PATH>      Virtual-environment directory (default: venv)");
    println!("    -r, --requirements <PATH>  Requirements file (default: requirements.txt)");
    println!("    -p, --python <PATH>        Use this interpreter instead of auto-detection");
    println!("        --no-upgrade-pip       Skip upgrading pip in the new environment");
    println!("    -d, --debug                Enable debug mode");
    println!("    -h, --help                 Print this help message");
    println!("    -v, --version              Print version information");
    println!();
    println!("CONFIGURATION:");
    println!("    venvup looks for configuration files in the following order:");
    println!("    1. Path specified with --config");
    println!("    2. $VENVUP_CONFIG");
    println!("    3. $XDG_CONFIG_HOME/venvup/config.toml");
    println!("    4. ~/.venvup.toml");
    println!("    5. ./venvup.toml");
    println!("    6. Built-in defaults");
    println!();
    println!("ENVIRONMENT:");
    println!("    VENVUP_CONFIG    Path to configuration file");
    println!("    VENVUP_DEBUG     Enable debug mode (1 or true)");
    println!("    RUST_LOG         Set logging level (error, warn, info, debug, trace)");
}

fn main() {
    // Parse command line arguments first
    let args = AppArgs::parse().unwrap_or_else(|e| {
        eprintln!("Failed to parse arguments: {}", e);
        print_help();
        process::exit(1);
    });

    // Initialize logging based on debug flag
    let log_level = if args.debug
        || env::var("VENVUP_DEBUG").map_or(false, |v| v == "1" || v.to_lowercase() == "true")
    {
        "debug"
    } else {
        "info"
    };

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from(env_filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("🚀 Starting venvup v{}", env!("CARGO_PKG_VERSION"));
    debug!("Debug mode enabled");

    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("{}", handle_error(&e));
        process::exit(1);
    }
}

/// Run the bootstrap pipeline end to end
fn run(args: &AppArgs) -> Result<()> {
    let config = load_configuration(args)?;
    let project_root = env::current_dir()?;

    // Advisory preflight; a missing manifest becomes a hard error later,
    // everything else is worth surfacing early
    let validation = venvup::validate_system(&config, &project_root);
    for issue in &validation.issues {
        warn!("Preflight: {}", issue);
    }

    let interpreter = resolve_interpreter(args, &config)?;
    info!(
        "🐍 Using interpreter: {} ({})",
        interpreter.path.display(),
        interpreter.source
    );

    let runner = SystemRunner::new();
    let bootstrapper = Bootstrapper::new(&config, &runner, project_root);
    let report = bootstrapper.run(&interpreter)?;

    // Completion notice only after every install step returned successfully
    println!();
    print!(
        "{}",
        notice::activation_hint(&config.environment.venv_dir)
    );
    if config.editor.show_instructions {
        println!();
        print!(
            "{}",
            notice::completion_notice(&report.venv_python, &config.editor)
        );
    }

    Ok(())
}

/// Load configuration from file or use defaults, then apply CLI overrides
fn load_configuration(args: &AppArgs) -> Result<Config> {
    info!("⚙️  Loading configuration...");

    let config_path = args
        .config_path
        .clone()
        .or_else(|| env::var("VENVUP_CONFIG").ok().map(PathBuf::from));

    let mut config = if let Some(path) = &config_path {
        debug!("Loading config from: {}", path.display());
        match ConfigLoader::load_from_file(path) {
            Ok(config) => {
                info!("✅ Configuration loaded from: {}", path.display());
                config
            }
            Err(e) => {
                // An explicitly requested config file must load
                return Err(e);
            }
        }
    } else {
        match ConfigLoader::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load configuration: {}. Using defaults", e);
                Config::default()
            }
        }
    };

    // Apply command-line overrides
    if let Some(venv_dir) = &args.venv_dir {
        debug!("Overriding venv directory: {}", venv_dir.display());
        config.environment.venv_dir = venv_dir.clone();
    }
    if let Some(requirements) = &args.requirements {
        debug!("Overriding requirements file: {}", requirements.display());
        config.environment.requirements = requirements.clone();
    }
    if args.no_upgrade_pip {
        config.install.upgrade_pip = false;
    }

    config
        .validate()
        .map_err(|e| Error::ConfigValidationFailed {
            field: "config".to_string(),
            reason: e.to_string(),
        })?;

    debug!("Configuration loaded successfully");
    Ok(config)
}

/// Resolve the interpreter, honoring an explicit `--python` override
fn resolve_interpreter(args: &AppArgs, config: &Config) -> Result<ResolvedInterpreter> {
    if let Some(python) = &args.python {
        debug!("Using explicit interpreter: {}", python.display());
        return ResolvedInterpreter::explicit(python.clone());
    }

    InterpreterResolver::from_config(&config.environment).resolve()
}

/// Map errors to user-facing text with remediation hints
fn handle_error(error: &Error) -> String {
    match error {
        Error::InterpreterNotFound { searched } => {
            format!(
                "Setup Error: No Python interpreter found (searched: {})\n\nTry:\n• Install Python 3.10 or 3.9\n• Ensure the interpreter is on your PATH\n• Pass an interpreter explicitly with --python",
                searched.join(", ")
            )
        }
        Error::InterpreterNotUsable { path, reason } => {
            format!(
                "Setup Error: Interpreter '{}' is not usable: {}\n\nTry:\n• Check the path passed to --python\n• Check file permissions",
                path.display(),
                reason
            )
        }
        Error::RequirementsNotFound { path } => {
            format!(
                "Setup Error: Requirements file '{}' not found\n\nTry:\n• Run venvup from the project root\n• Point at the manifest with --requirements",
                path.display()
            )
        }
        Error::CommandFailed { command, .. } => {
            format!(
                "Setup Error: {}\n\nTry:\n• Re-run with --debug for the full command log\n• Check network access if pip was downloading packages\n• Re-run venvup; the environment is rebuilt from scratch every time\n\nFailed command: {}",
                error, command
            )
        }
        Error::ConfigLoadFailed { path, reason } => {
            format!(
                "Configuration Error: Failed to load config from '{}': {}\n\nTry:\n• Check configuration file syntax\n• Ensure file permissions are correct\n• Remove the file to use built-in defaults",
                path.display(),
                reason
            )
        }
        Error::ConfigValidationFailed { field, reason } => {
            format!(
                "Configuration Error: Validation failed for '{}': {}\n\nTry:\n• Check configuration value\n• Remove the file to use built-in defaults",
                field, reason
            )
        }
        Error::Io(err) => {
            format!(
                "I/O Error: {}\n\nTry:\n• Check file permissions\n• Verify disk space",
                err
            )
        }
        _ => {
            format!(
                "Unexpected Error: {}\n\nPlease report this issue with debug logs enabled",
                error
            )
        }
    }
}
