//! Error types and Result aliases for venvup

use std::fmt;
use std::path::PathBuf;

/// Result type alias for venvup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for venvup
#[derive(Debug)]
pub enum Error {
    // === Interpreter resolution errors ===
    /// No Python interpreter could be resolved at all
    InterpreterNotFound {
        searched: Vec<String>,
    },

    /// Explicitly requested interpreter does not exist or is not executable
    InterpreterNotUsable {
        path: PathBuf,
        reason: String,
    },

    // === Process execution errors ===
    /// Failed to spawn an external command
    CommandSpawnFailed {
        command: String,
        reason: String,
    },

    /// External command ran but reported failure
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    // === Environment errors ===
    /// Failed to delete a pre-existing virtual environment directory
    VenvRemovalFailed {
        path: PathBuf,
        reason: String,
    },

    // === Requirements manifest errors ===
    /// Requirements file does not exist
    RequirementsNotFound {
        path: PathBuf,
    },

    /// A line in the requirements file could not be parsed
    RequirementsParseFailed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Configuration file not found
    ConfigNotFound,

    /// Configuration validation failed
    ConfigValidationFailed {
        field: String,
        reason: String,
    },

    /// Failed to serialize configuration
    ConfigSerializationFailed {
        format: String,
        reason: String,
    },

    /// Failed to parse configuration
    ConfigParseFailed {
        format: String,
        reason: String,
    },

    // === I/O and serialization errors (kept for compatibility) ===
    /// I/O errors
    Io(std::io::Error),

    /// Serialization errors
    Serde(serde_json::Error),

    /// TOML parsing errors
    Toml(toml::de::Error),

    /// Regex compilation errors
    Regex(regex::Error),

    // === Generic fallback (use sparingly) ===
    /// Generic errors (for cases not yet categorized)
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Interpreter errors
            Error::InterpreterNotFound { searched } => {
                write!(
                    f,
                    "No Python interpreter found (searched: {})",
                    searched.join(", ")
                )
            }
            Error::InterpreterNotUsable { path, reason } => {
                write!(
                    f,
                    "Interpreter '{}' is not usable: {}",
                    path.display(),
                    reason
                )
            }

            // Process errors
            Error::CommandSpawnFailed { command, reason } => {
                write!(f, "Failed to spawn command '{}': {}", command, reason)
            }
            Error::CommandFailed {
                command,
                exit_code,
                stderr,
            } => match exit_code {
                Some(code) => {
                    if stderr.trim().is_empty() {
                        write!(f, "Command '{}' failed with exit code {}", command, code)
                    } else {
                        write!(
                            f,
                            "Command '{}' failed with exit code {}: {}",
                            command,
                            code,
                            stderr.trim()
                        )
                    }
                }
                None => write!(f, "Command '{}' was terminated by a signal", command),
            },

            // Environment errors
            Error::VenvRemovalFailed { path, reason } => {
                write!(
                    f,
                    "Failed to remove existing environment '{}': {}",
                    path.display(),
                    reason
                )
            }

            // Requirements errors
            Error::RequirementsNotFound { path } => {
                write!(f, "Requirements file '{}' not found", path.display())
            }
            Error::RequirementsParseFailed { path, line, reason } => {
                write!(
                    f,
                    "Failed to parse '{}' at line {}: {}",
                    path.display(),
                    line,
                    reason
                )
            }

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigNotFound => {
                write!(f, "Configuration file not found")
            }
            Error::ConfigValidationFailed { field, reason } => {
                write!(f, "Configuration validation failed for '{}': {}", field, reason)
            }
            Error::ConfigSerializationFailed { format, reason } => {
                write!(f, "Failed to serialize config as {}: {}", format, reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
            Error::Toml(err) => write!(f, "TOML parsing error: {}", err),
            Error::Regex(err) => write!(f, "Regex compilation error: {}", err),

            // Generic fallback
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Regex(err)
    }
}

impl From<Box<dyn std::error::Error>> for Error {
    fn from(err: Box<dyn std::error::Error>) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}
