//! Requirements manifest parsing
//!
//! Reads the pip requirements file before the old environment is destroyed,
//! so a missing or unreadable manifest aborts the run while the previous
//! environment is still intact. Parsing is deliberately shallow: pip remains
//! the authority on requirement syntax, this module only classifies lines
//! well enough to count packages and report obviously broken specifiers.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// PEP 508-ish package specifier: name, optional extras, optional constraint
static REQUIREMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<name>[A-Za-z0-9][A-Za-z0-9._-]*)(?P<extras>\[[A-Za-z0-9._,\s-]+\])?\s*(?P<constraint>[=<>!~].*)?$",
    )
    .expect("requirement regex is valid")
});

/// A single meaningful line of the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestLine {
    /// A package requirement (e.g. `fastapi==0.110.0`)
    Requirement(Requirement),
    /// A pip option line passed through verbatim (e.g. `-e .`, `--index-url`)
    Option(String),
}

/// A parsed package requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Package name as written
    pub name: String,
    /// Optional extras, without brackets (e.g. `standard` from `uvicorn[standard]`)
    pub extras: Option<String>,
    /// Version constraint, if any (e.g. `==0.110.0`)
    pub constraint: Option<String>,
    /// The raw line as pip will see it
    pub raw: String,
}

/// Parsed requirements manifest
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Path the manifest was loaded from
    pub path: PathBuf,
    /// Meaningful lines, in file order
    pub lines: Vec<ManifestLine>,
}

impl Manifest {
    /// Load and parse a requirements file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::RequirementsNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        Self::parse(path, &content)
    }

    /// Parse manifest content (split out for tests)
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let mut lines = Vec::new();

        for (index, raw_line) in content.lines().enumerate() {
            let line = strip_comment(raw_line).trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with('-') {
                // pip options (-r, -e, --index-url, ...) are pip's problem
                lines.push(ManifestLine::Option(line.to_string()));
                continue;
            }

            if line.contains("://") || line.contains('/') {
                // URL and path requirements are passed through verbatim
                lines.push(ManifestLine::Option(line.to_string()));
                continue;
            }

            match REQUIREMENT_RE.captures(line) {
                Some(caps) => {
                    lines.push(ManifestLine::Requirement(Requirement {
                        name: caps["name"].to_string(),
                        extras: caps.name("extras").map(|m| {
                            m.as_str()
                                .trim_start_matches('[')
                                .trim_end_matches(']')
                                .to_string()
                        }),
                        constraint: caps
                            .name("constraint")
                            .map(|m| m.as_str().trim().to_string()),
                        raw: line.to_string(),
                    }));
                }
                None => {
                    return Err(Error::RequirementsParseFailed {
                        path: path.to_path_buf(),
                        line: index + 1,
                        reason: format!("unrecognized requirement '{}'", line),
                    })
                }
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            lines,
        })
    }

    /// Number of package requirements (option lines excluded)
    pub fn package_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, ManifestLine::Requirement(_)))
            .count()
    }

    /// Iterate over package requirements
    pub fn requirements(&self) -> impl Iterator<Item = &Requirement> {
        self.lines.iter().filter_map(|l| match l {
            ManifestLine::Requirement(req) => Some(req),
            ManifestLine::Option(_) => None,
        })
    }

    /// Whether the manifest contains anything for pip to do
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Strip a trailing `#` comment, keeping `#` characters inside extras intact
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(0) => "",
        Some(pos) => {
            // pip treats " #" as a comment start mid-line
            let before = &line[..pos];
            if before.ends_with(char::is_whitespace) {
                before
            } else {
                line
            }
        }
        None => line,
    }
}
