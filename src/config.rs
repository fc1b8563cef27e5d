//! Configuration System
//!
//! Layered configuration for the sandbox root, link maintenance defaults and
//! logging. Sources, lowest to highest precedence: built-in defaults, the
//! global config file, the workspace `linkfs.toml`, `LINKFS_*` environment
//! variables. Command-line flags are applied on top by the binary.

use crate::fs::LinkPolicy;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use merge::merge_policy::ENV_PREFIX;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkfsConfig {
    /// Sandbox root; relative paths are taken from the workspace directory
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Link maintenance defaults
    #[serde(default)]
    pub links: LinksConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Link maintenance defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Directory scanned by `list`, `check`, `update` and `include`
    #[serde(default = "default_from_dir")]
    pub from_dir: String,

    /// Destination directory for `include`; empty materializes next to each link
    #[serde(default)]
    pub to_dir: String,

    /// How `cat` treats link files
    #[serde(default)]
    pub policy: LinkPolicy,
}

fn default_from_dir() -> String {
    ".".to_string()
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            from_dir: default_from_dir(),
            to_dir: String::new(),
            policy: LinkPolicy::default(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Links(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Links(msg) => write!(f, "links: {}", msg),
            ValidationError::Logging(msg) => write!(f, "logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Serializes tests that read or write process environment during config loading
#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

impl LinkfsConfig {
    /// Validate the entire configuration, collecting every problem
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.links.from_dir.trim().is_empty() {
            errors.push(ValidationError::Links("from_dir cannot be empty".to_string()));
        }
        for (name, dir) in [("from_dir", &self.links.from_dir), ("to_dir", &self.links.to_dir)] {
            if Path::new(dir).is_absolute() {
                errors.push(ValidationError::Links(format!(
                    "{} must be relative to the sandbox root: {}",
                    name, dir
                )));
            }
        }

        if !matches!(self.logging.format.as_str(), "json" | "text") {
            errors.push(ValidationError::Logging(format!(
                "invalid format '{}' (must be 'json' or 'text')",
                self.logging.format
            )));
        }
        if !matches!(self.logging.output.as_str(), "stdout" | "stderr" | "file") {
            errors.push(ValidationError::Logging(format!(
                "invalid output '{}' (must be 'stdout', 'stderr' or 'file')",
                self.logging.output
            )));
        }
        if self.logging.output == "file" && self.logging.file.is_none() {
            errors.push(ValidationError::Logging(
                "output 'file' requires a file path".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Sandbox root for a workspace: the configured root resolved against
    /// `workspace_root`, or `workspace_root` itself
    pub fn resolve_root(&self, workspace_root: &Path) -> PathBuf {
        match &self.root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => workspace_root.join(root),
            None => workspace_root.to_path_buf(),
        }
    }
}
