//! Error types for link resolution, maintenance and the command layer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, verifying or materializing link files.
///
/// Every variant carries the path that caused it. Nothing here is retried.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("Malformed link file {path:?}: {reason}")]
    MalformedLink { path: PathBuf, reason: String },

    #[error("Could not read {included:?} referenced by link file {link:?}: {source}")]
    ReferenceUnavailable {
        link: PathBuf,
        included: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Linked file {path:?} is not up to date")]
    StaleLink { path: PathBuf },

    #[error("Linked files are not supported in this filesystem: {path:?}")]
    UnsupportedLink { path: PathBuf },

    #[error("Cannot update checksum of {path:?}: {missing} is empty")]
    IncompleteDescriptor { path: PathBuf, missing: &'static str },

    #[error("Failed to scan {path:?} for link files: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {from:?} to {to:?}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path {path:?} escapes the sandbox root")]
    OutsideSandbox { path: PathBuf },

    #[error("Not a link file (missing .link suffix): {path:?}")]
    NotALinkFile { path: PathBuf },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LinkError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LinkError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type LinkResult<T> = Result<T, LinkError>;

/// Errors surfaced by the command layer.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Link(#[from] LinkError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Logging setup failed: {0}")]
    LoggingError(String),

    #[error("Output error: {0}")]
    OutputError(String),

    #[error("{} link file(s) are not up to date: {}", .paths.len(), format_paths(.paths))]
    StaleLinks { paths: Vec<PathBuf> },
}

impl From<config::ConfigError> for CommandError {
    fn from(err: config::ConfigError) -> Self {
        CommandError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        CommandError::OutputError(err.to_string())
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
