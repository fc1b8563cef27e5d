//! Sandbox root
//!
//! All file access in this crate goes through a [`Sandbox`]: a canonical root
//! directory plus validation of every path handed to it. Paths are relative to
//! the root; absolute paths and `..` segments climbing above the root are
//! rejected lexically, then the deepest existing ancestor is canonicalized so
//! that symlinks pointing outside the root are rejected too.

pub mod path;

use crate::error::{LinkError, LinkResult};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;

/// A directory boundary within which all path resolution stays confined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    /// Open a sandbox rooted at `root`, which must be an existing directory
    pub fn new(root: impl AsRef<Path>) -> LinkResult<Self> {
        let root = root.as_ref();
        let canonical = path::canonicalize_path(root).map_err(|e| LinkError::io(root, e))?;
        if !canonical.is_dir() {
            return Err(LinkError::io(
                root,
                io::Error::new(io::ErrorKind::InvalidInput, "sandbox root is not a directory"),
            ));
        }
        Ok(Self { root: canonical })
    }

    /// Canonical root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lexically normalize a sandbox-relative path without touching the filesystem
    pub fn relative(&self, path: impl AsRef<Path>) -> LinkResult<PathBuf> {
        let path = path.as_ref();
        path::normalize_relative(path).ok_or_else(|| LinkError::OutsideSandbox {
            path: path.to_path_buf(),
        })
    }

    /// Resolve a sandbox-relative path to a canonical host path inside the root
    ///
    /// The path does not have to exist; its deepest existing ancestor is
    /// canonicalized and must remain under the root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> LinkResult<PathBuf> {
        let path = path.as_ref();
        let relative = self.relative(path)?;
        let full = self.root.join(&relative);
        let canonical =
            path::canonicalize_existing_prefix(&full).map_err(|e| LinkError::io(path, e))?;

        if !canonical.starts_with(&self.root) {
            return Err(LinkError::OutsideSandbox {
                path: path.to_path_buf(),
            });
        }
        trace!(path = %path.display(), resolved = %canonical.display(), "Resolved sandbox path");
        Ok(canonical)
    }

    /// Open an existing file for reading
    pub fn open(&self, path: impl AsRef<Path>) -> LinkResult<File> {
        let path = path.as_ref();
        let resolved = self.resolve(path)?;
        File::open(&resolved).map_err(|e| LinkError::io(path, e))
    }

    /// Read a whole file
    pub fn read(&self, path: impl AsRef<Path>) -> LinkResult<Vec<u8>> {
        let path = path.as_ref();
        let resolved = self.resolve(path)?;
        std::fs::read(&resolved).map_err(|e| LinkError::io(path, e))
    }

    /// Create a directory and all of its missing parents
    pub fn create_dir_all(&self, path: impl AsRef<Path>) -> LinkResult<()> {
        let path = path.as_ref();
        let resolved = self.resolve(path)?;
        std::fs::create_dir_all(&resolved).map_err(|e| LinkError::io(path, e))
    }
}
