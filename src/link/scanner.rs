//! Link scanner: discovers every link file under a directory of the sandbox

use crate::error::{LinkError, LinkResult};
use crate::link::{is_link_file, Link};
use crate::sandbox::Sandbox;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use walkdir::WalkDir;

/// Walks a sandbox subtree and parses every link file found
///
/// Symlinks are not followed during traversal, so the walk never leaves the
/// start directory; link files reached through symlinks are still confined by
/// the sandbox when they are parsed.
pub struct LinkScanner<'a> {
    sandbox: &'a Sandbox,
}

impl<'a> LinkScanner<'a> {
    pub fn new(sandbox: &'a Sandbox) -> Self {
        Self { sandbox }
    }

    /// Sandbox-relative paths of all link files under `from_dir`, sorted
    pub fn find(&self, from_dir: impl AsRef<Path>) -> LinkResult<Vec<PathBuf>> {
        let from_dir = from_dir.as_ref();
        let start = match self.sandbox.resolve(from_dir) {
            Ok(start) => start,
            Err(LinkError::Io { path, source }) => return Err(LinkError::Scan { path, source }),
            Err(e) => return Err(e),
        };

        let mut link_files = Vec::new();
        for entry in WalkDir::new(&start).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| self.scan_error(&start, e))?;
            if entry.file_type().is_dir() || !is_link_file(entry.path()) {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(self.sandbox.root())
                .map_err(|_| LinkError::OutsideSandbox {
                    path: entry.path().to_path_buf(),
                })?;
            link_files.push(relative.to_path_buf());
        }

        Ok(link_files)
    }

    /// Parse every link file under `from_dir`
    ///
    /// All-or-nothing: the first walk or parse failure discards what was found.
    #[instrument(skip_all, fields(from_dir = %from_dir.as_ref().display()))]
    pub fn scan(&self, from_dir: impl AsRef<Path>) -> LinkResult<Vec<Link>> {
        let link_files = self.find(from_dir.as_ref())?;
        debug!(count = link_files.len(), "Found link files");

        link_files
            .iter()
            .map(|link_file| Link::parse(self.sandbox, link_file))
            .collect()
    }

    fn scan_error(&self, start: &Path, err: walkdir::Error) -> LinkError {
        let failed = err.path().unwrap_or(start).to_path_buf();
        let path = failed
            .strip_prefix(self.sandbox.root())
            .map(Path::to_path_buf)
            .unwrap_or(failed);
        let source = err
            .into_io_error()
            .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop detected"));
        LinkError::Scan { path, source }
    }
}

/// Parse every link file under `from_dir`
pub fn list_links(sandbox: &Sandbox, from_dir: impl AsRef<Path>) -> LinkResult<Vec<Link>> {
    LinkScanner::new(sandbox).scan(from_dir.as_ref())
}
