//! Repository root discovery

use std::path::{Path, PathBuf};

/// Marker that identifies a repository root
const REPOSITORY_MARKER: &str = ".git";

/// Nearest ancestor of `start` (inclusive) containing a `.git` entry
///
/// `.git` may be a directory or a file (worktrees and submodules use a file).
pub fn find_repository_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(REPOSITORY_MARKER).exists())
        .map(Path::to_path_buf)
}
