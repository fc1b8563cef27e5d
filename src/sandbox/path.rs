//! Path canonicalization and normalization utilities

use std::io;
use std::path::{Component, Path, PathBuf};

/// Canonicalize a path, resolving symlinks, `..` and `.`
///
/// Uses dunce so that Windows paths come back without the `\\?\` prefix and
/// compare cleanly against other canonical paths.
pub fn canonicalize_path(path: &Path) -> io::Result<PathBuf> {
    dunce::canonicalize(path)
}

/// Canonicalize the deepest existing ancestor of `path` and re-append the rest
///
/// `path` must already be lexically normal (no `.` or `..` after the part that
/// exists), which [`normalize_relative`] guarantees for sandbox paths.
pub fn canonicalize_existing_prefix(path: &Path) -> io::Result<PathBuf> {
    let mut missing: Vec<&std::ffi::OsStr> = Vec::new();
    let mut current = path;
    loop {
        match canonicalize_path(current) {
            Ok(mut canonical) => {
                for name in missing.iter().rev() {
                    canonical.push(name);
                }
                return Ok(canonical);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let name = current.file_name().ok_or(e)?;
                missing.push(name);
                current = match current.parent() {
                    Some(parent) => parent,
                    None => return Err(io::Error::from(io::ErrorKind::NotFound)),
                };
            }
            Err(e) => return Err(e),
        }
    }
}

/// Lexically normalize a relative path
///
/// Drops `.` segments and folds `..` into the preceding segment. Returns
/// `None` for absolute paths and for paths that climb above their start.
pub fn normalize_relative(path: &Path) -> Option<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return None;
                }
            }
            Component::Normal(name) => normalized.push(name),
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(normalized)
}

/// Render a relative path with forward slashes regardless of host convention
pub fn to_slash(path: &Path) -> String {
    let joined = path
        .components()
        .filter_map(|c| match c {
            Component::CurDir => None,
            Component::RootDir => Some("".into()),
            other => Some(other.as_os_str().to_string_lossy()),
        })
        .collect::<Vec<_>>()
        .join("/");
    if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Normalize a directory string for prefix substitution (without filesystem access)
///
/// Converts backslashes to forward slashes, drops a leading `./` and removes
/// trailing slashes.
pub fn normalize_path_string(path: &str) -> String {
    let mut result = path.replace('\\', "/");
    while let Some(stripped) = result.strip_prefix("./") {
        result = stripped.to_string();
    }
    while result.len() > 1 && result.ends_with('/') {
        result.pop();
    }
    result
}
