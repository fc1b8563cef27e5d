//! Link maintenance: checksum updates and materialization of included content
//!
//! Batch operations are not atomic. A failure partway through leaves earlier
//! writes in place; callers needing atomicity stage into a temporary directory.

use crate::error::{LinkError, LinkResult};
use crate::link::{is_link_file, list_links, ChecksumUpdate, Link};
use crate::sandbox::path::to_slash;
use crate::sandbox::Sandbox;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Include linked files from `from_dir` into `to_dir`
///
/// For every link under `from_dir`: remap its target from `from_dir` to
/// `to_dir`, record the current checksum in the link file, then copy the
/// included content to the remapped target. Both directories are relative to
/// the sandbox root. An empty `to_dir` materializes targets next to their links.
#[instrument(skip(sandbox), fields(root = %sandbox.root().display()))]
pub fn include_all(sandbox: &Sandbox, from_dir: &str, to_dir: &str) -> LinkResult<Vec<Link>> {
    // Remapping matches against scanned targets, which are lexically normal.
    let from_dir = to_slash(&sandbox.relative(from_dir)?);
    let to_dir = if to_dir.is_empty() {
        String::new()
    } else {
        to_slash(&sandbox.relative(to_dir)?)
    };

    let links = list_links(sandbox, &from_dir)?;
    let mut included = Vec::with_capacity(links.len());

    for link in links {
        let link = link.remap_target_directory(&from_dir, &to_dir);
        let (link, _) = link.update_checksum(sandbox)?;
        let bytes = copy_file(sandbox, link.included_path(), link.target_file_path())?;
        debug!(
            link = %link.link_file_path().display(),
            target = %link.target_file_path().display(),
            bytes,
            "Included linked file"
        );
        included.push(link);
    }

    info!(count = included.len(), "Included linked files");
    Ok(included)
}

/// Record the current checksum in every link file under `dir`
#[instrument(skip(sandbox), fields(root = %sandbox.root().display()))]
pub fn update_all(sandbox: &Sandbox, dir: &str) -> LinkResult<Vec<(Link, ChecksumUpdate)>> {
    let links = list_links(sandbox, dir)?;
    let mut updated = Vec::with_capacity(links.len());
    for link in links {
        updated.push(link.update_checksum(sandbox)?);
    }

    let changed = updated.iter().filter(|(_, u)| u.is_changed()).count();
    info!(total = updated.len(), changed, "Updated link checksums");
    Ok(updated)
}

/// Link files under `dir` whose recorded checksum does not match their content
pub fn stale_links(sandbox: &Sandbox, dir: &str) -> LinkResult<Vec<Link>> {
    let stale: Vec<Link> = list_links(sandbox, dir)?
        .into_iter()
        .filter(|link| !link.is_up_to_date())
        .collect();
    for link in &stale {
        warn!(link = %link.link_file_path().display(), "Link file is not up to date");
    }
    Ok(stale)
}

/// Create (or overwrite) a link file pointing at `included_file_path`
///
/// `included_file_path` is relative to the link file's directory and must
/// exist; the new link records its current checksum.
pub fn create_link(
    sandbox: &Sandbox,
    link_file_path: impl AsRef<Path>,
    included_file_path: &str,
) -> LinkResult<Link> {
    let link_file_path = link_file_path.as_ref();
    if !is_link_file(link_file_path) {
        return Err(LinkError::NotALinkFile {
            path: link_file_path.to_path_buf(),
        });
    }

    let link = Link::synthesize(sandbox, link_file_path, included_file_path)?;
    write_file(sandbox, link.link_file_path(), link.canonical_line().as_bytes())?;
    info!(
        link = %link.link_file_path().display(),
        included = %link.included_path().display(),
        "Created link file"
    );
    Ok(link)
}

/// Copy a file inside the sandbox, creating parent directories of `to`
///
/// Returns the number of bytes copied.
pub fn copy_file(
    sandbox: &Sandbox,
    from: impl AsRef<Path>,
    to: impl AsRef<Path>,
) -> LinkResult<u64> {
    let (from, to) = (from.as_ref(), to.as_ref());
    let copy_error = |source: io::Error| LinkError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };
    let resolve = |path: &Path| match sandbox.resolve(path) {
        Ok(resolved) => Ok(resolved),
        Err(LinkError::Io { source, .. }) => Err(copy_error(source)),
        Err(e) => Err(e),
    };

    let source_path = resolve(from)?;
    let target_path = resolve(to)?;
    if source_path == target_path {
        return fs::metadata(&source_path).map(|m| m.len()).map_err(copy_error);
    }

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(copy_error)?;
    }
    let mut source = File::open(&source_path).map_err(copy_error)?;
    let mut target = File::create(&target_path).map_err(copy_error)?;
    io::copy(&mut source, &mut target).map_err(copy_error)
}

/// Write `contents` to a file inside the sandbox, creating parent directories
pub fn write_file(sandbox: &Sandbox, to: impl AsRef<Path>, contents: &[u8]) -> LinkResult<()> {
    let to = to.as_ref();
    let target_path = sandbox.resolve(to)?;
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| LinkError::io(to, e))?;
    }
    fs::write(&target_path, contents).map_err(|e| LinkError::io(to, e))
}
