//! Link files
//!
//! A link file stands in for another file's content. Its first line names the
//! included file (relative to the link file's directory) and, once recorded,
//! the SHA-256 checksum of that file's content:
//!
//! ```text
//! ../../shared/fields.yml 5f1c0e...
//! ```
//!
//! The file `fields.yml.link` materializes as `fields.yml`.

pub mod descriptor;
pub mod maintainer;
pub mod scanner;

pub use descriptor::{ChecksumUpdate, Link};
pub use maintainer::{copy_file, create_link, include_all, stale_links, update_all, write_file};
pub use scanner::{list_links, LinkScanner};

use std::path::{Path, PathBuf};

/// Suffix carried by every link file
pub const LINK_EXTENSION: &str = ".link";

/// Whether `path` names a link file
///
/// The file name must end with [`LINK_EXTENSION`] and have something before it;
/// a bare `.link` has no target name to materialize as.
pub fn is_link_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| {
            let name = name.to_string_lossy();
            name.len() > LINK_EXTENSION.len() && name.ends_with(LINK_EXTENSION)
        })
        .unwrap_or(false)
}

/// Default materialization path: the link path without its suffix
pub fn default_target_path(link_file_path: &Path) -> PathBuf {
    let name = link_file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(LINK_EXTENSION).unwrap_or(&name);
    link_file_path.with_file_name(stem)
}
