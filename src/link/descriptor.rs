//! Link descriptor: a parsed link file and its resolution state

use crate::checksum;
use crate::error::{LinkError, LinkResult};
use crate::link::{default_target_path, maintainer};
use crate::sandbox::{path, Sandbox};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Outcome of [`Link::update_checksum`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumUpdate {
    /// The link already recorded the current checksum; nothing was written
    Unchanged,
    /// The link file was rewritten with the current checksum
    Changed,
}

impl ChecksumUpdate {
    pub fn is_changed(self) -> bool {
        self == ChecksumUpdate::Changed
    }
}

/// Point-in-time snapshot of one link file
///
/// All paths are relative to the sandbox root except `included_file_path`,
/// which is kept as declared (relative to the link file's directory).
/// Later changes to the included file are not observed; parse again instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    link_file_path: PathBuf,
    target_file_path: PathBuf,
    included_file_path: String,
    included_path: PathBuf,
    declared_checksum: Option<String>,
    computed_checksum: String,
}

impl Link {
    /// Parse the link file at `link_file_path` and checksum what it includes
    pub fn parse(sandbox: &Sandbox, link_file_path: impl AsRef<Path>) -> LinkResult<Self> {
        let link_file_path = sandbox.relative(link_file_path)?;
        let first_line = read_first_line(sandbox, &link_file_path)?;

        let mut fields = first_line.split_whitespace();
        let included_file_path = match fields.next() {
            Some(field) => path::to_slash(Path::new(field)),
            None => {
                return Err(LinkError::MalformedLink {
                    path: link_file_path,
                    reason: "file is empty or first line is missing".to_string(),
                })
            }
        };
        let declared_checksum = fields.next().map(str::to_string);

        let included_path = resolve_included(sandbox, &link_file_path, &included_file_path)?;
        let computed_checksum = checksum_included(sandbox, &link_file_path, &included_path)?;

        let link = Self {
            target_file_path: default_target_path(&link_file_path),
            link_file_path,
            included_file_path,
            included_path,
            declared_checksum,
            computed_checksum,
        };
        debug!(
            link = %link.link_file_path.display(),
            included = %link.included_path.display(),
            up_to_date = link.is_up_to_date(),
            "Parsed link file"
        );
        Ok(link)
    }

    /// Build a descriptor for a link file that does not exist yet
    ///
    /// The declared checksum is set to the included file's current checksum,
    /// so the result is up to date once its canonical line is written.
    pub(crate) fn synthesize(
        sandbox: &Sandbox,
        link_file_path: impl AsRef<Path>,
        included_file_path: &str,
    ) -> LinkResult<Self> {
        let link_file_path = sandbox.relative(link_file_path)?;
        let included_file_path = path::to_slash(Path::new(included_file_path));
        let included_path = resolve_included(sandbox, &link_file_path, &included_file_path)?;
        let computed_checksum = checksum_included(sandbox, &link_file_path, &included_path)?;

        Ok(Self {
            target_file_path: default_target_path(&link_file_path),
            link_file_path,
            included_file_path,
            included_path,
            declared_checksum: Some(computed_checksum.clone()),
            computed_checksum,
        })
    }

    /// Location of the link file
    pub fn link_file_path(&self) -> &Path {
        &self.link_file_path
    }

    /// Where the included content materializes
    pub fn target_file_path(&self) -> &Path {
        &self.target_file_path
    }

    /// Included path as declared in the link file, with forward slashes
    pub fn included_file_path(&self) -> &str {
        &self.included_file_path
    }

    /// Included path resolved against the link file's directory
    pub fn included_path(&self) -> &Path {
        &self.included_path
    }

    pub fn declared_checksum(&self) -> Option<&str> {
        self.declared_checksum.as_deref()
    }

    pub fn computed_checksum(&self) -> &str {
        &self.computed_checksum
    }

    /// True iff the declared checksum matches the computed one and both are set
    pub fn is_up_to_date(&self) -> bool {
        !self.computed_checksum.is_empty()
            && self.declared_checksum.as_deref() == Some(self.computed_checksum.as_str())
    }

    /// First line of the link file as written by [`Link::update_checksum`]
    pub fn canonical_line(&self) -> String {
        format!("{} {}\n", self.included_file_path, self.computed_checksum)
    }

    /// Record the computed checksum in the link file
    ///
    /// Consumes the snapshot and returns its successor. An up-to-date link is
    /// returned unchanged without touching storage.
    pub fn update_checksum(self, sandbox: &Sandbox) -> LinkResult<(Link, ChecksumUpdate)> {
        if self.is_up_to_date() {
            return Ok((self, ChecksumUpdate::Unchanged));
        }
        if self.included_file_path.is_empty() {
            return Err(LinkError::IncompleteDescriptor {
                path: self.link_file_path,
                missing: "included file path",
            });
        }
        if self.computed_checksum.is_empty() {
            return Err(LinkError::IncompleteDescriptor {
                path: self.link_file_path,
                missing: "computed checksum",
            });
        }

        maintainer::write_file(sandbox, &self.link_file_path, self.canonical_line().as_bytes())?;
        debug!(
            link = %self.link_file_path.display(),
            checksum = %self.computed_checksum,
            "Updated link checksum"
        );

        let declared_checksum = Some(self.computed_checksum.clone());
        Ok((
            Link {
                declared_checksum,
                ..self
            },
            ChecksumUpdate::Changed,
        ))
    }

    /// Rewrite the target path, replacing the first occurrence of `from_dir` with `to_dir`
    ///
    /// No-op when `to_dir` is empty. A `from_dir` of `.` (the sandbox root)
    /// prefixes the target with `to_dir` instead.
    pub fn remap_target_directory(self, from_dir: &str, to_dir: &str) -> Link {
        if to_dir.is_empty() {
            return self;
        }
        let from_dir = path::normalize_path_string(from_dir);
        let to_dir = path::normalize_path_string(to_dir);
        let target = path::to_slash(&self.target_file_path);

        let remapped = if from_dir.is_empty() || from_dir == "." {
            format!("{}/{}", to_dir, target)
        } else {
            target.replacen(&from_dir, &to_dir, 1)
        };

        Link {
            target_file_path: PathBuf::from(remapped),
            ..self
        }
    }
}

fn resolve_included(
    sandbox: &Sandbox,
    link_file_path: &Path,
    included_file_path: &str,
) -> LinkResult<PathBuf> {
    let link_dir = link_file_path.parent().unwrap_or_else(|| Path::new(""));
    sandbox.relative(link_dir.join(included_file_path))
}

fn checksum_included(
    sandbox: &Sandbox,
    link_file_path: &Path,
    included_path: &Path,
) -> LinkResult<String> {
    let unavailable = |source| LinkError::ReferenceUnavailable {
        link: link_file_path.to_path_buf(),
        included: included_path.to_path_buf(),
        source,
    };
    let resolved = match sandbox.resolve(included_path) {
        Ok(resolved) => resolved,
        Err(LinkError::Io { source, .. }) => return Err(unavailable(source)),
        Err(e) => return Err(e),
    };
    checksum::checksum_file(&resolved).map_err(unavailable)
}

fn read_first_line(sandbox: &Sandbox, link_file_path: &Path) -> LinkResult<String> {
    let malformed = |reason: String| LinkError::MalformedLink {
        path: link_file_path.to_path_buf(),
        reason,
    };
    let resolved = match sandbox.resolve(link_file_path) {
        Ok(resolved) => resolved,
        Err(LinkError::Io { source, .. }) => return Err(malformed(source.to_string())),
        Err(e) => return Err(e),
    };
    let file = File::open(&resolved).map_err(|e| malformed(format!("could not open: {}", e)))?;

    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|e| malformed(format!("could not read first line: {}", e)))?;

    if line.trim().is_empty() {
        return Err(malformed("file is empty or first line is missing".to_string()));
    }
    Ok(line)
}
