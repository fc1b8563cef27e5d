//! Link-aware filesystem: resolves or blocks link files over a base filesystem

use crate::error::{LinkError, LinkResult};
use crate::fs::{FsFile, ReadFs};
use crate::link::{is_link_file, Link};
use crate::sandbox::Sandbox;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{trace, warn};

/// What a [`LinkFs`] does when asked to open a link file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPolicy {
    /// Serve the included file's content if the link is up to date
    #[default]
    Resolve,
    /// Reject every link file; links are expected to be materialized already
    Block,
}

/// Read-only view of a base filesystem in which link files are resolved or blocked
///
/// Ordinary files pass straight through to the base. Nothing is cached: every
/// open of a link file parses it again and re-verifies its checksum.
///
/// The base filesystem must be rooted at the same directory as the sandbox,
/// since included paths are handed to it sandbox-relative.
#[derive(Debug, Clone)]
pub struct LinkFs<F: ReadFs = Sandbox> {
    sandbox: Sandbox,
    inner: F,
    policy: LinkPolicy,
}

impl LinkFs<Sandbox> {
    /// Link-aware view directly over the sandbox directory
    pub fn from_sandbox(sandbox: Sandbox, policy: LinkPolicy) -> Self {
        let inner = sandbox.clone();
        Self::new(sandbox, inner, policy)
    }
}

impl<F: ReadFs> LinkFs<F> {
    pub fn new(sandbox: Sandbox, inner: F, policy: LinkPolicy) -> Self {
        Self {
            sandbox,
            inner,
            policy,
        }
    }

    /// View that serves up-to-date link files as their included content
    pub fn overlay(sandbox: Sandbox, inner: F) -> Self {
        Self::new(sandbox, inner, LinkPolicy::Resolve)
    }

    /// View that refuses to open link files at all
    pub fn blocking(sandbox: Sandbox, inner: F) -> Self {
        Self::new(sandbox, inner, LinkPolicy::Block)
    }

    pub fn policy(&self) -> LinkPolicy {
        self.policy
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Parse the link file at `path` and require it to be up to date
    pub fn resolve_link(&self, path: &Path) -> LinkResult<Link> {
        let link = Link::parse(&self.sandbox, path)?;
        if !link.is_up_to_date() {
            warn!(link = %path.display(), "Refusing to serve stale link file");
            return Err(LinkError::StaleLink {
                path: path.to_path_buf(),
            });
        }
        Ok(link)
    }
}

impl<F: ReadFs> ReadFs for LinkFs<F> {
    fn open(&self, path: &Path) -> LinkResult<FsFile> {
        if !is_link_file(path) {
            return self.inner.open(path);
        }

        match self.policy {
            LinkPolicy::Block => Err(LinkError::UnsupportedLink {
                path: path.to_path_buf(),
            }),
            LinkPolicy::Resolve => {
                let link = self.resolve_link(path)?;
                trace!(
                    link = %path.display(),
                    included = %link.included_path().display(),
                    "Serving linked file"
                );
                self.inner.open(link.included_path())
            }
        }
    }
}
