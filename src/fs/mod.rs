//! Read-only filesystem views
//!
//! [`ReadFs`] is the only filesystem interface consumers see. [`Sandbox`] is
//! the directory-backed base implementation; [`LinkFs`] wraps any base and
//! decides what happens to link files according to its [`LinkPolicy`].

pub mod overlay;

pub use overlay::{LinkFs, LinkPolicy};

use crate::error::LinkResult;
use crate::sandbox::Sandbox;
use std::io::Read;
use std::path::Path;

/// An open file returned by [`ReadFs::open`]
pub type FsFile = Box<dyn Read + Send>;

/// Read access to a tree of files addressed by root-relative paths
pub trait ReadFs {
    /// Open a file for reading
    fn open(&self, path: &Path) -> LinkResult<FsFile>;

    /// Read a whole file
    fn read(&self, path: &Path) -> LinkResult<Vec<u8>> {
        let mut file = self.open(path)?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| crate::error::LinkError::io(path, e))?;
        Ok(contents)
    }
}

impl ReadFs for Sandbox {
    fn open(&self, path: &Path) -> LinkResult<FsFile> {
        Ok(Box::new(Sandbox::open(self, path)?))
    }

    fn read(&self, path: &Path) -> LinkResult<Vec<u8>> {
        Sandbox::read(self, path)
    }
}

impl<T: ReadFs + ?Sized> ReadFs for &T {
    fn open(&self, path: &Path) -> LinkResult<FsFile> {
        (**self).open(path)
    }

    fn read(&self, path: &Path) -> LinkResult<Vec<u8>> {
        (**self).read(path)
    }
}
