//! Minimal link tree fixture for property tests

use linkfs::Sandbox;
use std::path::Path;
use tempfile::TempDir;

pub struct LinkTree {
    dir: TempDir,
}

impl LinkTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn sandbox(&self) -> Sandbox {
        Sandbox::new(self.root()).unwrap()
    }

    pub fn file(&self, path: &str, contents: &[u8]) -> &Self {
        let full = self.root().join(path);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(full, contents).unwrap();
        self
    }

    /// Write a link file with no recorded checksum
    pub fn unchecked_link(&self, link: &str, included: &str) -> &Self {
        self.file(link, format!("{}\n", included).as_bytes())
    }

    pub fn read_string(&self, path: &str) -> String {
        std::fs::read_to_string(self.root().join(path)).unwrap()
    }
}
