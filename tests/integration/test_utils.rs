//! Shared test utilities for integration tests
//!
//! Provides a link tree fixture builder and serialized access to the
//! environment variables read by configuration loading.

use linkfs::checksum::checksum;
use linkfs::Sandbox;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
        }
    }

    fn restore(self) {
        if let Some(orig) = self.home {
            std::env::set_var("HOME", orig);
        } else {
            std::env::remove_var("HOME");
        }

        if let Some(orig) = self.xdg_config_home {
            std::env::set_var("XDG_CONFIG_HOME", orig);
        } else {
            std::env::remove_var("XDG_CONFIG_HOME");
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointed into `test_dir`
///
/// The global config file then lives at `<test_dir>/config/linkfs/config.toml`
/// on Linux. `extra_env` is set for the duration of `f` and removed afterwards.
pub fn with_isolated_env<F, R>(test_dir: &TempDir, extra_env: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_config_home = test_dir.path().join("config");
    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_config_home).unwrap();
    std::fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", &test_home);
    std::env::set_var("XDG_CONFIG_HOME", &test_config_home);
    for (key, value) in extra_env {
        std::env::set_var(key, value);
    }

    let result = f();

    for (key, _) in extra_env {
        std::env::remove_var(key);
    }
    env_state.restore();

    result
}

/// A temporary directory tree populated with plain files and link files
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

    /// Write a plain file, creating parent directories
    pub fn file(&self, path: &str, contents: &[u8]) -> &Self {
        let full = self.root().join(path);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(full, contents).unwrap();
        self
    }

    /// Write an up-to-date link file at `link` including `included`
    ///
    /// `included` is relative to the link's directory; `contents` must be the
    /// included file's current content.
    pub fn link(&self, link: &str, included: &str, contents: &[u8]) -> &Self {
        self.file(link, format!("{} {}\n", included, checksum(contents)).as_bytes())
    }

    /// Write a link file with no recorded checksum
    pub fn unchecked_link(&self, link: &str, included: &str) -> &Self {
        self.file(link, format!("{}\n", included).as_bytes())
    }

    pub fn read(&self, path: &str) -> Vec<u8> {
        std::fs::read(self.root().join(path)).unwrap()
    }

    pub fn read_string(&self, path: &str) -> String {
        String::from_utf8(self.read(path)).unwrap()
    }
}
