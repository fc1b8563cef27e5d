//! Config loader facade: assembles sources and deserializes the result.

use super::merge::merge_policy;
use super::sources::{global_file, workspace_file};
use super::LinkfsConfig;
use config::{ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`LinkfsConfig`] from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace: defaults, global file,
    /// `<workspace_root>/linkfs.toml`, then `LINKFS_*` environment overrides.
    pub fn load(workspace_root: &Path) -> Result<LinkfsConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let config: LinkfsConfig = builder
            .add_source(merge_policy::environment())
            .build()?
            .try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from a single explicit file over the defaults.
    /// Environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<LinkfsConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .add_source(merge_policy::environment())
            .build()?
            .try_deserialize()
    }

    /// Path of the global (per-user) config file, if a home directory is known
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Path of the workspace config file for `workspace_root`
    pub fn workspace_config_path(workspace_root: &Path) -> PathBuf {
        workspace_file::workspace_config_path(workspace_root)
    }
}
