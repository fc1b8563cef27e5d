//! Merge rules: defaults, override order, conflict handling.
//!
//! Sources are layered lowest to highest: defaults, global file, workspace
//! file, environment. Later sources override earlier ones key by key.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};

/// Prefix for environment overrides, e.g. `LINKFS_LINKS__TO_DIR=dist`
pub const ENV_PREFIX: &str = "LINKFS";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("links.from_dir", ".")?
        .set_default("links.to_dir", "")?
        .set_default("links.policy", "resolve")
}

/// Environment source; `__` separates nested keys.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}
