//! CLI route: single route table and run context. Dispatches to link services and presentation.

use crate::cli::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_check_ok, format_created_link, format_include_summary, format_link_list_json,
    format_link_list_text, format_update_summary,
};
use crate::config::{ConfigLoader, LinkfsConfig};
use crate::error::CommandError;
use crate::fs::{LinkFs, LinkPolicy, ReadFs};
use crate::link::{self, LinkScanner};
use crate::repository::find_repository_root;
use crate::sandbox::Sandbox;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// What a command produced: text for the terminal, or raw file bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    Text(String),
    Bytes(Vec<u8>),
}

/// Runtime context for CLI execution: the sandbox and loaded configuration.
pub struct RunContext {
    sandbox: Sandbox,
    config: LinkfsConfig,
}

impl RunContext {
    /// Create run context from an optional root and optional config path.
    ///
    /// Configuration is looked up in the base directory: `root` if given,
    /// else the repository root of the current directory, else the current
    /// directory. The sandbox root is `root`, else the configured root
    /// (relative to the base directory), else the base directory.
    pub fn new(root: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<Self, CommandError> {
        let cwd = std::env::current_dir()
            .map_err(|e| CommandError::ConfigError(format!("Cannot read current directory: {}", e)))?;
        Self::with_base(root, config_path, &cwd)
    }

    fn with_base(
        root: Option<PathBuf>,
        config_path: Option<PathBuf>,
        cwd: &Path,
    ) -> Result<Self, CommandError> {
        let base = match &root {
            Some(root) => cwd.join(root),
            None => find_repository_root(cwd).unwrap_or_else(|| cwd.to_path_buf()),
        };

        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&base)?,
        };
        if let Err(errors) = config.validate() {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            return Err(CommandError::ConfigError(messages.join("; ")));
        }

        let sandbox_root = match root {
            Some(_) => base,
            None => config.resolve_root(&base),
        };
        let sandbox = Sandbox::new(&sandbox_root)?;
        debug!(root = %sandbox.root().display(), "Sandbox ready");

        Ok(Self { sandbox, config })
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    pub fn config(&self) -> &LinkfsConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, CommandError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<CommandOutput, CommandError> {
        match command {
            Commands::List { dir, format } => {
                let links = LinkScanner::new(&self.sandbox).scan(self.dir_or_default(dir))?;
                let out = if format == "json" {
                    format_link_list_json(&links)?
                } else {
                    format_link_list_text(&links)
                };
                Ok(CommandOutput::Text(out))
            }
            Commands::Check { dir } => {
                let dir = self.dir_or_default(dir);
                let stale = link::stale_links(&self.sandbox, dir)?;
                if !stale.is_empty() {
                    return Err(CommandError::StaleLinks {
                        paths: stale
                            .iter()
                            .map(|l| l.link_file_path().to_path_buf())
                            .collect(),
                    });
                }
                let count = LinkScanner::new(&self.sandbox).find(dir)?.len();
                Ok(CommandOutput::Text(format_check_ok(count)))
            }
            Commands::Update { dir } => {
                let updates = link::update_all(&self.sandbox, self.dir_or_default(dir))?;
                Ok(CommandOutput::Text(format_update_summary(&updates)))
            }
            Commands::Include { from, to } => {
                let from_dir = from.as_deref().unwrap_or(&self.config.links.from_dir);
                let to_dir = to.as_deref().unwrap_or(&self.config.links.to_dir);
                let links = link::include_all(&self.sandbox, from_dir, to_dir)?;
                Ok(CommandOutput::Text(format_include_summary(&links)))
            }
            Commands::New {
                link: link_path,
                included,
            } => {
                let created = link::create_link(&self.sandbox, link_path, included)?;
                Ok(CommandOutput::Text(format_created_link(&created)))
            }
            Commands::Cat { path, block } => {
                let policy = if *block {
                    LinkPolicy::Block
                } else {
                    self.config.links.policy
                };
                let view = LinkFs::from_sandbox(self.sandbox.clone(), policy);
                Ok(CommandOutput::Bytes(view.read(path)?))
            }
        }
    }

    fn dir_or_default<'a>(&'a self, dir: &'a Option<String>) -> &'a str {
        dir.as_deref().unwrap_or(&self.config.links.from_dir)
    }
}
