//! CLI parse: clap types for linkfs. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// linkfs CLI - Maintain and resolve checksum-verified link files
#[derive(Parser, Debug)]
#[command(name = "linkfs")]
#[command(about = "Maintain and resolve checksum-verified link files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sandbox root directory (default: repository root of the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List link files and whether they are up to date
    List {
        /// Directory to scan, relative to the root (default: links.from_dir)
        dir: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Fail if any link file is not up to date
    Check {
        /// Directory to scan, relative to the root (default: links.from_dir)
        dir: Option<String>,
    },
    /// Record current checksums in link files
    Update {
        /// Directory to scan, relative to the root (default: links.from_dir)
        dir: Option<String>,
    },
    /// Copy included files next to (or under --to, mirroring) their link files
    Include {
        /// Directory holding link files (default: links.from_dir)
        #[arg(long)]
        from: Option<String>,
        /// Destination directory (default: links.to_dir)
        #[arg(long)]
        to: Option<String>,
    },
    /// Create a link file
    New {
        /// Link file path relative to the root; must end in .link
        link: PathBuf,
        /// Included file path relative to the link file's directory
        included: String,
    },
    /// Print a file as seen through the link-aware filesystem
    Cat {
        /// File path relative to the root
        path: PathBuf,
        /// Refuse link files instead of resolving them
        #[arg(long)]
        block: bool,
    },
}
