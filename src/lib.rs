//! linkfs: checksum-verified link files inside a sandboxed directory tree
//!
//! A link file (`name.ext.link`) stands in for a file kept elsewhere in the
//! same tree. Its first line names the included file and records the SHA-256
//! checksum of the content it was last verified against. This crate parses and
//! maintains link files, materializes the included content, and offers a
//! read-only filesystem view that resolves (or refuses) link files on open.

pub mod checksum;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod link;
pub mod logging;
pub mod repository;
pub mod sandbox;

pub use error::{CommandError, LinkError, LinkResult};
pub use fs::{LinkFs, LinkPolicy, ReadFs};
pub use link::{Link, LinkScanner};
pub use sandbox::Sandbox;
