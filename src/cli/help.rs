//! CLI help: stable command names used in log records.

use crate::cli::parse::Commands;

/// Command name string for log records (e.g. "list", "include").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::List { .. } => "list",
        Commands::Check { .. } => "check",
        Commands::Update { .. } => "update",
        Commands::Include { .. } => "include",
        Commands::New { .. } => "new",
        Commands::Cat { .. } => "cat",
    }
}
