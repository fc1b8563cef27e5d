//! CLI domain: parse, route, help, output, and presentation only.
//! No link logic here; a single route table dispatches to the link services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use route::{CommandOutput, RunContext};
