//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{CommandError, LinkError};

/// Map command errors to a string for CLI output.
pub fn map_error(e: &CommandError) -> String {
    match e {
        CommandError::Link(LinkError::StaleLink { path }) => format!(
            "{} is not up to date; run `linkfs update` to record the current checksum",
            path.display()
        ),
        CommandError::StaleLinks { .. } => {
            format!("{}\nRun `linkfs update` to record current checksums", e)
        }
        _ => format!("Error: {}", e),
    }
}
