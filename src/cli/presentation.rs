//! CLI presentation: text and json formatters per command.

use crate::error::CommandError;
use crate::link::{ChecksumUpdate, Link};
use crate::sandbox::path::to_slash;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

fn status_label(link: &Link) -> String {
    if link.is_up_to_date() {
        format!("{}", "ok".green())
    } else {
        format!("{}", "stale".red())
    }
}

fn short_checksum(checksum: Option<&str>) -> String {
    match checksum {
        Some(c) => c.chars().take(12).collect(),
        None => "-".to_string(),
    }
}

pub fn format_link_list_text(links: &[Link]) -> String {
    if links.is_empty() {
        return "No link files found.".to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Link", "Included", "Target", "Checksum", "Status"]);
    for link in links {
        table.add_row(vec![
            to_slash(link.link_file_path()),
            link.included_file_path().to_string(),
            to_slash(link.target_file_path()),
            short_checksum(link.declared_checksum()),
            status_label(link),
        ]);
    }

    let stale = links.iter().filter(|l| !l.is_up_to_date()).count();
    format!(
        "{}\n{} link file(s), {} not up to date",
        table, links.len(), stale
    )
}

pub fn format_link_list_json(links: &[Link]) -> Result<String, CommandError> {
    let rows: Vec<serde_json::Value> = links
        .iter()
        .map(|link| {
            json!({
                "link_file_path": to_slash(link.link_file_path()),
                "included_file_path": link.included_file_path(),
                "included_path": to_slash(link.included_path()),
                "target_file_path": to_slash(link.target_file_path()),
                "declared_checksum": link.declared_checksum(),
                "checksum": link.computed_checksum(),
                "up_to_date": link.is_up_to_date(),
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

pub fn format_check_ok(count: usize) -> String {
    format!("{} All {} link file(s) are up to date", "✓".green(), count)
}

pub fn format_update_summary(updates: &[(Link, ChecksumUpdate)]) -> String {
    let mut lines = Vec::new();
    for (link, update) in updates {
        if update.is_changed() {
            lines.push(format!("  updated {}", to_slash(link.link_file_path())));
        }
    }
    let changed = lines.len();
    lines.insert(
        0,
        format!(
            "{} link file(s) checked, {} updated",
            updates.len(),
            changed.bold()
        ),
    );
    lines.join("\n")
}

pub fn format_include_summary(links: &[Link]) -> String {
    let mut lines: Vec<String> = links
        .iter()
        .map(|link| {
            format!(
                "  {} -> {}",
                to_slash(link.included_path()),
                to_slash(link.target_file_path())
            )
        })
        .collect();
    lines.insert(0, format!("Included {} linked file(s)", links.len()));
    lines.join("\n")
}

pub fn format_created_link(link: &Link) -> String {
    format!(
        "Created {} -> {} ({})",
        to_slash(link.link_file_path()),
        link.included_file_path(),
        short_checksum(Some(link.computed_checksum()))
    )
}
