//! linkfs CLI Binary
//!
//! Command-line interface for maintaining and resolving link files.

use clap::Parser;
use linkfs::cli::{Cli, CommandOutput, RunContext};
use linkfs::config::ConfigLoader;
use linkfs::logging::{init_logging, LoggingConfig};
use linkfs::repository::find_repository_root;
use std::io::Write;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("linkfs starting");

    let context = match RunContext::new(cli.root.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing sandbox: {}", e);
            eprintln!("{}", linkfs::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(CommandOutput::Text(output)) => println!("{}", output),
        Ok(CommandOutput::Bytes(bytes)) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(&bytes).and_then(|_| stdout.flush()) {
                eprintln!("Failed to write output: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", linkfs::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args and the config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        let base = match (&cli.root, std::env::current_dir()) {
            (Some(root), _) => Some(root.clone()),
            (None, Ok(cwd)) => Some(find_repository_root(&cwd).unwrap_or(cwd)),
            (None, Err(_)) => None,
        };
        base.and_then(|base| ConfigLoader::load(&base).ok())
            .map(|c| c.logging)
            .unwrap_or_default()
    };

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
        if cli.log_output.is_none() {
            config.output = "file".to_string();
        }
    }

    config
}
