//! `folio` admin tool entry point.
//!
//! # Responsibility
//! - Resolve the data directory and start file logging.
//! - Open the content store and session gate, then dispatch one command.

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use commands::App;
use folio_core::{default_log_level, init_logging};
use std::path::PathBuf;
use std::process::ExitCode;

const DATA_DIR_NAME: &str = "folio";
const LOG_DIR_NAME: &str = "logs";

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir)?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create `{}`", data_dir.display()))?;

    let level = cli
        .log_level
        .unwrap_or_else(|| default_log_level().to_string());
    let log_dir = data_dir.join(LOG_DIR_NAME);
    if let Err(err) = init_logging(&level, &log_dir.to_string_lossy()) {
        eprintln!("warning: logging disabled: {err}");
    }

    let mut app = App::open(&data_dir, cli.quota_bytes)?;
    let stdout = std::io::stdout();
    commands::run(&mut app, cli.command, &mut stdout.lock())
}

fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match explicit {
        Some(dir) => dir,
        None => dirs::data_dir()
            .context("no platform data directory; pass --data-dir")?
            .join(DATA_DIR_NAME),
    };
    if dir.is_absolute() {
        return Ok(dir);
    }
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(cwd.join(dir))
}
