//! pinview - Entry Point

use clap::Parser;
use pinview::model::AppError;
use std::path::PathBuf;
use tracing::{info, warn};

/// TUI chat transcript viewer with a pinned preview of the latest request.
#[derive(Parser, Debug)]
#[command(name = "pinview")]
#[command(version)]
#[command(about = "TUI viewer for chat transcripts (JSONL), pinning the latest user request")]
pub struct Args {
    /// Path to JSONL transcript file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Maximum height of the pinned preview, in lines
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub preview_lines: Option<u16>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Precedence: defaults, then config file, then CLI flags.
    let config = {
        let config_file = pinview::config::load_config_with_precedence(args.config.clone())?;
        let merged = pinview::config::merge_config(config_file);
        pinview::config::apply_cli_overrides(merged, args.preview_lines)
    };

    pinview::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let input_source =
        pinview::source::detect_input_source(args.file.clone()).map_err(AppError::InputRead)?;
    let lines = input_source.read_lines().map_err(AppError::InputRead)?;
    let (entries, errors) = pinview::parser::parse_lines(lines, 1);
    for error in &errors {
        warn!("{error}");
    }
    info!(
        entries = entries.len(),
        skipped = errors.len(),
        "Transcript loaded"
    );

    // Nothing usable at all: escalate the first parse error instead of
    // showing an empty viewer.
    if entries.is_empty() {
        if let Some(error) = errors.into_iter().next() {
            return Err(AppError::Parse(error).into());
        }
    }

    pinview::view::run_app(entries, &config)?;

    Ok(())
}
