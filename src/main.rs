//! Pagefix - repair, inspect and snapshot print-oriented HTML documents.

mod cli;
mod config;
mod document;
mod export;
mod logger;
mod rewrite;
mod scan;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::FixConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    utils::state::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = FixConfig::load(&cli)?;

    let result = match &cli.command {
        Commands::Scan { json, .. } => cli::scan::run_scan(&config, *json),
        Commands::Analyze => cli::analyze::run_analyze(&config),
        Commands::Widths { dry } => cli::widths::run_widths(&config, *dry),
        Commands::Urls { dry } => cli::urls::run_urls(&config, *dry),
        Commands::Pdf { .. } => cli::pdf::run_pdf(&config),
        Commands::Bundle { dry, .. } => cli::bundle::run_bundle(&config, *dry),
    };

    // Ctrl+C while a lock or child was held: guards have unwound by now
    if utils::state::is_shutdown() {
        if let Err(e) = &result {
            eprintln!("Error: {e:?}");
        }
        std::process::exit(utils::state::INTERRUPTED_EXIT);
    }
    result
}
