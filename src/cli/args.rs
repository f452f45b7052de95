//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Pagefix print-document repair CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: pagefix.toml)
    #[arg(short = 'C', long, global = true, default_value = "pagefix.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// HTML document to operate on (overrides `[document] path`)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub document: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Report page counts, asset references and known problem patterns
    #[command(visible_alias = "s")]
    Scan {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Desired maximum page count (overrides `[scan] target_pages`)
        #[arg(short, long)]
        target: Option<usize>,
    },

    /// Break the document down page by page
    #[command(visible_alias = "a")]
    Analyze,

    /// Clamp oversized width declarations in place
    #[command(visible_alias = "w")]
    Widths {
        /// Report rewrites without writing the document
        #[arg(long)]
        dry: bool,
    },

    /// Strip break-all decorations from text that is not a URL or email
    #[command(visible_alias = "u")]
    Urls {
        /// Report rewrites without writing the document
        #[arg(long)]
        dry: bool,
    },

    /// Export the first pages to a Letter-sized PDF with a headless browser
    #[command(visible_alias = "p")]
    Pdf {
        /// Output PDF path (relative to project root)
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Number of leading pages to keep visible
        #[arg(short, long)]
        pages: Option<usize>,

        /// Browser executable (name on PATH or absolute path)
        #[arg(short, long)]
        browser: Option<String>,
    },

    /// Copy entry documents and the asset manifest into the output directory
    #[command(visible_alias = "b")]
    Bundle {
        /// Output directory (relative to project root)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,

        /// List what would be copied without copying
        #[arg(long)]
        dry: bool,
    },
}

