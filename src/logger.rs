//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output only shown under `--verbose`
//! - checklist marks (`✓`, `✗`, `⚠`) used by the reports
//!
//! # Example
//!
//! ```ignore
//! log!("widths"; "fixed {} declarations", count);
//! println!("{} {}", mark(true), "Auto-pagination script");
//! ```

use owo_colors::{OwoColorize, Stream};
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    log_to(&mut stdout().lock(), module, message);
}

/// Log to another stream, e.g. stderr when stdout carries a report
pub fn log_to(out: &mut impl Write, module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    writeln!(out, "{prefix} {message}").ok();
    out.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "scan" | "analyze" => prefix.bright_blue().bold().to_string(),
        "pdf" | "bundle" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Checklist Marks
// ============================================================================

/// Pass/fail mark: green `✓` or red `✗`.
///
/// Marks honour `--color`, so plain text is produced when stdout is not a
/// terminal.
pub fn mark(ok: bool) -> String {
    if ok {
        "✓".if_supports_color(Stream::Stdout, |t| t.green()).to_string()
    } else {
        "✗".if_supports_color(Stream::Stdout, |t| t.red()).to_string()
    }
}

/// Advisory mark: yellow `⚠`.
pub fn warn_mark() -> String {
    "⚠".if_supports_color(Stream::Stdout, |t| t.yellow()).to_string()
}

/// Section header used by multi-section reports.
pub fn section(title: &str) -> String {
    let header = format!("=== {title} ===");
    header
        .if_supports_color(Stream::Stdout, |t| t.bold())
        .to_string()
}
