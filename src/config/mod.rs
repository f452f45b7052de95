//! Project configuration management for `pagefix.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── document   # [document]
//! │   ├── scan       # [scan], [analyze]
//! │   ├── pdf        # [pdf]
//! │   └── bundle     # [bundle]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # FixConfig (this file)
//! ```
//!
//! The config file is optional. Without one every command runs on the
//! defaults, with the working directory as project root.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{AnalyzeConfig, BundleConfig, DocumentConfig, PdfConfig, ScanConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands},
    debug, logger,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing pagefix.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixConfig {
    /// Path of the loaded config file, if any (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root directory - parent of config file, or cwd (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Target document
    pub document: DocumentConfig,

    /// Diagnostic scanner settings
    pub scan: ScanConfig,

    /// Page-by-page analysis settings
    pub analyze: AnalyzeConfig,

    /// PDF snapshot settings
    pub pdf: PdfConfig,

    /// Asset bundle manifest
    pub bundle: BundleConfig,
}

impl FixConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file. The project root is the
    /// config file's parent directory, or cwd when no file exists.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let config_path = find_config_file(&cli.config, &cwd);
        let mut config = match &config_path {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                Self::from_path(path)?
            }
            None => {
                debug!("config"; "no {} found, using defaults", cli.config.display());
                Self::default()
            }
        };

        let root = config_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.clone());

        config.config_path = config_path;
        config.prepare(&root, &cwd, cli)?;
        Ok(config)
    }

    /// Apply CLI options, resolve paths and validate.
    ///
    /// Every validation problem is collected before failing.
    fn prepare(&mut self, root: &Path, cwd: &Path, cli: &Cli) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.apply_command_options(cli);

        // Raw paths are checked before they become absolute
        self.bundle.validate_paths(&mut diag);

        self.root = root.to_path_buf();
        self.document.normalize(root);
        self.pdf.normalize(root);
        self.bundle.normalize(root);

        // --document is typed by the user, so it is relative to cwd
        if let Some(document) = &cli.document {
            self.document.path = cwd.join(document);
        }

        self.document.validate(&mut diag);
        self.scan.validate(&mut diag);
        self.analyze.validate(&mut diag);
        self.pdf.validate(&mut diag);

        diag.into_result()
    }

    /// Parse configuration from TOML string
    #[cfg(test)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&mut io::stderr().lock(), &ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    ///
    /// Goes to stderr so `scan --json` output stays parseable.
    fn print_unknown_fields_warning(out: &mut impl Write, fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        logger::log_to(
            out,
            "warning",
            &format!("unknown fields in {display_path}, ignoring:"),
        );
        for field in fields {
            writeln!(out, "- {field}").ok();
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Get path relative to the project root, for display
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Entry documents copied by `bundle`: the configured list, or the
    /// document itself when the list is empty.
    pub fn bundle_entries(&self) -> Vec<PathBuf> {
        if self.bundle.entries.is_empty() {
            vec![self.root_relative(&self.document.path)]
        } else {
            self.bundle.entries.clone()
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Scan { target, .. } => {
                Self::update_option(&mut self.scan.target_pages, target.as_ref());
            }
            Commands::Pdf {
                output,
                pages,
                browser,
            } => {
                Self::update_option(&mut self.pdf.output, output.as_ref());
                Self::update_option(&mut self.pdf.pages, pages.as_ref());
                if browser.is_some() {
                    self.pdf.browser = browser.clone();
                }
            }
            Commands::Bundle { output, .. } => {
                Self::update_option(&mut self.bundle.output, output.as_ref());
            }
            Commands::Analyze | Commands::Widths { .. } | Commands::Urls { .. } => {}
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("pagefix").chain(args.iter().copied()))
    }

    #[test]
    fn test_full_config() {
        let config = FixConfig::from_str(
            r#"
            [document]
            path = "bmpoa.html"

            [scan]
            target_pages = 24

            [pdf]
            pages = 4
            hooks = []

            [bundle]
            output = "public"
            dirs = ["images", "archives"]
            "#,
        )
        .unwrap();

        assert_eq!(config.document.path, PathBuf::from("bmpoa.html"));
        assert_eq!(config.scan.target_pages, 24);
        assert_eq!(config.pdf.pages, 4);
        assert!(config.pdf.hooks.is_empty());
        assert_eq!(config.bundle.output, PathBuf::from("public"));
        assert_eq!(config.analyze.sparse_chars, 500);
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (config, ignored) = FixConfig::parse_with_ignored(
            r#"
            [scan]
            target_pages = 10
            page_limit = 3

            [theme]
            dark = true
            "#,
        )
        .unwrap();

        assert_eq!(config.scan.target_pages, 10);
        let mut ignored = ignored;
        ignored.sort();
        assert_eq!(ignored, vec!["scan.page_limit", "theme"]);
    }

    #[test]
    fn test_unknown_fields_warning_output() {
        let mut out = Vec::new();
        let fields = vec!["scan.page_limit".to_string(), "theme".to_string()];
        FixConfig::print_unknown_fields_warning(&mut out, &fields, Path::new("/site/pagefix.toml"));

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("unknown fields in pagefix.toml, ignoring:"));
        assert_eq!(&lines[1..], ["- scan.page_limit", "- theme"]);
    }

    #[test]
    fn test_prepare_resolves_paths() {
        let mut config = FixConfig::default();
        config
            .prepare(Path::new("/site"), Path::new("/site/sub"), &cli(&["widths"]))
            .unwrap();

        assert_eq!(config.document.path, PathBuf::from("/site/guide.html"));
        assert_eq!(config.pdf.output, PathBuf::from("/site/guide-first-pages.pdf"));
        assert_eq!(config.bundle.output, PathBuf::from("/site/dist"));
        assert_eq!(config.bundle_entries(), vec![PathBuf::from("guide.html")]);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = FixConfig::default();
        config
            .prepare(
                Path::new("/site"),
                Path::new("/work"),
                &cli(&["-d", "other.html", "pdf", "-p", "3", "-o", "out/first.pdf", "-b", "chrome"]),
            )
            .unwrap();

        assert_eq!(config.document.path, PathBuf::from("/work/other.html"));
        assert_eq!(config.pdf.pages, 3);
        assert_eq!(config.pdf.output, PathBuf::from("/site/out/first.pdf"));
        assert_eq!(config.pdf.browser.as_deref(), Some("chrome"));

        let mut config = FixConfig::default();
        config
            .prepare(Path::new("/site"), Path::new("/site"), &cli(&["scan", "-t", "12"]))
            .unwrap();
        assert_eq!(config.scan.target_pages, 12);
    }

    #[test]
    fn test_prepare_reports_every_problem() {
        let mut config = FixConfig::from_str(
            r#"
            [scan]
            target_pages = 0

            [bundle]
            files = ["../outside.css"]
            "#,
        )
        .unwrap();

        let err = config
            .prepare(Path::new("/site"), Path::new("/site"), &cli(&["scan"]))
            .unwrap_err();
        match err {
            ConfigError::Diagnostics(diag) => assert_eq!(diag.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config_name = dir.path().join("absent.toml");
        let cli = cli(&["-C", config_name.to_str().unwrap(), "scan"]);

        let config = FixConfig::load(&cli).unwrap();
        assert!(config.config_path.is_none());
        assert_eq!(config.scan.target_pages, 20);
    }
}
