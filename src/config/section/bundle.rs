//! `[bundle]` section configuration.
//!
//! The manifest copied next to the built documents. Every source keeps its
//! relative path under `output`; missing sources are skipped.
//!
//! # Example
//!
//! ```toml
//! [bundle]
//! output = "dist"
//! entries = ["index.html", "guide.html"]                 # HTML entry documents
//! files = ["pagination-fixes.css", "auto-pagination.js", "_redirects"]
//! dirs = ["images", "archives"]                          # Copied recursively
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Output directory.
    pub output: PathBuf,

    /// Entry documents. Empty means the configured document only.
    pub entries: Vec<PathBuf>,

    /// Individual files.
    pub files: Vec<PathBuf>,

    /// Directories, copied recursively.
    pub dirs: Vec<PathBuf>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            output: "dist".into(),
            entries: vec![],
            files: vec![],
            dirs: vec!["images".into()],
        }
    }
}

impl BundleConfig {
    const OUTPUT: FieldPath = FieldPath::new("bundle.output");
    const ENTRIES: FieldPath = FieldPath::new("bundle.entries");
    const FILES: FieldPath = FieldPath::new("bundle.files");
    const DIRS: FieldPath = FieldPath::new("bundle.dirs");

    /// Resolve the output directory against the root. Sources stay relative:
    /// their relative form is also their place under `output`.
    pub fn normalize(&mut self, root: &Path) {
        self.output = root.join(&self.output);
    }

    // ========================================================================
    // Validation (Pre-normalization)
    // ========================================================================

    /// Validate path safety before normalization.
    ///
    /// MUST be called before `normalize()` - afterwards `output` is absolute.
    pub fn validate_paths(&self, diag: &mut ConfigDiagnostics) {
        if self.output.as_os_str().is_empty() {
            diag.error(Self::OUTPUT, "output directory is empty");
        }

        for (field, paths) in [
            (Self::ENTRIES, &self.entries),
            (Self::FILES, &self.files),
            (Self::DIRS, &self.dirs),
        ] {
            let total = paths.len();
            for (i, path) in paths.iter().enumerate() {
                Self::validate_path_safety(path, i, total, field, diag);
            }
        }
    }

    /// Check a single path for unsafe components (`..` or absolute).
    fn validate_path_safety(
        path: &Path,
        idx: usize,
        total: usize,
        field: FieldPath,
        diag: &mut ConfigDiagnostics,
    ) {
        for comp in path.components() {
            let msg = match comp {
                Component::ParentDir => Some("parent directory '..' not allowed"),
                Component::Prefix(_) | Component::RootDir => Some("absolute paths not allowed"),
                _ => None,
            };
            if let Some(reason) = msg {
                // Only show index if there are multiple entries
                let prefix = if total > 1 {
                    format!("[{idx}] ")
                } else {
                    String::new()
                };
                diag.error(field, format!("{prefix}path '{}': {reason}", path.display()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let config: BundleConfig = toml::from_str(
            r#"
            output = "public"
            entries = ["index.html", "guide.html"]
            files = ["_redirects"]
            dirs = ["images", "archives"]
            "#,
        )
        .unwrap();

        assert_eq!(config.output, PathBuf::from("public"));
        assert_eq!(config.entries.len(), 2);
        assert_eq!(config.files, vec![PathBuf::from("_redirects")]);
        assert_eq!(config.dirs.len(), 2);
    }

    #[test]
    fn test_unsafe_paths_rejected() {
        let config = BundleConfig {
            files: vec!["../secret.txt".into(), "ok.css".into()],
            dirs: vec!["/etc".into()],
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate_paths(&mut diag);

        assert_eq!(diag.len(), 2);
        assert!(diag.errors()[0].message.starts_with("[0] path '../secret.txt'"));
        assert!(diag.errors()[1].message.contains("absolute paths not allowed"));
    }

    #[test]
    fn test_normalize_output_only() {
        let mut config = BundleConfig {
            files: vec!["a.css".into()],
            ..Default::default()
        };
        config.normalize(Path::new("/site"));
        assert_eq!(config.output, PathBuf::from("/site/dist"));
        assert_eq!(config.files, vec![PathBuf::from("a.css")]);
    }
}
