//! `[document]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [document]
//! path = "guide.html"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{ConfigDiagnostics, FieldPath};

/// The HTML document every command operates on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Path to the document (relative to project root).
    pub path: PathBuf,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: "guide.html".into(),
        }
    }
}

impl DocumentConfig {
    const PATH: FieldPath = FieldPath::new("document.path");

    pub fn normalize(&mut self, root: &Path) {
        self.path = root.join(&self.path);
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.path.as_os_str().is_empty() {
            diag.error(Self::PATH, "document path is empty");
        } else if self.path.is_dir() {
            diag.error(
                Self::PATH,
                format!("'{}' is a directory", self.path.display()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_and_normalize() {
        let mut config = DocumentConfig::default();
        config.normalize(Path::new("/site"));
        assert_eq!(config.path, PathBuf::from("/site/guide.html"));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = DocumentConfig {
            path: dir.path().to_path_buf(),
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }
}
