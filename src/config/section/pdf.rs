//! `[pdf]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [pdf]
//! browser = "chromium"              # Optional, searched on PATH otherwise
//! output = "guide-first-pages.pdf"  # Relative to project root
//! pages = 10                        # Leading pages kept visible
//! timeout = 30                      # Overall limit in seconds
//! settle = 4000                     # Virtual time (ms) granted to page scripts
//! hooks = ["professionalComponents.applyAllEnhancements"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{ConfigDiagnostics, FieldPath};

/// Headless browser snapshot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Browser executable. `None` searches the usual Chromium names on PATH.
    pub browser: Option<String>,

    /// Output PDF path.
    pub output: PathBuf,

    /// Number of leading pages kept visible.
    pub pages: usize,

    /// Overall time limit in seconds.
    pub timeout: u64,

    /// Virtual time in milliseconds the browser grants page scripts before printing.
    pub settle: u64,

    /// In-page hooks called before printing, as `object.method`.
    /// Missing objects or methods are skipped.
    pub hooks: Vec<String>,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            browser: None,
            output: "guide-first-pages.pdf".into(),
            pages: 10,
            timeout: 30,
            settle: 4000,
            hooks: vec![
                "professionalComponents.applyAllEnhancements".into(),
                "finalTouches.applyFinalTouches".into(),
                "finalTouches.prepareForPDF".into(),
            ],
        }
    }
}

impl PdfConfig {
    const OUTPUT: FieldPath = FieldPath::new("pdf.output");
    const PAGES: FieldPath = FieldPath::new("pdf.pages");
    const TIMEOUT: FieldPath = FieldPath::new("pdf.timeout");
    const HOOKS: FieldPath = FieldPath::new("pdf.hooks");

    pub fn normalize(&mut self, root: &Path) {
        self.output = root.join(&self.output);
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Hooks split into `(object, method)` pairs. Invalid names are skipped
    /// (validation already reported them).
    pub fn hook_calls(&self) -> impl Iterator<Item = (&str, &str)> {
        self.hooks.iter().filter_map(|h| split_hook(h))
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.output.as_os_str().is_empty() {
            diag.error(Self::OUTPUT, "output path is empty");
        }
        if self.pages == 0 {
            diag.error(Self::PAGES, "must be greater than 0");
        }
        if self.timeout == 0 {
            diag.error(Self::TIMEOUT, "must be greater than 0");
        } else if self.settle / 1000 >= self.timeout {
            diag.error_with_hint(
                Self::TIMEOUT,
                format!(
                    "{}s leaves no time after the {}ms settle budget",
                    self.timeout, self.settle
                ),
                "raise `pdf.timeout` or lower `pdf.settle`",
            );
        }
        for (i, hook) in self.hooks.iter().enumerate() {
            if split_hook(hook).is_none() {
                diag.error_with_hint(
                    Self::HOOKS,
                    format!("[{i}] `{hook}` is not an `object.method` name"),
                    "use JavaScript identifiers, e.g. `finalTouches.prepareForPDF`",
                );
            }
        }
    }
}

/// Split `object.method` into its parts when both are JavaScript identifiers.
fn split_hook(hook: &str) -> Option<(&str, &str)> {
    let (object, method) = hook.split_once('.')?;
    (is_identifier(object) && is_identifier(method)).then_some((object, method))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
