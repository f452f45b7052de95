//! `[scan]` and `[analyze]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [scan]
//! target_pages = 20                     # Desired maximum page count
//! page_marker = 'class="page"'          # One occurrence per printable page
//! content_marker = 'class="page-content"'
//! overflow_keywords = ["overflow", "orphan", "widow"]
//! references = [
//!     { label = "Auto-pagination script", file = "auto-pagination.js" },
//! ]
//!
//! [analyze]
//! sparse_chars = 500                    # Pages with less text are merge candidates
//! merge_ratio = 0.7                     # Share of sparse pages expected to merge
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Diagnostic scanner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Desired maximum page count.
    pub target_pages: usize,

    /// Text marking one printable page.
    pub page_marker: String,

    /// Text marking one content section within a page.
    pub content_marker: String,

    /// Words counted (case-insensitive) as overflow warnings.
    pub overflow_keywords: Vec<String>,

    /// Asset files whose filename is expected somewhere in the document.
    pub references: Vec<ReferenceEntry>,
}

/// An asset the document should reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Human-readable name shown in the report.
    pub label: String,
    /// Filename searched for in the document text.
    pub file: String,
}

impl ReferenceEntry {
    pub fn new(label: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            file: file.into(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            target_pages: 20,
            page_marker: r#"class="page""#.into(),
            content_marker: r#"class="page-content""#.into(),
            overflow_keywords: vec!["overflow".into(), "orphan".into(), "widow".into()],
            references: vec![
                ReferenceEntry::new("Auto-pagination script", "auto-pagination.js"),
                ReferenceEntry::new("Pagination CSS fixes", "pagination-fixes.css"),
                ReferenceEntry::new("Dynamic fix script", "pagination-auto-fix.js"),
            ],
        }
    }
}

impl ScanConfig {
    const TARGET_PAGES: FieldPath = FieldPath::new("scan.target_pages");
    const PAGE_MARKER: FieldPath = FieldPath::new("scan.page_marker");
    const CONTENT_MARKER: FieldPath = FieldPath::new("scan.content_marker");
    const OVERFLOW_KEYWORDS: FieldPath = FieldPath::new("scan.overflow_keywords");
    const REFERENCES: FieldPath = FieldPath::new("scan.references");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.target_pages == 0 {
            diag.error(Self::TARGET_PAGES, "must be greater than 0");
        }
        if self.page_marker.is_empty() {
            diag.error(Self::PAGE_MARKER, "marker is empty");
        }
        if self.content_marker.is_empty() {
            diag.error(Self::CONTENT_MARKER, "marker is empty");
        }
        if self.overflow_keywords.iter().any(|k| k.trim().is_empty()) {
            diag.error(Self::OVERFLOW_KEYWORDS, "keywords must not be empty");
        }
        for (i, entry) in self.references.iter().enumerate() {
            if entry.file.trim().is_empty() {
                diag.error(
                    Self::REFERENCES,
                    format!("[{i}] '{}' has an empty file name", entry.label),
                );
            }
        }
    }
}

/// Page-by-page analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    /// Pages with fewer visible characters (and no images) are sparse.
    pub sparse_chars: usize,

    /// Expected share of sparse pages that can be merged away.
    pub merge_ratio: f64,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            sparse_chars: 500,
            merge_ratio: 0.7,
        }
    }
}

impl AnalyzeConfig {
    const MERGE_RATIO: FieldPath = FieldPath::new("analyze.merge_ratio");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !(0.0..=1.0).contains(&self.merge_ratio) {
            diag.error_with_hint(
                Self::MERGE_RATIO,
                format!("{} is outside 0.0..=1.0", self.merge_ratio),
                "0.7 assumes most sparse pages can be merged",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let mut diag = ConfigDiagnostics::new();
        ScanConfig::default().validate(&mut diag);
        AnalyzeConfig::default().validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_parse_partial_section() {
        let config: ScanConfig = toml::from_str(
            r#"
            target_pages = 12
            references = [{ label = "Polish", file = "final-polish.js" }]
            "#,
        )
        .unwrap();

        assert_eq!(config.target_pages, 12);
        assert_eq!(config.page_marker, r#"class="page""#);
        assert_eq!(
            config.references,
            vec![ReferenceEntry::new("Polish", "final-polish.js")]
        );
    }

    #[test]
    fn test_invalid_values_are_collected() {
        let config = ScanConfig {
            target_pages: 0,
            page_marker: String::new(),
            references: vec![ReferenceEntry::new("Nothing", " ")],
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 3);

        let analyze = AnalyzeConfig {
            merge_ratio: 1.5,
            ..Default::default()
        };
        analyze.validate(&mut diag);
        assert_eq!(diag.len(), 4);
    }
}
