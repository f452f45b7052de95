//! Read-only diagnostics over the document text.
//!
//! - [`ScanReport`] - page count against the target, asset references,
//!   known problem patterns and leftover defects
//! - [`pages`] - page-by-page breakdown for planning merges

pub mod pages;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::config::ScanConfig;
use crate::rewrite::{unwrap::count_strippable, width::residual_oversized};

// ============================================================================
// Problem patterns
// ============================================================================

/// A named pattern whose matches count as problems.
///
/// The pattern finds candidate tags, which stands in for lookahead.
/// `require` is tested against the rest of the line after the tag, so the
/// tag's own attributes cannot satisfy it. `reject` is tested against the
/// tag plus the rest of its line.
#[derive(Debug)]
pub struct ProblemCheck {
    pub name: &'static str,
    pattern: Regex,
    require: Option<Regex>,
    reject: Option<Regex>,
}

impl ProblemCheck {
    /// Count every match that passes the line guards.
    pub fn count(&self, text: &str) -> usize {
        self.pattern
            .find_iter(text)
            .filter(|m| {
                let line_end = text[m.end()..].find('\n').map_or(text.len(), |i| m.end() + i);
                let after = &text[m.end()..line_end];
                let context = &text[m.start()..line_end];
                self.require.as_ref().is_none_or(|re| re.is_match(after))
                    && !self.reject.as_ref().is_some_and(|re| re.is_match(context))
            })
            .count()
    }
}

/// Checks in report order.
pub static PROBLEM_CHECKS: LazyLock<[ProblemCheck; 3]> = LazyLock::new(|| {
    [
        ProblemCheck {
            name: "Emergency section headers",
            pattern: Regex::new(r"(?i)<h[1-6][^>]*>").unwrap(),
            require: Some(Regex::new(r"(?i)emergency").unwrap()),
            reject: Some(Regex::new(r"page-break-before").unwrap()),
        },
        ProblemCheck {
            name: "Tables without break protection",
            pattern: Regex::new(r"(?i)<table[^>]*>").unwrap(),
            require: None,
            reject: Some(Regex::new(r"page-break-inside:\s*avoid").unwrap()),
        },
        ProblemCheck {
            name: "Empty pages",
            pattern: Regex::new(r"(?i)page \d+[^>]*>\s*</div>").unwrap(),
            require: None,
            reject: None,
        },
    ]
});

// ============================================================================
// Report
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ReferenceStatus {
    pub label: String,
    pub file: String,
    pub referenced: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProblemCount {
    pub name: &'static str,
    pub count: usize,
}

/// Defects the rewriting commands should have removed.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Residual {
    pub oversized_widths: usize,
    pub strippable_decorations: usize,
}

/// Everything `scan` reports about one document.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub document: PathBuf,
    pub pages: usize,
    pub target_pages: usize,
    pub content_blocks: usize,
    pub overflow_warnings: usize,
    pub references: Vec<ReferenceStatus>,
    pub problems: Vec<ProblemCount>,
    pub residual: Residual,
}

impl ScanReport {
    pub fn build(document: &Path, text: &str, config: &ScanConfig) -> Self {
        Self {
            document: document.to_path_buf(),
            pages: count_pages(text, &config.page_marker),
            target_pages: config.target_pages,
            content_blocks: count_content_blocks(text, &config.content_marker),
            overflow_warnings: count_overflow_warnings(text, &config.overflow_keywords),
            references: check_references(text, config),
            problems: scan_problem_patterns(text),
            residual: Residual {
                oversized_widths: residual_oversized(text),
                strippable_decorations: count_strippable(text),
            },
        }
    }

    pub fn fits(&self) -> bool {
        self.pages <= self.target_pages
    }

    /// One-line verdict on the page count.
    pub fn summary(&self) -> String {
        if self.fits() {
            format!(
                "Document fits in {} pages (target: {})",
                self.pages, self.target_pages
            )
        } else {
            format!(
                "Document has {} pages (exceeds target of {})",
                self.pages, self.target_pages
            )
        }
    }
}

pub fn count_pages(text: &str, page_marker: &str) -> usize {
    text.matches(page_marker).count()
}

pub fn count_content_blocks(text: &str, content_marker: &str) -> usize {
    text.matches(content_marker).count()
}

/// Case-insensitive occurrences of any keyword anywhere in the text.
pub fn count_overflow_warnings(text: &str, keywords: &[String]) -> usize {
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .map(|k| haystack.matches(k.to_lowercase().as_str()).count())
        .sum()
}

/// Whether each configured asset's filename appears in the text.
pub fn check_references(text: &str, config: &ScanConfig) -> Vec<ReferenceStatus> {
    config
        .references
        .iter()
        .map(|entry| ReferenceStatus {
            label: entry.label.clone(),
            file: entry.file.clone(),
            referenced: text.contains(&entry.file),
        })
        .collect()
}

pub fn scan_problem_patterns(text: &str) -> Vec<ProblemCount> {
    PROBLEM_CHECKS
        .iter()
        .map(|check| ProblemCount {
            name: check.name,
            count: check.count(text),
        })
        .collect()
}
