//! Page-by-page breakdown used when planning pagination work.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::config::AnalyzeConfig;

/// Start of every page container; the text after each one is a page.
const PAGE_OPEN: &str = r#"<div class="page""#;

/// Template for pages without `data-template`.
const DEFAULT_TEMPLATE: &str = "content";

static RE_TEMPLATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-template="([^"]+)""#).unwrap());
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static RE_PAGE_CONTAINER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<div[^>]+class="page"[^>]*>"#).unwrap());
static RE_ORPHANED_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<h[1-6][^>]*>([^<]+)</h[1-6]>\s*</div>\s*</div>").unwrap()
});
static RE_LARGE_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"margin-(top|bottom):\s*[2-9]\d+px").unwrap());

#[derive(Debug, Clone, Serialize)]
pub struct PageInfo {
    /// 1-based position in the document.
    pub number: usize,
    pub template: String,
    /// Visible characters with tags stripped.
    pub text_chars: usize,
    pub images: usize,
    pub tables: usize,
    pub headings: usize,
    /// Little text and no images: a candidate for merging.
    pub sparse: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageAnalysis {
    pub pages: Vec<PageInfo>,
    /// `<div ... class="page" ...>` tags, regardless of attribute order.
    pub page_containers: usize,
    /// Heading text of headings left alone at the bottom of a page.
    pub orphaned_headings: Vec<String>,
    /// `margin-top`/`margin-bottom` of 20px or more.
    pub large_spacing: usize,
    pub sparse_pages: usize,
    pub estimated_pages: usize,
    pub target_pages: usize,
}

impl PageAnalysis {
    pub fn achievable(&self) -> bool {
        self.estimated_pages <= self.target_pages
    }

    /// Pages still over target after merging.
    pub fn pages_over_target(&self) -> usize {
        self.estimated_pages.saturating_sub(self.target_pages)
    }
}

pub fn analyze_pages(text: &str, config: &AnalyzeConfig, target_pages: usize) -> PageAnalysis {
    let pages: Vec<PageInfo> = text
        .split(PAGE_OPEN)
        .skip(1)
        .enumerate()
        .map(|(i, segment)| page_info(i + 1, segment, config.sparse_chars))
        .collect();

    let sparse_pages = pages.iter().filter(|p| p.sparse).count();
    let page_containers = RE_PAGE_CONTAINER.find_iter(text).count();
    let mergeable = (sparse_pages as f64 * config.merge_ratio).floor() as usize;

    PageAnalysis {
        orphaned_headings: RE_ORPHANED_HEADING
            .captures_iter(text)
            .map(|caps| caps[1].trim().to_string())
            .collect(),
        large_spacing: RE_LARGE_SPACING.find_iter(text).count(),
        estimated_pages: page_containers.saturating_sub(mergeable),
        page_containers,
        sparse_pages,
        target_pages,
        pages,
    }
}

fn page_info(number: usize, segment: &str, sparse_chars: usize) -> PageInfo {
    let template = RE_TEMPLATE
        .captures(segment)
        .map_or(DEFAULT_TEMPLATE.to_string(), |caps| caps[1].to_string());
    // The segment starts inside the container's open tag
    let content = segment.split_once('>').map_or(segment, |(_, rest)| rest);
    let text_chars = RE_TAG.replace_all(content, "").trim().chars().count();
    let images = segment.matches("<img").count();

    PageInfo {
        number,
        template,
        text_chars,
        images,
        tables: segment.matches("<table").count(),
        headings: count_heading_opens(segment),
        sparse: text_chars < sparse_chars && images == 0,
    }
}

fn count_heading_opens(segment: &str) -> usize {
    segment
        .match_indices("<h")
        .filter(|(i, _)| {
            segment
                .as_bytes()
                .get(i + 2)
                .is_some_and(|b| (b'1'..=b'6').contains(b))
        })
        .count()
}
