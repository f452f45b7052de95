//! Oversized width declarations.
//!
//! Percent widths of 100 or more are clamped to `100%`, and pixel max-widths
//! of 200 or more become `100%`. The bare `width:` rule also matches the
//! suffix of `min-width:`/`max-width:`, so it runs first and the
//! `min-width` rule only catches what it leaves behind.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{Pipeline, PipelineOutcome, RewriteRule};

/// Rules in application order.
pub static WIDTH_RULES: LazyLock<[RewriteRule; 3]> = LazyLock::new(|| {
    [
        RewriteRule::new(
            "width-percent",
            Regex::new(r"width:\s*([1-9]\d{2,})%").unwrap(),
            |caps| clamp_percent(caps, "width"),
        ),
        RewriteRule::new(
            "min-width-percent",
            Regex::new(r"min-width:\s*([1-9]\d{2,})%").unwrap(),
            |caps| clamp_percent(caps, "min-width"),
        ),
        RewriteRule::new(
            "max-width-pixels",
            Regex::new(r"max-width:\s*([2-9]\d{2,}|[1-9]\d{3,})px").unwrap(),
            |_| Some("max-width: 100%".to_string()),
        ),
    ]
});

// `100%` itself is already in range and is left as written.
fn clamp_percent(caps: &Captures<'_>, property: &str) -> Option<String> {
    (&caps[1] != "100").then(|| format!("{property}: 100%"))
}

/// Run every width rule over `text`.
pub fn normalize_widths(text: &str) -> PipelineOutcome {
    Pipeline::new(WIDTH_RULES.as_slice()).run(text)
}

/// `width: N%` declarations with N above 100 still present in `text`.
pub fn residual_oversized(text: &str) -> usize {
    WIDTH_RULES[0].count(text)
}
