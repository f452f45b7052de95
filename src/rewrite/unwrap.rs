//! Break-all decorations around inline text.
//!
//! Long URLs and email addresses are wrapped in
//! `<span style="word-break: break-all;">` so they can break mid-word. Any
//! other text carrying the decoration is unwrapped back to its plain text.
//! Only the body region is touched.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::RewriteRule;
use crate::document::{DocumentError, Regions};

pub static DECORATION_RULE: LazyLock<RewriteRule> = LazyLock::new(|| {
    RewriteRule::new(
        "break-all-span",
        Regex::new(r#"<span style="word-break: break-all;">([^<]+)</span>"#).unwrap(),
        unwrap_non_link,
    )
});

fn unwrap_non_link(caps: &Captures<'_>) -> Option<String> {
    let inner = &caps[1];
    (!is_link_text(inner)).then(|| inner.to_string())
}

/// Text that legitimately needs the decoration.
fn is_link_text(text: &str) -> bool {
    text.contains("http://") || text.contains("https://") || text.contains('@')
}

/// The document with body decorations unwrapped.
#[derive(Debug)]
pub struct Unwrapped {
    pub text: String,
    pub stripped: usize,
}

/// Unwrap non-link decorations in the body of `text`.
///
/// The output is always reassembled as head, newline, body, even when
/// nothing was stripped.
pub fn unwrap_decorations(text: &str) -> Result<Unwrapped, DocumentError> {
    let regions = Regions::split(text)?;
    let body = DECORATION_RULE.apply(regions.body);
    Ok(Unwrapped {
        text: Regions::join(regions.head, &body.text),
        stripped: body.changed,
    })
}

/// Decorations an `unwrap_decorations` run would strip. Counts the whole
/// text when the document has no recognizable regions.
pub fn count_strippable(text: &str) -> usize {
    let scope = Regions::split(text).map_or(text, |r| r.body);
    DECORATION_RULE.count(scope)
}
