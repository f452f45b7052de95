//! Regex rewrite rules over raw document text.
//!
//! A [`RewriteRule`] is a named pattern plus a replacement function. A
//! [`Pipeline`] applies rules in order, each one over the buffer the previous
//! rule produced, and keeps a per-rule count of matches that actually changed.
//!
//! - [`width`] - oversized width declarations
//! - [`unwrap`] - break-all decorations around non-URL text

pub mod unwrap;
pub mod width;

use std::borrow::Cow;

use regex::{Captures, Regex};

/// Computes the replacement for one match. `None` keeps the match verbatim.
pub type RewriteFn = fn(&Captures<'_>) -> Option<String>;

/// One named, independently testable rewrite.
#[derive(Debug)]
pub struct RewriteRule {
    pub name: &'static str,
    pub pattern: Regex,
    rewrite: RewriteFn,
}

/// Result of applying one rule.
#[derive(Debug)]
pub struct Rewritten<'a> {
    pub text: Cow<'a, str>,
    /// Matches whose replacement differs from the matched text.
    pub changed: usize,
}

impl RewriteRule {
    pub fn new(name: &'static str, pattern: Regex, rewrite: RewriteFn) -> Self {
        Self {
            name,
            pattern,
            rewrite,
        }
    }

    /// Rewrite every match in `text`.
    ///
    /// Borrows the input unchanged when no match differs from its replacement.
    pub fn apply<'a>(&self, text: &'a str) -> Rewritten<'a> {
        let mut changed = 0;
        let mut out: Option<String> = None;
        let mut last = 0;

        for caps in self.pattern.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            let Some(replacement) = (self.rewrite)(&caps) else {
                continue;
            };
            if replacement == whole.as_str() {
                continue;
            }

            let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
            buf.push_str(&text[last..whole.start()]);
            buf.push_str(&replacement);
            last = whole.end();
            changed += 1;
        }

        let text = match out {
            Some(mut buf) => {
                buf.push_str(&text[last..]);
                Cow::Owned(buf)
            }
            None => Cow::Borrowed(text),
        };
        Rewritten { text, changed }
    }

    /// Number of matches `apply` would change, without building the output.
    pub fn count(&self, text: &str) -> usize {
        self.pattern
            .captures_iter(text)
            .filter(|caps| {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                (self.rewrite)(caps).is_some_and(|r| r != whole)
            })
            .count()
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Ordered rules sharing one buffer.
#[derive(Debug)]
pub struct Pipeline<'r> {
    rules: &'r [RewriteRule],
}

/// Per-rule counts of one pipeline run.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub text: String,
    pub counts: Vec<(&'static str, usize)>,
}

impl PipelineOutcome {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

impl<'r> Pipeline<'r> {
    pub fn new(rules: &'r [RewriteRule]) -> Self {
        Self { rules }
    }

    pub fn run(&self, text: &str) -> PipelineOutcome {
        let mut buffer = text.to_owned();
        let mut counts = Vec::with_capacity(self.rules.len());

        for rule in self.rules {
            let Rewritten { text, changed } = rule.apply(&buffer);
            if let Cow::Owned(next) = text {
                buffer = next;
            }
            counts.push((rule.name, changed));
        }

        PipelineOutcome {
            text: buffer,
            counts,
        }
    }
}
