//! Small formatting helpers for reports.

/// `"s"` for every count except one.
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Count with noun: `plural_count(3, "rule")` -> `"3 rules"`.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

/// File size in mebibytes with two decimals, e.g. `"1.25 MB"`.
#[allow(clippy::cast_precision_loss)] // Display only
pub fn megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}
