//! Config field path used by diagnostics.

use std::fmt;

/// Dotted path of a config field, e.g. `pdf.timeout`.
///
/// Each section declares its paths as constants so diagnostics always name
/// a field that exists:
///
/// ```ignore
/// impl PdfConfig {
///     const TIMEOUT: FieldPath = FieldPath::new("pdf.timeout");
/// }
///
/// diag.error(PdfConfig::TIMEOUT, "must be greater than 0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.0)
    }
}
