//! Configuration section definitions.
//!
//! Each module corresponds to a section in `pagefix.toml`:
//!
//! | Module     | TOML Section               | Purpose                          |
//! |------------|----------------------------|----------------------------------|
//! | `document` | `[document]`               | Target HTML document             |
//! | `scan`     | `[scan]`, `[analyze]`      | Diagnostic markers and limits    |
//! | `pdf`      | `[pdf]`                    | Headless browser snapshot        |
//! | `bundle`   | `[bundle]`                 | Asset manifest copied on build   |

mod bundle;
mod document;
mod pdf;
mod scan;

pub use bundle::BundleConfig;
pub use document::DocumentConfig;
pub use pdf::PdfConfig;
pub use scan::{AnalyzeConfig, ScanConfig};
