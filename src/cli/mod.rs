//! Command-line interface module.

mod args;
pub mod analyze;
pub mod bundle;
pub mod pdf;
pub mod scan;
pub mod urls;
pub mod widths;

pub use args::{Cli, Commands};
