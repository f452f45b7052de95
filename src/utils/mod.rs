//! Utility modules shared by the commands.

pub mod exec;
mod fmt;
pub mod state;

pub use fmt::{megabytes, plural_count};
