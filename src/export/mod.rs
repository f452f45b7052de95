//! Outputs produced from the document without rewriting it.
//!
//! - [`pdf`] - first-pages snapshot through a headless browser
//! - [`bundle`] - entry documents and static assets copied to an output dir

pub mod bundle;
pub mod pdf;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::utils::exec::ExecError;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no headless browser found (tried {tried})")]
    BrowserNotFound { tried: String },

    #[error("cannot stage `{path}` for printing")]
    Staging {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Process(#[from] ExecError),

    #[error("browser finished but wrote nothing to `{0}`")]
    MissingOutput(PathBuf),

    #[error("cannot write `{path}`")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot copy `{from}` to `{to}`")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}
