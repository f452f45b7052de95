//! Document-level error types.

use std::path::PathBuf;
use thiserror::Error;

/// Failures reading, splitting or writing the document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("cannot {action} `{}`", .path.display())]
    FileAccess {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document: {0}")]
    Structural(String),

    #[error("`{}` is locked by another pagefix run (remove `{}` if that run is gone)", .document.display(), .lock.display())]
    Locked { document: PathBuf, lock: PathBuf },
}

impl DocumentError {
    pub(crate) fn access(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            action,
            path: path.into(),
            source,
        }
    }
}
