//! The document text and its on-disk lifecycle.
//!
//! Every command reads the whole document once, works on the in-memory
//! string, and (for rewriting commands) writes it back once. Writes go to a
//! temporary file in the same directory which then replaces the document, so
//! a failed run never leaves a half-written document.

mod error;
mod lock;

pub use error::DocumentError;
pub use lock::DocumentLock;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Closing marker of the head region.
pub const HEAD_END: &str = "</head>";

/// Opening marker of the body region. No `>`: the tag may carry attributes.
pub const BODY_START: &str = "<body";

/// The full text of one HTML file.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    text: String,
}

impl Document {
    /// Read the whole file as UTF-8.
    pub fn read(path: &Path) -> Result<Self, DocumentError> {
        let text = fs::read_to_string(path).map_err(|e| DocumentError::access("read", path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the in-memory text. Returns whether it differs from before.
    pub fn set_text(&mut self, text: String) -> bool {
        let changed = text != self.text;
        self.text = text;
        changed
    }

    /// Write the text back, replacing the file in one rename.
    pub fn write(&self) -> Result<(), DocumentError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        let mut staged = tempfile::Builder::new()
            .prefix(".pagefix-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| DocumentError::access("stage a write next to", &self.path, e))?;

        staged
            .write_all(self.text.as_bytes())
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|e| DocumentError::access("write", staged.path(), e))?;

        // Keep the document's permissions instead of the temp file's 0600
        if let Ok(meta) = fs::metadata(&self.path) {
            let _ = fs::set_permissions(staged.path(), meta.permissions());
        }

        staged
            .persist(&self.path)
            .map_err(|e| DocumentError::access("replace", &self.path, e.error))?;
        Ok(())
    }
}

// ============================================================================
// Head / body regions
// ============================================================================

/// The document split at the first `</head>` and the next `<body`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions<'a> {
    /// From the start through `</head>` inclusive.
    pub head: &'a str,
    /// From the first `<body` after the head to the end.
    pub body: &'a str,
}

impl<'a> Regions<'a> {
    /// Split `text`. Anything between `</head>` and `<body` is not part of
    /// either region. `<body` is only searched after the head closes, so
    /// head scripts and comments mentioning it are ignored.
    pub fn split(text: &'a str) -> Result<Self, DocumentError> {
        let head_end = text
            .find(HEAD_END)
            .map(|i| i + HEAD_END.len())
            .ok_or_else(|| {
                DocumentError::Structural(format!("missing head section (`{HEAD_END}`)"))
            })?;
        let body_start = text[head_end..]
            .find(BODY_START)
            .map(|i| head_end + i)
            .ok_or_else(|| {
                DocumentError::Structural(format!("missing body section (`{BODY_START}`)"))
            })?;

        Ok(Self {
            head: &text[..head_end],
            body: &text[body_start..],
        })
    }

    /// Reassemble as head, newline, body.
    pub fn join(head: &str, body: &str) -> String {
        let mut out = String::with_capacity(head.len() + 1 + body.len());
        out.push_str(head);
        out.push('\n');
        out.push_str(body);
        out
    }
}
