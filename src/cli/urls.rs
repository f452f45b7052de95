//! Urls command - unwrap break-all decorations from plain body text.

use anyhow::{Context, Result, bail};

use crate::config::FixConfig;
use crate::document::{Document, DocumentLock};
use crate::log;
use crate::logger::mark;
use crate::rewrite::unwrap::unwrap_decorations;
use crate::utils::plural_count;
use crate::utils::state::is_shutdown;

/// Run the urls command
pub fn run_urls(config: &FixConfig, dry: bool) -> Result<()> {
    let path = &config.document.path;
    let display = config.root_relative(path);
    let _lock = (!dry).then(|| DocumentLock::acquire(path)).transpose()?;

    let mut document = Document::read(path)?;
    let unwrapped = unwrap_decorations(document.text())
        .with_context(|| format!("cannot correct URL wrapping in `{}`", display.display()))?;
    let stripped = unwrapped.stripped;

    log!("urls"; "{} stripped", plural_count(stripped, "decoration"));
    if dry {
        log!("urls"; "dry run, {} not written", display.display());
    } else if document.set_text(unwrapped.text) {
        if is_shutdown() {
            bail!("interrupted, {} left unchanged", display.display());
        }
        document.write()?;
        log!("urls"; "wrote {}", display.display());
    } else {
        log!("urls"; "{} already clean", display.display());
    }

    println!(
        "{} URL and email decorations kept, {} plain-text {} unwrapped",
        mark(true),
        stripped,
        if stripped == 1 { "span" } else { "spans" }
    );
    Ok(())
}
