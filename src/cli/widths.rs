//! Widths command - clamp oversized width declarations in place.

use anyhow::{Result, bail};

use crate::config::FixConfig;
use crate::document::{Document, DocumentLock};
use crate::log;
use crate::logger::{mark, warn_mark};
use crate::rewrite::width::{normalize_widths, residual_oversized};
use crate::utils::plural_count;
use crate::utils::state::is_shutdown;

/// Run the widths command
pub fn run_widths(config: &FixConfig, dry: bool) -> Result<()> {
    let path = &config.document.path;
    let display = config.root_relative(path);
    let _lock = (!dry).then(|| DocumentLock::acquire(path)).transpose()?;

    let mut document = Document::read(path)?;
    let outcome = normalize_widths(document.text());

    for (rule, count) in &outcome.counts {
        log!("widths"; "{rule}: {}", plural_count(*count, "rewrite"));
    }
    let total = outcome.total();
    let remaining = residual_oversized(&outcome.text);

    if dry {
        log!("widths"; "dry run, {} not written ({} total)", display.display(), plural_count(total, "rewrite"));
    } else if document.set_text(outcome.text) {
        if is_shutdown() {
            bail!("interrupted, {} left unchanged", display.display());
        }
        document.write()?;
        log!("widths"; "wrote {} ({} total)", display.display(), plural_count(total, "rewrite"));
    } else {
        log!("widths"; "{} already clean", display.display());
    }

    if remaining == 0 {
        println!("{} no oversized percentage widths remain", mark(true));
    } else {
        println!(
            "{} {} still above 100%",
            warn_mark(),
            plural_count(remaining, "width declaration")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentError;
    use std::fs;
    use tempfile::TempDir;

    const OVERSIZED: &str = "<html><head><style>.board { width: 500%; }</style></head>\n\
        <body><div style=\"width: 100%\"></div></body></html>";

    fn project(text: &str) -> (TempDir, FixConfig) {
        let dir = TempDir::new().unwrap();
        let mut config = FixConfig {
            root: dir.path().to_path_buf(),
            ..Default::default()
        };
        config.document.path = dir.path().join("guide.html");
        fs::write(&config.document.path, text).unwrap();
        (dir, config)
    }

    #[test]
    fn test_widths_rewrites_and_releases_lock() {
        let (dir, config) = project(OVERSIZED);
        run_widths(&config, false).unwrap();

        let text = fs::read_to_string(&config.document.path).unwrap();
        assert!(text.contains(".board { width: 100%; }"));
        assert!(!text.contains("500%"));
        assert_eq!(residual_oversized(&text), 0);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_widths_dry_run_writes_nothing() {
        let (dir, config) = project(OVERSIZED);
        run_widths(&config, true).unwrap();

        assert_eq!(fs::read_to_string(&config.document.path).unwrap(), OVERSIZED);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_widths_refuses_locked_document() {
        let (_dir, config) = project(OVERSIZED);
        let held = DocumentLock::acquire(&config.document.path).unwrap();

        let err = run_widths(&config, false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DocumentError>(),
            Some(DocumentError::Locked { .. })
        ));
        assert_eq!(fs::read_to_string(&config.document.path).unwrap(), OVERSIZED);
        drop(held);
    }
}
