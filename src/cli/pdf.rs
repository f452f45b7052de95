//! Pdf command - snapshot the first pages through a headless browser.

use anyhow::{Context, Result};

use crate::config::FixConfig;
use crate::document::Document;
use crate::export::pdf::export_pdf;
use crate::log;
use crate::utils::{megabytes, plural_count};

/// Run the pdf command
pub fn run_pdf(config: &FixConfig) -> Result<()> {
    let path = &config.document.path;
    let document = Document::read(path)?;

    log!(
        "pdf";
        "printing the first {} of {}",
        plural_count(config.pdf.pages, "page"),
        config.root_relative(path).display()
    );

    let snapshot = export_pdf(&document, &config.pdf).context("PDF export failed")?;

    log!(
        "pdf";
        "wrote {} ({}) with {}",
        config.root_relative(&snapshot.output).display(),
        megabytes(snapshot.bytes),
        snapshot.browser.display()
    );
    Ok(())
}
