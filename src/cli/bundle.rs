//! Bundle command - copy entry documents and assets to the output directory.

use anyhow::{Context, Result};

use crate::config::FixConfig;
use crate::export::bundle::{BundleItem, copy_bundle, plan_bundle};
use crate::log;
use crate::utils::plural_count;

/// Run the bundle command
pub fn run_bundle(config: &FixConfig, dry: bool) -> Result<()> {
    let root = config.get_root();
    let output = &config.bundle.output;
    let items = plan_bundle(
        root,
        output,
        &config.bundle_entries(),
        &config.bundle.files,
        &config.bundle.dirs,
    );

    if dry {
        for item in &items {
            let state = if item.source.exists() { "" } else { " (missing, skipped)" };
            log!("bundle"; "{} {} -> {}{state}", item.kind.as_str(), relative(config, item), config.root_relative(&item.target).display());
        }
        return Ok(());
    }

    let summary = copy_bundle(&items, output)
        .with_context(|| format!("failed to bundle into `{}`", output.display()))?;

    for item in &summary.skipped {
        log!("bundle"; "skipping missing {} {}", item.kind.as_str(), relative(config, item));
    }
    log!(
        "bundle";
        "copied {} to {}",
        plural_count(summary.copied, "file"),
        config.root_relative(output).display()
    );
    Ok(())
}

fn relative(config: &FixConfig, item: &BundleItem) -> String {
    config.root_relative(&item.source).display().to_string()
}
