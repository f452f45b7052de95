//! Scan command - read-only page count and problem report.

use anyhow::{Context, Result};

use crate::config::FixConfig;
use crate::document::Document;
use crate::logger::{mark, section, warn_mark};
use crate::scan::ScanReport;
use crate::utils::plural_count;

/// Run the scan command
pub fn run_scan(config: &FixConfig, json: bool) -> Result<()> {
    let path = &config.document.path;
    let document = Document::read(path)?;
    let report = ScanReport::build(&config.root_relative(path), document.text(), &config.scan);

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{out}");
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &ScanReport) {
    println!("{}", section(&format!("Scan: {}", report.document.display())));
    println!("Pages: {}", report.pages);
    println!("Content blocks: {}", report.content_blocks);
    println!("Overflow warnings: {}", report.overflow_warnings);

    println!("\n{}", section("Asset References"));
    for reference in &report.references {
        let status = if reference.referenced {
            "referenced"
        } else {
            "not referenced"
        };
        println!(
            "{} {} ({}): {status}",
            mark(reference.referenced),
            reference.label,
            reference.file
        );
    }

    println!("\n{}", section("Problem Patterns"));
    for problem in &report.problems {
        if problem.count == 0 {
            println!("{} {}: none found", mark(true), problem.name);
        } else {
            println!("{} {}: {} found", warn_mark(), problem.name, problem.count);
        }
    }

    println!("\n{}", section("Residual Defects"));
    let residual = report.residual;
    print_residual(residual.oversized_widths, "oversized width", "pagefix widths");
    print_residual(
        residual.strippable_decorations,
        "break-all decoration",
        "pagefix urls",
    );

    println!("\n{}", section("Summary"));
    let verdict = if report.fits() { mark(true) } else { warn_mark() };
    println!("{verdict} {}", report.summary());
}

fn print_residual(count: usize, what: &str, fix: &str) {
    if count == 0 {
        println!("{} no {what}s left", mark(true));
    } else {
        println!("{} {} left (run `{fix}`)", warn_mark(), plural_count(count, what));
    }
}
