//! Analyze command - page-by-page breakdown and merge estimate.

use anyhow::Result;

use crate::config::FixConfig;
use crate::document::Document;
use crate::logger::{mark, section, warn_mark};
use crate::scan::pages::{PageAnalysis, analyze_pages};

/// Run the analyze command
pub fn run_analyze(config: &FixConfig) -> Result<()> {
    let document = Document::read(&config.document.path)?;
    let analysis = analyze_pages(
        document.text(),
        &config.analyze,
        config.scan.target_pages,
    );

    print_pages(&analysis);
    print_issues(&analysis);
    print_estimate(&analysis);
    Ok(())
}

fn print_pages(analysis: &PageAnalysis) {
    println!("{}", section("Page-by-page Analysis"));
    println!("Page containers: {}", analysis.page_containers);

    for page in &analysis.pages {
        println!("\nPage {}:", page.number);
        println!("  Template: {}", page.template);
        println!("  Text length: {} chars", page.text_chars);
        println!("  Images: {}", page.images);
        println!("  Tables: {}", page.tables);
        println!("  Headings: {}", page.headings);
        if page.sparse {
            println!("  {} sparse page, candidate for merging", warn_mark());
        }
    }
}

fn print_issues(analysis: &PageAnalysis) {
    println!("\n{}", section("Specific Issues"));

    println!("Orphaned headings: {}", analysis.orphaned_headings.len());
    for heading in &analysis.orphaned_headings {
        println!("  - \"{heading}\"");
    }
    println!(
        "Elements with large spacing (20px+): {}",
        analysis.large_spacing
    );
}

fn print_estimate(analysis: &PageAnalysis) {
    println!("\n{}", section("Estimated Result"));
    println!("Current pages: {}", analysis.page_containers);
    println!("Sparse pages that can be merged: {}", analysis.sparse_pages);
    println!("Estimated final pages: {}", analysis.estimated_pages);

    if analysis.achievable() {
        println!(
            "{} target of {} pages is achievable",
            mark(true),
            analysis.target_pages
        );
    } else {
        println!(
            "{} need to remove {} more pages of content",
            warn_mark(),
            analysis.pages_over_target()
        );
    }
}
