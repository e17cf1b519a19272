//! CLI output formatting for all pipeline stages.
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::import::{ImportReport, MAX_RECORDS_PER_RUN};
use crate::listing::Listing;

/// Seed stage summary.
///
/// ```text
/// Created: platform.md
/// Created: annex.md
/// Skipped 2 rows over the 6-record cap
/// Seeded 2 listings
/// ```
pub fn format_seed_report(report: &ImportReport) -> Vec<String> {
    let mut lines = Vec::new();

    if report.example_created {
        lines.push("Export not found — example CSV created. Update it with your actual data.".to_string());
    }
    for slug in &report.created {
        lines.push(format!("Created: {slug}.md"));
    }
    for slug in &report.collisions {
        lines.push(format!("Collision: a record for '{slug}' already exists, row skipped"));
    }
    if report.failures > 0 {
        lines.push(format!("Skipped {} unparseable row(s)", report.failures));
    }
    if report.over_cap > 0 {
        lines.push(format!(
            "Skipped {} row(s) over the {MAX_RECORDS_PER_RUN}-record cap",
            report.over_cap
        ));
    }
    lines.push(format!("Seeded {} listing(s)", report.written()));
    lines
}

/// Check stage summary: one line per record plus totals.
///
/// ```text
/// 001 Platform (available) — $775
/// 002 The Annex (leased) — $485
/// 2 listings: 1 available, 1 leased
/// ```
pub fn format_check_report(listings: &[Listing]) -> Vec<String> {
    let mut lines = Vec::new();

    for (index, listing) in listings.iter().enumerate() {
        let status = if listing.is_available() { "available" } else { "leased" };
        lines.push(format!(
            "{:0>3} {} ({status}) — {}",
            index + 1,
            listing.name,
            listing.price
        ));
    }

    let available = listings.iter().filter(|l| l.is_available()).count();
    lines.push(format!(
        "{} listing(s): {} available, {} leased",
        listings.len(),
        available,
        listings.len() - available
    ));
    lines
}

/// Materialize stage summary.
pub fn format_materialize_report(total: usize, available: usize, leased: usize) -> Vec<String> {
    vec![
        "Generated listings.json".to_string(),
        format!("Generated {total} per-listing document(s)"),
        "Generated property-data.js".to_string(),
        format!("{total} listing(s): {available} available, {leased} leased"),
    ]
}

/// Generate stage summary.
pub fn format_generate_report(detail_pages: usize) -> Vec<String> {
    vec![
        "Generated listings.html".to_string(),
        format!("Generated {detail_pages} detail page(s)"),
    ]
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
