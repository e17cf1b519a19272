//! Tabular import: CSV export → Content Store.
//!
//! Reseeds the store from the CMS's CSV export. The operation is
//! destructive by design: all prior records are cleared, then up to
//! [`MAX_RECORDS_PER_RUN`] rows are normalized and written. The cap is a
//! safety rail against accidentally importing a malformed thousand-row
//! export, not a business rule.
//!
//! When the export file is missing, a documented example CSV is written in
//! its place and then imported, so a fresh checkout produces a working
//! store on the first run.
//!
//! Failure policy: a row that fails to parse, or whose name slugifies to a
//! slug already written this run, is logged and skipped. The batch always
//! runs to completion.

use crate::record::{self, Row};
use crate::store::{self, StoreError};
use chrono::Utc;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Hard cap on records written per import run.
pub const MAX_RECORDS_PER_RUN: usize = 6;

/// Example export written when none exists, matching the CMS column layout.
const EXAMPLE_CSV: &str = r#"Name,Price,Overview,Main Image,Thumb Image,Gallery Images
Platform,$775,Spacious platform area perfect for creative work and storage,/images/Barn-Door-Slider-1-2025-p-1080.jpg,/images/Barn-Door-Slider-1-2025-p-500.jpg,"/images/Barn-Door-Slider-1-2025-p-1080.jpg,/images/Barn-Door-Slider-1-2025-p-800.jpg"
PB-A Ground Level Shop Studio,$1335/mo,Ground level shop studio with excellent natural light and accessibility,/images/All-smiles---almost-p-1080.jpg,/images/All-smiles---almost-p-500.jpg,"/images/All-smiles---almost-p-1080.jpg,/images/All-smiles---almost-p-800.jpg"
"(#112) First Floor Office",$485,Professional first floor office space ideal for small businesses,/images/023-p-1080.jpg,/images/023-p-500.jpg,"/images/023-p-1080.jpg,/images/023-p-800.jpg"
"#;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// What one import run did, for display and assertions.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Slugs written, in write order.
    pub created: Vec<String>,
    /// Rows skipped because the cap was already reached.
    pub over_cap: usize,
    /// Slugs that collided with an earlier row this run.
    pub collisions: Vec<String>,
    /// Rows that failed to parse.
    pub failures: usize,
    /// True when the example CSV was written because none existed.
    pub example_created: bool,
}

impl ImportReport {
    pub fn written(&self) -> usize {
        self.created.len()
    }
}

/// Reseed the Content Store from a CSV export.
///
/// Clears the store first, then writes one record per valid row up to the
/// cap. Returns what happened; only I/O-level failures are errors.
pub fn seed(csv_path: &Path, content_dir: &Path) -> Result<ImportReport, ImportError> {
    let mut report = ImportReport::default();

    if !csv_path.is_file() {
        info!(path = %csv_path.display(), "export not found, writing example CSV");
        if let Some(parent) = csv_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(csv_path, EXAMPLE_CSV)?;
        report.example_created = true;
    }

    let cleared = store::clear(content_dir)?;
    if cleared > 0 {
        info!(cleared, "cleared existing content store");
    }

    let imported_at = Utc::now();
    let mut seen = BTreeSet::new();
    let mut reader = csv::Reader::from_path(csv_path)?;

    for (index, result) in reader.deserialize::<Row>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(err) => {
                warn!(row = index + 1, %err, "skipping unparseable row");
                report.failures += 1;
                continue;
            }
        };

        let listing = match record::from_row(&row, imported_at) {
            Ok(listing) => listing,
            Err(err) => {
                warn!(row = index + 1, %err, "skipping invalid row");
                report.failures += 1;
                continue;
            }
        };

        if !seen.insert(listing.slug.clone()) {
            warn!(
                slug = %listing.slug,
                name = %listing.name,
                "slug collision, keeping the earlier record"
            );
            report.collisions.push(listing.slug);
            continue;
        }

        if report.written() >= MAX_RECORDS_PER_RUN {
            report.over_cap += 1;
            continue;
        }

        store::write(content_dir, &listing)?;
        report.created.push(listing.slug);
    }

    if report.over_cap > 0 {
        info!(
            cap = MAX_RECORDS_PER_RUN,
            skipped = report.over_cap,
            "import cap reached"
        );
    }

    Ok(report)
}
