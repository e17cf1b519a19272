//! The Content Store: one markdown file per listing.
//!
//! A single flat directory holds the normalized records between build runs
//! (`<slug>.md`, YAML frontmatter + overview body). It is the source of
//! truth the materializer reads and the seed step rebuilds.
//!
//! ## Conventions
//!
//! - The filename stem IS the slug. Nothing else names a record.
//! - Enumeration is sorted by slug, so every build sees the same order on
//!   every platform. Derived artifacts (related listings, grid order)
//!   inherit this order.
//! - A record that fails to parse is logged and skipped; the rest of the
//!   store still loads.
//!
//! ## Reseeding
//!
//! [`clear`] deletes every record file, and the import step writes the new
//! set. There is no transactional guarantee — a crash mid-reseed leaves the
//! store empty or partial. The store only ever feeds a rebuildable
//! pipeline, so the recovery path is simply running the import again.

use crate::listing::Listing;
use crate::record;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("content store not found: {0}")]
    Missing(PathBuf),
}

/// Read every record in the store, sorted by slug.
///
/// Malformed records are logged individually and skipped. An absent store
/// directory is `StoreError::Missing`, which callers with a
/// tolerant-of-missing-input policy downgrade to a no-op.
pub fn read_all(dir: &Path) -> Result<Vec<Listing>, StoreError> {
    if !dir.is_dir() {
        return Err(StoreError::Missing(dir.to_path_buf()));
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("md"))
                    .unwrap_or(false)
        })
        .collect();
    paths.sort();

    let mut listings = Vec::with_capacity(paths.len());
    for path in &paths {
        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let content = fs::read_to_string(path)?;
        match record::from_document(&slug, &content) {
            Ok(listing) => listings.push(listing),
            Err(err) => {
                warn!(file = %path.display(), %err, "skipping malformed record");
            }
        }
    }

    Ok(listings)
}

/// Write one record as `<slug>.md`, creating the store directory if needed.
///
/// An existing record with the same slug is overwritten — collision policy
/// is the import layer's job.
pub fn write(dir: &Path, listing: &Listing) -> Result<PathBuf, StoreError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.md", listing.slug));
    fs::write(&path, record::to_document(listing))?;
    Ok(path)
}

/// Delete every record file, returning how many were removed.
///
/// Non-record files (anything but `*.md`) are left alone. An absent
/// directory clears nothing and is not an error.
pub fn clear(dir: &Path) -> Result<usize, StoreError> {
    if !dir.is_dir() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_record = path.is_file()
            && path
                .extension()
                .map(|e| e.eq_ignore_ascii_case("md"))
                .unwrap_or(false);
        if is_record {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}
