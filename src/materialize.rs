//! API materialization: Content Store → JSON artifacts + data module.
//!
//! Reads every record and writes three kinds of artifact:
//!
//! - `api/listings.json` — the collection document: all listings plus the
//!   status partition and a build timestamp
//! - `api/<slug>.json` — one document per listing, with its related set
//! - `js/property-data.js` — the embeddable data module, a slug-keyed map
//!   of reduced projections assignable straight into a page
//!
//! Every build is a full rebuild: prior artifacts are overwritten
//! unconditionally, no diffing. An absent Content Store is a no-op with a
//! log line — this runs before content exists on fresh checkouts.

use crate::listing::{Listing, ListingSummary};
use crate::store::{self, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// How many related listings a detail document carries at most.
pub const MAX_RELATED: usize = 3;

#[derive(Error, Debug)]
pub enum MaterializeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// The collection document served as `listings.json`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Collection {
    pub listings: Vec<Listing>,
    pub total: usize,
    pub available: Vec<Listing>,
    pub leased: Vec<Listing>,
    pub generated: DateTime<Utc>,
}

/// One per-listing document served as `<slug>.json`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Detail {
    #[serde(flatten)]
    pub listing: Listing,
    pub related: Vec<Listing>,
}

/// What one materialize run produced.
#[derive(Debug)]
pub struct MaterializeReport {
    pub total: usize,
    pub available: usize,
    pub leased: usize,
}

/// Partition the store into the collection document.
pub fn build_collection(listings: &[Listing], generated: DateTime<Utc>) -> Collection {
    Collection {
        listings: listings.to_vec(),
        total: listings.len(),
        available: listings.iter().filter(|l| l.is_available()).cloned().collect(),
        leased: listings.iter().filter(|l| !l.is_available()).cloned().collect(),
        generated,
    }
}

/// Up to [`MAX_RELATED`] other available listings, in store order.
pub fn related(all: &[Listing], slug: &str) -> Vec<Listing> {
    all.iter()
        .filter(|l| l.slug != slug && l.is_available())
        .take(MAX_RELATED)
        .cloned()
        .collect()
}

/// One listing plus its cross-sell set.
pub fn build_detail(listing: &Listing, all: &[Listing]) -> Detail {
    Detail {
        listing: listing.clone(),
        related: related(all, &listing.slug),
    }
}

/// Serialize the embeddable data module: a `window.PROPERTY_DATA`
/// assignment over the slug-keyed reduced projections.
pub fn build_embedded_module(listings: &[Listing], generated: DateTime<Utc>) -> String {
    let map: BTreeMap<&str, ListingSummary> = listings
        .iter()
        .map(|l| (l.slug.as_str(), l.summary()))
        .collect();

    // BTreeMap keys serialize in slug order, so rebuilds are diffable.
    let json = serde_json::to_string_pretty(&map).unwrap_or_else(|_| "{}".to_string());

    format!(
        "// Auto-generated property data from CMS\n// Last updated: {}\n\nwindow.PROPERTY_DATA = {json};\n",
        generated.to_rfc3339()
    )
}

/// Run the full materialization. Returns `None` when the Content Store does
/// not exist yet.
pub fn materialize(
    content_dir: &Path,
    api_dir: &Path,
    js_dir: &Path,
) -> Result<Option<MaterializeReport>, MaterializeError> {
    let listings = match store::read_all(content_dir) {
        Ok(listings) => listings,
        Err(StoreError::Missing(path)) => {
            info!(path = %path.display(), "content store not found, skipping API generation");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let generated = Utc::now();
    fs::create_dir_all(api_dir)?;
    fs::create_dir_all(js_dir)?;

    let collection = build_collection(&listings, generated);
    fs::write(
        api_dir.join("listings.json"),
        serde_json::to_string_pretty(&collection)?,
    )?;

    for listing in &listings {
        let detail = build_detail(listing, &listings);
        fs::write(
            api_dir.join(format!("{}.json", listing.slug)),
            serde_json::to_string_pretty(&detail)?,
        )?;
    }

    fs::write(
        js_dir.join("property-data.js"),
        build_embedded_module(&listings, generated),
    )?;

    info!(
        total = collection.total,
        available = collection.available.len(),
        leased = collection.leased.len(),
        "materialized API artifacts"
    );

    Ok(Some(MaterializeReport {
        total: collection.total,
        available: collection.available.len(),
        leased: collection.leased.len(),
    }))
}
