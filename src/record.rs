//! Record parsing: source rows and documents → normalized listings.
//!
//! Two paths produce the same [`Listing`] shape:
//!
//! - **Tabular**: one CSV row from the CMS export ([`from_row`]). Import
//!   assigns `status = available` and `date = now` unconditionally — the
//!   export carries neither.
//! - **Document**: one Content Store file ([`from_document`]) — a leading
//!   `---`-delimited YAML frontmatter block and a trailing free-text body.
//!   The body (trimmed) becomes `overview`. The slug comes from the
//!   filename stem, never from metadata.
//!
//! [`to_document`] writes the store shape back out; the two directions
//! round-trip. Validation happens here, at the parse boundary: a record
//! that fails is rejected whole rather than propagating half-empty fields
//! downstream. Callers log individual failures and keep going — one bad
//! record never aborts a batch.

use crate::listing::{GalleryImage, Listing, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("document has no frontmatter block")]
    MissingFrontmatter,
    #[error("frontmatter block is not closed")]
    UnclosedFrontmatter,
    #[error("frontmatter error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// One row of the CMS tabular export, keyed by its column headers.
#[derive(Debug, Deserialize)]
pub struct Row {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Price", default)]
    pub price: String,
    #[serde(rename = "Overview", default)]
    pub overview: String,
    #[serde(rename = "Main Image", default)]
    pub main_image: String,
    #[serde(rename = "Thumb Image", default)]
    pub thumb_image: String,
    /// Comma-joined path list within a single cell.
    #[serde(rename = "Gallery Images", default)]
    pub gallery_images: String,
}

/// The metadata block of a store document. Everything except `slug`
/// (filename-derived) and `overview` (the body).
#[derive(Debug, Serialize, Deserialize)]
struct FrontMatter {
    name: String,
    price: String,
    main_image: String,
    thumb_image: String,
    #[serde(default)]
    gallery_images: Vec<GalleryImage>,
    status: Status,
    date: DateTime<Utc>,
}

/// Normalize one tabular row into a listing.
///
/// The slug is derived from `Name`; an empty name is rejected because the
/// record would have no key.
pub fn from_row(row: &Row, imported_at: DateTime<Utc>) -> Result<Listing, RecordError> {
    let name = row.name.trim();
    if name.is_empty() {
        return Err(RecordError::MissingField("Name"));
    }

    let slug = crate::slug::slugify(name);
    if slug.is_empty() {
        return Err(RecordError::MissingField("Name"));
    }

    let gallery_images = row
        .gallery_images
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| GalleryImage {
            image: p.to_string(),
        })
        .collect();

    Ok(Listing {
        filename: format!("{slug}.md"),
        slug,
        name: name.to_string(),
        price: row.price.trim().to_string(),
        main_image: row.main_image.trim().to_string(),
        thumb_image: row.thumb_image.trim().to_string(),
        gallery_images,
        overview: row.overview.trim().to_string(),
        status: Status::Available,
        date: imported_at,
    })
}

/// Parse one store document into a listing. `slug` is the filename stem.
pub fn from_document(slug: &str, content: &str) -> Result<Listing, RecordError> {
    let (yaml, body) = split_frontmatter(content)?;
    let meta: FrontMatter = serde_yaml::from_str(yaml)?;

    Ok(Listing {
        slug: slug.to_string(),
        name: meta.name,
        price: meta.price,
        main_image: meta.main_image,
        thumb_image: meta.thumb_image,
        gallery_images: meta.gallery_images,
        overview: body.trim().to_string(),
        status: meta.status,
        date: meta.date,
        filename: format!("{slug}.md"),
    })
}

/// Serialize a listing into the store document shape.
pub fn to_document(listing: &Listing) -> String {
    let meta = FrontMatter {
        name: listing.name.clone(),
        price: listing.price.clone(),
        main_image: listing.main_image.clone(),
        thumb_image: listing.thumb_image.clone(),
        gallery_images: listing.gallery_images.clone(),
        status: listing.status,
        date: listing.date,
    };
    // FrontMatter has no map keys that can fail to serialize.
    let yaml = serde_yaml::to_string(&meta).unwrap_or_default();
    format!("---\n{yaml}---\n\n{}\n", listing.overview)
}

/// Split a document into its YAML frontmatter and body.
///
/// The block must open at the first line and close at the next `---` line;
/// later `---` occurrences belong to the body.
fn split_frontmatter(content: &str) -> Result<(&str, &str), RecordError> {
    let rest = content
        .strip_prefix("---\n")
        .ok_or(RecordError::MissingFrontmatter)?;

    let Some(end) = rest.find("\n---") else {
        return Err(RecordError::UnclosedFrontmatter);
    };
    let yaml = &rest[..end + 1];

    let after = &rest[end + 4..];
    // The closing delimiter line may end the file or be followed by the body.
    let body = match after.strip_prefix('\n') {
        Some(body) => body,
        None if after.is_empty() => after,
        None => return Err(RecordError::UnclosedFrontmatter),
    };

    Ok((yaml, body))
}
