//! Shared listing types used across the pipeline.
//!
//! These types are serialized at every boundary — YAML frontmatter in the
//! Content Store, JSON in the API artifacts, and the embedded data module —
//! and must stay identical across all stages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lease status of a listing. Exactly two values exist; a record must carry
/// one to be filterable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Available,
    Leased,
}

/// One gallery entry as stored in frontmatter and the API documents.
///
/// The CMS export wraps each path in a single-key map (`- image: "..."`),
/// so the stored shape is a list of these rather than bare strings. The
/// embedded data module flattens them (see [`ListingSummary`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub image: String,
}

/// One property record — the only entity in the pipeline.
///
/// `slug` is the primary key: it names the store file, the API document,
/// and the detail-page lookup. Gallery ordering is display order and is
/// preserved from source through to the rendered page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub slug: String,
    pub name: String,
    pub price: String,
    pub main_image: String,
    pub thumb_image: String,
    #[serde(default)]
    pub gallery_images: Vec<GalleryImage>,
    pub overview: String,
    pub status: Status,
    pub date: DateTime<Utc>,
    /// Source file name in the Content Store. Carried in the collection and
    /// per-listing documents, dropped from the embedded module.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub filename: String,
}

impl Listing {
    pub fn is_available(&self) -> bool {
        self.status == Status::Available
    }

    /// Reduced projection for the embedded data module and the detail
    /// renderer: no `filename`, gallery flattened to bare paths.
    pub fn summary(&self) -> ListingSummary {
        ListingSummary {
            slug: self.slug.clone(),
            name: self.name.clone(),
            price: self.price.clone(),
            main_image: self.main_image.clone(),
            thumb_image: self.thumb_image.clone(),
            gallery_images: self
                .gallery_images
                .iter()
                .map(|g| g.image.clone())
                .collect(),
            overview: self.overview.clone(),
            status: self.status,
            date: Some(self.date),
        }
    }
}

/// The slug-keyed projection embedded directly into detail pages.
///
/// Also the shape the detail renderer consumes, whatever resolver produced
/// it — the built-in fallback set carries no `date`, hence the `Option`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSummary {
    pub slug: String,
    pub name: String,
    pub price: String,
    pub main_image: String,
    pub thumb_image: String,
    #[serde(default)]
    pub gallery_images: Vec<String>,
    pub overview: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}
