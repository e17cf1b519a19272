//! Shared test fixtures.
//!
//! Builders for listing records used across module tests. Only compiled for
//! tests (`#[cfg(test)]` in lib.rs).

use crate::listing::{GalleryImage, Listing, Status};

/// A fully-populated listing with two gallery images, keyed by `slug`.
pub(crate) fn sample_listing(slug: &str, status: Status) -> Listing {
    Listing {
        slug: slug.to_string(),
        name: format!("Listing {slug}"),
        price: "$775".to_string(),
        main_image: format!("/images/{slug}-1080.jpg"),
        thumb_image: format!("/images/{slug}-500.jpg"),
        gallery_images: vec![
            GalleryImage {
                image: format!("/images/{slug}-1080.jpg"),
            },
            GalleryImage {
                image: format!("/images/{slug}-800.jpg"),
            },
        ],
        overview: "Spacious area perfect for creative work.".to_string(),
        status,
        date: "2025-10-29T20:39:29Z".parse().unwrap(),
        filename: format!("{slug}.md"),
    }
}

/// A store-shaped markdown document for `slug`, as the seed step writes it.
pub(crate) fn sample_document(slug: &str) -> String {
    crate::record::to_document(&sample_listing(slug, Status::Available))
}
