//! The listing grid renderer.
//!
//! Holds an ordered sequence of listings (store order) and renders card
//! fragments into a grid container region. Two views exist: available
//! spaces, and a leased strip capped at three cards — a presentation cap,
//! not a data constraint.
//!
//! Cards carry the class vocabulary of the site templates (`w-dyn-item`,
//! `property-card`, `cover-image`, ...) with a `leased` variant, and link
//! to `property-<slug>.html`. A missing container region is logged and
//! skipped; an empty filtered view renders the fixed empty-state fragment
//! rather than nothing.

use crate::dom::Document;
use crate::listing::Listing;
use crate::materialize::Collection;
use maud::{Markup, html};
use tracing::warn;

/// How many leased cards the grid shows at most.
pub const LEASED_DISPLAY_CAP: usize = 3;

/// Default container region ids, matching the grid page template.
pub const AVAILABLE_CONTAINER: &str = "available-listings-container";
pub const LEASED_CONTAINER: &str = "leased-listings-container";

/// Renders listing cards into grid containers.
#[derive(Debug, Default)]
pub struct ListingRenderer {
    listings: Vec<Listing>,
}

impl ListingRenderer {
    /// Direct assignment — embedded-data callers hand over their sequence.
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    /// Populate from a fetched collection document.
    pub fn from_collection(collection: &Collection) -> Self {
        Self::new(collection.listings.clone())
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Available listings, store order preserved.
    pub fn available(&self) -> Vec<&Listing> {
        self.listings.iter().filter(|l| l.is_available()).collect()
    }

    /// Leased listings, store order preserved, truncated for display.
    pub fn leased(&self) -> Vec<&Listing> {
        self.listings
            .iter()
            .filter(|l| !l.is_available())
            .take(LEASED_DISPLAY_CAP)
            .collect()
    }

    /// Render the available view into `container_id`.
    pub fn render_available(&self, doc: &mut Document, container_id: &str) {
        self.render_into(doc, container_id, &self.available(), false);
    }

    /// Render the leased view into `container_id`.
    pub fn render_leased(&self, doc: &mut Document, container_id: &str) {
        self.render_into(doc, container_id, &self.leased(), true);
    }

    fn render_into(&self, doc: &mut Document, container_id: &str, items: &[&Listing], leased: bool) {
        let fragment = if items.is_empty() {
            empty_state(if leased {
                "No leased properties found."
            } else {
                "No available properties found."
            })
        } else {
            card_list(items, leased)
        };

        if !doc.set_markup(container_id, fragment) {
            warn!(container = container_id, "grid container not found, skipping render");
        }
    }
}

/// The fixed fragment rendered when a filtered view is empty.
pub fn empty_state(message: &str) -> Markup {
    html! {
        div class="empty-state w-dyn-empty" {
            div { (message) }
        }
    }
}

/// The list wrapper around a run of cards.
fn card_list(items: &[&Listing], leased: bool) -> Markup {
    html! {
        div role="list" class={ "property-bottom " (if leased { "leased " } else { "" }) "w-dyn-items" } {
            @for listing in items {
                (property_card(listing, leased))
            }
        }
    }
}

/// One listing card: thumbnail, name, price, linking to the detail page.
pub fn property_card(listing: &Listing, leased: bool) -> Markup {
    let card_class = if leased {
        "property-card leased w-inline-block"
    } else {
        "property-card w-inline-block"
    };
    let image_class = if leased {
        "cover-image spaces-leased"
    } else {
        "cover-image on-spaces-page"
    };

    html! {
        div id={ "listing-" (listing.slug) } role="listitem"
            class={ "w-dyn-item" (if leased { " for-leased-space" } else { "" }) } {
            a href={ "property-" (listing.slug) ".html" } class=(card_class) {
                div class={ "property-card-top" (if leased { " leased" } else { "" }) } {
                    img src=(listing.thumb_image) loading="lazy" alt=(listing.name) class=(image_class);
                }
                div class="property-card-bottom" {
                    div class="property-card-data" {
                        div class="text-block-4" { (listing.name) }
                        div class="body-small" { (listing.price) }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::Status;
    use crate::test_helpers::sample_listing;

    fn grid_doc() -> Document {
        Document::with_regions([AVAILABLE_CONTAINER, LEASED_CONTAINER])
    }

    #[test]
    fn available_filter_is_stable_and_exact() {
        let renderer = ListingRenderer::new(vec![
            sample_listing("platform", Status::Available),
            sample_listing("x", Status::Leased),
        ]);

        let slugs: Vec<&str> = renderer.available().iter().map(|l| l.slug.as_str()).collect();
        assert_eq!(slugs, vec!["platform"]);
    }

    #[test]
    fn leased_filter_truncates_to_three() {
        let renderer = ListingRenderer::new(
            (1..=5).map(|i| sample_listing(&format!("unit-{i}"), Status::Leased)).collect(),
        );

        let slugs: Vec<&str> = renderer.leased().iter().map(|l| l.slug.as_str()).collect();
        assert_eq!(slugs, vec!["unit-1", "unit-2", "unit-3"]);
    }

    #[test]
    fn render_produces_one_card_per_listing() {
        let renderer = ListingRenderer::new(vec![
            sample_listing("platform", Status::Available),
            sample_listing("annex", Status::Available),
        ]);
        let mut doc = grid_doc();
        renderer.render_available(&mut doc, AVAILABLE_CONTAINER);

        let markup = doc.markup(AVAILABLE_CONTAINER).unwrap();
        assert!(markup.contains(r#"id="listing-platform""#));
        assert!(markup.contains(r#"id="listing-annex""#));
        assert!(markup.contains(r#"href="property-platform.html""#));
        assert!(markup.contains("$775"));
    }

    #[test]
    fn empty_view_renders_empty_state_fragment() {
        let renderer = ListingRenderer::new(vec![sample_listing("x", Status::Leased)]);
        let mut doc = grid_doc();
        renderer.render_available(&mut doc, AVAILABLE_CONTAINER);

        let markup = doc.markup(AVAILABLE_CONTAINER).unwrap();
        assert_eq!(
            markup,
            empty_state("No available properties found.").into_string()
        );
        assert!(markup.contains("w-dyn-empty"));
    }

    #[test]
    fn leased_cards_carry_leased_variants() {
        let renderer = ListingRenderer::new(vec![sample_listing("x", Status::Leased)]);
        let mut doc = grid_doc();
        renderer.render_leased(&mut doc, LEASED_CONTAINER);

        let markup = doc.markup(LEASED_CONTAINER).unwrap();
        assert!(markup.contains("for-leased-space"));
        assert!(markup.contains("property-card leased"));
        assert!(markup.contains("spaces-leased"));
        assert!(markup.contains("property-bottom leased w-dyn-items"));
    }

    #[test]
    fn available_cards_do_not_carry_leased_variants() {
        let renderer = ListingRenderer::new(vec![sample_listing("platform", Status::Available)]);
        let mut doc = grid_doc();
        renderer.render_available(&mut doc, AVAILABLE_CONTAINER);

        let markup = doc.markup(AVAILABLE_CONTAINER).unwrap();
        assert!(!markup.contains("leased"));
        assert!(markup.contains("on-spaces-page"));
    }

    #[test]
    fn missing_container_is_skipped_quietly() {
        let renderer = ListingRenderer::new(vec![sample_listing("platform", Status::Available)]);
        let mut doc = Document::with_regions([LEASED_CONTAINER]);
        // Must not panic, must not touch other regions.
        renderer.render_available(&mut doc, AVAILABLE_CONTAINER);
        assert!(doc.is_untouched(LEASED_CONTAINER));
    }

    #[test]
    fn card_markup_escapes_listing_text() {
        let mut listing = sample_listing("platform", Status::Available);
        listing.name = "<script>alert('xss')</script>".to_string();
        let card = property_card(&listing, false).into_string();

        assert!(!card.contains("<script>alert"));
        assert!(card.contains("&lt;script&gt;"));
    }

    #[test]
    fn cards_have_no_per_render_random_id() {
        let listing = sample_listing("platform", Status::Available);
        let first = property_card(&listing, false).into_string();
        let second = property_card(&listing, false).into_string();
        assert_eq!(first, second);
    }
}
