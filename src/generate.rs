//! Page generation: bind data into page shells and write `dist/`.
//!
//! The site's real templates live outside this crate; the shells here
//! declare the same bindable regions and the same class vocabulary, so the
//! renderers exercise exactly the contract the live templates expose.
//!
//! ## Generated Pages
//!
//! - `listings.html` — the grid page: available spaces plus the leased
//!   strip, both rendered by [`ListingRenderer`]
//! - `property-<slug>.html` — one detail page per listing, rendered by
//!   [`DetailRenderer`] driven with `property=<slug>` (the same query
//!   contract the live detail page resolves from its URL)
//!
//! Inputs are the materialized artifacts, not the Content Store — this
//! stage consumes what a deployed page would. A missing collection
//! document is a no-op with a log line, mirroring the materializer's
//! tolerant-of-missing-input policy.

use crate::config::SiteConfig;
use crate::detail::{DetailRenderer, region};
use crate::dom::Document;
use crate::grid::{AVAILABLE_CONTAINER, LEASED_CONTAINER, ListingRenderer};
use crate::materialize::Collection;
use crate::resolve::{ApiDocuments, DirFetcher, EmbeddedData, FallbackData, ListingResolver};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What one generate run wrote.
#[derive(Debug)]
pub struct GenerateReport {
    pub detail_pages: usize,
}

/// A grid page document with both listing containers.
pub fn listings_document() -> Document {
    Document::with_regions([AVAILABLE_CONTAINER, LEASED_CONTAINER])
}

/// A detail page document with every region the template exposes.
pub fn detail_document() -> Document {
    Document::with_regions([
        region::PAGE_TITLE,
        region::DOCUMENT_TITLE,
        region::MAIN_IMAGE,
        region::OVERVIEW,
        region::PRICE,
        region::GALLERY,
        region::GALLERY_EMPTY,
        region::META_DESCRIPTION,
        region::OG_TITLE,
        region::OG_DESCRIPTION,
        region::OG_IMAGE,
    ])
}

/// Generate all pages from the materialized artifacts. Returns `None` when
/// no collection document exists yet.
pub fn generate(
    api_dir: &Path,
    output_dir: &Path,
    config: &SiteConfig,
) -> Result<Option<GenerateReport>, GenerateError> {
    let collection_path = api_dir.join("listings.json");
    if !collection_path.is_file() {
        info!(path = %collection_path.display(), "no collection document, skipping page generation");
        return Ok(None);
    }

    let collection: Collection = serde_json::from_str(&fs::read_to_string(&collection_path)?)?;
    fs::create_dir_all(output_dir)?;

    // Grid page.
    let renderer = ListingRenderer::from_collection(&collection);
    let mut grid_doc = listings_document();
    renderer.render_available(&mut grid_doc, AVAILABLE_CONTAINER);
    renderer.render_leased(&mut grid_doc, LEASED_CONTAINER);
    fs::write(
        output_dir.join("listings.html"),
        listings_page(&grid_doc, config).into_string(),
    )?;

    // Detail pages, one renderer for the whole run.
    let resolvers: Vec<Box<dyn ListingResolver>> = vec![
        Box::new(EmbeddedData::from_listings(&collection.listings)),
        Box::new(ApiDocuments::new(Box::new(DirFetcher::new(api_dir)))),
        Box::new(FallbackData::default()),
    ];
    let detail = DetailRenderer::new(resolvers, config);

    let mut detail_pages = 0;
    for listing in &collection.listings {
        let mut doc = detail_document();
        match detail.run(&format!("property={}", listing.slug), &mut doc) {
            Ok(_) => detail_pages += 1,
            Err(err) => {
                // The error page was rendered into the document; write it
                // anyway so the broken link shows something.
                warn!(slug = %listing.slug, %err, "detail page fell into an error state");
            }
        }
        fs::write(
            output_dir.join(format!("property-{}.html", listing.slug)),
            detail_page(&doc, config).into_string(),
        )?;
    }

    info!(
        detail_pages,
        output = %output_dir.display(),
        "generated site pages"
    );

    Ok(Some(GenerateReport { detail_pages }))
}

// ============================================================================
// Page shells
// ============================================================================

/// The shared document frame.
fn base_document(title: &str, head_extra: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (PreEscaped(title.to_string())) }
                (head_extra)
            }
            body {
                (content)
            }
        }
    }
}

/// The grid page shell: both containers, bound or empty.
pub fn listings_page(doc: &Document, config: &SiteConfig) -> Markup {
    let content = html! {
        main class="spaces-page" {
            section class="available-spaces" {
                h2 { "Available Spaces" }
                div id=(AVAILABLE_CONTAINER) {
                    (PreEscaped(doc.markup(AVAILABLE_CONTAINER).unwrap_or_default().to_string()))
                }
            }
            section class="leased-spaces" {
                h2 { "Leased Spaces" }
                div id=(LEASED_CONTAINER) {
                    (PreEscaped(doc.markup(LEASED_CONTAINER).unwrap_or_default().to_string()))
                }
            }
        }
    };
    base_document(&config.site_name, html! {}, content)
}

/// The detail page shell. Unbound regions keep their `w-dyn-bind-empty`
/// placeholder class, the way the template ships them.
pub fn detail_page(doc: &Document, config: &SiteConfig) -> Markup {
    let title = doc
        .text(region::DOCUMENT_TITLE)
        .unwrap_or(&config.site_name)
        .to_string();

    let head_extra = html! {
        meta name="description" content=(PreEscaped(doc.text(region::META_DESCRIPTION).unwrap_or_default().to_string()));
        meta property="og:title" content=(PreEscaped(doc.text(region::OG_TITLE).unwrap_or_default().to_string()));
        meta property="og:description" content=(PreEscaped(doc.text(region::OG_DESCRIPTION).unwrap_or_default().to_string()));
        meta property="og:image" content=(PreEscaped(doc.text(region::OG_IMAGE).unwrap_or_default().to_string()));
    };

    let content = html! {
        main class="property-detail" {
            div class="page-title" {
                @match doc.text(region::PAGE_TITLE) {
                    Some(name) => { h1 { (PreEscaped(name.to_string())) } }
                    None => { h1 class="w-dyn-bind-empty" {} }
                }
            }
            div class="information-image" {
                @match doc.image(region::MAIN_IMAGE) {
                    Some((src, alt)) => { img src=(src) alt=(alt) class="cover-image"; }
                    None => { img alt="" class="cover-image w-dyn-bind-empty"; }
                }
            }
            div class="property-information" {
                div class="price-text" {
                    (PreEscaped(doc.text(region::PRICE).unwrap_or_default().to_string()))
                }
                div class="overview-data" {
                    @match doc.markup(region::OVERVIEW) {
                        Some(overview) => { div { (PreEscaped(overview.to_string())) } }
                        None => { div class="w-dyn-bind-empty" {} }
                    }
                }
            }
            div class="gallery-wrap-copy" {
                div class="gallery-images-copy" role="list" {
                    (PreEscaped(doc.markup(region::GALLERY).unwrap_or_default().to_string()))
                }
                div class="empty-state"
                    style=[doc.is_hidden(region::GALLERY_EMPTY).then_some("display:none")] {
                    div { "No gallery images." }
                }
            }
        }
    };

    base_document(&title, head_extra, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::Status;
    use crate::materialize;
    use crate::store;
    use crate::test_helpers::sample_listing;
    use chrono::Utc;
    use tempfile::TempDir;

    fn write_artifacts(tmp: &TempDir, listings: Vec<crate::listing::Listing>) {
        let content = tmp.path().join("content/listings");
        for listing in &listings {
            store::write(&content, listing).unwrap();
        }
        materialize::materialize(&content, &tmp.path().join("api"), &tmp.path().join("js"))
            .unwrap()
            .unwrap();
    }

    #[test]
    fn generate_writes_grid_and_detail_pages() {
        let tmp = TempDir::new().unwrap();
        write_artifacts(
            &tmp,
            vec![
                sample_listing("platform", Status::Available),
                sample_listing("annex", Status::Leased),
            ],
        );

        let report = generate(
            &tmp.path().join("api"),
            &tmp.path().join("dist"),
            &SiteConfig::default(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(report.detail_pages, 2);

        let grid = fs::read_to_string(tmp.path().join("dist/listings.html")).unwrap();
        assert!(grid.contains(r#"id="listing-platform""#));
        assert!(grid.contains("for-leased-space"));

        let detail = fs::read_to_string(tmp.path().join("dist/property-platform.html")).unwrap();
        assert!(detail.contains("<title>Listing platform - Lansdale Business Center</title>"));
        assert!(detail.contains("w-lightbox"));
        assert!(detail.contains(r#"style="display:none""#));
    }

    #[test]
    fn generate_without_artifacts_is_noop() {
        let tmp = TempDir::new().unwrap();
        let result = generate(
            &tmp.path().join("api"),
            &tmp.path().join("dist"),
            &SiteConfig::default(),
        )
        .unwrap();
        assert!(result.is_none());
        assert!(!tmp.path().join("dist").exists());
    }

    #[test]
    fn grid_page_with_no_leased_listings_shows_empty_state() {
        let tmp = TempDir::new().unwrap();
        write_artifacts(&tmp, vec![sample_listing("platform", Status::Available)]);

        generate(
            &tmp.path().join("api"),
            &tmp.path().join("dist"),
            &SiteConfig::default(),
        )
        .unwrap()
        .unwrap();

        let grid = fs::read_to_string(tmp.path().join("dist/listings.html")).unwrap();
        assert!(grid.contains("No leased properties found."));
    }

    #[test]
    fn detail_shell_renders_error_state_regions_only() {
        let collection = materialize::build_collection(&[], Utc::now());
        let resolvers: Vec<Box<dyn ListingResolver>> = vec![
            Box::new(EmbeddedData::from_listings(&collection.listings)),
            Box::new(FallbackData::new(vec![])),
        ];
        let renderer = DetailRenderer::new(resolvers, &SiteConfig::default());

        let mut doc = detail_document();
        renderer.run("property=ghost", &mut doc).unwrap_err();
        let page = detail_page(&doc, &SiteConfig::default()).into_string();

        assert!(page.contains("Property Not Found"));
        assert!(page.contains("w-dyn-bind-empty"));
        assert!(!page.contains(r#"style="display:none""#));
    }

    #[test]
    fn base_url_absolutizes_og_image() {
        let tmp = TempDir::new().unwrap();
        write_artifacts(&tmp, vec![sample_listing("platform", Status::Available)]);

        let config = SiteConfig {
            base_url: "https://lansdale.example".to_string(),
            ..SiteConfig::default()
        };
        generate(&tmp.path().join("api"), &tmp.path().join("dist"), &config)
            .unwrap()
            .unwrap();

        let detail = fs::read_to_string(tmp.path().join("dist/property-platform.html")).unwrap();
        assert!(detail.contains("https://lansdale.example/images/platform-1080.jpg"));
    }
}
