//! The detail page renderer.
//!
//! One linear pass, no way back:
//!
//! 1. **Resolve identifier** — read the `property` query parameter.
//!    Absent → terminal [`DetailError::NotSpecified`].
//! 2. **Resolve record** — run the resolver chain (embedded map → per-slug
//!    document → built-in fallback). All miss → terminal
//!    [`DetailError::NotFound`].
//! 3. **Render** — bind seven independent regions of the page document:
//!    title (+ document title), main image, overview, price, gallery, and
//!    the SEO meta set. Each bind is guarded on its own; a region the
//!    template lacks is logged and skipped without touching its siblings.
//!
//! Terminal error states write a fixed user-visible message into the title
//! and overview regions only — gallery, price, and the rest stay exactly
//! as the template left them.

use crate::config::SiteConfig;
use crate::dom::Document;
use crate::listing::ListingSummary;
use crate::resolve::{ListingResolver, resolve_chain};
use maud::{PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Region ids the detail page template may expose.
pub mod region {
    pub const PAGE_TITLE: &str = "page-title";
    pub const DOCUMENT_TITLE: &str = "document-title";
    pub const MAIN_IMAGE: &str = "information-image";
    pub const OVERVIEW: &str = "overview-data";
    pub const PRICE: &str = "price-text";
    pub const GALLERY: &str = "gallery-images";
    pub const GALLERY_EMPTY: &str = "gallery-empty-state";
    pub const META_DESCRIPTION: &str = "meta-description";
    pub const OG_TITLE: &str = "og-title";
    pub const OG_DESCRIPTION: &str = "og-description";
    pub const OG_IMAGE: &str = "og-image";
}

/// Meta description truncation length, in characters.
const META_DESCRIPTION_LEN: usize = 150;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DetailError {
    #[error("No property specified")]
    NotSpecified,
    #[error("Property not found")]
    NotFound,
}

/// Binds one resolved listing into a detail page document.
pub struct DetailRenderer {
    resolvers: Vec<Box<dyn ListingResolver>>,
    site_name: String,
    base_url: String,
}

impl DetailRenderer {
    pub fn new(resolvers: Vec<Box<dyn ListingResolver>>, config: &SiteConfig) -> Self {
        Self {
            resolvers,
            site_name: config.site_name.clone(),
            base_url: config.base_url.clone(),
        }
    }

    /// Run the full pass against a query string like `property=platform`.
    ///
    /// On a terminal error the fixed message is already rendered into the
    /// document; the caller only decides what to do with the page.
    pub fn run(&self, query: &str, doc: &mut Document) -> Result<ListingSummary, DetailError> {
        let Some(slug) = query_param(query, "property").filter(|s| !s.is_empty()) else {
            self.render_error(doc, &DetailError::NotSpecified);
            return Err(DetailError::NotSpecified);
        };

        let Some(listing) = resolve_chain(&self.resolvers, &slug) else {
            self.render_error(doc, &DetailError::NotFound);
            return Err(DetailError::NotFound);
        };

        self.render(doc, &listing);
        Ok(listing)
    }

    /// Bind all regions for a resolved listing. Every bind is guarded
    /// independently.
    fn render(&self, doc: &mut Document, listing: &ListingSummary) {
        let document_title = format!("{} - {}", listing.name, self.site_name);

        bind(doc, region::PAGE_TITLE, |d| {
            d.set_text(region::PAGE_TITLE, &listing.name)
        });
        bind(doc, region::DOCUMENT_TITLE, |d| {
            d.set_text(region::DOCUMENT_TITLE, &document_title)
        });
        bind(doc, region::MAIN_IMAGE, |d| {
            d.set_image(region::MAIN_IMAGE, &listing.main_image, &listing.name)
        });
        bind(doc, region::OVERVIEW, |d| {
            d.set_markup(region::OVERVIEW, overview_html(&listing.overview))
        });
        bind(doc, region::PRICE, |d| {
            d.set_text(region::PRICE, &listing.price)
        });

        self.render_gallery(doc, listing);

        bind(doc, region::META_DESCRIPTION, |d| {
            d.set_text(
                region::META_DESCRIPTION,
                &meta_description(&listing.name, &listing.overview),
            )
        });
        bind(doc, region::OG_TITLE, |d| {
            d.set_text(region::OG_TITLE, &document_title)
        });
        bind(doc, region::OG_DESCRIPTION, |d| {
            d.set_text(region::OG_DESCRIPTION, &listing.overview)
        });
        bind(doc, region::OG_IMAGE, |d| {
            d.set_text(
                region::OG_IMAGE,
                &format!("{}{}", self.base_url, listing.main_image),
            )
        });
    }

    /// Gallery entries in source order. The "no gallery" placeholder is
    /// hidden only when at least one image actually rendered.
    fn render_gallery(&self, doc: &mut Document, listing: &ListingSummary) {
        if listing.gallery_images.is_empty() {
            return;
        }

        let fragment = html! {
            @for (index, src) in listing.gallery_images.iter().enumerate() {
                (gallery_item(src, &listing.name, index))
            }
        };

        let rendered = bind(doc, region::GALLERY, |d| d.set_markup(region::GALLERY, fragment));
        if rendered {
            doc.hide(region::GALLERY_EMPTY);
        }
    }

    /// Terminal states touch the title and overview regions only.
    fn render_error(&self, doc: &mut Document, error: &DetailError) {
        bind(doc, region::PAGE_TITLE, |d| {
            d.set_text(region::PAGE_TITLE, "Property Not Found")
        });
        let message = error.to_string();
        bind(doc, region::OVERVIEW, |d| {
            d.set_markup(region::OVERVIEW, html! { p { (message) } })
        });
    }
}

/// Guarded bind: a missing region is logged and skipped.
fn bind(doc: &mut Document, id: &str, op: impl FnOnce(&mut Document) -> bool) -> bool {
    let bound = op(doc);
    if !bound {
        warn!(region = id, "render target not found, skipping");
    }
    bound
}

/// One gallery entry with its lightbox descriptor.
fn gallery_item(src: &str, name: &str, index: usize) -> maud::Markup {
    let descriptor = json!({
        "items": [{ "url": src, "originalUrl": src }],
        "group": "Gallery",
    });

    html! {
        div class="gallery-inner w-dyn-item" role="listitem" {
            a href=(src) class="gallery-image w-inline-block w-lightbox" {
                img src=(src) loading="lazy"
                    alt={ (name) " - Gallery Image " (index + 1) }
                    class="cover-image";
                script type="application/json" class="w-json" {
                    (PreEscaped(descriptor.to_string()))
                }
            }
        }
    }
}

/// Overview markdown → HTML paragraphs.
fn overview_html(overview: &str) -> maud::Markup {
    let parser = Parser::new(overview);
    let mut body = String::new();
    md_html::push_html(&mut body, parser);
    PreEscaped(body)
}

/// `"{name} - {overview truncated to 150 chars}..."`.
fn meta_description(name: &str, overview: &str) -> String {
    let truncated: String = overview.chars().take(META_DESCRIPTION_LEN).collect();
    format!("{name} - {truncated}...")
}

/// Extract one parameter from a query string (`a=1&b=2`, optional leading
/// `?`). Slugs are URL-safe by construction, so no percent-decoding.
pub fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.to_string())
}
