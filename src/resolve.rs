//! Listing resolution strategies for detail pages.
//!
//! A detail page resolves its record through an ordered list of resolvers,
//! each tried in sequence until one produces a result:
//!
//! 1. [`EmbeddedData`] — the slug-keyed map shipped with the page. The hot
//!    path; no I/O at all.
//! 2. [`ApiDocuments`] — the per-slug JSON document, fetched through a
//!    [`DocumentFetcher`]. The shipped fetcher reads the materialized
//!    `api/` directory; HTTP serving is an external collaborator, so the
//!    seam accepts any transport. Fetch failures and unparseable documents
//!    count as a miss, never an error.
//! 3. [`FallbackData`] — a small fixed set of known listings, so a
//!    detached page still renders something during development.
//!
//! Each resolver is independently testable; the chain is just first-some.

use crate::listing::{Listing, ListingSummary, Status};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// One strategy for turning a slug into a renderable record.
pub trait ListingResolver {
    /// Short name for log lines.
    fn name(&self) -> &'static str;

    fn resolve(&self, slug: &str) -> Option<ListingSummary>;
}

/// Try each resolver in order; first hit wins.
pub fn resolve_chain(resolvers: &[Box<dyn ListingResolver>], slug: &str) -> Option<ListingSummary> {
    for resolver in resolvers {
        if let Some(summary) = resolver.resolve(slug) {
            debug!(slug, resolver = resolver.name(), "resolved listing");
            return Some(summary);
        }
    }
    None
}

// ============================================================================
// Embedded data module
// ============================================================================

/// Lookup in the embedded data map — injected, never read from ambient
/// page state.
pub struct EmbeddedData {
    map: BTreeMap<String, ListingSummary>,
}

impl EmbeddedData {
    pub fn new(map: BTreeMap<String, ListingSummary>) -> Self {
        Self { map }
    }

    /// Build the map the way the materializer embeds it.
    pub fn from_listings(listings: &[Listing]) -> Self {
        Self::new(
            listings
                .iter()
                .map(|l| (l.slug.clone(), l.summary()))
                .collect(),
        )
    }
}

impl ListingResolver for EmbeddedData {
    fn name(&self) -> &'static str {
        "embedded"
    }

    fn resolve(&self, slug: &str) -> Option<ListingSummary> {
        self.map.get(slug).cloned()
    }
}

// ============================================================================
// Per-slug API documents
// ============================================================================

/// Transport seam for per-slug documents. `None` covers both transport
/// failure and a non-success response.
pub trait DocumentFetcher {
    fn fetch(&self, slug: &str) -> Option<String>;
}

/// Reads `<slug>.json` from the materialized API directory.
pub struct DirFetcher {
    dir: PathBuf,
}

impl DirFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DocumentFetcher for DirFetcher {
    fn fetch(&self, slug: &str) -> Option<String> {
        fs::read_to_string(self.dir.join(format!("{slug}.json"))).ok()
    }
}

/// Resolve through a fetched per-slug JSON document.
pub struct ApiDocuments {
    fetcher: Box<dyn DocumentFetcher>,
}

impl ApiDocuments {
    pub fn new(fetcher: Box<dyn DocumentFetcher>) -> Self {
        Self { fetcher }
    }
}

impl ListingResolver for ApiDocuments {
    fn name(&self) -> &'static str {
        "api"
    }

    fn resolve(&self, slug: &str) -> Option<ListingSummary> {
        let body = self.fetcher.fetch(slug)?;
        match serde_json::from_str::<Listing>(&body) {
            Ok(listing) => Some(listing.summary()),
            Err(err) => {
                warn!(slug, %err, "fetched document did not parse, treating as miss");
                None
            }
        }
    }
}

// ============================================================================
// Built-in fallback set
// ============================================================================

/// The fixed development fallback: three known listings.
pub struct FallbackData {
    listings: Vec<ListingSummary>,
}

impl Default for FallbackData {
    fn default() -> Self {
        Self {
            listings: builtin_listings(),
        }
    }
}

impl FallbackData {
    pub fn new(listings: Vec<ListingSummary>) -> Self {
        Self { listings }
    }
}

impl ListingResolver for FallbackData {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn resolve(&self, slug: &str) -> Option<ListingSummary> {
        self.listings.iter().find(|l| l.slug == slug).cloned()
    }
}

fn builtin(slug: &str, name: &str, price: &str, stem: &str, overview: &str) -> ListingSummary {
    ListingSummary {
        slug: slug.to_string(),
        name: name.to_string(),
        price: price.to_string(),
        main_image: format!("/images/{stem}-p-1080.jpg"),
        thumb_image: format!("/images/{stem}-p-500.jpg"),
        gallery_images: vec![
            format!("/images/{stem}-p-1080.jpg"),
            format!("/images/{stem}-p-800.jpg"),
            format!("/images/{stem}-p-1600.jpg"),
        ],
        overview: overview.to_string(),
        status: Status::Available,
        date: None,
    }
}

fn builtin_listings() -> Vec<ListingSummary> {
    vec![
        builtin(
            "platform",
            "Platform",
            "$775",
            "Barn-Door-Slider-1-2025",
            "Spacious platform area perfect for creative work and storage. This flexible \
             space offers excellent possibilities for various business needs and can be \
             customized to fit your specific requirements.",
        ),
        builtin(
            "pb-a-ground-level-shop-studio",
            "PB-A Ground Level Shop Studio",
            "$1,335/mo",
            "All-smiles---almost",
            "Ground level shop studio with excellent natural light and accessibility. \
             Perfect for retail, creative work, or professional services with direct \
             street access.",
        ),
        builtin(
            "112-first-floor-office",
            "(#112) First Floor Office",
            "$485",
            "023",
            "Professional first floor office space ideal for small businesses. This \
             well-appointed office provides a professional environment for meetings and \
             daily operations.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materialize::build_detail;
    use crate::test_helpers::sample_listing;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Counts fetches; answers from a canned map.
    pub(crate) struct CountingFetcher {
        pub responses: BTreeMap<String, String>,
        pub calls: RefCell<usize>,
    }

    impl CountingFetcher {
        pub fn empty() -> Self {
            Self {
                responses: BTreeMap::new(),
                calls: RefCell::new(0),
            }
        }
    }

    impl DocumentFetcher for CountingFetcher {
        fn fetch(&self, slug: &str) -> Option<String> {
            *self.calls.borrow_mut() += 1;
            self.responses.get(slug).cloned()
        }
    }

    #[test]
    fn embedded_hit_and_miss() {
        let embedded = EmbeddedData::from_listings(&[sample_listing("platform", Status::Available)]);
        assert!(embedded.resolve("platform").is_some());
        assert!(embedded.resolve("does-not-exist").is_none());
    }

    #[test]
    fn api_resolver_parses_detail_documents() {
        let all = vec![
            sample_listing("platform", Status::Available),
            sample_listing("annex", Status::Available),
        ];
        let detail = build_detail(&all[1], &all);
        let mut fetcher = CountingFetcher::empty();
        fetcher.responses.insert(
            "annex".to_string(),
            serde_json::to_string(&detail).unwrap(),
        );

        let resolver = ApiDocuments::new(Box::new(fetcher));
        let summary = resolver.resolve("annex").unwrap();
        assert_eq!(summary.name, "Listing annex");
        assert_eq!(summary.gallery_images.len(), 2);
    }

    #[test]
    fn api_resolver_treats_garbage_as_miss() {
        let mut fetcher = CountingFetcher::empty();
        fetcher.responses.insert("bad".to_string(), "not json".to_string());
        let resolver = ApiDocuments::new(Box::new(fetcher));
        assert!(resolver.resolve("bad").is_none());
    }

    #[test]
    fn dir_fetcher_reads_materialized_documents() {
        let tmp = TempDir::new().unwrap();
        let all = vec![sample_listing("platform", Status::Available)];
        let detail = build_detail(&all[0], &all);
        fs::write(
            tmp.path().join("platform.json"),
            serde_json::to_string(&detail).unwrap(),
        )
        .unwrap();

        let resolver = ApiDocuments::new(Box::new(DirFetcher::new(tmp.path())));
        assert!(resolver.resolve("platform").is_some());
        assert!(resolver.resolve("missing").is_none());
    }

    #[test]
    fn fallback_knows_the_three_builtins() {
        let fallback = FallbackData::default();
        for slug in ["platform", "pb-a-ground-level-shop-studio", "112-first-floor-office"] {
            let summary = fallback.resolve(slug).unwrap();
            assert_eq!(summary.slug, slug);
            assert_eq!(summary.gallery_images.len(), 3);
            assert!(summary.date.is_none());
        }
        assert!(fallback.resolve("does-not-exist").is_none());
    }

    #[test]
    fn chain_prefers_earlier_resolvers() {
        let embedded = EmbeddedData::from_listings(&[sample_listing("platform", Status::Available)]);
        let resolvers: Vec<Box<dyn ListingResolver>> =
            vec![Box::new(embedded), Box::new(FallbackData::default())];

        // "platform" exists in both; the embedded record wins.
        let summary = resolve_chain(&resolvers, "platform").unwrap();
        assert_eq!(summary.name, "Listing platform");
    }

    #[test]
    fn chain_falls_through_to_later_resolvers() {
        let resolvers: Vec<Box<dyn ListingResolver>> = vec![
            Box::new(EmbeddedData::new(BTreeMap::new())),
            Box::new(FallbackData::default()),
        ];
        let summary = resolve_chain(&resolvers, "112-first-floor-office").unwrap();
        assert_eq!(summary.name, "(#112) First Floor Office");
    }

    #[test]
    fn chain_exhausted_is_none() {
        let resolvers: Vec<Box<dyn ListingResolver>> = vec![
            Box::new(EmbeddedData::new(BTreeMap::new())),
            Box::new(FallbackData::new(vec![])),
        ];
        assert!(resolve_chain(&resolvers, "anything").is_none());
    }
}
