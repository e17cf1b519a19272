//! # Listing Press
//!
//! A minimal static content pipeline for commercial real-estate listings.
//! A CSV export is the data source: rows become normalized markdown
//! records, records become JSON API fixtures, and fixtures are bound into
//! listing-grid and detail pages.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Seed         data/export.csv  →  content/listings/   (rows → records)
//! 2. Materialize  content/         →  api/ + js/          (records → JSON + data module)
//! 3. Generate     api/             →  dist/               (JSON → bound pages)
//! ```
//!
//! Each stage reads only the previous stage's output, so every
//! intermediate is a plain file you can inspect, and each stage can be
//! rerun alone. There is no server and no database — the generated `api/`
//! and `dist/` directories drop onto any static file host.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`slug`] | URL-safe identifier derivation from display names |
//! | [`listing`] | The listing record and its reduced projection |
//! | [`record`] | Row and frontmatter-document parsing into records |
//! | [`store`] | The flat per-slug markdown Content Store |
//! | [`import`] | CSV reseed with the per-run record cap |
//! | [`materialize`] | Collection, per-listing, and embedded-module artifacts |
//! | [`dom`] | The page document handle: declared regions, guarded binds |
//! | [`grid`] | Listing card grid renderer (available + leased views) |
//! | [`resolve`] | Ordered listing resolution strategies for detail pages |
//! | [`detail`] | The detail page state machine |
//! | [`generate`] | Page shells and `dist/` assembly |
//! | [`config`] | `config.toml` loading |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud Over String Interpolation
//!
//! All markup is built with [Maud](https://maud.lambda.xyz/) so listing
//! text is escaped at the point it enters a fragment. The CMS content is
//! trusted today, but nothing about the pipeline enforces that, and the
//! original site interpolated names and overviews straight into HTML.
//!
//! ## Explicit Render Targets
//!
//! Renderers never touch ambient page state. A [`dom::Document`] declares
//! the regions a template exposes and every mutation is guarded: binding
//! into a region the template lacks is logged and skipped without
//! affecting sibling regions. Partial templates render partially instead
//! of failing.
//!
//! ## Resolution as a Strategy List
//!
//! A detail page finds its record through an ordered list of resolvers —
//! embedded data map, per-slug document fetch, built-in fallback set —
//! each independently testable, tried strictly in sequence.
//!
//! ## Tolerant Inputs, Destructive Reseeds
//!
//! A missing Content Store or collection document is a logged no-op, so
//! the pipeline can run on a fresh checkout in any stage order. The seed
//! stage, by contrast, wipes and rebuilds the store unconditionally; it is
//! the one destructive operation and is only ever run by hand.

pub mod config;
pub mod detail;
pub mod dom;
pub mod generate;
pub mod grid;
pub mod import;
pub mod listing;
pub mod materialize;
pub mod output;
pub mod record;
pub mod resolve;
pub mod slug;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;
