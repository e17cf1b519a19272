//! Slug derivation for listing identifiers.
//!
//! Every listing is keyed by a URL-safe slug derived from its display name.
//! The slug doubles as the Content Store filename stem (`<slug>.md`), the
//! API document name (`<slug>.json`), and the detail-page lookup key, so
//! all three surfaces agree on one derivation.
//!
//! ## Derivation Rules
//!
//! - lowercase everything
//! - whitespace runs become a single hyphen
//! - characters outside `[a-z0-9_-]` are removed
//! - hyphen runs collapse to one
//! - leading and trailing hyphens are trimmed
//!
//! `"(#112) First Floor Office"` → `"112-first-floor-office"`.
//!
//! Slugification is idempotent: a slug fed back through produces itself.
//! Uniqueness is not enforced here — two names that slugify identically are
//! detected and reported by the import layer, which owns the store.

/// Derive a URL-safe slug from a display name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.to_lowercase().chars() {
        if ch.is_whitespace() || ch == '-' {
            pending_hyphen = !slug.is_empty();
            continue;
        }
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push(ch);
        }
        // Everything else (punctuation, symbols) is dropped outright.
    }

    slug
}
