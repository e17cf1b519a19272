//! The render-target handle: a page document with bindable regions.
//!
//! The pre-built page templates are external collaborators; what this
//! crate owns is the set of regions a template exposes and the data bound
//! into them. A [`Document`] declares its regions up front (the page shell
//! decides which exist) and renderers mutate them by id.
//!
//! Every mutation is guarded: binding into a region the document never
//! declared returns `false` and changes nothing, so one missing target
//! never blocks sibling mutations. Callers decide whether to log or
//! ignore.
//!
//! Text bindings are escaped through maud at the moment they are set, so
//! raw listing text never reaches a page unescaped. [`Binding::Markup`] is
//! reserved for fragments that were themselves built with maud.

use maud::{Markup, html};
use std::collections::BTreeMap;

/// What a region currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Escaped text content (also used for attribute values like meta
    /// content and the document title).
    Text(String),
    /// A rendered markup fragment.
    Markup(String),
    /// An image source/alt pair.
    Image { src: String, alt: String },
}

#[derive(Debug, Default)]
struct Slot {
    binding: Option<Binding>,
    hidden: bool,
}

/// A page document: declared regions and their bindings.
#[derive(Debug, Default)]
pub struct Document {
    regions: BTreeMap<String, Slot>,
}

impl Document {
    /// A document exposing exactly the given regions, all unbound.
    pub fn with_regions<'a, I>(ids: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            regions: ids
                .into_iter()
                .map(|id| (id.to_string(), Slot::default()))
                .collect(),
        }
    }

    pub fn has_region(&self, id: &str) -> bool {
        self.regions.contains_key(id)
    }

    /// Bind escaped text. Returns `false` if the region does not exist.
    pub fn set_text(&mut self, id: &str, text: &str) -> bool {
        let escaped = html! { (text) }.into_string();
        self.bind(id, Binding::Text(escaped))
    }

    /// Bind a markup fragment. Returns `false` if the region does not exist.
    pub fn set_markup(&mut self, id: &str, markup: Markup) -> bool {
        self.bind(id, Binding::Markup(markup.into_string()))
    }

    /// Bind an image source and alt text. Returns `false` if the region
    /// does not exist.
    pub fn set_image(&mut self, id: &str, src: &str, alt: &str) -> bool {
        self.bind(id, Binding::Image {
            src: src.to_string(),
            alt: alt.to_string(),
        })
    }

    /// Hide a region (used for placeholder nodes like the gallery empty
    /// state). Returns `false` if the region does not exist.
    pub fn hide(&mut self, id: &str) -> bool {
        match self.regions.get_mut(id) {
            Some(slot) => {
                slot.hidden = true;
                true
            }
            None => false,
        }
    }

    fn bind(&mut self, id: &str, binding: Binding) -> bool {
        match self.regions.get_mut(id) {
            Some(slot) => {
                slot.binding = Some(binding);
                true
            }
            None => false,
        }
    }

    /// The current binding of a region, if any.
    pub fn binding(&self, id: &str) -> Option<&Binding> {
        self.regions.get(id).and_then(|slot| slot.binding.as_ref())
    }

    /// Escaped text bound to a region (text bindings only).
    pub fn text(&self, id: &str) -> Option<&str> {
        match self.binding(id) {
            Some(Binding::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Markup bound to a region (markup bindings only).
    pub fn markup(&self, id: &str) -> Option<&str> {
        match self.binding(id) {
            Some(Binding::Markup(markup)) => Some(markup),
            _ => None,
        }
    }

    /// Image pair bound to a region (image bindings only).
    pub fn image(&self, id: &str) -> Option<(&str, &str)> {
        match self.binding(id) {
            Some(Binding::Image { src, alt }) => Some((src.as_str(), alt.as_str())),
            _ => None,
        }
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.regions.get(id).map(|slot| slot.hidden).unwrap_or(false)
    }

    /// True when the region exists and nothing was ever bound to it.
    pub fn is_untouched(&self, id: &str) -> bool {
        self.regions
            .get(id)
            .map(|slot| slot.binding.is_none() && !slot.hidden)
            .unwrap_or(false)
    }
}
