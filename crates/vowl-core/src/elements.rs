//! The element data model: nodes, properties, and renderable links.
//!
//! Elements are shared between the controller's lists, the incident-link
//! indexes, and the scene bindings via `Rc`. Identity comparisons use
//! `Rc::ptr_eq`, so an element filtered and re-displayed keeps its identity
//! across update cycles. The engine is single-threaded and cooperative, so
//! `RefCell` guards the mutable element state.

mod link;
mod node;
mod property;

pub use link::{Link, LinkRef};
pub use node::{Node, NodeKind, NodeRef};
pub use property::{Cardinality, Property, PropertyKind, PropertyRef};

use indexmap::IndexMap;

/// Language used when a label carries no language tag.
pub const DEFAULT_LANGUAGE: &str = "default";

/// Per-language label map with the lookup fallback chain
/// requested language → default language → any first entry.
#[derive(Debug, Clone, Default)]
pub struct LanguageMap {
    labels: IndexMap<String, String>,
}

impl LanguageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding one untagged label.
    pub fn from_default(label: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.insert(DEFAULT_LANGUAGE, label);
        map
    }

    pub fn insert(&mut self, language: impl Into<String>, label: impl Into<String>) {
        self.labels.insert(language.into(), label.into());
    }

    pub fn label_for(&self, language: &str) -> Option<&str> {
        self.labels
            .get(language)
            .or_else(|| self.labels.get(DEFAULT_LANGUAGE))
            .or_else(|| self.labels.values().next())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
