//! Revision processing: collecting constraint templates from page texts
//!
//! Dump readers feed revisions (page title plus wikitext) into a
//! [`RevisionProcessor`]. The [`TemplateCollector`] keeps the templates of
//! property talk pages, grouped by property.

mod collector;

pub use collector::{NamespaceConfig, TemplateCollector};

use std::collections::BTreeMap;

/// Namespace id to namespace name, as announced at the start of a dump
pub type Namespaces = BTreeMap<i32, String>;

/// Namespace id of `Template:` pages
pub const TEMPLATE_NAMESPACE: i32 = 10;

/// Namespace id of `Property talk:` pages on Wikidata
pub const PROPERTY_TALK_NAMESPACE: i32 = 121;

/// One page revision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revision<'a> {
    pub title: &'a str,
    pub text: &'a str,
}

impl<'a> Revision<'a> {
    pub fn new(title: &'a str, text: &'a str) -> Self {
        Self { title, text }
    }
}

/// Consumer of a stream of revisions
pub trait RevisionProcessor {
    /// Called once before the first revision
    fn start_revision_processing(&mut self, _namespaces: &Namespaces) {}

    fn process_revision(&mut self, revision: &Revision<'_>);

    /// Called once after the last revision
    fn finish_revision_processing(&mut self) {}
}

/// Namespace names of Wikidata
pub fn wikidata_namespaces() -> Namespaces {
    [
        (TEMPLATE_NAMESPACE, "Template"),
        (PROPERTY_TALK_NAMESPACE, "Property talk"),
    ]
    .into_iter()
    .map(|(id, name)| (id, name.to_string()))
    .collect()
}
