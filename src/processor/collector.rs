//! Grouping of templates found on property talk pages

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::TemplateError;
use crate::model::PropertyId;
use crate::template::{parse_page, Template};

use super::{
    wikidata_namespaces, Namespaces, Revision, RevisionProcessor, PROPERTY_TALK_NAMESPACE,
    TEMPLATE_NAMESPACE,
};

/// Template pages of this prefix document constraint templates
const CONSTRAINT_PREFIX: &str = "Constraint:";

/// Which namespaces hold constraint declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NamespaceConfig {
    pub property_talk: i32,
    pub template: i32,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            property_talk: PROPERTY_TALK_NAMESPACE,
            template: TEMPLATE_NAMESPACE,
        }
    }
}

/// Collects the templates of property talk pages, grouped by property
#[derive(Debug)]
pub struct TemplateCollector {
    config: NamespaceConfig,
    property_talk_prefix: String,
    constraint_template_prefix: String,
    templates: BTreeMap<PropertyId, Vec<Template>>,
    constraint_templates: BTreeSet<String>,
    malformed: Vec<(String, TemplateError)>,
    pages: usize,
}

impl Default for TemplateCollector {
    fn default() -> Self {
        Self::new(NamespaceConfig::default())
    }
}

impl TemplateCollector {
    pub fn new(config: NamespaceConfig) -> Self {
        let mut collector = Self {
            config,
            property_talk_prefix: String::new(),
            constraint_template_prefix: String::new(),
            templates: BTreeMap::new(),
            constraint_templates: BTreeSet::new(),
            malformed: Vec::new(),
            pages: 0,
        };
        collector.set_namespaces(&wikidata_namespaces());
        collector
    }

    fn set_namespaces(&mut self, namespaces: &Namespaces) {
        let name = |id: i32, fallback: &str| {
            namespaces
                .get(&id)
                .cloned()
                .unwrap_or_else(|| fallback.to_string())
        };
        self.property_talk_prefix = format!("{}:", name(self.config.property_talk, "Property talk"));
        self.constraint_template_prefix = format!(
            "{}:{}",
            name(self.config.template, "Template"),
            CONSTRAINT_PREFIX
        );
    }

    /// Templates found so far, grouped by property
    pub fn templates(&self) -> &BTreeMap<PropertyId, Vec<Template>> {
        &self.templates
    }

    pub fn into_templates(self) -> BTreeMap<PropertyId, Vec<Template>> {
        self.templates
    }

    pub fn templates_for(&self, property: &PropertyId) -> &[Template] {
        self.templates
            .get(property)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Names of the constraint templates that have a documentation page,
    /// e.g. `Constraint:Single value`
    pub fn constraint_templates(&self) -> &BTreeSet<String> {
        &self.constraint_templates
    }

    /// Transclusions that could not be parsed, with their page title
    pub fn malformed(&self) -> &[(String, TemplateError)] {
        &self.malformed
    }

    /// Number of distinct property talk pages processed
    pub fn pages(&self) -> usize {
        self.pages
    }

    fn collect_property_page(&mut self, local: &str, revision: &Revision<'_>) {
        if local.contains('/') {
            debug!(title = revision.title, "skipping subpage");
            return;
        }
        let property = match local.trim().parse::<PropertyId>() {
            Ok(property) => property,
            Err(err) => {
                debug!(title = revision.title, error = %err, "not a property page");
                return;
            }
        };

        let mut found = Vec::new();
        for result in parse_page(revision.text) {
            match result {
                Ok(template) => found.push(template.with_page(revision.title)),
                Err(err) => {
                    warn!(title = revision.title, error = %err, "malformed template");
                    self.malformed.push((revision.title.to_string(), err));
                }
            }
        }
        // A later revision of the same page replaces the earlier one
        if self.templates.insert(property, found).is_none() {
            self.pages += 1;
        } else {
            debug!(title = revision.title, "replacing earlier revision");
        }
    }
}

impl RevisionProcessor for TemplateCollector {
    fn start_revision_processing(&mut self, namespaces: &Namespaces) {
        self.set_namespaces(namespaces);
    }

    fn process_revision(&mut self, revision: &Revision<'_>) {
        if let Some(local) = revision.title.strip_prefix(&self.property_talk_prefix) {
            self.collect_property_page(local, revision);
        } else if let Some(name) = revision.title.strip_prefix(&self.constraint_template_prefix) {
            if !name.contains('/') {
                self.constraint_templates
                    .insert(format!("{}{}", CONSTRAINT_PREFIX, name.trim()));
            }
        }
    }

    fn finish_revision_processing(&mut self) {
        info!(
            pages = self.pages,
            properties = self.templates.len(),
            templates = self.templates.values().map(Vec::len).sum::<usize>(),
            malformed = self.malformed.len(),
            "collected constraint templates"
        );
    }
}
