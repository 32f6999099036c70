//! Configuration for constraint rendering

use serde::Deserialize;

use crate::model::WIKIDATA_BASE_IRI;

/// Output syntax of a render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// OWL 2 functional-style syntax
    #[default]
    Owl,
    /// RDF triples in Turtle
    Turtle,
}

/// Configuration options for rendered output
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RenderConfig {
    /// Entities with this base IRI are written with the `wd:` prefix
    pub base_iri: String,

    /// IRI of the generated ontology
    pub ontology_iri: String,

    /// Whether to declare every property before its first use
    pub declarations: bool,

    pub format: OutputFormat,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            base_iri: WIKIDATA_BASE_IRI.to_string(),
            ontology_iri: "http://www.wikidata.org/ontology/constraints".to_string(),
            declarations: true,
            format: OutputFormat::Owl,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base IRI abbreviated as `wd:`
    pub fn with_base_iri(mut self, iri: impl Into<String>) -> Self {
        self.base_iri = iri.into();
        self
    }

    /// Set the ontology IRI
    pub fn with_ontology_iri(mut self, iri: impl Into<String>) -> Self {
        self.ontology_iri = iri.into();
        self
    }

    /// Set whether property declarations are emitted
    pub fn with_declarations(mut self, declarations: bool) -> Self {
        self.declarations = declarations;
        self
    }

    /// Set the output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Short name of an entity: `wd:P31` under the base IRI, a full IRI otherwise
    pub fn entity_name(&self, base_iri: &str, id: &str) -> String {
        if base_iri == self.base_iri {
            format!("wd:{}", id)
        } else {
            format!("<{}{}>", base_iri, id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.base_iri, "http://www.wikidata.org/entity/");
        assert!(config.declarations);
        assert_eq!(config.format, OutputFormat::Owl);
    }

    #[test]
    fn test_builder_pattern() {
        let config = RenderConfig::new()
            .with_ontology_iri("http://example.org/o")
            .with_declarations(false)
            .with_format(OutputFormat::Turtle);

        assert_eq!(config.ontology_iri, "http://example.org/o");
        assert!(!config.declarations);
        assert_eq!(config.format, OutputFormat::Turtle);
    }

    #[test]
    fn test_entity_name() {
        let config = RenderConfig::default();
        assert_eq!(
            config.entity_name("http://www.wikidata.org/entity/", "P31"),
            "wd:P31"
        );
        assert_eq!(
            config.entity_name("http://example.org/", "Q1"),
            "<http://example.org/Q1>"
        );
    }
}
