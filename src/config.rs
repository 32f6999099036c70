//! Pipeline configuration loaded from TOML
//!
//! A configuration file has up to four sections, all optional:
//!
//! ```toml
//! [output]
//! format = "turtle"
//! ontology-iri = "http://example.org/constraints"
//!
//! [namespaces]
//! property-talk = 121
//!
//! [logging]
//! level = "debug"
//!
//! [property-types]
//! P569 = "time"
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::model::{Datatype, IdError, PropertyId, PropertyTypeRegistry};
use crate::processor::NamespaceConfig;
use crate::renderer::RenderConfig;

/// Errors that can occur when loading a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse configuration TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid property in [property-types]: {0}")]
    InvalidProperty(#[from] IdError),
    #[error("Invalid log level '{0}'")]
    InvalidLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> Result<tracing::Level, ConfigError> {
        tracing::Level::from_str(self.level.trim())
            .map_err(|_| ConfigError::InvalidLevel(self.level.clone()))
    }
}

/// TOML structure for deserializing configurations
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
struct TomlConfig {
    output: RenderConfig,
    namespaces: NamespaceConfig,
    logging: LoggingConfig,
    property_types: BTreeMap<String, Datatype>,
}

/// Datatypes of the properties used by the built-in meta templates
const DEFAULT_CONFIG: &str = r##"
[output]
format = "owl"
declarations = true

[logging]
level = "warn"

[property-types]
# instance of, subclass of
P31 = "wikibase-item"
P279 = "wikibase-item"

# Person: sex or gender, place of birth, date of birth
P21 = "wikibase-item"
P19 = "wikibase-item"
P569 = "time"

# Taxon: taxon name, taxon rank, parent taxon
P225 = "string"
P105 = "wikibase-item"
P171 = "wikibase-item"
"##;

/// Configuration of a complete translation run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub output: RenderConfig,
    pub namespaces: NamespaceConfig,
    pub logging: LoggingConfig,
    /// Declared datatypes of properties
    pub property_types: PropertyTypeRegistry,
}

impl PipelineConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    ///
    /// Missing sections and keys keep their defaults. Property types are
    /// added to the built-in ones, replacing them on conflict.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let mut config = Self::builtin()?;
        config.merge(toml::from_str(content)?)?;
        Ok(config)
    }

    fn builtin() -> Result<Self, ConfigError> {
        let mut config = Self {
            output: RenderConfig::default(),
            namespaces: NamespaceConfig::default(),
            logging: LoggingConfig::default(),
            property_types: PropertyTypeRegistry::new(),
        };
        config.merge(toml::from_str(DEFAULT_CONFIG)?)?;
        Ok(config)
    }

    fn merge(&mut self, parsed: TomlConfig) -> Result<(), ConfigError> {
        self.output = parsed.output;
        self.namespaces = parsed.namespaces;
        self.logging = parsed.logging;
        for (property, datatype) in parsed.property_types {
            self.property_types
                .insert(property.trim().parse::<PropertyId>()?, datatype);
        }
        Ok(())
    }

    /// Set the output configuration
    pub fn with_output(mut self, output: RenderConfig) -> Self {
        self.output = output;
        self
    }

    /// Set the namespace ids
    pub fn with_namespaces(mut self, namespaces: NamespaceConfig) -> Self {
        self.namespaces = namespaces;
        self
    }

    /// Set the log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Declare the datatype of a property
    pub fn with_property_type(mut self, property: PropertyId, datatype: Datatype) -> Self {
        self.property_types.insert(property, datatype);
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::builtin().expect("Default configuration should be valid TOML")
    }
}
