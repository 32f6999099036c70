//! wdtk-constraints - Wikidata property constraints as OWL ontologies
//!
//! This library scans wikitext for constraint templates, parses them into
//! typed constraints, and renders those as OWL 2 axioms in functional-style
//! syntax or Turtle.
//!
//! # Example
//!
//! ```rust
//! use wdtk_constraints::translate_page;
//!
//! let owl = translate_page("Property talk:P1011", "{{Constraint:Qualifier}}").unwrap();
//! assert!(owl.contains("ObjectPropertyDomain(wd:P1011 wdo:Statement)"));
//! ```

pub mod config;
pub mod constraint;
pub mod error;
pub mod model;
pub mod processor;
pub mod renderer;
pub mod template;

pub use config::{ConfigError, PipelineConfig};
pub use constraint::{ConstraintError, ConstraintMainParser, SkipReason};
pub use error::TemplateError;
pub use model::{Constraint, ItemId, PropertyId};
pub use processor::{Revision, RevisionProcessor, TemplateCollector};
pub use renderer::{OutputFormat, RenderConfig, RenderError};
pub use template::{parse, scan, Template};

use thiserror::Error;
use tracing::info;

/// Errors that can occur during the translation pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Malformed transclusions
    #[error("template errors: {}", format_template_errors(.0))]
    Template(Vec<TemplateError>),

    /// A template contradicts the datatype of its property
    #[error("constraint error: {0}")]
    Constraint(#[from] ConstraintError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<Vec<TemplateError>> for PipelineError {
    fn from(errors: Vec<TemplateError>) -> Self {
        PipelineError::Template(errors)
    }
}

fn format_template_errors(errors: &[TemplateError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result of translating a set of pages
#[derive(Debug)]
pub struct PipelineOutput {
    /// The rendered ontology
    pub document: String,
    pub constraints: Vec<Constraint>,
    /// Templates that produced no constraint
    pub skipped: usize,
    /// Templates contradicting their property's datatype
    pub errors: Vec<ConstraintError>,
    /// Transclusions that could not be parsed, with their page title
    pub malformed: Vec<(String, TemplateError)>,
}

/// Parse raw transclusions, reporting every malformed one
///
/// # Example
///
/// ```rust
/// use wdtk_constraints::parse_templates;
///
/// let templates = parse_templates(["{{Constraint:Single value}}", "{{Constraint:Qualifier}}"]).unwrap();
/// assert_eq!(templates.len(), 2);
/// assert!(parse_templates(["{{Constraint:Qualifier}}", "Constraint:Range"]).is_err());
/// ```
pub fn parse_templates<'a>(
    transclusions: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<Template>, PipelineError> {
    let mut templates = Vec::new();
    let mut errors = Vec::new();
    for raw in transclusions {
        match parse(raw) {
            Ok(template) => templates.push(template),
            Err(err) => errors.push(err),
        }
    }
    if errors.is_empty() {
        Ok(templates)
    } else {
        Err(errors.into())
    }
}

/// Translate one template of a property into a constraint
///
/// Returns `Ok(None)` when the template yields no constraint.
pub fn translate_template(
    property: &PropertyId,
    text: &str,
    config: &PipelineConfig,
) -> Result<Option<Constraint>, PipelineError> {
    let template = parse(text).map_err(|err| PipelineError::Template(vec![err]))?;
    let parser = ConstraintMainParser::new(&config.property_types);
    let parsed = parser.parse_all(property, std::slice::from_ref(&template));
    if let Some(err) = parsed.errors.into_iter().next() {
        return Err(err.into());
    }
    Ok(parsed.constraints.into_iter().next())
}

/// Translate the constraint templates of a stream of pages
///
/// Malformed templates and contradictory constraints are collected in the
/// output; only render failures abort the run.
pub fn translate_pages<'a>(
    pages: impl IntoIterator<Item = Revision<'a>>,
    config: &PipelineConfig,
) -> Result<PipelineOutput, PipelineError> {
    let mut collector = TemplateCollector::new(config.namespaces);
    collector.start_revision_processing(&processor::wikidata_namespaces());
    for page in pages {
        collector.process_revision(&page);
    }
    collector.finish_revision_processing();
    let malformed = collector.malformed().to_vec();

    let parser = ConstraintMainParser::new(&config.property_types);
    let mut constraints = Vec::new();
    let mut skipped = 0;
    let mut errors = Vec::new();
    for (property, templates) in collector.into_templates() {
        let parsed = parser.parse_all(&property, &templates);
        constraints.extend(parsed.constraints);
        skipped += parsed.skipped.len();
        errors.extend(parsed.errors);
    }
    info!(
        constraints = constraints.len(),
        skipped,
        errors = errors.len(),
        "parsed constraint templates"
    );

    let document = renderer::render_to_string(&constraints, &config.output, &config.property_types)?;
    Ok(PipelineOutput {
        document,
        constraints,
        skipped,
        errors,
        malformed,
    })
}

/// Translate a single page with the default configuration
pub fn translate_page(title: &str, text: &str) -> Result<String, PipelineError> {
    let output = translate_pages([Revision::new(title, text)], &PipelineConfig::default())?;
    Ok(output.document)
}
