//! OWL renderers for parsed constraints
//!
//! A [`ConstraintRenderer`] turns each constraint into OWL 2 axioms and
//! hands them to a [`RendererFormat`], which writes them out in one
//! concrete syntax. Formats are bracketed: `start` writes the header,
//! `finish` closes the document, and axioms may only be written in between.

pub mod axiom;
pub mod config;
mod constraint_renderer;
mod owl;
mod rdf;

pub use axiom::{Axiom, ClassExpression, DataRange, PropertyKind, PropertyRef};
pub use config::{OutputFormat, RenderConfig};
pub use constraint_renderer::ConstraintRenderer;
pub use owl::Owl2FunctionalFormat;
pub use rdf::TurtleFormat;

use std::io::{self, Write};

use thiserror::Error;

use crate::model::{Constraint, PropertyTypeResolver};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("format has not been started")]
    NotStarted,

    #[error("format has already been started")]
    AlreadyStarted,

    #[error("format has already been finished")]
    AlreadyFinished,

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// A concrete output syntax for axioms
pub trait RendererFormat {
    /// Write the document header
    fn start(&mut self) -> Result<(), RenderError>;

    fn write_axiom(&mut self, axiom: &Axiom) -> Result<(), RenderError>;

    /// Close the document and flush the sink
    fn finish(&mut self) -> Result<(), RenderError>;
}

impl<F: RendererFormat + ?Sized> RendererFormat for Box<F> {
    fn start(&mut self) -> Result<(), RenderError> {
        (**self).start()
    }

    fn write_axiom(&mut self, axiom: &Axiom) -> Result<(), RenderError> {
        (**self).write_axiom(axiom)
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        (**self).finish()
    }
}

/// Lifecycle of a format between `start` and `finish`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Fresh,
    Open,
    Closed,
}

impl Phase {
    fn start(&mut self) -> Result<(), RenderError> {
        match self {
            Phase::Fresh => {
                *self = Phase::Open;
                Ok(())
            }
            Phase::Open => Err(RenderError::AlreadyStarted),
            Phase::Closed => Err(RenderError::AlreadyFinished),
        }
    }

    fn ensure_open(&self) -> Result<(), RenderError> {
        match self {
            Phase::Fresh => Err(RenderError::NotStarted),
            Phase::Open => Ok(()),
            Phase::Closed => Err(RenderError::AlreadyFinished),
        }
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        self.ensure_open()?;
        *self = Phase::Closed;
        Ok(())
    }
}

/// The format selected in the configuration, writing into `out`
pub fn format_for<'w, W: Write + 'w>(config: &RenderConfig, out: W) -> Box<dyn RendererFormat + 'w> {
    match config.format {
        OutputFormat::Owl => Box::new(Owl2FunctionalFormat::new(out, config.clone())),
        OutputFormat::Turtle => Box::new(TurtleFormat::new(out, config.clone())),
    }
}

/// Render a complete document holding the given constraints
pub fn render_constraints<'c, F: RendererFormat>(
    constraints: impl IntoIterator<Item = &'c Constraint>,
    format: &mut F,
    config: &RenderConfig,
    types: &dyn PropertyTypeResolver,
) -> Result<(), RenderError> {
    let constraints: Vec<&Constraint> = constraints.into_iter().collect();
    let mut renderer = ConstraintRenderer::new(types, config.declarations);
    renderer.settle(constraints.iter().copied());
    format.start()?;
    for constraint in constraints {
        renderer.render(constraint, format)?;
    }
    format.finish()
}

/// Render constraints into a string in the configured format
pub fn render_to_string<'c>(
    constraints: impl IntoIterator<Item = &'c Constraint>,
    config: &RenderConfig,
    types: &dyn PropertyTypeResolver,
) -> Result<String, RenderError> {
    let mut buffer = Vec::new();
    {
        let mut format = format_for(config, &mut buffer);
        render_constraints(constraints, &mut format, config, types)?;
    }
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Escape a lexical form for a double-quoted literal
pub(crate) fn escape_literal(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PropertyId, PropertyTypeRegistry, QualifierConstraint};

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(escape_literal("[0-9]+"), "[0-9]+");
    }

    #[test]
    fn test_phase_brackets_axioms() {
        let mut phase = Phase::default();
        assert!(matches!(phase.ensure_open(), Err(RenderError::NotStarted)));
        assert!(matches!(phase.finish(), Err(RenderError::NotStarted)));
        phase.start().unwrap();
        assert!(matches!(phase.start(), Err(RenderError::AlreadyStarted)));
        phase.ensure_open().unwrap();
        phase.finish().unwrap();
        assert!(matches!(phase.ensure_open(), Err(RenderError::AlreadyFinished)));
        assert!(matches!(phase.start(), Err(RenderError::AlreadyFinished)));
    }

    #[test]
    fn test_render_to_string_uses_configured_format() {
        let types = PropertyTypeRegistry::new();
        let constraint = Constraint::Qualifier(QualifierConstraint {
            property: PropertyId::new("P1011").unwrap(),
        });

        let owl = render_to_string([&constraint], &RenderConfig::default(), &types).unwrap();
        assert!(owl.contains("ObjectPropertyDomain(wd:P1011 wdo:Statement)"));

        let config = RenderConfig::default().with_format(OutputFormat::Turtle);
        let turtle = render_to_string([&constraint], &config, &types).unwrap();
        assert!(turtle.contains("wd:P1011 rdfs:domain wdo:Statement ."));
    }
}
