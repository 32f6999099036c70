//! Translation of constraint templates into typed constraints
//!
//! # Example
//!
//! ```rust
//! use wdtk_constraints::constraint::ConstraintMainParser;
//! use wdtk_constraints::model::{PropertyId, PropertyTypeRegistry};
//! use wdtk_constraints::template::parse;
//!
//! let types = PropertyTypeRegistry::new();
//! let parser = ConstraintMainParser::new(&types);
//! let property: PropertyId = "P1011".parse().unwrap();
//! let template = parse("{{Constraint:Qualifier}}").unwrap();
//! let constraint = parser.parse(Some(&property), &template).unwrap().unwrap();
//! assert_eq!(constraint.to_string(), "P1011 {{Constraint:Qualifier}}");
//! ```

mod error;
mod main_parser;
mod names;
mod parsers;
pub mod values;

pub use error::{ConstraintError, SkipReason};
pub use main_parser::{ConstraintMainParser, ParsedTemplates, Translation};
pub use names::{normalize_template_name, ConstraintKind, CONSTRAINT_TEMPLATES};
