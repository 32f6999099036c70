//! Template transclusion scanning and parsing
//!
//! Wikitext is first scanned for balanced `{{...}}` transclusions, then each
//! transclusion is parsed into a [`Template`] with a name and an ordered
//! parameter map.
//!
//! # Example
//!
//! ```rust
//! use wdtk_constraints::template::{parse, scan};
//!
//! let found = scan("{{Constraint:Range|min=1500|max=now}} and text");
//! let template = parse(&found[0]).unwrap();
//! assert_eq!(template.name(), "Constraint:Range");
//! assert_eq!(template.get("max"), Some("now"));
//! ```

pub mod lexer;
mod parser;
mod scanner;

pub use parser::{parse, Parameters, Template};
pub use scanner::{remove_html_comments, scan};

use crate::error::TemplateError;

/// Scan wikitext and parse every transclusion found on it
pub fn parse_page(text: &str) -> Vec<Result<Template, TemplateError>> {
    scan(text).iter().map(|raw| parse(raw)).collect()
}
