//! Dispatch of templates to the parser of their constraint kind

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::model::{Constraint, PropertyId, PropertyTypeResolver};
use crate::template::Template;

use super::error::{ConstraintError, Rejected, SkipReason};
use super::names::{normalize_template_name, ConstraintKind, CONSTRAINT_TEMPLATES};
use super::parsers::parser_for;

/// Result of translating one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    Constraint(Constraint),
    Skipped(SkipReason),
}

impl Translation {
    pub fn into_constraint(self) -> Option<Constraint> {
        match self {
            Translation::Constraint(c) => Some(c),
            Translation::Skipped(_) => None,
        }
    }
}

/// Constraints parsed from the templates of one property
#[derive(Debug, Default)]
pub struct ParsedTemplates {
    pub constraints: Vec<Constraint>,
    /// Templates that produced no constraint, with the reason
    pub skipped: Vec<(Template, SkipReason)>,
    pub errors: Vec<ConstraintError>,
}

/// Translates constraint templates into typed constraints
///
/// Template names are looked up in an immutable name table fixed at
/// construction. Meta templates (Person, Taxon) are expanded by
/// [`ConstraintMainParser::parse_all`] before any kind parser sees them.
pub struct ConstraintMainParser<'a> {
    kinds: HashMap<String, ConstraintKind>,
    types: &'a dyn PropertyTypeResolver,
}

impl<'a> ConstraintMainParser<'a> {
    /// Create a parser over the standard template names
    pub fn new(types: &'a dyn PropertyTypeResolver) -> Self {
        Self::with_names(types, CONSTRAINT_TEMPLATES)
    }

    /// Create a parser over a custom name table
    pub fn with_names(
        types: &'a dyn PropertyTypeResolver,
        names: &[(&str, ConstraintKind)],
    ) -> Self {
        let kinds = names
            .iter()
            .map(|(name, kind)| (normalize_template_name(name), *kind))
            .collect();
        Self { kinds, types }
    }

    /// The constraint kind a template name stands for
    pub fn kind_of(&self, template_name: &str) -> Option<ConstraintKind> {
        self.kinds
            .get(&normalize_template_name(template_name))
            .copied()
    }

    /// Translate a template, reporting why no constraint was produced
    ///
    /// Without an explicit property, the property is taken from the page
    /// the template was found on.
    pub fn translate(
        &self,
        property: Option<&PropertyId>,
        template: &Template,
    ) -> Result<Translation, ConstraintError> {
        let Some(kind) = self.kind_of(template.name()) else {
            return Ok(Translation::Skipped(SkipReason::UnrecognizedTemplate(
                template.name().to_string(),
            )));
        };
        let from_page;
        let property = match property {
            Some(property) => property,
            None => match template.page_property() {
                Some(Ok(found)) => {
                    from_page = found;
                    &from_page
                }
                _ => return Ok(Translation::Skipped(SkipReason::NoProperty)),
            },
        };
        let Some(parser) = parser_for(kind) else {
            return Ok(Translation::Skipped(SkipReason::MetaTemplate(kind)));
        };

        match parser(property, template, self.types) {
            Ok(constraint) => Ok(Translation::Constraint(constraint)),
            Err(Rejected::Skip(reason)) => Ok(Translation::Skipped(reason)),
            Err(Rejected::Illegal(err)) => Err(err),
        }
    }

    /// Parse a template into a constraint, `None` when it yields none
    pub fn parse(
        &self,
        property: Option<&PropertyId>,
        template: &Template,
    ) -> Result<Option<Constraint>, ConstraintError> {
        self.translate(property, template)
            .map(Translation::into_constraint)
    }

    /// Replace every meta template by its constituent templates, in place
    pub fn expand_meta_templates(&self, templates: &[Template]) -> Vec<Template> {
        let mut expanded = Vec::with_capacity(templates.len());
        for template in templates {
            let parts = self
                .kind_of(template.name())
                .and_then(|kind| kind.expansion());
            match parts {
                Some(parts) => expanded.extend(parts.into_iter().map(|part| match template.page() {
                    Some(page) => part.with_page(page),
                    None => part,
                })),
                None => expanded.push(template.clone()),
            }
        }
        expanded
    }

    /// Parse all templates of one property
    ///
    /// Meta templates are expanded first. Each template is handled on its
    /// own: skips and errors are collected and never stop the others.
    pub fn parse_all(&self, property: &PropertyId, templates: &[Template]) -> ParsedTemplates {
        let mut parsed = ParsedTemplates::default();
        for template in self.expand_meta_templates(templates) {
            match self.translate(Some(property), &template) {
                Ok(Translation::Constraint(constraint)) => parsed.constraints.push(constraint),
                Ok(Translation::Skipped(reason)) => {
                    if !reason.is_unrecognized() {
                        debug!(%property, template = %template, %reason, "skipped constraint template");
                    }
                    parsed.skipped.push((template, reason));
                }
                Err(err) => {
                    warn!(%property, template = %template, error = %err, "contradictory constraint");
                    parsed.errors.push(err);
                }
            }
        }
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Datatype, PropertyTypeRegistry, QualifierConstraint};
    use crate::template::parse;
    use pretty_assertions::assert_eq;

    fn p(id: &str) -> PropertyId {
        PropertyId::new(id).unwrap()
    }

    fn templates(texts: &[&str]) -> Vec<Template> {
        texts.iter().map(|t| parse(t).unwrap()).collect()
    }

    #[test]
    fn test_end_to_end_qualifier() {
        let types = PropertyTypeRegistry::new();
        let parser = ConstraintMainParser::new(&types);
        let constraint = parser
            .parse(Some(&p("P1011")), &parse("{{Constraint:Qualifier}}").unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(constraint.to_string(), "P1011 {{Constraint:Qualifier}}");
    }

    #[test]
    fn test_names_are_normalized() {
        let types = PropertyTypeRegistry::new();
        let parser = ConstraintMainParser::new(&types);
        let constraint = parser
            .parse(Some(&p("P1011")), &parse("{{ constraint:qualifier }}").unwrap())
            .unwrap();
        assert_eq!(
            constraint,
            Some(Constraint::Qualifier(QualifierConstraint { property: p("P1011") }))
        );
        assert_eq!(
            parser.kind_of("Constraint:Single_value"),
            Some(ConstraintKind::SingleValue)
        );
    }

    #[test]
    fn test_unrecognized_and_missing_property_are_skipped() {
        let types = PropertyTypeRegistry::new();
        let parser = ConstraintMainParser::new(&types);
        let documentation = parse("{{Documentation}}").unwrap();
        assert_eq!(
            parser.translate(Some(&p("P1")), &documentation).unwrap(),
            Translation::Skipped(SkipReason::UnrecognizedTemplate("Documentation".into()))
        );
        let qualifier = parse("{{Constraint:Qualifier}}").unwrap();
        assert_eq!(parser.parse(None, &qualifier).unwrap(), None);
        assert_eq!(
            parser.translate(None, &qualifier).unwrap(),
            Translation::Skipped(SkipReason::NoProperty)
        );
        let sandbox = qualifier.clone().with_page("Property talk:Sandbox");
        assert_eq!(parser.parse(None, &sandbox).unwrap(), None);
    }

    #[test]
    fn test_property_comes_from_the_page() {
        let types = PropertyTypeRegistry::new();
        let parser = ConstraintMainParser::new(&types);
        let qualifier = parse("{{Constraint:Qualifier}}")
            .unwrap()
            .with_page("Property talk:P1011");
        assert_eq!(
            parser.parse(None, &qualifier).unwrap(),
            Some(Constraint::Qualifier(QualifierConstraint { property: p("P1011") }))
        );
        assert_eq!(
            parser.parse(Some(&p("P17")), &qualifier).unwrap(),
            Some(Constraint::Qualifier(QualifierConstraint { property: p("P17") }))
        );
    }

    #[test]
    fn test_person_expansion_keeps_surrounding_order() {
        let types = PropertyTypeRegistry::new();
        let parser = ConstraintMainParser::new(&types);
        let expanded = parser.expand_meta_templates(&templates(&[
            "{{Constraint:Single value}}",
            "{{Constraint:Person}}",
            "{{Constraint:Qualifier}}",
        ]));
        let names: Vec<&str> = expanded.iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            vec![
                "Constraint:Single value",
                "Constraint:Type",
                "Constraint:Item",
                "Constraint:Item",
                "Constraint:Item",
                "Constraint:Qualifier",
            ]
        );
    }

    #[test]
    fn test_unexpanded_meta_template_is_skipped() {
        let types = PropertyTypeRegistry::new();
        let parser = ConstraintMainParser::new(&types);
        assert_eq!(
            parser
                .translate(Some(&p("P1")), &parse("{{Constraint:Taxon}}").unwrap())
                .unwrap(),
            Translation::Skipped(SkipReason::MetaTemplate(ConstraintKind::Taxon))
        );
    }

    #[test]
    fn test_parse_all_collects_errors_and_continues() {
        let types = PropertyTypeRegistry::new().with(p("P1082"), Datatype::String);
        let parser = ConstraintMainParser::new(&types);
        let parsed = parser.parse_all(
            &p("P1082"),
            &templates(&[
                "{{Constraint:Range|min=1|max=10}}",
                "{{Constraint:Single value}}",
                "{{Constraint:Type|class=Q5}}",
                "{{Constraint:Person}}",
            ]),
        );
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.constraints.len(), 1 + 4);
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.skipped[0].1, SkipReason::MissingParameter("relation"));
    }

    #[test]
    fn test_custom_name_table() {
        let types = PropertyTypeRegistry::new();
        let parser = ConstraintMainParser::with_names(
            &types,
            &[("Property constraint:Qualifier", ConstraintKind::Qualifier)],
        );
        assert_eq!(
            parser.kind_of("Property constraint:Qualifier"),
            Some(ConstraintKind::Qualifier)
        );
        assert_eq!(parser.kind_of("Constraint:Qualifier"), None);
    }
}
