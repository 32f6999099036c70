//! Recognized constraint template names and meta-template expansion

use std::fmt;

use crate::template::{Parameters, Template};

/// Kind of constraint a template declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    SingleValue,
    UniqueValue,
    Format,
    OneOf,
    Symmetric,
    Inverse,
    ExistingFile,
    TargetRequiredClaim,
    Item,
    Type,
    ValueType,
    Range,
    MultiValue,
    ConflictsWith,
    Qualifier,
    /// Meta template standing for the constraints of a person property
    Person,
    /// Meta template standing for the constraints of a taxon property
    Taxon,
}

/// Template names of every recognized constraint kind
pub const CONSTRAINT_TEMPLATES: &[(&str, ConstraintKind)] = &[
    ("Constraint:Single value", ConstraintKind::SingleValue),
    ("Constraint:Unique value", ConstraintKind::UniqueValue),
    ("Constraint:Format", ConstraintKind::Format),
    ("Constraint:One of", ConstraintKind::OneOf),
    ("Constraint:Symmetric", ConstraintKind::Symmetric),
    ("Constraint:Inverse", ConstraintKind::Inverse),
    ("Constraint:Existing file", ConstraintKind::ExistingFile),
    (
        "Constraint:Target required claim",
        ConstraintKind::TargetRequiredClaim,
    ),
    ("Constraint:Item", ConstraintKind::Item),
    ("Constraint:Type", ConstraintKind::Type),
    ("Constraint:Value type", ConstraintKind::ValueType),
    ("Constraint:Range", ConstraintKind::Range),
    ("Constraint:Multi value", ConstraintKind::MultiValue),
    ("Constraint:Conflicts with", ConstraintKind::ConflictsWith),
    ("Constraint:Qualifier", ConstraintKind::Qualifier),
    ("Constraint:Person", ConstraintKind::Person),
    ("Constraint:Taxon", ConstraintKind::Taxon),
];

impl ConstraintKind {
    /// Canonical template name, e.g. `Constraint:Single value`
    pub fn template_name(&self) -> &'static str {
        CONSTRAINT_TEMPLATES
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(name, _)| *name)
            .unwrap_or("Constraint")
    }

    /// Whether this kind only stands for a fixed list of other templates
    pub fn is_meta(&self) -> bool {
        matches!(self, ConstraintKind::Person | ConstraintKind::Taxon)
    }

    /// Templates a meta kind expands to, in order
    pub fn expansion(&self) -> Option<Vec<Template>> {
        let (class, properties): (&str, &[&str]) = match self {
            // human; sex or gender, place of birth, date of birth
            ConstraintKind::Person => ("Q5", &["P21", "P19", "P569"][..]),
            // taxon; taxon name, taxon rank, parent taxon
            ConstraintKind::Taxon => ("Q16521", &["P225", "P105", "P171"][..]),
            _ => return None,
        };

        let type_template = Template::new(
            ConstraintKind::Type.template_name(),
            [("class", class), ("relation", "instance")]
                .into_iter()
                .collect::<Parameters>(),
        );
        let item_templates = properties.iter().map(|property| {
            Template::new(
                ConstraintKind::Item.template_name(),
                [("property", *property)].into_iter().collect::<Parameters>(),
            )
        });
        Some(std::iter::once(type_template).chain(item_templates).collect())
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.template_name();
        f.write_str(name.strip_prefix("Constraint:").unwrap_or(name))
    }
}

/// Normalize a template name for lookup
///
/// Surrounding whitespace is dropped, underscores and runs of whitespace
/// become one space, and letters are compared case-insensitively.
pub fn normalize_template_name(name: &str) -> String {
    name.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
