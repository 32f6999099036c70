//! Typed property constraints
//!
//! Each constraint kind is one variant of [`Constraint`], wrapping a struct
//! that owns the constrained property and the kind-specific fields.
//! Renderers consume constraints through [`ConstraintVisitor`].

use std::fmt;

use crate::constraint::values::wrap_nowiki;
use crate::constraint::ConstraintKind;
use crate::template::{Parameters, Template};

use super::{DateAndNow, Decimal, ItemId, PropertyId};

/// How a subject must relate to a class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// Instance of the class (P31)
    Instance,
    /// Subclass of the class (P279)
    Subclass,
}

impl Relation {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "instance" => Some(Relation::Instance),
            "subclass" => Some(Relation::Subclass),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Instance => "instance",
            Relation::Subclass => "subclass",
        }
    }

    /// The property expressing this relation
    pub fn property(&self) -> PropertyId {
        match self {
            Relation::Instance => PropertyId::from_number(31),
            Relation::Subclass => PropertyId::from_number(279),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleValueConstraint {
    pub property: PropertyId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueValueConstraint {
    pub property: PropertyId,
}

/// Values must match a regular expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConstraint {
    pub property: PropertyId,
    pub pattern: String,
}

/// Values must be one of the listed items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneOfConstraint {
    pub property: PropertyId,
    pub values: Vec<ItemId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymmetricConstraint {
    pub property: PropertyId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InverseConstraint {
    pub property: PropertyId,
    pub inverse: PropertyId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingFileConstraint {
    pub property: PropertyId,
}

/// The value item must carry `required`, optionally with value `item`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRequiredClaimConstraint {
    pub property: PropertyId,
    pub required: PropertyId,
    pub item: Option<ItemId>,
}

/// The subject item must carry `required`, optionally with one of `items`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemConstraint {
    pub property: PropertyId,
    pub required: PropertyId,
    pub items: Vec<ItemId>,
    pub exceptions: Vec<ItemId>,
}

/// The subject must be an instance or subclass of `class`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeConstraint {
    pub property: PropertyId,
    pub class: ItemId,
    pub relation: Relation,
}

/// The value must be an instance or subclass of `class`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueTypeConstraint {
    pub property: PropertyId,
    pub class: ItemId,
    pub relation: Relation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeBounds {
    Time { min: DateAndNow, max: DateAndNow },
    Quantity { min: Decimal, max: Decimal },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeConstraint {
    pub property: PropertyId,
    pub bounds: RangeBounds,
}

impl RangeConstraint {
    pub fn is_date(&self) -> bool {
        matches!(self.bounds, RangeBounds::Time { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiValueConstraint {
    pub property: PropertyId,
}

/// A property (optionally restricted to some values) that must not co-occur
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub property: PropertyId,
    pub items: Vec<ItemId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictsWithConstraint {
    pub property: PropertyId,
    pub conflicts: Vec<Conflict>,
}

/// The property may only be used as a qualifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifierConstraint {
    pub property: PropertyId,
}

/// A constraint on a property, one variant per constraint kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    SingleValue(SingleValueConstraint),
    UniqueValue(UniqueValueConstraint),
    Format(FormatConstraint),
    OneOf(OneOfConstraint),
    Symmetric(SymmetricConstraint),
    Inverse(InverseConstraint),
    ExistingFile(ExistingFileConstraint),
    TargetRequiredClaim(TargetRequiredClaimConstraint),
    Item(ItemConstraint),
    Type(TypeConstraint),
    ValueType(ValueTypeConstraint),
    Range(RangeConstraint),
    MultiValue(MultiValueConstraint),
    ConflictsWith(ConflictsWithConstraint),
    Qualifier(QualifierConstraint),
}

/// Double dispatch over constraint kinds
pub trait ConstraintVisitor {
    type Output;

    fn visit_single_value(&mut self, c: &SingleValueConstraint) -> Self::Output;
    fn visit_unique_value(&mut self, c: &UniqueValueConstraint) -> Self::Output;
    fn visit_format(&mut self, c: &FormatConstraint) -> Self::Output;
    fn visit_one_of(&mut self, c: &OneOfConstraint) -> Self::Output;
    fn visit_symmetric(&mut self, c: &SymmetricConstraint) -> Self::Output;
    fn visit_inverse(&mut self, c: &InverseConstraint) -> Self::Output;
    fn visit_existing_file(&mut self, c: &ExistingFileConstraint) -> Self::Output;
    fn visit_target_required_claim(&mut self, c: &TargetRequiredClaimConstraint) -> Self::Output;
    fn visit_item(&mut self, c: &ItemConstraint) -> Self::Output;
    fn visit_type(&mut self, c: &TypeConstraint) -> Self::Output;
    fn visit_value_type(&mut self, c: &ValueTypeConstraint) -> Self::Output;
    fn visit_range(&mut self, c: &RangeConstraint) -> Self::Output;
    fn visit_multi_value(&mut self, c: &MultiValueConstraint) -> Self::Output;
    fn visit_conflicts_with(&mut self, c: &ConflictsWithConstraint) -> Self::Output;
    fn visit_qualifier(&mut self, c: &QualifierConstraint) -> Self::Output;
}

impl Constraint {
    /// The constrained property
    pub fn property(&self) -> &PropertyId {
        match self {
            Constraint::SingleValue(c) => &c.property,
            Constraint::UniqueValue(c) => &c.property,
            Constraint::Format(c) => &c.property,
            Constraint::OneOf(c) => &c.property,
            Constraint::Symmetric(c) => &c.property,
            Constraint::Inverse(c) => &c.property,
            Constraint::ExistingFile(c) => &c.property,
            Constraint::TargetRequiredClaim(c) => &c.property,
            Constraint::Item(c) => &c.property,
            Constraint::Type(c) => &c.property,
            Constraint::ValueType(c) => &c.property,
            Constraint::Range(c) => &c.property,
            Constraint::MultiValue(c) => &c.property,
            Constraint::ConflictsWith(c) => &c.property,
            Constraint::Qualifier(c) => &c.property,
        }
    }

    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::SingleValue(_) => ConstraintKind::SingleValue,
            Constraint::UniqueValue(_) => ConstraintKind::UniqueValue,
            Constraint::Format(_) => ConstraintKind::Format,
            Constraint::OneOf(_) => ConstraintKind::OneOf,
            Constraint::Symmetric(_) => ConstraintKind::Symmetric,
            Constraint::Inverse(_) => ConstraintKind::Inverse,
            Constraint::ExistingFile(_) => ConstraintKind::ExistingFile,
            Constraint::TargetRequiredClaim(_) => ConstraintKind::TargetRequiredClaim,
            Constraint::Item(_) => ConstraintKind::Item,
            Constraint::Type(_) => ConstraintKind::Type,
            Constraint::ValueType(_) => ConstraintKind::ValueType,
            Constraint::Range(_) => ConstraintKind::Range,
            Constraint::MultiValue(_) => ConstraintKind::MultiValue,
            Constraint::ConflictsWith(_) => ConstraintKind::ConflictsWith,
            Constraint::Qualifier(_) => ConstraintKind::Qualifier,
        }
    }

    pub fn accept<V: ConstraintVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Constraint::SingleValue(c) => visitor.visit_single_value(c),
            Constraint::UniqueValue(c) => visitor.visit_unique_value(c),
            Constraint::Format(c) => visitor.visit_format(c),
            Constraint::OneOf(c) => visitor.visit_one_of(c),
            Constraint::Symmetric(c) => visitor.visit_symmetric(c),
            Constraint::Inverse(c) => visitor.visit_inverse(c),
            Constraint::ExistingFile(c) => visitor.visit_existing_file(c),
            Constraint::TargetRequiredClaim(c) => visitor.visit_target_required_claim(c),
            Constraint::Item(c) => visitor.visit_item(c),
            Constraint::Type(c) => visitor.visit_type(c),
            Constraint::ValueType(c) => visitor.visit_value_type(c),
            Constraint::Range(c) => visitor.visit_range(c),
            Constraint::MultiValue(c) => visitor.visit_multi_value(c),
            Constraint::ConflictsWith(c) => visitor.visit_conflicts_with(c),
            Constraint::Qualifier(c) => visitor.visit_qualifier(c),
        }
    }

    /// The canonical template declaring this constraint
    pub fn to_template(&self) -> Template {
        let mut parameters = Parameters::new();
        match self {
            Constraint::SingleValue(_)
            | Constraint::UniqueValue(_)
            | Constraint::Symmetric(_)
            | Constraint::ExistingFile(_)
            | Constraint::MultiValue(_)
            | Constraint::Qualifier(_) => {}
            Constraint::Format(c) => {
                if c.pattern.contains(['|', '{', '}', '=', '<']) {
                    parameters.insert("pattern", wrap_nowiki(&c.pattern));
                } else {
                    parameters.insert("pattern", &c.pattern);
                }
            }
            Constraint::OneOf(c) => parameters.insert("values", join_ids(&c.values)),
            Constraint::Inverse(c) => parameters.insert("property", c.inverse.id()),
            Constraint::TargetRequiredClaim(c) => {
                parameters.insert("property", c.required.id());
                if let Some(item) = &c.item {
                    parameters.insert("item", item.id());
                }
            }
            Constraint::Item(c) => {
                parameters.insert("property", c.required.id());
                if !c.items.is_empty() {
                    parameters.insert("items", join_ids(&c.items));
                }
                if !c.exceptions.is_empty() {
                    parameters.insert("exceptions", join_ids(&c.exceptions));
                }
            }
            Constraint::Type(TypeConstraint { class, relation, .. })
            | Constraint::ValueType(ValueTypeConstraint { class, relation, .. }) => {
                parameters.insert("class", class.id());
                parameters.insert("relation", relation.as_str());
            }
            Constraint::Range(c) => match &c.bounds {
                RangeBounds::Time { min, max } => {
                    parameters.insert("min", min.to_string());
                    parameters.insert("max", max.to_string());
                }
                RangeBounds::Quantity { min, max } => {
                    parameters.insert("min", min.as_str());
                    parameters.insert("max", max.as_str());
                }
            },
            Constraint::ConflictsWith(c) => {
                let list = c
                    .conflicts
                    .iter()
                    .map(|conflict| {
                        if conflict.items.is_empty() {
                            conflict.property.to_string()
                        } else {
                            format!("{}: {}", conflict.property, join_ids(&conflict.items))
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
                parameters.insert("list", list);
            }
        }
        Template::new(self.kind().template_name(), parameters)
    }
}

fn join_ids(ids: &[ItemId]) -> String {
    ids.iter()
        .map(|id| id.id())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.property(), self.to_template())
    }
}
