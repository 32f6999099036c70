//! One parser per constraint kind
//!
//! Each parser reads the kind-specific parameters of a template. Missing or
//! unusable parameters reject the template with a [`SkipReason`]; only
//! contradictions with the property's datatype are errors.

use crate::model::{
    parse_date, Conflict, ConflictsWithConstraint, Constraint, Datatype, Decimal,
    ExistingFileConstraint, FormatConstraint, InverseConstraint, ItemConstraint, ItemId,
    MultiValueConstraint, OneOfConstraint, PropertyId, PropertyTypeResolver, QualifierConstraint,
    RangeBounds, RangeConstraint, Relation, SingleValueConstraint, SymmetricConstraint,
    TargetRequiredClaimConstraint, TypeConstraint, UniqueValueConstraint, ValueTypeConstraint,
};
use crate::template::Template;

use super::error::{ConstraintError, Rejected, SkipReason};
use super::values::{
    flatten_links, item_ids, property_ids, single_item_id, single_property_id, strip_nowiki,
};
use super::ConstraintKind;

/// Signature shared by all kind parsers
pub(crate) type KindParser =
    fn(&PropertyId, &Template, &dyn PropertyTypeResolver) -> Result<Constraint, Rejected>;

/// The parser for a constraint kind; meta kinds have none
pub(crate) fn parser_for(kind: ConstraintKind) -> Option<KindParser> {
    let parser: KindParser = match kind {
        ConstraintKind::SingleValue => parse_single_value,
        ConstraintKind::UniqueValue => parse_unique_value,
        ConstraintKind::Format => parse_format,
        ConstraintKind::OneOf => parse_one_of,
        ConstraintKind::Symmetric => parse_symmetric,
        ConstraintKind::Inverse => parse_inverse,
        ConstraintKind::ExistingFile => parse_existing_file,
        ConstraintKind::TargetRequiredClaim => parse_target_required_claim,
        ConstraintKind::Item => parse_item,
        ConstraintKind::Type => parse_type,
        ConstraintKind::ValueType => parse_value_type,
        ConstraintKind::Range => parse_range,
        ConstraintKind::MultiValue => parse_multi_value,
        ConstraintKind::ConflictsWith => parse_conflicts_with,
        ConstraintKind::Qualifier => parse_qualifier,
        ConstraintKind::Person | ConstraintKind::Taxon => return None,
    };
    Some(parser)
}

/// A parameter that must be present and non-empty
fn required<'t>(template: &'t Template, name: &'static str) -> Result<&'t str, SkipReason> {
    template
        .get(name)
        .filter(|value| !value.is_empty())
        .ok_or(SkipReason::MissingParameter(name))
}

/// A parameter that may be absent; an empty value counts as absent
fn optional<'t>(template: &'t Template, name: &str) -> Option<&'t str> {
    template.get(name).filter(|value| !value.is_empty())
}

fn required_property(template: &Template, name: &'static str) -> Result<PropertyId, SkipReason> {
    let value = required(template, name)?;
    single_property_id(value).ok_or_else(|| SkipReason::invalid(name, value))
}

fn class_and_relation(template: &Template) -> Result<(ItemId, Relation), SkipReason> {
    let class = required(template, "class")?;
    let relation = required(template, "relation")?;
    let class = single_item_id(class).ok_or_else(|| SkipReason::invalid("class", class))?;
    let relation =
        Relation::parse(relation).ok_or_else(|| SkipReason::invalid("relation", relation))?;
    Ok((class, relation))
}

fn parse_single_value(
    property: &PropertyId,
    _: &Template,
    _: &dyn PropertyTypeResolver,
) -> Result<Constraint, Rejected> {
    Ok(Constraint::SingleValue(SingleValueConstraint {
        property: property.clone(),
    }))
}

fn parse_unique_value(
    property: &PropertyId,
    _: &Template,
    _: &dyn PropertyTypeResolver,
) -> Result<Constraint, Rejected> {
    Ok(Constraint::UniqueValue(UniqueValueConstraint {
        property: property.clone(),
    }))
}

fn parse_format(
    property: &PropertyId,
    template: &Template,
    _: &dyn PropertyTypeResolver,
) -> Result<Constraint, Rejected> {
    let raw = required(template, "pattern")?;
    let pattern = strip_nowiki(raw).trim().to_string();
    if pattern.is_empty() {
        return Err(SkipReason::invalid("pattern", raw).into());
    }
    Ok(Constraint::Format(FormatConstraint {
        property: property.clone(),
        pattern,
    }))
}

fn parse_one_of(
    property: &PropertyId,
    template: &Template,
    _: &dyn PropertyTypeResolver,
) -> Result<Constraint, Rejected> {
    let raw = required(template, "values")?;
    let values = item_ids(raw);
    if values.is_empty() {
        return Err(SkipReason::invalid("values", raw).into());
    }
    Ok(Constraint::OneOf(OneOfConstraint {
        property: property.clone(),
        values,
    }))
}

fn parse_symmetric(
    property: &PropertyId,
    _: &Template,
    _: &dyn PropertyTypeResolver,
) -> Result<Constraint, Rejected> {
    Ok(Constraint::Symmetric(SymmetricConstraint {
        property: property.clone(),
    }))
}

fn parse_inverse(
    property: &PropertyId,
    template: &Template,
    _: &dyn PropertyTypeResolver,
) -> Result<Constraint, Rejected> {
    Ok(Constraint::Inverse(InverseConstraint {
        property: property.clone(),
        inverse: required_property(template, "property")?,
    }))
}

fn parse_existing_file(
    property: &PropertyId,
    _: &Template,
    _: &dyn PropertyTypeResolver,
) -> Result<Constraint, Rejected> {
    Ok(Constraint::ExistingFile(ExistingFileConstraint {
        property: property.clone(),
    }))
}

fn parse_target_required_claim(
    property: &PropertyId,
    template: &Template,
    _: &dyn PropertyTypeResolver,
) -> Result<Constraint, Rejected> {
    let required = required_property(template, "property")?;
    let item = match optional(template, "item") {
        Some(raw) => Some(single_item_id(raw).ok_or_else(|| SkipReason::invalid("item", raw))?),
        None => None,
    };
    Ok(Constraint::TargetRequiredClaim(
        TargetRequiredClaimConstraint {
            property: property.clone(),
            required,
            item,
        },
    ))
}

fn parse_item(
    property: &PropertyId,
    template: &Template,
    _: &dyn PropertyTypeResolver,
) -> Result<Constraint, Rejected> {
    let required = required_property(template, "property")?;
    let mut items = Vec::new();
    for name in ["item", "item2", "item3", "items"] {
        if let Some(raw) = optional(template, name) {
            items.extend(item_ids(raw));
        }
    }
    let exceptions = optional(template, "exceptions")
        .map(item_ids)
        .unwrap_or_default();
    Ok(Constraint::Item(ItemConstraint {
        property: property.clone(),
        required,
        items,
        exceptions,
    }))
}

fn parse_type(
    property: &PropertyId,
    template: &Template,
    _: &dyn PropertyTypeResolver,
) -> Result<Constraint, Rejected> {
    let (class, relation) = class_and_relation(template)?;
    Ok(Constraint::Type(TypeConstraint {
        property: property.clone(),
        class,
        relation,
    }))
}

fn parse_value_type(
    property: &PropertyId,
    template: &Template,
    _: &dyn PropertyTypeResolver,
) -> Result<Constraint, Rejected> {
    let (class, relation) = class_and_relation(template)?;
    Ok(Constraint::ValueType(ValueTypeConstraint {
        property: property.clone(),
        class,
        relation,
    }))
}

/// Range bounds are dates for Time properties and decimals for Quantity
/// properties; a Range on any other known datatype is an error.
fn parse_range(
    property: &PropertyId,
    template: &Template,
    types: &dyn PropertyTypeResolver,
) -> Result<Constraint, Rejected> {
    let datatype = types
        .datatype(property)
        .ok_or_else(|| SkipReason::UnknownDatatype(property.clone()))?;
    if !matches!(datatype, Datatype::Time | Datatype::Quantity) {
        return Err(
            ConstraintError::incompatible_datatype(property, ConstraintKind::Range, datatype).into(),
        );
    }

    let min = required(template, "min")?;
    let max = required(template, "max")?;
    let bounds = if datatype == Datatype::Time {
        RangeBounds::Time {
            min: parse_date(min).map_err(|_| SkipReason::invalid("min", min))?,
            max: parse_date(max).map_err(|_| SkipReason::invalid("max", max))?,
        }
    } else {
        RangeBounds::Quantity {
            min: Decimal::parse(min).map_err(|_| SkipReason::invalid("min", min))?,
            max: Decimal::parse(max).map_err(|_| SkipReason::invalid("max", max))?,
        }
    };
    Ok(Constraint::Range(RangeConstraint {
        property: property.clone(),
        bounds,
    }))
}

fn parse_multi_value(
    property: &PropertyId,
    _: &Template,
    _: &dyn PropertyTypeResolver,
) -> Result<Constraint, Rejected> {
    Ok(Constraint::MultiValue(MultiValueConstraint {
        property: property.clone(),
    }))
}

/// Parses `list` entries like `{{P|31}}: {{Q|5}}, {{Q|6}}; {{P|21}}`
fn parse_conflicts_with(
    property: &PropertyId,
    template: &Template,
    _: &dyn PropertyTypeResolver,
) -> Result<Constraint, Rejected> {
    let raw = required(template, "list")?;
    let flat = flatten_links(raw);
    let conflicts: Vec<Conflict> = flat
        .split([';', '\n'])
        .filter_map(|entry| {
            let (head, items) = entry.split_once(':').unwrap_or((entry, ""));
            let mut properties = property_ids(head);
            if properties.len() != 1 {
                return None;
            }
            properties.pop().map(|property| Conflict {
                property,
                items: item_ids(items),
            })
        })
        .collect();
    if conflicts.is_empty() {
        return Err(SkipReason::invalid("list", raw).into());
    }
    Ok(Constraint::ConflictsWith(ConflictsWithConstraint {
        property: property.clone(),
        conflicts,
    }))
}

fn parse_qualifier(
    property: &PropertyId,
    _: &Template,
    _: &dyn PropertyTypeResolver,
) -> Result<Constraint, Rejected> {
    Ok(Constraint::Qualifier(QualifierConstraint {
        property: property.clone(),
    }))
}
