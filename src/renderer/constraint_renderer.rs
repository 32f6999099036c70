//! Translation of constraints into OWL axioms

use std::collections::{HashMap, HashSet};

use tracing::{trace, warn};

use crate::constraint::ConstraintKind;
use crate::model::{
    Constraint, ConstraintVisitor, ConflictsWithConstraint, ExistingFileConstraint,
    FormatConstraint, InverseConstraint, ItemConstraint, ItemId, MultiValueConstraint,
    OneOfConstraint, PropertyId, PropertyTypeResolver, QualifierConstraint, RangeBounds,
    RangeConstraint, Relation, SingleValueConstraint, SymmetricConstraint,
    TargetRequiredClaimConstraint, TypeConstraint, UniqueValueConstraint, ValueTypeConstraint,
};

use super::axiom::{
    Axiom, ClassExpression, DataRange, Facet, Literal, LiteralType, PropertyKind, PropertyRef,
    VocabularyClass,
};
use super::{RenderError, RendererFormat};

/// Turns constraints into axioms and writes them to a format
///
/// Properties are declared once, before the first axiom that uses them.
/// Each property has one kind for the whole pass. A known datatype decides
/// it. Otherwise a constraint that only applies to literals (format,
/// existing file, range) makes it a data property, and anything else an
/// object property. Constraints that need the other kind produce no axioms.
pub struct ConstraintRenderer<'a> {
    types: &'a dyn PropertyTypeResolver,
    declarations: bool,
    kinds: HashMap<PropertyId, PropertyKind>,
    declared: HashSet<PropertyRef>,
    pending: Vec<PropertyRef>,
}

impl<'a> ConstraintRenderer<'a> {
    pub fn new(types: &'a dyn PropertyTypeResolver, declarations: bool) -> Self {
        Self {
            types,
            declarations,
            kinds: HashMap::new(),
            declared: HashSet::new(),
            pending: Vec::new(),
        }
    }

    /// Fix the kind of every property of unknown datatype that carries a
    /// literal-only constraint, before any axiom is produced
    pub fn settle<'c>(&mut self, constraints: impl IntoIterator<Item = &'c Constraint>) {
        for constraint in constraints {
            let literal_only = matches!(
                constraint.kind(),
                ConstraintKind::Format | ConstraintKind::ExistingFile | ConstraintKind::Range
            );
            if literal_only && self.types.datatype(constraint.property()).is_none() {
                self.kinds
                    .entry(constraint.property().clone())
                    .or_insert(PropertyKind::Data);
            }
        }
    }

    /// Write the axioms of one constraint
    pub fn render<F: RendererFormat + ?Sized>(
        &mut self,
        constraint: &Constraint,
        format: &mut F,
    ) -> Result<(), RenderError> {
        let axioms = self.axioms(constraint);
        trace!(property = %constraint.property(), kind = %constraint.kind(), axioms = axioms.len(), "rendering constraint");
        for axiom in &axioms {
            format.write_axiom(axiom)?;
        }
        Ok(())
    }

    /// The axioms of one constraint, preceded by any new declarations
    pub fn axioms(&mut self, constraint: &Constraint) -> Vec<Axiom> {
        let body = constraint.accept(self);
        let pending = std::mem::take(&mut self.pending);
        if body.is_empty() {
            warn!(property = %constraint.property(), kind = %constraint.kind(), "constraint does not fit the property kind");
            return body;
        }
        let mut axioms = Vec::with_capacity(body.len());
        for property in pending {
            if self.declarations && self.declared.insert(property.clone()) {
                axioms.push(Axiom::Declaration(property));
            }
        }
        axioms.extend(body);
        axioms
    }

    /// The kind of `property`, settled on first use with `preferred` as the
    /// fallback for unknown datatypes
    fn kind_of(&mut self, property: &PropertyId, preferred: PropertyKind) -> PropertyKind {
        if let Some(kind) = self.kinds.get(property) {
            return *kind;
        }
        let kind = match self.types.datatype(property) {
            Some(datatype) if datatype.is_entity_valued() => PropertyKind::Object,
            Some(_) => PropertyKind::Data,
            None => preferred,
        };
        self.kinds.insert(property.clone(), kind);
        kind
    }

    fn use_property(&mut self, id: &PropertyId, kind: PropertyKind) -> PropertyRef {
        let property = PropertyRef {
            id: id.clone(),
            kind,
        };
        self.pending.push(property.clone());
        property
    }

    fn property(&mut self, id: &PropertyId) -> PropertyRef {
        let kind = self.kind_of(id, PropertyKind::Object);
        self.use_property(id, kind)
    }

    /// `id` as a property of `kind`, or `None` if it has the other kind
    fn require(&mut self, id: &PropertyId, kind: PropertyKind) -> Option<PropertyRef> {
        if self.kind_of(id, kind) == kind {
            Some(self.use_property(id, kind))
        } else {
            None
        }
    }

    fn object(&mut self, id: &PropertyId) -> Option<PropertyRef> {
        self.require(id, PropertyKind::Object)
    }

    fn data(&mut self, id: &PropertyId) -> Option<PropertyRef> {
        self.require(id, PropertyKind::Data)
    }

    fn has_class(&mut self, class: &ItemId, relation: Relation) -> Option<ClassExpression> {
        let relation = self.object(&relation.property())?;
        Some(ClassExpression::ObjectSomeValuesFrom(
            relation.id,
            Box::new(ClassExpression::Item(class.clone())),
        ))
    }

    /// Things with some value of `property`, one of `items` when given
    fn has_value_among(&mut self, property: &PropertyId, items: &[ItemId]) -> Option<ClassExpression> {
        if items.is_empty() {
            let property = self.property(property);
            Some(ClassExpression::has_some(&property))
        } else {
            let property = self.object(property)?;
            Some(ClassExpression::ObjectSomeValuesFrom(
                property.id,
                Box::new(ClassExpression::ObjectOneOf(items.to_vec())),
            ))
        }
    }
}

impl ConstraintVisitor for ConstraintRenderer<'_> {
    type Output = Vec<Axiom>;

    fn visit_single_value(&mut self, c: &SingleValueConstraint) -> Vec<Axiom> {
        vec![Axiom::Functional(self.property(&c.property))]
    }

    fn visit_unique_value(&mut self, c: &UniqueValueConstraint) -> Vec<Axiom> {
        let property = self.property(&c.property);
        match property.kind {
            PropertyKind::Object => vec![Axiom::InverseFunctional(property.id)],
            PropertyKind::Data => vec![Axiom::HasKey(property)],
        }
    }

    fn visit_format(&mut self, c: &FormatConstraint) -> Vec<Axiom> {
        let Some(property) = self.data(&c.property) else {
            return Vec::new();
        };
        vec![Axiom::DataPropertyRange(
            property.id,
            DataRange::Restriction {
                base: LiteralType::String,
                facets: vec![(
                    Facet::Pattern,
                    Literal::new(c.pattern.clone(), LiteralType::String),
                )],
            },
        )]
    }

    fn visit_one_of(&mut self, c: &OneOfConstraint) -> Vec<Axiom> {
        let Some(property) = self.object(&c.property) else {
            return Vec::new();
        };
        vec![Axiom::ObjectPropertyRange(
            property.id,
            ClassExpression::ObjectOneOf(c.values.clone()),
        )]
    }

    fn visit_symmetric(&mut self, c: &SymmetricConstraint) -> Vec<Axiom> {
        self.object(&c.property)
            .map(|property| Axiom::Symmetric(property.id))
            .into_iter()
            .collect()
    }

    fn visit_inverse(&mut self, c: &InverseConstraint) -> Vec<Axiom> {
        let (Some(property), Some(inverse)) = (self.object(&c.property), self.object(&c.inverse))
        else {
            return Vec::new();
        };
        vec![Axiom::InverseProperties(property.id, inverse.id)]
    }

    fn visit_existing_file(&mut self, c: &ExistingFileConstraint) -> Vec<Axiom> {
        self.data(&c.property)
            .map(|property| {
                Axiom::DataPropertyRange(property.id, DataRange::Datatype(LiteralType::CommonsMedia))
            })
            .into_iter()
            .collect()
    }

    fn visit_target_required_claim(&mut self, c: &TargetRequiredClaimConstraint) -> Vec<Axiom> {
        let Some(property) = self.object(&c.property) else {
            return Vec::new();
        };
        let target = match &c.item {
            Some(item) => match self.object(&c.required) {
                Some(required) => ClassExpression::ObjectHasValue(required.id, item.clone()),
                None => return Vec::new(),
            },
            None => {
                let required = self.property(&c.required);
                ClassExpression::has_some(&required)
            }
        };
        vec![Axiom::ObjectPropertyRange(property.id, target)]
    }

    fn visit_item(&mut self, c: &ItemConstraint) -> Vec<Axiom> {
        let property = self.property(&c.property);
        let Some(mut subject) = self.has_value_among(&c.required, &c.items) else {
            return Vec::new();
        };
        if !c.exceptions.is_empty() {
            subject = ClassExpression::UnionOf(vec![
                subject,
                ClassExpression::ObjectOneOf(c.exceptions.clone()),
            ]);
        }
        vec![Axiom::Domain(property, subject)]
    }

    fn visit_type(&mut self, c: &TypeConstraint) -> Vec<Axiom> {
        let property = self.property(&c.property);
        match self.has_class(&c.class, c.relation) {
            Some(class) => vec![Axiom::Domain(property, class)],
            None => Vec::new(),
        }
    }

    fn visit_value_type(&mut self, c: &ValueTypeConstraint) -> Vec<Axiom> {
        let Some(property) = self.object(&c.property) else {
            return Vec::new();
        };
        match self.has_class(&c.class, c.relation) {
            Some(class) => vec![Axiom::ObjectPropertyRange(property.id, class)],
            None => Vec::new(),
        }
    }

    fn visit_range(&mut self, c: &RangeConstraint) -> Vec<Axiom> {
        let Some(property) = self.data(&c.property) else {
            return Vec::new();
        };
        let (base, min, max) = match &c.bounds {
            RangeBounds::Time { min, max } => (LiteralType::DateTime, min.to_xsd(), max.to_xsd()),
            RangeBounds::Quantity { min, max } => (
                LiteralType::Decimal,
                min.as_str().to_string(),
                max.as_str().to_string(),
            ),
        };
        vec![Axiom::DataPropertyRange(
            property.id,
            DataRange::Restriction {
                base,
                facets: vec![
                    (Facet::MinInclusive, Literal::new(min, base)),
                    (Facet::MaxInclusive, Literal::new(max, base)),
                ],
            },
        )]
    }

    fn visit_multi_value(&mut self, c: &MultiValueConstraint) -> Vec<Axiom> {
        let property = self.property(&c.property);
        vec![Axiom::SubClassOf(
            ClassExpression::has_some(&property),
            ClassExpression::MinCardinality(2, property),
        )]
    }

    fn visit_conflicts_with(&mut self, c: &ConflictsWithConstraint) -> Vec<Axiom> {
        let property = self.property(&c.property);
        c.conflicts
            .iter()
            .filter_map(|conflict| {
                let other = self.has_value_among(&conflict.property, &conflict.items)?;
                Some(Axiom::DisjointClasses(vec![ClassExpression::has_some(&property), other]))
            })
            .collect()
    }

    fn visit_qualifier(&mut self, c: &QualifierConstraint) -> Vec<Axiom> {
        let property = self.property(&c.property);
        vec![Axiom::Domain(
            property,
            ClassExpression::Vocabulary(VocabularyClass::Statement),
        )]
    }
}
