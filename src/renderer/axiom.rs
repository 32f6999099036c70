//! A small OWL 2 axiom model shared by all output formats

use crate::model::{ItemId, PropertyId};

/// Base IRI of the classes and datatypes used by the translation
pub const ONTOLOGY_VOCABULARY: &str = "http://www.wikidata.org/ontology#";

/// Whether a property links to entities or to literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Object,
    Data,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyRef {
    pub id: PropertyId,
    pub kind: PropertyKind,
}

impl PropertyRef {
    pub fn object(id: PropertyId) -> Self {
        Self {
            id,
            kind: PropertyKind::Object,
        }
    }

    pub fn data(id: PropertyId) -> Self {
        Self {
            id,
            kind: PropertyKind::Data,
        }
    }
}

/// Datatypes appearing in data ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralType {
    String,
    DateTime,
    Decimal,
    NonNegativeInteger,
    /// `rdfs:Literal`, any literal value
    Literal,
    /// Names of files on Wikimedia Commons
    CommonsMedia,
}

impl LiteralType {
    /// Prefixed name, using the `xsd:`, `rdfs:` and `wdo:` prefixes
    pub fn prefixed(&self) -> &'static str {
        match self {
            LiteralType::String => "xsd:string",
            LiteralType::DateTime => "xsd:dateTime",
            LiteralType::Decimal => "xsd:decimal",
            LiteralType::NonNegativeInteger => "xsd:nonNegativeInteger",
            LiteralType::Literal => "rdfs:Literal",
            LiteralType::CommonsMedia => "wdo:CommonsMedia",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub lexical: String,
    pub datatype: LiteralType,
}

impl Literal {
    pub fn new(lexical: impl Into<String>, datatype: LiteralType) -> Self {
        Self {
            lexical: lexical.into(),
            datatype,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    MinInclusive,
    MaxInclusive,
    Pattern,
}

impl Facet {
    pub fn prefixed(&self) -> &'static str {
        match self {
            Facet::MinInclusive => "xsd:minInclusive",
            Facet::MaxInclusive => "xsd:maxInclusive",
            Facet::Pattern => "xsd:pattern",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataRange {
    Datatype(LiteralType),
    Restriction {
        base: LiteralType,
        facets: Vec<(Facet, Literal)>,
    },
}

/// Classes the translation refers to besides Wikidata items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabularyClass {
    /// Statements, the subjects of qualifiers
    Statement,
}

impl VocabularyClass {
    pub fn prefixed(&self) -> &'static str {
        match self {
            VocabularyClass::Statement => "wdo:Statement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassExpression {
    Thing,
    Item(ItemId),
    Vocabulary(VocabularyClass),
    ObjectSomeValuesFrom(PropertyId, Box<ClassExpression>),
    DataSomeValuesFrom(PropertyId, DataRange),
    ObjectHasValue(PropertyId, ItemId),
    ObjectOneOf(Vec<ItemId>),
    MinCardinality(u32, PropertyRef),
    UnionOf(Vec<ClassExpression>),
}

impl ClassExpression {
    /// Things that have some value for the property
    pub fn has_some(property: &PropertyRef) -> Self {
        match property.kind {
            PropertyKind::Object => {
                ClassExpression::ObjectSomeValuesFrom(property.id.clone(), Box::new(ClassExpression::Thing))
            }
            PropertyKind::Data => ClassExpression::DataSomeValuesFrom(
                property.id.clone(),
                DataRange::Datatype(LiteralType::Literal),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Axiom {
    Declaration(PropertyRef),
    Functional(PropertyRef),
    InverseFunctional(PropertyId),
    /// `owl:Thing` is identified by the value of the property
    HasKey(PropertyRef),
    Symmetric(PropertyId),
    InverseProperties(PropertyId, PropertyId),
    Domain(PropertyRef, ClassExpression),
    ObjectPropertyRange(PropertyId, ClassExpression),
    DataPropertyRange(PropertyId, DataRange),
    SubClassOf(ClassExpression, ClassExpression),
    DisjointClasses(Vec<ClassExpression>),
}
