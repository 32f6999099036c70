//! OWL 2 mapped to RDF, written as Turtle

use std::io::Write;

use crate::model::{ItemId, PropertyId};

use super::axiom::{
    Axiom, ClassExpression, DataRange, Literal, LiteralType, PropertyKind, ONTOLOGY_VOCABULARY,
};
use super::{escape_literal, Phase, RenderConfig, RenderError, RendererFormat};

const PREFIXES: &[(&str, &str)] = &[
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
];

/// Writes axioms as Turtle triples, class expressions as blank nodes
pub struct TurtleFormat<W: Write> {
    out: W,
    config: RenderConfig,
    phase: Phase,
}

impl<W: Write> TurtleFormat<W> {
    pub fn new(out: W, config: RenderConfig) -> Self {
        Self {
            out,
            config,
            phase: Phase::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn property(&self, id: &PropertyId) -> String {
        self.config.entity_name(id.base_iri(), id.id())
    }

    fn item(&self, id: &ItemId) -> String {
        self.config.entity_name(id.base_iri(), id.id())
    }

    fn literal(&self, literal: &Literal) -> String {
        format!(
            "\"{}\"^^{}",
            escape_literal(&literal.lexical),
            literal.datatype.prefixed()
        )
    }

    fn list(members: impl IntoIterator<Item = String>) -> String {
        let members: Vec<String> = members.into_iter().collect();
        format!("( {} )", members.join(" "))
    }

    fn restriction(&self, property: &PropertyId, predicate: &str, object: String) -> String {
        format!(
            "[ a owl:Restriction ; owl:onProperty {} ; {} {} ]",
            self.property(property),
            predicate,
            object
        )
    }

    fn data_range(&self, range: &DataRange) -> String {
        match range {
            DataRange::Datatype(datatype) => datatype.prefixed().to_string(),
            DataRange::Restriction { base, facets } => {
                let facets = facets.iter().map(|(facet, value)| {
                    format!("[ {} {} ]", facet.prefixed(), self.literal(value))
                });
                format!(
                    "[ a rdfs:Datatype ; owl:onDatatype {} ; owl:withRestrictions {} ]",
                    base.prefixed(),
                    Self::list(facets)
                )
            }
        }
    }

    fn class(&self, class: &ClassExpression) -> String {
        match class {
            ClassExpression::Thing => "owl:Thing".to_string(),
            ClassExpression::Item(id) => self.item(id),
            ClassExpression::Vocabulary(class) => class.prefixed().to_string(),
            ClassExpression::ObjectSomeValuesFrom(p, filler) => {
                self.restriction(p, "owl:someValuesFrom", self.class(filler))
            }
            ClassExpression::DataSomeValuesFrom(p, range) => {
                self.restriction(p, "owl:someValuesFrom", self.data_range(range))
            }
            ClassExpression::ObjectHasValue(p, value) => {
                self.restriction(p, "owl:hasValue", self.item(value))
            }
            ClassExpression::ObjectOneOf(items) => format!(
                "[ a owl:Class ; owl:oneOf {} ]",
                Self::list(items.iter().map(|item| self.item(item)))
            ),
            ClassExpression::MinCardinality(n, p) => self.restriction(
                &p.id,
                "owl:minCardinality",
                self.literal(&Literal::new(n.to_string(), LiteralType::NonNegativeInteger)),
            ),
            ClassExpression::UnionOf(classes) => format!(
                "[ a owl:Class ; owl:unionOf {} ]",
                Self::list(classes.iter().map(|class| self.class(class)))
            ),
        }
    }

    fn axiom(&self, axiom: &Axiom) -> String {
        match axiom {
            Axiom::Declaration(p) => {
                let class = match p.kind {
                    PropertyKind::Object => "owl:ObjectProperty",
                    PropertyKind::Data => "owl:DatatypeProperty",
                };
                format!("{} a {} .", self.property(&p.id), class)
            }
            Axiom::Functional(p) => {
                format!("{} a owl:FunctionalProperty .", self.property(&p.id))
            }
            Axiom::InverseFunctional(p) => {
                format!("{} a owl:InverseFunctionalProperty .", self.property(p))
            }
            Axiom::HasKey(p) => format!(
                "owl:Thing owl:hasKey {} .",
                Self::list([self.property(&p.id)])
            ),
            Axiom::Symmetric(p) => format!("{} a owl:SymmetricProperty .", self.property(p)),
            Axiom::InverseProperties(p, q) => {
                format!("{} owl:inverseOf {} .", self.property(p), self.property(q))
            }
            Axiom::Domain(p, class) => {
                format!("{} rdfs:domain {} .", self.property(&p.id), self.class(class))
            }
            Axiom::ObjectPropertyRange(p, class) => {
                format!("{} rdfs:range {} .", self.property(p), self.class(class))
            }
            Axiom::DataPropertyRange(p, range) => {
                format!("{} rdfs:range {} .", self.property(p), self.data_range(range))
            }
            Axiom::SubClassOf(sub, sup) => {
                format!("{} rdfs:subClassOf {} .", self.class(sub), self.class(sup))
            }
            Axiom::DisjointClasses(classes) => match classes.as_slice() {
                [first, second] => format!(
                    "{} owl:disjointWith {} .",
                    self.class(first),
                    self.class(second)
                ),
                _ => format!(
                    "[ a owl:AllDisjointClasses ; owl:members {} ] .",
                    Self::list(classes.iter().map(|class| self.class(class)))
                ),
            },
        }
    }
}

impl<W: Write> RendererFormat for TurtleFormat<W> {
    fn start(&mut self) -> Result<(), RenderError> {
        self.phase.start()?;
        for (prefix, iri) in PREFIXES {
            writeln!(self.out, "@prefix {}: <{}> .", prefix, iri)?;
        }
        writeln!(self.out, "@prefix wd: <{}> .", self.config.base_iri)?;
        writeln!(self.out, "@prefix wdo: <{}> .", ONTOLOGY_VOCABULARY)?;
        writeln!(self.out)?;
        writeln!(self.out, "<{}> a owl:Ontology .", self.config.ontology_iri)?;
        Ok(())
    }

    fn write_axiom(&mut self, axiom: &Axiom) -> Result<(), RenderError> {
        self.phase.ensure_open()?;
        let line = self.axiom(axiom);
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        self.phase.finish()?;
        self.out.flush()?;
        Ok(())
    }
}
