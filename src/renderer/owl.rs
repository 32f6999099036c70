//! OWL 2 functional-style syntax

use std::io::Write;

use crate::model::{ItemId, PropertyId};

use super::axiom::{
    Axiom, ClassExpression, DataRange, Literal, PropertyKind, PropertyRef, ONTOLOGY_VOCABULARY,
};
use super::{escape_literal, Phase, RenderConfig, RenderError, RendererFormat};

const PREFIXES: &[(&str, &str)] = &[
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
];

/// Writes axioms as an OWL 2 functional-style ontology document
pub struct Owl2FunctionalFormat<W: Write> {
    out: W,
    config: RenderConfig,
    phase: Phase,
}

impl<W: Write> Owl2FunctionalFormat<W> {
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

    fn items(&self, ids: &[ItemId]) -> String {
        ids.iter()
            .map(|id| self.item(id))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn literal(&self, literal: &Literal) -> String {
        format!(
            "\"{}\"^^{}",
            escape_literal(&literal.lexical),
            literal.datatype.prefixed()
        )
    }

    fn data_range(&self, range: &DataRange) -> String {
        match range {
            DataRange::Datatype(datatype) => datatype.prefixed().to_string(),
            DataRange::Restriction { base, facets } => {
                let facets = facets
                    .iter()
                    .map(|(facet, value)| format!("{} {}", facet.prefixed(), self.literal(value)))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("DatatypeRestriction({} {})", base.prefixed(), facets)
            }
        }
    }

    fn class(&self, class: &ClassExpression) -> String {
        match class {
            ClassExpression::Thing => "owl:Thing".to_string(),
            ClassExpression::Item(id) => self.item(id),
            ClassExpression::Vocabulary(class) => class.prefixed().to_string(),
            ClassExpression::ObjectSomeValuesFrom(p, filler) => {
                format!("ObjectSomeValuesFrom({} {})", self.property(p), self.class(filler))
            }
            ClassExpression::DataSomeValuesFrom(p, range) => {
                format!("DataSomeValuesFrom({} {})", self.property(p), self.data_range(range))
            }
            ClassExpression::ObjectHasValue(p, value) => {
                format!("ObjectHasValue({} {})", self.property(p), self.item(value))
            }
            ClassExpression::ObjectOneOf(items) => format!("ObjectOneOf({})", self.items(items)),
            ClassExpression::MinCardinality(n, p) => format!(
                "{}MinCardinality({} {})",
                kind_prefix(p),
                n,
                self.property(&p.id)
            ),
            ClassExpression::UnionOf(classes) => {
                format!("ObjectUnionOf({})", self.classes(classes))
            }
        }
    }

    fn classes(&self, classes: &[ClassExpression]) -> String {
        classes
            .iter()
            .map(|class| self.class(class))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn axiom(&self, axiom: &Axiom) -> String {
        match axiom {
            Axiom::Declaration(p) => format!(
                "Declaration({}Property({}))",
                kind_prefix(p),
                self.property(&p.id)
            ),
            Axiom::Functional(p) => format!(
                "Functional{}Property({})",
                kind_prefix(p),
                self.property(&p.id)
            ),
            Axiom::InverseFunctional(p) => {
                format!("InverseFunctionalObjectProperty({})", self.property(p))
            }
            Axiom::HasKey(p) => match p.kind {
                PropertyKind::Object => format!("HasKey(owl:Thing ({}) ())", self.property(&p.id)),
                PropertyKind::Data => format!("HasKey(owl:Thing () ({}))", self.property(&p.id)),
            },
            Axiom::Symmetric(p) => format!("SymmetricObjectProperty({})", self.property(p)),
            Axiom::InverseProperties(p, q) => format!(
                "InverseObjectProperties({} {})",
                self.property(p),
                self.property(q)
            ),
            Axiom::Domain(p, class) => format!(
                "{}PropertyDomain({} {})",
                kind_prefix(p),
                self.property(&p.id),
                self.class(class)
            ),
            Axiom::ObjectPropertyRange(p, class) => {
                format!("ObjectPropertyRange({} {})", self.property(p), self.class(class))
            }
            Axiom::DataPropertyRange(p, range) => format!(
                "DataPropertyRange({} {})",
                self.property(p),
                self.data_range(range)
            ),
            Axiom::SubClassOf(sub, sup) => {
                format!("SubClassOf({} {})", self.class(sub), self.class(sup))
            }
            Axiom::DisjointClasses(classes) => {
                format!("DisjointClasses({})", self.classes(classes))
            }
        }
    }
}

fn kind_prefix(property: &PropertyRef) -> &'static str {
    match property.kind {
        PropertyKind::Object => "Object",
        PropertyKind::Data => "Data",
    }
}

impl<W: Write> RendererFormat for Owl2FunctionalFormat<W> {
    fn start(&mut self) -> Result<(), RenderError> {
        self.phase.start()?;
        for (prefix, iri) in PREFIXES {
            writeln!(self.out, "Prefix({}:=<{}>)", prefix, iri)?;
        }
        writeln!(self.out, "Prefix(wd:=<{}>)", self.config.base_iri)?;
        writeln!(self.out, "Prefix(wdo:=<{}>)", ONTOLOGY_VOCABULARY)?;
        writeln!(self.out)?;
        writeln!(self.out, "Ontology(<{}>", self.config.ontology_iri)?;
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
        writeln!(self.out, ")")?;
        self.out.flush()?;
        Ok(())
    }
}
