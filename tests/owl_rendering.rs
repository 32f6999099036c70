//! End-to-end tests: property talk pages in, ontology documents out

use pretty_assertions::assert_eq;

use wdtk_constraints::model::{Constraint, Datatype, PropertyId, PropertyTypeRegistry};
use wdtk_constraints::renderer::{
    render_constraints, Owl2FunctionalFormat, RenderError, RendererFormat, TurtleFormat,
};
use wdtk_constraints::{translate_pages, OutputFormat, PipelineConfig, RenderConfig, Revision};

const P21_PAGE: &str = "== Constraints ==
{{Constraint:Single value}}
{{Constraint:One of|values={{Q|6581097}}, {{Q|6581072}}}}
<!-- {{Constraint:Qualifier}} -->";

const P569_PAGE: &str = "{{Constraint:Range|min=1800|max=2000}}";

fn pages() -> Vec<Revision<'static>> {
    vec![
        Revision::new("Property talk:P569", P569_PAGE),
        Revision::new("Property talk:P21", P21_PAGE),
    ]
}

#[test]
fn test_functional_syntax_document() {
    let output = translate_pages(pages(), &PipelineConfig::default()).expect("Should render");
    assert!(output.errors.is_empty());
    assert!(output.malformed.is_empty());
    insta::assert_snapshot!(output.document, @r###"
    Prefix(owl:=<http://www.w3.org/2002/07/owl#>)
    Prefix(rdf:=<http://www.w3.org/1999/02/22-rdf-syntax-ns#>)
    Prefix(rdfs:=<http://www.w3.org/2000/01/rdf-schema#>)
    Prefix(xsd:=<http://www.w3.org/2001/XMLSchema#>)
    Prefix(wd:=<http://www.wikidata.org/entity/>)
    Prefix(wdo:=<http://www.wikidata.org/ontology#>)

    Ontology(<http://www.wikidata.org/ontology/constraints>
    Declaration(ObjectProperty(wd:P21))
    FunctionalObjectProperty(wd:P21)
    ObjectPropertyRange(wd:P21 ObjectOneOf(wd:Q6581097 wd:Q6581072))
    Declaration(DataProperty(wd:P569))
    DataPropertyRange(wd:P569 DatatypeRestriction(xsd:dateTime xsd:minInclusive "1800-01-01T00:00:00"^^xsd:dateTime xsd:maxInclusive "2000-01-01T00:00:00"^^xsd:dateTime))
    )
    "###);
}

#[test]
fn test_turtle_document() {
    let config = PipelineConfig::default()
        .with_output(RenderConfig::default().with_format(OutputFormat::Turtle));
    let output = translate_pages(pages(), &config).expect("Should render");
    insta::assert_snapshot!(output.document, @r###"
    @prefix owl: <http://www.w3.org/2002/07/owl#> .
    @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
    @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
    @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
    @prefix wd: <http://www.wikidata.org/entity/> .
    @prefix wdo: <http://www.wikidata.org/ontology#> .

    <http://www.wikidata.org/ontology/constraints> a owl:Ontology .
    wd:P21 a owl:ObjectProperty .
    wd:P21 a owl:FunctionalProperty .
    wd:P21 rdfs:range [ a owl:Class ; owl:oneOf ( wd:Q6581097 wd:Q6581072 ) ] .
    wd:P569 a owl:DatatypeProperty .
    wd:P569 rdfs:range [ a rdfs:Datatype ; owl:onDatatype xsd:dateTime ; owl:withRestrictions ( [ xsd:minInclusive "1800-01-01T00:00:00"^^xsd:dateTime ] [ xsd:maxInclusive "2000-01-01T00:00:00"^^xsd:dateTime ] ) ] .
    "###);
}

#[test]
fn test_person_page() {
    let config = PipelineConfig::default().with_output(RenderConfig::default().with_declarations(false));
    let output = translate_pages(
        [Revision::new("Property talk:P1477", "{{Constraint:Person}}")],
        &config,
    )
    .expect("Should render");

    assert_eq!(output.constraints.len(), 4);
    let axioms: Vec<&str> = output
        .document
        .lines()
        .filter(|line| line.starts_with("ObjectPropertyDomain"))
        .collect();
    assert_eq!(
        axioms,
        vec![
            "ObjectPropertyDomain(wd:P1477 ObjectSomeValuesFrom(wd:P31 wd:Q5))",
            "ObjectPropertyDomain(wd:P1477 ObjectSomeValuesFrom(wd:P21 owl:Thing))",
            "ObjectPropertyDomain(wd:P1477 ObjectSomeValuesFrom(wd:P19 owl:Thing))",
            "ObjectPropertyDomain(wd:P1477 DataSomeValuesFrom(wd:P569 rdfs:Literal))",
        ]
    );
}

#[test]
fn test_contradictions_do_not_stop_the_run() {
    let p1082 = PropertyId::new("P1082").unwrap();
    let config = PipelineConfig::default().with_property_type(p1082.clone(), Datatype::String);
    let output = translate_pages(
        [
            Revision::new("Property talk:P1082", "{{Constraint:Range|min=0|max=10}}{{Constraint:Single value}}"),
            Revision::new("Property talk:P21", "{{Constraint:Symmetric}}"),
        ],
        &config,
    )
    .expect("Should render");

    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].property(), &p1082);
    assert!(output.document.contains("FunctionalDataProperty(wd:P1082)"));
    assert!(output.document.contains("SymmetricObjectProperty(wd:P21)"));
}

#[test]
fn test_format_must_be_started() {
    let mut format = TurtleFormat::new(Vec::new(), RenderConfig::default());
    let config = RenderConfig::default();
    let types = PropertyTypeRegistry::new();

    render_constraints(&Vec::<Constraint>::new(), &mut format, &config, &types).expect("Should render an empty document");
    let result = format.start();
    assert!(matches!(result, Err(RenderError::AlreadyFinished)));

    let mut format = Owl2FunctionalFormat::new(Vec::new(), config);
    assert!(matches!(format.finish(), Err(RenderError::NotStarted)));
}

#[test]
fn test_unknown_property_has_one_kind() {
    let output = translate_pages(
        [Revision::new(
            "Property talk:P214",
            "{{Constraint:Single value}}\n{{Constraint:Format|pattern=<nowiki>[1-9]\\d*</nowiki>}}",
        )],
        &PipelineConfig::default(),
    )
    .expect("Should render");

    assert_eq!(output.constraints.len(), 2);
    assert!(output.document.contains("Declaration(DataProperty(wd:P214))"));
    assert!(output.document.contains("FunctionalDataProperty(wd:P214)"));
    assert!(!output.document.contains("ObjectProperty(wd:P214)"));
}
