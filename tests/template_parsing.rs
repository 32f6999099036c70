//! Integration tests for scanning and parsing template transclusions

use pretty_assertions::assert_eq;

use wdtk_constraints::template::{parse, parse_page, remove_html_comments, scan, Template};

fn parse_first(text: &str) -> Template {
    let found = scan(text);
    assert!(!found.is_empty(), "no template in {:?}", text);
    parse(&found[0]).expect("Should parse")
}

#[test]
fn test_named_parameters() {
    let template = parse_first("Intro {{Name|k1=v1|k2=v2}} outro");
    assert_eq!(template.name(), "Name");
    let parameters: Vec<(&str, &str)> = template.parameters().iter().collect();
    assert_eq!(parameters, vec![("k1", "v1"), ("k2", "v2")]);
}

#[test]
fn test_positional_parameters_are_numbered() {
    let template = parse_first("{{Q| 42 |label=x| second }}");
    assert_eq!(template.get("1"), Some("42"));
    assert_eq!(template.get("label"), Some("x"));
    assert_eq!(template.get("2"), Some("second"));
}

#[test]
fn test_empty_value_is_kept() {
    let template = parse_first("{{Constraint:Item|property=P21|exceptions=}}");
    assert_eq!(template.get("exceptions"), Some(""));
    assert_eq!(template.get("items"), None);
}

#[test]
fn test_nested_template_is_one_transclusion() {
    assert_eq!(scan("{{A|{{B}}}}"), vec!["{{A|{{B}}}}".to_string()]);

    let template = parse_first("{{Constraint:One of|values={{Q|5}}, {{Q|6}}}}");
    assert_eq!(template.name(), "Constraint:One of");
    assert_eq!(template.get("values"), Some("{{Q|5}}, {{Q|6}}"));
}

#[test]
fn test_nowiki_is_opaque() {
    let found = scan("{{A|<nowiki>{{not a template}}</nowiki>}}");
    assert_eq!(found.len(), 1);

    let template = parse(&found[0]).expect("Should parse");
    assert_eq!(template.parameters().len(), 1);
    assert!(template
        .get("1")
        .is_some_and(|value| value.contains("{{not a template}}")));
}

#[test]
fn test_nowiki_hides_separators() {
    let template = parse_first("{{Constraint:Format|pattern=<nowiki>a|b=c</nowiki>}}");
    assert_eq!(template.get("pattern"), Some("<nowiki>a|b=c</nowiki>"));
}

#[test]
fn test_unclosed_nowiki_stops_scanning() {
    let found = scan("{{A}} <nowiki> {{B}} {{C}}");
    assert_eq!(found, vec!["{{A}}".to_string()]);
}

#[test]
fn test_unbalanced_input_yields_prefix() {
    assert_eq!(scan("{{A}} {{B|{{C}}"), vec!["{{A}}".to_string()]);
    assert_eq!(scan("}} {{A}}"), vec!["{{A}}".to_string()]);
}

#[test]
fn test_comments_are_removed() {
    let text = "{{A<!-- |hidden=1 -->|shown=2}}<!-- {{B}} -->";
    let template = parse_first(text);
    assert_eq!(template.get("hidden"), None);
    assert_eq!(template.get("shown"), Some("2"));
    assert_eq!(scan(text).len(), 1);
}

#[test]
fn test_comment_removal_is_idempotent() {
    let text = "a <!-- one --> b <!-- two\nlines --> {{C}}";
    let once = remove_html_comments(text).into_owned();
    let twice = remove_html_comments(&once).into_owned();
    assert_eq!(once, twice);
    assert_eq!(scan(&once), scan(&twice));
}

#[test]
fn test_round_trip() {
    let inputs = [
        "{{Constraint:Range|min=1500|max=now}}",
        "{{Constraint:Conflicts with|list={{P|31}}: {{Q|5}}; {{P|21}}}}",
        "{{Constraint:Item| property = P21 |items=Q6581097, Q6581072}}",
        "{{Positional|a|b}}",
    ];
    for input in inputs {
        let template = parse_first(input);
        let rendered = template.to_string();
        assert_eq!(parse_first(&rendered), template, "round trip of {}", input);
    }
}

#[test]
fn test_malformed_transclusions() {
    assert!(parse("Constraint:Range").is_err());
    assert!(parse("{{Constraint:Range").is_err());

    let err = parse("{{Constraint:Range|min=0").unwrap_err();
    assert_eq!(err.text(), "{{Constraint:Range|min=0");
    let report = err.format("Property talk:P1082");
    assert!(report.contains("Property talk:P1082"));
}

#[test]
fn test_parse_page_keeps_document_order() {
    let page = "== Constraints ==\n{{Constraint:Single value}}\n* {{Constraint:Type|class=Q5|relation=instance}}\n";
    let names: Vec<String> = parse_page(page)
        .into_iter()
        .map(|result| result.expect("Should parse").name().to_string())
        .collect();
    assert_eq!(names, vec!["Constraint:Single value", "Constraint:Type"]);
}
