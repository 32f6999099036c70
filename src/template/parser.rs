//! Parsing of a single transclusion into a [`Template`]

use std::fmt;

use crate::error::TemplateError;
use crate::model::{IdError, PropertyId};

use super::lexer::{lex, Token};

/// Insertion-ordered parameter map of a template
///
/// Inserting an existing key replaces its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: Vec<(String, String)>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, trimming key and value
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl AsRef<str>) {
        let key = key.as_ref().trim();
        let value = value.as_ref().trim().to_string();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut parameters = Parameters::new();
        for (k, v) in iter {
            parameters.insert(k, v);
        }
        parameters
    }
}

/// A parsed template transclusion: `{{Name|key=value|positional}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    parameters: Parameters,
    /// Title of the page the template was found on
    page: Option<String>,
}

impl Template {
    pub fn new(name: impl AsRef<str>, parameters: Parameters) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            parameters,
            page: None,
        }
    }

    /// Attach the title of the page this template was found on
    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.parameters.get(key)
    }

    pub fn page(&self) -> Option<&str> {
        self.page.as_deref()
    }

    /// Resolve the constrained property from the originating page title
    ///
    /// Accepts `Property talk:P17`, `Property:P17` or a bare `P17`.
    pub fn page_property(&self) -> Option<Result<PropertyId, IdError>> {
        let page = self.page.as_deref()?;
        let local = page.rsplit_once(':').map_or(page, |(_, local)| local);
        Some(local.trim().parse())
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{{}", self.name)?;
        for (key, value) in self.parameters.iter() {
            write!(f, "|{}={}", key, value)?;
        }
        write!(f, "}}}}")
    }
}

/// One `|`-separated piece of the template interior
#[derive(Debug, Default)]
struct Segment {
    start: usize,
    /// Offset of the first `=` outside nested templates and nowiki regions
    equals: Option<usize>,
}

/// Parse one transclusion such as `{{Constraint:Range|min=0|max=10}}`
///
/// Nested templates and `<nowiki>` regions are kept verbatim inside
/// parameter values; their `|` and `=` do not separate parameters.
pub fn parse(line: &str) -> Result<Template, TemplateError> {
    if !line.starts_with("{{") {
        return Err(TemplateError::invalid_syntax(
            line,
            0..line.len().min(2),
            "expected opening '{{'",
        ));
    }
    if line.len() < 4 || !line.ends_with("}}") {
        return Err(TemplateError::invalid_syntax(
            line,
            line.len().saturating_sub(2)..line.len(),
            "expected closing '}}'",
        ));
    }

    let interior = &line[2..line.len() - 2];
    let mut segments = vec![Segment::default()];
    let mut level = 0usize;
    let mut in_nowiki = false;

    for (token, span) in lex(interior) {
        if in_nowiki {
            if token == Token::ClosingNowiki {
                in_nowiki = false;
            }
            continue;
        }
        match token {
            Token::OpeningNowiki => in_nowiki = true,
            Token::OpeningBraces => level += 1,
            Token::ClosingBraces => level = level.saturating_sub(1),
            Token::Bar if level == 0 => segments.push(Segment {
                start: span.end,
                equals: None,
            }),
            Token::Equals if level == 0 => {
                if let Some(segment) = segments.last_mut() {
                    segment.equals.get_or_insert(span.start);
                }
            }
            _ => {}
        }
    }

    let bounds: Vec<(usize, usize)> = segments
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            let end = segments
                .get(i + 1)
                .map_or(interior.len(), |next| next.start - 1);
            (seg.start, end)
        })
        .collect();

    let (name_start, name_end) = bounds[0];
    let mut parameters = Parameters::new();
    let mut positional = 0usize;

    for (segment, &(start, end)) in segments.iter().zip(&bounds).skip(1) {
        match segment.equals {
            Some(eq) => {
                parameters.insert(&interior[start..eq], &interior[eq + 1..end]);
            }
            None => {
                positional += 1;
                parameters.insert(positional.to_string(), &interior[start..end]);
            }
        }
    }

    Ok(Template::new(&interior[name_start..name_end], parameters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(pairs: &[(&str, &str)]) -> Parameters {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_parse_named_parameters() {
        let template = parse("{{Name|k1=v1|k2=v2}}").unwrap();
        assert_eq!(template.name(), "Name");
        assert_eq!(
            template.parameters(),
            &params(&[("k1", "v1"), ("k2", "v2")])
        );
    }

    #[test]
    fn test_parse_trims_names_keys_and_values() {
        let template = parse("{{ Constraint:Range | min = 1500 | max=now }}").unwrap();
        assert_eq!(template.name(), "Constraint:Range");
        assert_eq!(template.get("min"), Some("1500"));
        assert_eq!(template.get("max"), Some("now"));
    }

    #[test]
    fn test_parse_positional_parameters() {
        let template = parse("{{P|31}}").unwrap();
        assert_eq!(template.get("1"), Some("31"));

        let template = parse("{{A|x|k=v|y}}").unwrap();
        assert_eq!(
            template.parameters(),
            &params(&[("1", "x"), ("k", "v"), ("2", "y")])
        );
    }

    #[test]
    fn test_parse_empty_value_is_kept() {
        let template = parse("{{A|item=|property=P21}}").unwrap();
        assert_eq!(template.get("item"), Some(""));
        assert_eq!(template.get("property"), Some("P21"));
    }

    #[test]
    fn test_parse_value_keeps_later_equals() {
        let template = parse("{{A|pattern=a=b}}").unwrap();
        assert_eq!(template.get("pattern"), Some("a=b"));
    }

    #[test]
    fn test_parse_nested_template_is_opaque() {
        let template = parse("{{Constraint:One of|values={{Q|5}}, {{Q|6}}}}").unwrap();
        assert_eq!(template.name(), "Constraint:One of");
        assert_eq!(template.get("values"), Some("{{Q|5}}, {{Q|6}}"));
        assert_eq!(template.parameters().len(), 1);
    }

    #[test]
    fn test_parse_nested_equals_is_not_a_key() {
        let template = parse("{{A|{{B|x=y}}}}").unwrap();
        assert_eq!(template.get("1"), Some("{{B|x=y}}"));
    }

    #[test]
    fn test_parse_nowiki_is_opaque() {
        let template = parse("{{A|<nowiki>{{not a template}}</nowiki>}}").unwrap();
        let value = template.get("1").unwrap();
        assert!(value.contains("{{not a template}}"));

        let template = parse("{{Constraint:Format|pattern=<nowiki>a|b=c</nowiki>}}").unwrap();
        assert_eq!(
            template.get("pattern"),
            Some("<nowiki>a|b=c</nowiki>")
        );
    }

    #[test]
    fn test_parse_duplicate_key_replaces_value() {
        let template = parse("{{A|k=1|j=2|k=3}}").unwrap();
        assert_eq!(template.parameters(), &params(&[("k", "3"), ("j", "2")]));
    }

    #[test]
    fn test_parse_rejects_missing_braces() {
        assert!(matches!(
            parse("Constraint:Qualifier}}"),
            Err(TemplateError::InvalidSyntax { .. })
        ));
        assert!(matches!(
            parse("{{Constraint:Qualifier"),
            Err(TemplateError::InvalidSyntax { .. })
        ));
        assert!(parse("{{}").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let original = parse("{{ Constraint:Item | property = P21 | {{Q|5}} | items=Q1, Q2 }}").unwrap();
        let reparsed = parse(&original.to_string()).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_page_property() {
        let template = parse("{{Constraint:Qualifier}}")
            .unwrap()
            .with_page("Property talk:P1011");
        assert_eq!(
            template.page_property().unwrap().unwrap(),
            "P1011".parse::<PropertyId>().unwrap()
        );
        assert!(parse("{{A}}").unwrap().page_property().is_none());
    }
}
