//! Extraction of entity ids and patterns from template parameter values
//!
//! Constraint parameters refer to entities either directly (`Q5`, `P31`)
//! or through link templates (`{{Q|5}}`, `{{P|31}}`), often in comma
//! separated lists.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{ItemId, PropertyId};
use crate::template::{parse, scan};

fn entity_id_pattern() -> &'static Regex {
    static ENTITY_ID: OnceLock<Regex> = OnceLock::new();
    ENTITY_ID.get_or_init(|| Regex::new(r"\b([PpQq][1-9][0-9]*)\b").expect("valid id pattern"))
}

const OPENING_NOWIKI: &str = "<nowiki>";
const CLOSING_NOWIKI: &str = "</nowiki>";
const ESCAPED_OPENING_NOWIKI: &str = "&lt;nowiki>";
const ESCAPED_CLOSING_NOWIKI: &str = "&lt;/nowiki>";

/// Remove `<nowiki>` and `</nowiki>` tags, keeping their content
///
/// Escaped tags (`&lt;nowiki>`) in the content become literal tags.
pub fn strip_nowiki(value: &str) -> String {
    value
        .replace(OPENING_NOWIKI, "")
        .replace(CLOSING_NOWIKI, "")
        .replace(ESCAPED_OPENING_NOWIKI, OPENING_NOWIKI)
        .replace(ESCAPED_CLOSING_NOWIKI, CLOSING_NOWIKI)
}

/// Wrap a value in `<nowiki>` tags, escaping any tags it contains
pub fn wrap_nowiki(value: &str) -> String {
    let escaped = value
        .replace(OPENING_NOWIKI, ESCAPED_OPENING_NOWIKI)
        .replace(CLOSING_NOWIKI, ESCAPED_CLOSING_NOWIKI);
    format!("{}{}{}", OPENING_NOWIKI, escaped, CLOSING_NOWIKI)
}

/// Replace entity link templates by the ids they link to
///
/// Other templates are replaced by a space so they contribute no ids.
pub fn flatten_links(value: &str) -> String {
    let mut flat = value.to_string();
    for raw in scan(value) {
        let replacement = parse(&raw)
            .ok()
            .and_then(|template| {
                let prefix = match template.name().to_lowercase().as_str() {
                    "q" | "item" | "q'" => 'Q',
                    "p" | "property" | "p'" => 'P',
                    _ => return None,
                };
                let id = template.get("1")?.trim().to_string();
                if id.bytes().all(|b| b.is_ascii_digit()) {
                    Some(format!("{}{}", prefix, id))
                } else {
                    Some(id)
                }
            })
            .unwrap_or_else(|| " ".to_string());
        flat = flat.replacen(&raw, &replacement, 1);
    }
    flat
}

fn ids_with_prefix(value: &str, prefix: char) -> Vec<String> {
    let flat = flatten_links(value);
    entity_id_pattern()
        .find_iter(&flat)
        .map(|m| m.as_str())
        .filter(|id| id.starts_with(prefix) || id.starts_with(prefix.to_ascii_lowercase()))
        .map(str::to_string)
        .collect()
}

/// All item ids mentioned in a parameter value, in order
pub fn item_ids(value: &str) -> Vec<ItemId> {
    ids_with_prefix(value, 'Q')
        .iter()
        .filter_map(|id| ItemId::new(id).ok())
        .collect()
}

/// All property ids mentioned in a parameter value, in order
pub fn property_ids(value: &str) -> Vec<PropertyId> {
    ids_with_prefix(value, 'P')
        .iter()
        .filter_map(|id| PropertyId::new(id).ok())
        .collect()
}

/// The only item id in a value, if there is exactly one
pub fn single_item_id(value: &str) -> Option<ItemId> {
    let mut ids = item_ids(value);
    if ids.len() == 1 {
        ids.pop()
    } else {
        None
    }
}

/// The only property id in a value, if there is exactly one
pub fn single_property_id(value: &str) -> Option<PropertyId> {
    let mut ids = property_ids(value);
    if ids.len() == 1 {
        ids.pop()
    } else {
        None
    }
}
