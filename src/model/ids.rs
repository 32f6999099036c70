//! Property and item identifiers

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Base IRI of Wikidata entities
pub const WIKIDATA_BASE_IRI: &str = "http://www.wikidata.org/entity/";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("invalid {kind} id '{value}'")]
    Invalid { kind: &'static str, value: String },
}

/// Check `P123`-style ids: one prefix letter and a positive number
fn normalize(value: &str, prefix: char, kind: &'static str) -> Result<String, IdError> {
    let invalid = || IdError::Invalid {
        kind,
        value: value.to_string(),
    };
    let mut chars = value.chars();
    let first = chars.next().ok_or_else(invalid)?;
    let digits = chars.as_str();
    if !first.eq_ignore_ascii_case(&prefix)
        || digits.is_empty()
        || digits.starts_with('0')
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }
    Ok(format!("{}{}", prefix, digits))
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name {
            id: String,
            base_iri: String,
        }

        impl $name {
            /// Parse an id with the Wikidata base IRI
            pub fn new(id: &str) -> Result<Self, IdError> {
                Self::with_base_iri(id, WIKIDATA_BASE_IRI)
            }

            /// Parse an id with a custom base IRI
            pub fn with_base_iri(id: &str, base_iri: impl Into<String>) -> Result<Self, IdError> {
                Ok(Self {
                    id: normalize(id.trim(), $prefix, $kind)?,
                    base_iri: base_iri.into(),
                })
            }

            /// Build an id from its numeric part, e.g. `5` for `Q5`
            pub fn from_number(number: u64) -> Self {
                Self {
                    id: format!("{}{}", $prefix, number),
                    base_iri: WIKIDATA_BASE_IRI.to_string(),
                }
            }

            pub fn id(&self) -> &str {
                &self.id
            }

            pub fn base_iri(&self) -> &str {
                &self.base_iri
            }

            /// Full IRI of the entity
            pub fn iri(&self) -> String {
                format!("{}{}", self.base_iri, self.id)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.id)
            }
        }
    };
}

entity_id!(
    /// A property id such as `P31`
    PropertyId,
    'P',
    "property"
);

entity_id!(
    /// An item id such as `Q5`
    ItemId,
    'Q',
    "item"
);
