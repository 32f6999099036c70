//! Property datatypes and their lookup

use std::collections::HashMap;

use serde::Deserialize;

use super::PropertyId;

/// Datatype of a Wikidata property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Datatype {
    WikibaseItem,
    WikibaseProperty,
    String,
    ExternalId,
    Url,
    CommonsMedia,
    Time,
    Quantity,
    GlobeCoordinate,
    #[serde(rename = "monolingualtext")]
    MonolingualText,
    Math,
    #[serde(other)]
    Other,
}

impl Datatype {
    /// Whether values of this datatype are entities rather than literals
    pub fn is_entity_valued(&self) -> bool {
        matches!(self, Datatype::WikibaseItem | Datatype::WikibaseProperty)
    }
}

/// Lookup of the declared datatype of a property
pub trait PropertyTypeResolver {
    fn datatype(&self, property: &PropertyId) -> Option<Datatype>;
}

/// In-memory property datatype table
#[derive(Debug, Clone, Default)]
pub struct PropertyTypeRegistry {
    types: HashMap<PropertyId, Datatype>,
}

impl PropertyTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, property: PropertyId, datatype: Datatype) {
        self.types.insert(property, datatype);
    }

    /// Builder-style insert
    pub fn with(mut self, property: PropertyId, datatype: Datatype) -> Self {
        self.insert(property, datatype);
        self
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl PropertyTypeResolver for PropertyTypeRegistry {
    fn datatype(&self, property: &PropertyId) -> Option<Datatype> {
        self.types.get(property).copied()
    }
}

impl<R: PropertyTypeResolver + ?Sized> PropertyTypeResolver for &R {
    fn datatype(&self, property: &PropertyId) -> Option<Datatype> {
        (**self).datatype(property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        datatype: Datatype,
    }

    fn datatype_of(name: &str) -> Datatype {
        toml::from_str::<Row>(&format!("datatype = \"{}\"", name))
            .unwrap()
            .datatype
    }

    #[test]
    fn test_deserialize_wikidata_names() {
        assert_eq!(datatype_of("wikibase-item"), Datatype::WikibaseItem);
        assert_eq!(datatype_of("time"), Datatype::Time);
        assert_eq!(datatype_of("quantity"), Datatype::Quantity);
        assert_eq!(datatype_of("commons-media"), Datatype::CommonsMedia);
        assert_eq!(datatype_of("monolingualtext"), Datatype::MonolingualText);
        assert_eq!(datatype_of("musical-notation"), Datatype::Other);
    }

    #[test]
    fn test_registry_lookup() {
        let p569 = PropertyId::new("P569").unwrap();
        let registry = PropertyTypeRegistry::new().with(p569.clone(), Datatype::Time);
        assert_eq!(registry.datatype(&p569), Some(Datatype::Time));
        assert_eq!(registry.datatype(&PropertyId::new("P1").unwrap()), None);
        assert!(!Datatype::Time.is_entity_valued());
        assert!(Datatype::WikibaseItem.is_entity_valued());
    }
}
