//! Entity classes assigned by classification and by the expander.

use serde::{Deserialize, Serialize};

use super::ns;
use crate::error::SchemaError;

/// Classes an extracted entity can be typed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityClass {
    Person,
    Place,
    Book,
    Event,
    /// Generic class; also the type of unclassified records.
    Thing,
    Language,
    /// Weapons and other crafted goods.
    Product,
    Organization,
    Race,
    Artifact,
    House,
    Creature,
}

impl EntityClass {
    pub const ALL: &'static [EntityClass] = &[
        EntityClass::Person,
        EntityClass::Place,
        EntityClass::Book,
        EntityClass::Event,
        EntityClass::Thing,
        EntityClass::Language,
        EntityClass::Product,
        EntityClass::Organization,
        EntityClass::Race,
        EntityClass::Artifact,
        EntityClass::House,
        EntityClass::Creature,
    ];

    /// Class name without namespace.
    pub fn name(self) -> &'static str {
        match self {
            EntityClass::Person => "Person",
            EntityClass::Place => "Place",
            EntityClass::Book => "Book",
            EntityClass::Event => "Event",
            EntityClass::Thing => "Thing",
            EntityClass::Language => "Language",
            EntityClass::Product => "Product",
            EntityClass::Organization => "Organization",
            EntityClass::Race => "Race",
            EntityClass::Artifact => "Artifact",
            EntityClass::House => "House",
            EntityClass::Creature => "Creature",
        }
    }

    /// Race, Artifact, House and Creature live in the project ontology;
    /// the rest are schema.org classes.
    pub fn namespace(self) -> &'static str {
        match self {
            EntityClass::Race | EntityClass::Artifact | EntityClass::House | EntityClass::Creature => {
                ns::TGO
            }
            _ => ns::SCHEMA,
        }
    }

    /// Absolute IRI of the class.
    pub fn iri(self) -> String {
        format!("{}{}", self.namespace(), self.name())
    }

    /// Find the class with the given absolute IRI.
    pub fn from_iri(iri: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|class| {
            iri.strip_prefix(class.namespace())
                .is_some_and(|local| local == class.name())
        })
    }
}

impl std::str::FromStr for EntityClass {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|class| class.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SchemaError::UnknownClass(s.to_string()))
    }
}

impl std::fmt::Display for EntityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_namespaces() {
        assert_eq!(EntityClass::Person.iri(), "http://schema.org/Person");
        assert_eq!(
            EntityClass::Race.iri(),
            "http://tolkiengateway.net/kg/ontology/Race"
        );
    }

    #[test]
    fn test_class_round_trip_through_iri() {
        for class in EntityClass::ALL {
            assert_eq!(EntityClass::from_iri(&class.iri()), Some(*class));
        }
    }

    #[test]
    fn test_parse_class_name() {
        assert_eq!("organization".parse::<EntityClass>().unwrap(), EntityClass::Organization);
        assert!("Wizard".parse::<EntityClass>().is_err());
    }
}
