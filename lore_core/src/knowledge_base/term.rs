//! Terms - the nodes and values of the fact graph.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use lore_schema::{resource_iri, Curie, EntityClass, KnownPredicate, Predicate, LITERAL_LANGUAGE};

/// An absolute IRI. Clones share the underlying string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(Arc<str>);

impl Iri {
    pub fn new(iri: impl AsRef<str>) -> Self {
        Self(Arc::from(iri.as_ref()))
    }

    /// IRI of an extracted entity.
    pub fn entity(entity_id: &str) -> Self {
        Self::new(resource_iri(entity_id))
    }

    /// IRI of a curated predicate.
    pub fn known(predicate: KnownPredicate) -> Self {
        Self::new(predicate.iri())
    }

    /// IRI of any predicate.
    pub fn predicate(predicate: &Predicate) -> Self {
        Self::new(predicate.iri())
    }

    /// IRI of an entity class.
    pub fn class(class: EntityClass) -> Self {
        Self::new(class.iri())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Curie> for Iri {
    fn from(curie: &Curie) -> Self {
        Self::new(curie.iri())
    }
}

impl std::fmt::Display for Iri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

/// A literal value with an optional language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub value: String,
    pub language: Option<String>,
}

impl Literal {
    /// A literal in the extraction language.
    pub fn tagged(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: Some(LITERAL_LANGUAGE.to_string()),
        }
    }

    /// A literal without language tag.
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.language {
            Some(lang) => write!(f, "{:?}@{}", self.value, lang),
            None => write!(f, "{:?}", self.value),
        }
    }
}

/// The object position of a triple: a reference or a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    Iri(Iri),
    Literal(Literal),
}

impl Term {
    /// The IRI if this term is a reference.
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri(iri) => Some(iri),
            Term::Literal(_) => None,
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Iri(iri)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "{iri}"),
            Term::Literal(literal) => write!(f, "{literal}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_iri() {
        let iri = Iri::entity("Frodo_Baggins");
        assert_eq!(iri.as_str(), "http://tolkiengateway.net/kg/resource/Frodo_Baggins");
        assert_eq!(iri.to_string(), "<http://tolkiengateway.net/kg/resource/Frodo_Baggins>");
    }

    #[test]
    fn test_iri_equality_ignores_sharing() {
        let a = Iri::known(KnownPredicate::Spouse);
        let b = Iri::new("http://schema.org/spouse");
        assert_eq!(a, b);
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::tagged("unmarried").to_string(), "\"unmarried\"@en");
        assert_eq!(Literal::plain("42").to_string(), "\"42\"");
    }

    #[test]
    fn test_term_kind() {
        let reference = Term::from(Iri::entity("Hobbit"));
        let literal = Term::from(Literal::tagged("Second Age"));
        assert!(reference.as_iri().is_some());
        assert!(literal.as_iri().is_none());
    }
}
