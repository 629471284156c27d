//! Vocabulary - namespaces, compact IRIs, curated predicates and entity classes.
//!
//! Every IRI the extractor or the reasoner writes is built from one of the
//! namespaces below. Configuration files refer to terms through compact IRIs
//! (`tgo:race`, `schema:Person`), which [`Curie`] validates and expands.

mod class;
mod predicate;

pub use class::*;
pub use predicate::*;

use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, SchemaResult};

/// Namespace IRIs.
pub mod ns {
    /// Entities extracted from records.
    pub const TG: &str = "http://tolkiengateway.net/kg/resource/";
    /// Project ontology: curated and ad-hoc properties, project classes.
    pub const TGO: &str = "http://tolkiengateway.net/kg/ontology/";
    pub const SCHEMA: &str = "http://schema.org/";
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    pub const DCTERMS: &str = "http://purl.org/dc/terms/";
    /// Source pages the records were parsed from.
    pub const WIKI: &str = "https://tolkiengateway.net/wiki/";
}

/// Language tag attached to every literal the extractor emits.
pub const LITERAL_LANGUAGE: &str = "en";

/// `owl:SymmetricProperty`, the class of predicates whose edges are mirrored.
pub const SYMMETRIC_PROPERTY: &str = "http://www.w3.org/2002/07/owl#SymmetricProperty";

/// Registered prefixes, in the order they are written to serialized output.
pub const PREFIXES: &[(&str, &str)] = &[
    ("tg", ns::TG),
    ("tgo", ns::TGO),
    ("schema", ns::SCHEMA),
    ("rdf", ns::RDF),
    ("rdfs", ns::RDFS),
    ("owl", ns::OWL),
    ("dcterms", ns::DCTERMS),
];

/// Look up the namespace IRI registered for a prefix.
pub fn namespace_for(prefix: &str) -> Option<&'static str> {
    PREFIXES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, iri)| *iri)
}

/// Expand a compact IRI (`prefix:local`) to an absolute IRI.
///
/// Absolute IRIs that already start with a registered namespace are
/// returned unchanged.
pub fn expand_curie(curie: &str) -> SchemaResult<String> {
    if PREFIXES.iter().any(|(_, iri)| curie.starts_with(iri)) {
        return Ok(curie.to_string());
    }
    let (prefix, local) = curie
        .split_once(':')
        .ok_or_else(|| SchemaError::MalformedCurie(curie.to_string()))?;
    if local.is_empty() {
        return Err(SchemaError::MalformedCurie(curie.to_string()));
    }
    let namespace = namespace_for(prefix).ok_or_else(|| SchemaError::UnknownPrefix {
        prefix: prefix.to_string(),
        curie: curie.to_string(),
    })?;
    Ok(format!("{namespace}{local}"))
}

/// Compact an absolute IRI using the longest matching registered namespace.
pub fn compact_iri(iri: &str) -> Option<String> {
    PREFIXES
        .iter()
        .filter(|(_, namespace)| iri.starts_with(namespace))
        .max_by_key(|(_, namespace)| namespace.len())
        .map(|(prefix, namespace)| format!("{prefix}:{}", &iri[namespace.len()..]))
}

/// Absolute IRI of an extracted entity.
pub fn resource_iri(entity_id: &str) -> String {
    format!("{}{entity_id}", ns::TG)
}

/// A validated, expanded term written as a compact IRI in configuration.
///
/// Used for class-hierarchy nodes, which mix vocabulary classes
/// (`schema:Person`) with extracted resources (`tg:Elves`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Curie {
    iri: String,
}

impl Curie {
    /// Parse and expand a compact IRI.
    pub fn parse(curie: &str) -> SchemaResult<Self> {
        Ok(Self {
            iri: expand_curie(curie)?,
        })
    }

    /// A term in the resource namespace.
    pub fn resource(entity_id: &str) -> Self {
        Self {
            iri: resource_iri(entity_id),
        }
    }

    /// The expanded IRI.
    pub fn iri(&self) -> &str {
        &self.iri
    }
}

impl From<EntityClass> for Curie {
    fn from(class: EntityClass) -> Self {
        Self { iri: class.iri() }
    }
}

impl TryFrom<String> for Curie {
    type Error = SchemaError;

    fn try_from(value: String) -> SchemaResult<Self> {
        Self::parse(&value)
    }
}

impl From<Curie> for String {
    fn from(curie: Curie) -> Self {
        compact_iri(&curie.iri).unwrap_or(curie.iri)
    }
}

impl std::fmt::Display for Curie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match compact_iri(&self.iri) {
            Some(compact) => write!(f, "{compact}"),
            None => write!(f, "<{}>", self.iri),
        }
    }
}
