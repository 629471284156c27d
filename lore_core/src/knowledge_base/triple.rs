//! Triples - the atomic facts of the graph.

use serde::{Deserialize, Serialize};

use super::{Iri, Literal, Term};

/// A (subject, predicate, object) fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Iri,
    pub predicate: Iri,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Iri, predicate: Iri, object: impl Into<Term>) -> Self {
        Self {
            subject,
            predicate,
            object: object.into(),
        }
    }

    /// A triple whose object is a reference.
    pub fn link(subject: Iri, predicate: Iri, object: Iri) -> Self {
        Self::new(subject, predicate, Term::Iri(object))
    }

    /// A triple whose object is a literal.
    pub fn literal(subject: Iri, predicate: Iri, object: Literal) -> Self {
        Self::new(subject, predicate, Term::Literal(object))
    }

    /// The object as an IRI, if it is a reference.
    pub fn object_iri(&self) -> Option<&Iri> {
        self.object.as_iri()
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}
