//! Knowledge Graph - the duplicate-free, pattern-queryable triple store.

use std::collections::{HashMap, HashSet};

use super::{Iri, Term, Triple};

/// The main fact graph.
///
/// Triples are kept in insertion order with a hash set rejecting duplicates.
/// Subject and predicate indexes keep the reasoner's rule scans from touching
/// the whole graph. The graph has a single owner; mutation goes through
/// `&mut self`.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    /// All triples in insertion order.
    triples: Vec<Triple>,

    /// Membership set for duplicate rejection and bound lookups.
    present: HashSet<Triple>,

    /// Index: subject -> positions in `triples`.
    by_subject: HashMap<Iri, Vec<usize>>,

    /// Index: predicate -> positions in `triples`.
    by_predicate: HashMap<Iri, Vec<usize>>,
}

impl KnowledgeGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a triple. Returns `false` if it was already present.
    pub fn add(&mut self, triple: Triple) -> bool {
        if self.present.contains(&triple) {
            return false;
        }

        let position = self.triples.len();
        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .push(position);
        self.by_predicate
            .entry(triple.predicate.clone())
            .or_default()
            .push(position);
        self.present.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    /// Add several triples, returning how many were new.
    pub fn extend(&mut self, triples: impl IntoIterator<Item = Triple>) -> usize {
        triples
            .into_iter()
            .map(|triple| self.add(triple))
            .filter(|added| *added)
            .count()
    }

    /// Whether any triple matches the pattern; `None` is a wildcard.
    pub fn contains(&self, subject: Option<&Iri>, predicate: Option<&Iri>, object: Option<&Term>) -> bool {
        if let (Some(s), Some(p), Some(o)) = (subject, predicate, object) {
            return self.present.contains(&Triple::new(s.clone(), p.clone(), o.clone()));
        }
        self.matches(subject, predicate, object).next().is_some()
    }

    /// Whether this exact triple is present.
    pub fn contains_triple(&self, triple: &Triple) -> bool {
        self.present.contains(triple)
    }

    /// Lazily iterate the triples matching a pattern; `None` is a wildcard.
    ///
    /// The iterator is `Clone`, so a scan can be restarted from any point.
    pub fn matches<'a>(
        &'a self,
        subject: Option<&'a Iri>,
        predicate: Option<&'a Iri>,
        object: Option<&'a Term>,
    ) -> Matches<'a> {
        let candidates = match (subject, predicate) {
            (Some(s), Some(p)) => {
                // Walk the shorter of the two posting lists.
                let by_s = self.postings(&self.by_subject, s);
                let by_p = self.postings(&self.by_predicate, p);
                let shorter = if by_s.len() <= by_p.len() { by_s } else { by_p };
                Candidates::Indexed(shorter.iter())
            }
            (Some(s), None) => Candidates::Indexed(self.postings(&self.by_subject, s).iter()),
            (None, Some(p)) => Candidates::Indexed(self.postings(&self.by_predicate, p).iter()),
            (None, None) => Candidates::All(0..self.triples.len()),
        };

        Matches {
            triples: &self.triples,
            candidates,
            subject,
            predicate,
            object,
        }
    }

    fn postings<'a>(&'a self, index: &'a HashMap<Iri, Vec<usize>>, key: &Iri) -> &'a [usize] {
        index.get(key).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Objects of `(subject, predicate, ?)`.
    pub fn objects<'a>(&'a self, subject: &'a Iri, predicate: &'a Iri) -> impl Iterator<Item = &'a Term> + 'a {
        self.matches(Some(subject), Some(predicate), None)
            .map(|t| &t.object)
    }

    /// Subjects of `(?, predicate, object)`.
    pub fn subjects<'a>(&'a self, predicate: &'a Iri, object: &'a Term) -> impl Iterator<Item = &'a Iri> + 'a {
        self.matches(None, Some(predicate), Some(object))
            .map(|t| &t.subject)
    }

    /// Snapshot of the triples with a predicate whose object is a reference,
    /// as `(subject, object)` pairs. Rules collect before they mutate.
    pub fn links(&self, predicate: &Iri) -> Vec<(Iri, Iri)> {
        self.matches(None, Some(predicate), None)
            .filter_map(|t| t.object_iri().map(|o| (t.subject.clone(), o.clone())))
            .collect()
    }

    /// Whether the subject has at least one edge with this predicate.
    pub fn has_predicate(&self, subject: &Iri, predicate: &Iri) -> bool {
        self.matches(Some(subject), Some(predicate), None).next().is_some()
    }

    /// All triples in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Distinct subjects.
    pub fn subject_count(&self) -> usize {
        self.by_subject.len()
    }

    /// Distinct predicates.
    pub fn predicates(&self) -> impl Iterator<Item = &Iri> {
        self.by_predicate.keys()
    }

    /// Number of triples.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}

impl FromIterator<Triple> for KnowledgeGraph {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

#[derive(Debug, Clone)]
enum Candidates<'a> {
    Indexed(std::slice::Iter<'a, usize>),
    All(std::ops::Range<usize>),
}

/// Iterator over the triples matching a pattern.
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    triples: &'a [Triple],
    candidates: Candidates<'a>,
    subject: Option<&'a Iri>,
    predicate: Option<&'a Iri>,
    object: Option<&'a Term>,
}

impl<'a> Matches<'a> {
    fn accepts(&self, triple: &Triple) -> bool {
        self.subject.map_or(true, |s| &triple.subject == s)
            && self.predicate.map_or(true, |p| &triple.predicate == p)
            && self.object.map_or(true, |o| &triple.object == o)
    }
}

impl<'a> Iterator for Matches<'a> {
    type Item = &'a Triple;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let position = match &mut self.candidates {
                Candidates::Indexed(positions) => *positions.next()?,
                Candidates::All(range) => range.next()?,
            };
            let triple = &self.triples[position];
            if self.accepts(triple) {
                return Some(triple);
            }
        }
    }
}
