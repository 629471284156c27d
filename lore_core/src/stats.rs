//! Graph statistics: entities per class and edges per predicate.

use std::collections::BTreeMap;

use lore_schema::{compact_iri, EntityClass, KnownPredicate, Predicate};
use serde::Serialize;

use crate::knowledge_base::{Iri, KnowledgeGraph, Term};

/// Counts describing a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStatistics {
    pub triples: usize,
    pub subjects: usize,
    /// Subjects typed with each vocabulary class, keyed by class name.
    pub entities_by_class: BTreeMap<String, usize>,
    /// Triples per predicate, keyed by compact IRI where one exists.
    pub predicates: BTreeMap<String, usize>,
    /// Triples whose predicate is in the curated vocabulary.
    pub curated_triples: usize,
    /// Triples whose predicate was generated from an unmapped parameter key.
    pub ad_hoc_triples: usize,
}

impl GraphStatistics {
    /// Collect statistics for a graph.
    pub fn collect(graph: &KnowledgeGraph) -> Self {
        let rdf_type = Iri::known(KnownPredicate::Type);
        let mut stats = Self {
            triples: graph.len(),
            subjects: graph.subject_count(),
            ..Self::default()
        };

        for class in EntityClass::ALL {
            let class_term = Term::Iri(Iri::class(*class));
            let count = graph.subjects(&rdf_type, &class_term).count();
            if count > 0 {
                stats.entities_by_class.insert(class.name().to_string(), count);
            }
        }

        for predicate in graph.predicates() {
            let count = graph.matches(None, Some(predicate), None).count();
            match Predicate::from_iri(predicate.as_str()) {
                Some(p) if p.is_curated() => stats.curated_triples += count,
                Some(_) => stats.ad_hoc_triples += count,
                None => {}
            }

            let key = compact_iri(predicate.as_str()).unwrap_or_else(|| predicate.as_str().to_string());
            stats.predicates.insert(key, count);
        }

        stats
    }

    /// Entities typed with a class.
    pub fn entities(&self, class: EntityClass) -> usize {
        self.entities_by_class.get(class.name()).copied().unwrap_or(0)
    }

    /// Triples with a predicate, by compact IRI.
    pub fn predicate_count(&self, curie: &str) -> usize {
        self.predicates.get(curie).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge_base::{Literal, Triple};

    #[test]
    fn test_collect() {
        let frodo = Iri::entity("Frodo_Baggins");
        let graph: KnowledgeGraph = vec![
            Triple::link(frodo.clone(), Iri::known(KnownPredicate::Type), Iri::class(EntityClass::Person)),
            Triple::link(Iri::entity("Sam"), Iri::known(KnownPredicate::Type), Iri::class(EntityClass::Person)),
            Triple::link(frodo.clone(), Iri::known(KnownPredicate::Race), Iri::entity("Hobbit")),
            Triple::literal(
                frodo,
                Iri::predicate(&Predicate::ad_hoc("eyes")),
                Literal::tagged("blue"),
            ),
        ]
        .into_iter()
        .collect();

        let stats = GraphStatistics::collect(&graph);
        assert_eq!(stats.triples, 4);
        assert_eq!(stats.subjects, 2);
        assert_eq!(stats.entities(EntityClass::Person), 2);
        assert_eq!(stats.entities(EntityClass::Place), 0);
        assert_eq!(stats.predicate_count("rdf:type"), 2);
        assert_eq!(stats.predicate_count("tgo:eyes"), 1);
        assert_eq!(stats.curated_triples, 3);
        assert_eq!(stats.ad_hoc_triples, 1);
    }

    #[test]
    fn test_empty_graph() {
        let stats = GraphStatistics::collect(&KnowledgeGraph::new());
        assert_eq!(stats, GraphStatistics::default());
    }
}
