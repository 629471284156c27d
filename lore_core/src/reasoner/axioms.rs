//! Ontology seeding: writes the ontology's axioms into the graph.
//!
//! Later phases read the hierarchy, symmetric markers and inverse pairs back
//! out of the graph rather than out of the [`Ontology`] value.

use lore_schema::{KnownPredicate, Ontology, SYMMETRIC_PROPERTY};

use crate::knowledge_base::{Iri, KnowledgeGraph, Literal, Triple};

/// Axiom triples of an ontology, in declaration order.
pub fn axiom_triples(ontology: &Ontology) -> Vec<Triple> {
    let sub_class_of = Iri::known(KnownPredicate::SubClassOf);
    let sub_property_of = Iri::known(KnownPredicate::SubPropertyOf);
    let rdf_type = Iri::known(KnownPredicate::Type);
    let mut triples = Vec::new();

    for axiom in &ontology.class_hierarchy {
        triples.push(Triple::link(
            Iri::from(&axiom.subclass),
            sub_class_of.clone(),
            Iri::from(&axiom.superclass),
        ));
    }

    for axiom in &ontology.property_hierarchy {
        triples.push(Triple::link(
            Iri::predicate(&axiom.subproperty),
            sub_property_of.clone(),
            Iri::predicate(&axiom.superproperty),
        ));
    }

    for predicate in &ontology.symmetric {
        triples.push(Triple::link(
            Iri::predicate(predicate),
            rdf_type.clone(),
            Iri::new(SYMMETRIC_PROPERTY),
        ));
    }

    for axiom in &ontology.inverses {
        let inverse = Iri::predicate(&axiom.inverse);
        if let Some(label) = &axiom.label {
            triples.push(Triple::literal(
                inverse.clone(),
                Iri::known(KnownPredicate::Label),
                Literal::tagged(label.as_str()),
            ));
        }
        if let Some(domain) = &axiom.domain {
            triples.push(Triple::link(
                inverse.clone(),
                Iri::known(KnownPredicate::Domain),
                Iri::from(domain),
            ));
        }
        if let Some(range) = &axiom.range {
            triples.push(Triple::link(
                inverse.clone(),
                Iri::known(KnownPredicate::Range),
                Iri::from(range),
            ));
        }
        triples.push(Triple::link(
            inverse,
            Iri::known(KnownPredicate::InverseOf),
            Iri::predicate(&axiom.predicate),
        ));
    }

    triples
}

/// Seed the graph with the ontology's axioms. Returns the number of new triples.
pub fn seed(ontology: &Ontology, graph: &mut KnowledgeGraph) -> usize {
    graph.extend(axiom_triples(ontology))
}
