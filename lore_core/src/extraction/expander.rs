//! Embedded entity expansion.
//!
//! Some parameters list several references at once (`events`, `weapons`,
//! `steed`, ...). Each reference becomes an entity of the rule's class,
//! linked from the record's entity by the rule's predicate.

use lore_schema::{ExpansionRule, KnownPredicate, Record};
use tracing::debug;

use super::identifier::to_identifier;
use super::normalize::extract_all_references;
use crate::knowledge_base::{Iri, KnowledgeGraph, Literal, Triple};

/// Expand every rule whose key the record carries. Returns the number of new
/// triples.
///
/// A referenced entity that has no type yet is typed with the rule's class
/// and labelled with the reference text. Entities that are already typed
/// keep their type; only the relation edge is added.
pub fn expand(
    record: &Record,
    subject: &Iri,
    rules: &[ExpansionRule],
    graph: &mut KnowledgeGraph,
) -> usize {
    let rdf_type = Iri::known(KnownPredicate::Type);
    let label = Iri::known(KnownPredicate::Label);
    let mut added = 0;

    for rule in rules {
        let Some(raw) = record.param(&rule.key) else {
            continue;
        };
        let predicate = Iri::predicate(&rule.predicate);

        for reference in extract_all_references(raw) {
            let id = to_identifier(&reference);
            if id.is_empty() {
                continue;
            }
            let target = Iri::entity(&id);

            if !graph.has_predicate(&target, &rdf_type) {
                debug!(entity = %id, class = %rule.class, "typing embedded entity");
                added += usize::from(graph.add(Triple::link(
                    target.clone(),
                    rdf_type.clone(),
                    Iri::class(rule.class),
                )));
                added += usize::from(graph.add(Triple::literal(
                    target.clone(),
                    label.clone(),
                    Literal::tagged(reference.as_str()),
                )));
            }

            added += usize::from(graph.add(Triple::link(subject.clone(), predicate.clone(), target)));
        }
    }

    added
}
