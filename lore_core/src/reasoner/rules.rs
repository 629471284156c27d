//! Derivation rules. Every rule snapshots the edges it reads before it adds
//! anything, and returns how many triples were new.

use std::collections::BTreeMap;

use lore_schema::{CuratedMembership, EntityClass, GroupDerivation, KnownPredicate, LocationConnections, SYMMETRIC_PROPERTY};

use crate::knowledge_base::{Iri, KnowledgeGraph, Literal, Term, Triple};

/// Siblings from shared parentage, children from parentage, spouse mirrors.
pub fn infer_family(graph: &mut KnowledgeGraph) -> usize {
    let parentage = graph.links(&Iri::known(KnownPredicate::Parentage));
    let siblings = Iri::known(KnownPredicate::Siblings);
    let children = Iri::known(KnownPredicate::Children);
    let spouse = Iri::known(KnownPredicate::Spouse);
    let mut added = 0;

    let mut by_parent: BTreeMap<&Iri, Vec<&Iri>> = BTreeMap::new();
    for (child, parent) in &parentage {
        let kids = by_parent.entry(parent).or_default();
        if !kids.contains(&child) {
            kids.push(child);
        }
    }

    let mut derived = Vec::new();
    for kids in by_parent.values() {
        for (i, a) in kids.iter().enumerate() {
            for b in &kids[i + 1..] {
                derived.push(Triple::link((*a).clone(), siblings.clone(), (*b).clone()));
                derived.push(Triple::link((*b).clone(), siblings.clone(), (*a).clone()));
            }
        }
    }
    added += graph.extend(derived);

    added += graph.extend(
        parentage
            .iter()
            .map(|(child, parent)| Triple::link(parent.clone(), children.clone(), child.clone())),
    );

    let spouses = graph.links(&spouse);
    added += graph.extend(
        spouses
            .into_iter()
            .map(|(a, b)| Triple::link(b, spouse.clone(), a)),
    );

    added
}

/// Members typed with the membership's class join the organization, which
/// is typed and labelled.
pub fn inject_memberships(memberships: &[CuratedMembership], graph: &mut KnowledgeGraph) -> usize {
    let rdf_type = Iri::known(KnownPredicate::Type);
    let member_of = Iri::known(KnownPredicate::MemberOf);
    let mut added = 0;

    for membership in memberships {
        let organization = Iri::entity(&membership.organization);
        let member_type = Term::Iri(Iri::class(membership.member_class));

        let joining: Vec<Iri> = membership
            .members
            .iter()
            .map(|member| Iri::entity(member))
            .filter(|member| graph.contains(Some(member), Some(&rdf_type), Some(&member_type)))
            .collect();
        added += graph.extend(
            joining
                .into_iter()
                .map(|member| Triple::link(member, member_of.clone(), organization.clone())),
        );

        added += usize::from(graph.add(Triple::link(
            organization.clone(),
            rdf_type.clone(),
            Iri::class(EntityClass::Organization),
        )));
        added += usize::from(graph.add(Triple::literal(
            organization,
            Iri::known(KnownPredicate::Label),
            Literal::tagged(membership.label.as_str()),
        )));
    }

    added
}

/// For every `Q owl:inverseOf P` in the graph, `P(x, y)` yields `Q(y, x)`;
/// edges of symmetric predicates are mirrored.
pub fn materialize_inverses(graph: &mut KnowledgeGraph) -> usize {
    let mut pairs: Vec<(Iri, Iri)> = graph
        .links(&Iri::known(KnownPredicate::InverseOf))
        .into_iter()
        .map(|(inverse, predicate)| (predicate, inverse))
        .collect();

    let symmetric = Term::Iri(Iri::new(SYMMETRIC_PROPERTY));
    let rdf_type = Iri::known(KnownPredicate::Type);
    pairs.extend(
        graph
            .subjects(&rdf_type, &symmetric)
            .map(|predicate| (predicate.clone(), predicate.clone())),
    );

    let mut added = 0;
    for (predicate, inverse) in pairs {
        let derived: Vec<Triple> = graph
            .links(&predicate)
            .into_iter()
            .map(|(x, y)| Triple::link(y, inverse.clone(), x))
            .collect();
        added += graph.extend(derived);
    }
    added
}

/// Race references imply membership in a broader group. A group reached
/// this way is given a type and a label unless it already has them.
pub fn derive_groups(derivation: &GroupDerivation, graph: &mut KnowledgeGraph) -> usize {
    let source = graph.links(&Iri::predicate(&derivation.source));
    let predicate = Iri::predicate(&derivation.predicate);
    let rdf_type = Iri::known(KnownPredicate::Type);
    let label = Iri::known(KnownPredicate::Label);
    let mut added = 0;

    for group in &derivation.groups {
        let race = Iri::entity(&group.race);
        let group_iri = Iri::entity(&group.group);

        let mut matched = false;
        for (subject, _) in source.iter().filter(|(_, object)| *object == race) {
            matched = true;
            added += usize::from(graph.add(Triple::link(
                subject.clone(),
                predicate.clone(),
                group_iri.clone(),
            )));
        }

        if !matched {
            continue;
        }
        if !graph.has_predicate(&group_iri, &rdf_type) {
            added += usize::from(graph.add(Triple::link(
                group_iri.clone(),
                rdf_type.clone(),
                Iri::class(derivation.group_class),
            )));
        }
        if !graph.has_predicate(&group_iri, &label) {
            added += usize::from(graph.add(Triple::literal(
                group_iri,
                label.clone(),
                Literal::tagged(group.label.as_str()),
            )));
        }
    }

    added
}

/// Outcome of the RDFS closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Closure {
    pub added: usize,
    pub passes: usize,
    pub converged: bool,
}

/// Subclass type propagation and subproperty edge propagation, repeated
/// until a pass adds nothing or `max_passes` passes have run.
pub fn rdfs_closure(graph: &mut KnowledgeGraph, max_passes: usize) -> Closure {
    let mut closure = Closure {
        added: 0,
        passes: 0,
        converged: false,
    };

    while closure.passes < max_passes {
        closure.passes += 1;
        let added = propagate_types(graph) + propagate_properties(graph);
        closure.added += added;
        if added == 0 {
            closure.converged = true;
            break;
        }
    }

    closure
}

fn propagate_types(graph: &mut KnowledgeGraph) -> usize {
    let rdf_type = Iri::known(KnownPredicate::Type);
    let mut derived = Vec::new();

    for (subclass, superclass) in graph.links(&Iri::known(KnownPredicate::SubClassOf)) {
        let subclass = Term::Iri(subclass);
        derived.extend(
            graph
                .subjects(&rdf_type, &subclass)
                .map(|instance| Triple::link(instance.clone(), rdf_type.clone(), superclass.clone())),
        );
    }

    graph.extend(derived)
}

fn propagate_properties(graph: &mut KnowledgeGraph) -> usize {
    let mut derived = Vec::new();

    for (subproperty, superproperty) in graph.links(&Iri::known(KnownPredicate::SubPropertyOf)) {
        derived.extend(
            graph
                .matches(None, Some(&subproperty), None)
                .map(|t| Triple::new(t.subject.clone(), superproperty.clone(), t.object.clone())),
        );
    }

    graph.extend(derived)
}

/// Birth and death places become generic connections.
pub fn connect_locations(connections: &LocationConnections, graph: &mut KnowledgeGraph) -> usize {
    let target = Iri::predicate(&connections.target);
    let derived: Vec<Triple> = connections
        .sources
        .iter()
        .flat_map(|source| graph.links(&Iri::predicate(source)))
        .map(|(subject, place)| Triple::link(subject, target.clone(), place))
        .collect();

    graph.extend(derived)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lore_schema::{Ontology, RaceGroup};

    fn link(s: &str, p: KnownPredicate, o: &str) -> Triple {
        Triple::link(Iri::entity(s), Iri::known(p), Iri::entity(o))
    }

    fn typed(s: &str, class: EntityClass) -> Triple {
        Triple::link(Iri::entity(s), Iri::known(KnownPredicate::Type), Iri::class(class))
    }

    #[test]
    fn test_siblings_from_shared_parent() {
        let mut graph: KnowledgeGraph = vec![
            link("Elrohir", KnownPredicate::Parentage, "Elrond"),
            link("Elladan", KnownPredicate::Parentage, "Elrond"),
            link("Arwen", KnownPredicate::Parentage, "Elrond"),
        ]
        .into_iter()
        .collect();

        let added = infer_family(&mut graph);
        // 3 pairs both ways, plus 3 children edges.
        assert_eq!(added, 9);
        assert!(graph.contains_triple(&link("Arwen", KnownPredicate::Siblings, "Elrohir")));
        assert!(graph.contains_triple(&link("Elrohir", KnownPredicate::Siblings, "Arwen")));
        assert!(graph.contains_triple(&link("Elrond", KnownPredicate::Children, "Elladan")));
        assert!(!graph.contains_triple(&link("Arwen", KnownPredicate::Siblings, "Arwen")));
    }

    #[test]
    fn test_literal_parentage_is_ignored() {
        let mut graph = KnowledgeGraph::new();
        graph.add(Triple::literal(
            Iri::entity("Gollum"),
            Iri::known(KnownPredicate::Parentage),
            Literal::tagged("Unknown"),
        ));
        assert_eq!(infer_family(&mut graph), 0);
    }

    #[test]
    fn test_spouse_mirror() {
        let mut graph: KnowledgeGraph = vec![link("Beren", KnownPredicate::Spouse, "Lúthien")]
            .into_iter()
            .collect();

        assert_eq!(infer_family(&mut graph), 1);
        assert!(graph.contains_triple(&link("Lúthien", KnownPredicate::Spouse, "Beren")));
        assert_eq!(infer_family(&mut graph), 0);
    }

    #[test]
    fn test_memberships_require_member_type() {
        let ontology = Ontology::default();
        let mut graph: KnowledgeGraph = vec![
            typed("Gandalf", EntityClass::Person),
            typed("Boromir", EntityClass::Thing),
        ]
        .into_iter()
        .collect();

        inject_memberships(&ontology.memberships, &mut graph);

        assert!(graph.contains_triple(&link("Gandalf", KnownPredicate::MemberOf, "Fellowship_of_the_Ring")));
        assert!(!graph.contains_triple(&link("Boromir", KnownPredicate::MemberOf, "Fellowship_of_the_Ring")));
        assert!(graph.contains_triple(&typed("Fellowship_of_the_Ring", EntityClass::Organization)));
    }

    #[test]
    fn test_inverses_read_from_graph() {
        let mut graph: KnowledgeGraph = vec![
            Triple::link(
                Iri::known(KnownPredicate::WieldedBy),
                Iri::known(KnownPredicate::InverseOf),
                Iri::known(KnownPredicate::Wields),
            ),
            link("Aragorn_II", KnownPredicate::Wields, "Andúril"),
        ]
        .into_iter()
        .collect();

        assert_eq!(materialize_inverses(&mut graph), 1);
        assert!(graph.contains_triple(&link("Andúril", KnownPredicate::WieldedBy, "Aragorn_II")));
        // Only the declared direction is materialized.
        assert!(!graph.contains(None, Some(&Iri::known(KnownPredicate::Wields)), Some(&Term::Iri(Iri::entity("Aragorn_II")))));
    }

    #[test]
    fn test_symmetric_predicates_are_mirrored() {
        let mut graph: KnowledgeGraph = vec![
            Triple::link(
                Iri::known(KnownPredicate::Siblings),
                Iri::known(KnownPredicate::Type),
                Iri::new(SYMMETRIC_PROPERTY),
            ),
            link("Fíli", KnownPredicate::Siblings, "Kíli"),
        ]
        .into_iter()
        .collect();

        assert_eq!(materialize_inverses(&mut graph), 1);
        assert!(graph.contains_triple(&link("Kíli", KnownPredicate::Siblings, "Fíli")));
    }

    #[test]
    fn test_group_derivation() {
        let derivation = GroupDerivation {
            groups: vec![RaceGroup {
                race: "Hobbits".to_string(),
                group: "HobbitKind".to_string(),
                label: "Hobbit-kind".to_string(),
            }],
            ..GroupDerivation::default()
        };
        let mut graph: KnowledgeGraph = vec![
            link("Frodo_Baggins", KnownPredicate::People, "Hobbits"),
            link("Gimli", KnownPredicate::People, "Dwarves"),
        ]
        .into_iter()
        .collect();

        assert_eq!(derive_groups(&derivation, &mut graph), 3);
        assert!(graph.contains_triple(&link("Frodo_Baggins", KnownPredicate::BelongsTo, "HobbitKind")));
        assert!(graph.contains_triple(&typed("HobbitKind", EntityClass::Race)));
        assert!(!graph.contains(Some(&Iri::entity("Gimli")), Some(&Iri::known(KnownPredicate::BelongsTo)), None));
        assert_eq!(derive_groups(&derivation, &mut graph), 0);
    }

    #[test]
    fn test_closure_depth_two() {
        let mut graph: KnowledgeGraph = vec![
            link("Wizards", KnownPredicate::SubClassOf, "Maiar"),
            link("Maiar", KnownPredicate::SubClassOf, "Ainur"),
            Triple::link(Iri::entity("Gandalf"), Iri::known(KnownPredicate::Type), Iri::entity("Wizards")),
        ]
        .into_iter()
        .collect();

        let closure = rdfs_closure(&mut graph, 10);
        assert!(closure.converged);
        assert_eq!(closure.added, 2);
        let rdf_type = Iri::known(KnownPredicate::Type);
        assert!(graph.contains_triple(&Triple::link(Iri::entity("Gandalf"), rdf_type.clone(), Iri::entity("Maiar"))));
        assert!(graph.contains_triple(&Triple::link(Iri::entity("Gandalf"), rdf_type, Iri::entity("Ainur"))));
    }

    #[test]
    fn test_closure_propagates_literals_through_subproperties() {
        let mut graph: KnowledgeGraph = vec![
            Triple::link(
                Iri::known(KnownPredicate::BirthLocation),
                Iri::known(KnownPredicate::SubPropertyOf),
                Iri::known(KnownPredicate::Location),
            ),
            Triple::literal(
                Iri::entity("Bilbo_Baggins"),
                Iri::known(KnownPredicate::BirthLocation),
                Literal::tagged("Hobbiton"),
            ),
        ]
        .into_iter()
        .collect();

        rdfs_closure(&mut graph, 10);
        assert!(graph.contains(
            Some(&Iri::entity("Bilbo_Baggins")),
            Some(&Iri::known(KnownPredicate::Location)),
            Some(&Term::Literal(Literal::tagged("Hobbiton")))
        ));
    }

    #[test]
    fn test_closure_cap() {
        // A chain of five classes needs more than one pass.
        let mut triples: Vec<Triple> = (0..5)
            .map(|i| Triple::link(
                Iri::entity(&format!("C{i}")),
                Iri::known(KnownPredicate::SubClassOf),
                Iri::entity(&format!("C{}", i + 1)),
            ))
            .rev()
            .collect();
        triples.push(Triple::link(Iri::entity("x"), Iri::known(KnownPredicate::Type), Iri::entity("C0")));
        let mut graph: KnowledgeGraph = triples.into_iter().collect();

        let closure = rdfs_closure(&mut graph, 1);
        assert_eq!(closure.passes, 1);
        assert!(!closure.converged);

        let closure = rdfs_closure(&mut graph, 10);
        assert!(closure.converged);
    }

    #[test]
    fn test_location_connections() {
        let mut graph: KnowledgeGraph = vec![
            link("Bilbo_Baggins", KnownPredicate::BirthLocation, "Hobbiton"),
            link("Boromir", KnownPredicate::DeathLocation, "Parth_Galen"),
        ]
        .into_iter()
        .collect();

        assert_eq!(connect_locations(&LocationConnections::default(), &mut graph), 2);
        assert!(graph.contains_triple(&link("Boromir", KnownPredicate::HasConnectionTo, "Parth_Galen")));
    }
}
