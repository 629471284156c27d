//! Ontology - axioms and curated facts the reasoner works from.
//!
//! The axioms are seeded into the graph before any rule runs; the rules then
//! read the hierarchy back out of the graph, so axioms asserted by records
//! take part in reasoning as well.

use serde::{Deserialize, Serialize};

use crate::vocab::{Curie, EntityClass, KnownPredicate, Predicate};

/// `subclass rdfs:subClassOf superclass`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubClassAxiom {
    pub subclass: Curie,
    pub superclass: Curie,
}

/// `subproperty rdfs:subPropertyOf superproperty`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubPropertyAxiom {
    pub subproperty: Predicate,
    pub superproperty: Predicate,
}

/// `inverse owl:inverseOf predicate`, with optional annotations on `inverse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InverseAxiom {
    pub predicate: Predicate,
    pub inverse: Predicate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Curie>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Curie>,
}

impl InverseAxiom {
    pub fn new(predicate: impl Into<Predicate>, inverse: impl Into<Predicate>) -> Self {
        Self {
            predicate: predicate.into(),
            inverse: inverse.into(),
            label: None,
            domain: None,
            range: None,
        }
    }

    /// Attach label, domain and range annotations for the inverse property.
    pub fn annotated(mut self, label: &str, domain: EntityClass, range: EntityClass) -> Self {
        self.label = Some(label.to_string());
        self.domain = Some(domain.into());
        self.range = Some(range.into());
        self
    }
}

/// A fixed organization whose listed members join it when they are typed
/// with `member_class`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratedMembership {
    /// Entity id of the organization.
    pub organization: String,
    pub label: String,
    /// Entity ids of the members.
    pub members: Vec<String>,
    #[serde(default = "default_member_class")]
    pub member_class: EntityClass,
}

fn default_member_class() -> EntityClass {
    EntityClass::Person
}

/// A race reference that implies membership in a broader group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceGroup {
    /// Entity id of the race object on the source edge.
    pub race: String,
    /// Entity id of the group.
    pub group: String,
    pub label: String,
}

/// Group membership derived from race references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupDerivation {
    /// Edge whose object names the race.
    pub source: Predicate,
    /// Edge added from the subject to the group.
    pub predicate: Predicate,
    /// Type asserted on a group that has none.
    pub group_class: EntityClass,
    pub groups: Vec<RaceGroup>,
}

impl Default for GroupDerivation {
    fn default() -> Self {
        let groups = [
            ("Hobbits", "HobbitKind", "Hobbit-kind"),
            ("Dwarves", "DwarfKind", "Dwarf-kind"),
            ("Gondorians", "Númenóreans", "Númenórean descendants"),
            ("Rohirrim", "Northmen", "Northmen"),
            ("Maiar", "Ainur", "Ainur"),
            ("Orcs", "ServantsOfMordor", "Servants of Mordor"),
        ];

        Self {
            source: KnownPredicate::People.into(),
            predicate: KnownPredicate::BelongsTo.into(),
            group_class: EntityClass::Race,
            groups: groups
                .iter()
                .map(|(race, group, label)| RaceGroup {
                    race: race.to_string(),
                    group: group.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        }
    }
}

/// Edges that imply a generic connection between an entity and a place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConnections {
    pub sources: Vec<Predicate>,
    pub target: Predicate,
}

impl Default for LocationConnections {
    fn default() -> Self {
        Self {
            sources: vec![
                KnownPredicate::BirthLocation.into(),
                KnownPredicate::DeathLocation.into(),
            ],
            target: KnownPredicate::HasConnectionTo.into(),
        }
    }
}

/// The complete ontology handed to the reasoner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ontology {
    pub symmetric: Vec<Predicate>,
    pub class_hierarchy: Vec<SubClassAxiom>,
    pub property_hierarchy: Vec<SubPropertyAxiom>,
    pub inverses: Vec<InverseAxiom>,
    pub memberships: Vec<CuratedMembership>,
    pub group_derivation: GroupDerivation,
    pub location_connections: LocationConnections,
}

impl Ontology {
    /// An ontology with no axioms and no curated facts.
    pub fn empty() -> Self {
        Self {
            symmetric: Vec::new(),
            class_hierarchy: Vec::new(),
            property_hierarchy: Vec::new(),
            inverses: Vec::new(),
            memberships: Vec::new(),
            group_derivation: GroupDerivation {
                groups: Vec::new(),
                ..GroupDerivation::default()
            },
            location_connections: LocationConnections::default(),
        }
    }

    /// Add a class-hierarchy edge between two resources.
    pub fn with_subclass(mut self, subclass: Curie, superclass: Curie) -> Self {
        self.class_hierarchy.push(SubClassAxiom {
            subclass,
            superclass,
        });
        self
    }

    /// Add a property-hierarchy edge.
    pub fn with_subproperty(
        mut self,
        subproperty: impl Into<Predicate>,
        superproperty: impl Into<Predicate>,
    ) -> Self {
        self.property_hierarchy.push(SubPropertyAxiom {
            subproperty: subproperty.into(),
            superproperty: superproperty.into(),
        });
        self
    }

    pub fn with_symmetric(mut self, predicate: impl Into<Predicate>) -> Self {
        self.symmetric.push(predicate.into());
        self
    }

    pub fn with_inverse(mut self, axiom: InverseAxiom) -> Self {
        self.inverses.push(axiom);
        self
    }

    pub fn with_membership(mut self, membership: CuratedMembership) -> Self {
        self.memberships.push(membership);
        self
    }
}

impl Default for Ontology {
    fn default() -> Self {
        use EntityClass::{Artifact, Creature, Event, House, Language, Organization, Person, Race};
        use KnownPredicate::*;

        let races = [
            ("Noldor", "Elves"),
            ("Sindar", "Elves"),
            ("Silvan_Elves", "Elves"),
            ("Half_elven", "Elves"),
            ("Elves", "FreePeoples"),
            ("Hobbits", "FreePeoples"),
            ("Dwarves", "FreePeoples"),
            ("Men", "FreePeoples"),
            ("Gondorians", "Men"),
            ("Rohirrim", "Men"),
            ("Maiar", "Ainur"),
            ("Wizards", "Maiar"),
            ("Orcs", "EvilCreatures"),
            ("Spiders", "EvilCreatures"),
        ];

        let ontology = races
            .iter()
            .fold(Self::empty(), |ontology, (sub, sup)| {
                ontology.with_subclass(Curie::resource(sub), Curie::resource(sup))
            })
            .with_subproperty(Parentage, Parent)
            .with_subproperty(Children, RelatedTo)
            .with_subproperty(Spouse, RelatedTo)
            .with_subproperty(Siblings, RelatedTo)
            .with_subproperty(Location, SchemaLocation)
            .with_subproperty(BirthLocation, Location)
            .with_subproperty(DeathLocation, Location)
            .with_symmetric(Spouse)
            .with_symmetric(Siblings)
            .with_inverse(
                InverseAxiom::new(SchemaMemberOf, HasMember)
                    .annotated("has member", Organization, Person),
            )
            .with_inverse(
                InverseAxiom::new(MemberOf, HasMember).annotated("has member", Organization, Person),
            )
            .with_inverse(
                InverseAxiom::new(BelongsToRace, RaceIncludes)
                    .annotated("race includes", Race, Person),
            )
            .with_inverse(
                InverseAxiom::new(BelongsToHouse, HouseIncludes)
                    .annotated("house includes", House, Person),
            )
            .with_inverse(
                InverseAxiom::new(Wields, WieldedBy).annotated("wielded by", Artifact, Person),
            )
            .with_inverse(
                InverseAxiom::new(ParticipatedIn, HasParticipant)
                    .annotated("has participant", Event, Person),
            )
            .with_inverse(
                InverseAxiom::new(NotableFor, HasParticipant)
                    .annotated("has participant", Event, Person),
            )
            .with_inverse(
                InverseAxiom::new(Rides, RiddenBy).annotated("ridden by", Creature, Person),
            )
            .with_inverse(
                InverseAxiom::new(Speaks, SpokenBy).annotated("spoken by", Language, Person),
            )
            .with_membership(CuratedMembership {
                organization: "Fellowship_of_the_Ring".to_string(),
                label: "Fellowship of the Ring".to_string(),
                members: [
                    "Frodo_Baggins",
                    "Samwise_Gamgee",
                    "Gandalf",
                    "Aragorn_II",
                    "Legolas",
                    "Gimli",
                    "Boromir",
                    "Meriadoc_Brandybuck",
                    "Peregrin_Took",
                ]
                .iter()
                .map(|m| m.to_string())
                .collect(),
                member_class: Person,
            });

        Self {
            group_derivation: GroupDerivation::default(),
            ..ontology
        }
    }
}
