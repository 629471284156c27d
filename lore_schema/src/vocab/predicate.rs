//! Predicates - the curated vocabulary plus ad-hoc ontology properties.

use serde::{Deserialize, Serialize};

use super::{compact_iri, expand_curie, ns};
use crate::error::{SchemaError, SchemaResult};

/// Declares the curated predicate enum together with its namespace table.
macro_rules! known_predicates {
    ($( $(#[$meta:meta])* $variant:ident => $namespace:ident : $local:literal ),* $(,)?) => {
        /// Predicates with a fixed meaning in the vocabulary.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum KnownPredicate {
            $( $(#[$meta])* $variant, )*
        }

        impl KnownPredicate {
            /// Every curated predicate, in declaration order.
            pub const ALL: &'static [KnownPredicate] = &[$( KnownPredicate::$variant, )*];

            /// Namespace IRI of this predicate.
            pub fn namespace(self) -> &'static str {
                match self {
                    $( KnownPredicate::$variant => ns::$namespace, )*
                }
            }

            /// Local name inside the namespace.
            pub fn local_name(self) -> &'static str {
                match self {
                    $( KnownPredicate::$variant => $local, )*
                }
            }
        }
    };
}

known_predicates! {
    // RDF / RDFS / OWL
    Type => RDF:"type",
    Label => RDFS:"label",
    SubClassOf => RDFS:"subClassOf",
    SubPropertyOf => RDFS:"subPropertyOf",
    Domain => RDFS:"domain",
    Range => RDFS:"range",
    InverseOf => OWL:"inverseOf",
    /// Provenance link to the page a record was parsed from.
    Source => DCTERMS:"source",

    // schema.org
    Name => SCHEMA:"name",
    BirthDate => SCHEMA:"birthDate",
    DeathDate => SCHEMA:"deathDate",
    Nationality => SCHEMA:"nationality",
    JobTitle => SCHEMA:"jobTitle",
    Gender => SCHEMA:"gender",
    Spouse => SCHEMA:"spouse",
    Children => SCHEMA:"children",
    Height => SCHEMA:"height",
    AdditionalType => SCHEMA:"additionalType",
    ContainedInPlace => SCHEMA:"containedInPlace",
    Author => SCHEMA:"author",
    DatePublished => SCHEMA:"datePublished",
    Publisher => SCHEMA:"publisher",
    Isbn => SCHEMA:"isbn",
    InLanguage => SCHEMA:"inLanguage",
    NumberOfPages => SCHEMA:"numberOfPages",
    Parent => SCHEMA:"parent",
    RelatedTo => SCHEMA:"relatedTo",
    SchemaLocation => SCHEMA:"location",
    SchemaMemberOf => SCHEMA:"memberOf",
    Mentions => SCHEMA:"mentions",

    // Project ontology: character and place attributes
    Race => TGO:"race",
    Realm => TGO:"realm",
    HasWeapon => TGO:"hasWeapon",
    House => TGO:"house",
    Parentage => TGO:"parentage",
    Siblings => TGO:"siblings",
    People => TGO:"people",
    Inhabitants => TGO:"inhabitants",
    FoundingDate => TGO:"foundingDate",
    DestructionDate => TGO:"destructionDate",
    HasCapital => TGO:"hasCapital",
    Location => TGO:"location",
    BirthLocation => TGO:"birthlocation",
    DeathLocation => TGO:"deathlocation",

    // Descriptive notes for values that are not references
    MaritalStatus => TGO:"maritalStatus",
    ChildrenNote => TGO:"childrenNote",
    ParentageNote => TGO:"parentageNote",
    SiblingsNote => TGO:"siblingsNote",
    HouseNote => TGO:"houseNote",
    AffiliationNote => TGO:"affiliationNote",

    // Relations to embedded entities and their inverses
    ParticipatedIn => TGO:"participatedIn",
    NotableFor => TGO:"notableFor",
    MemberOf => TGO:"memberOf",
    BelongsToRace => TGO:"belongsToRace",
    Wields => TGO:"wields",
    BelongsToHouse => TGO:"belongsToHouse",
    Speaks => TGO:"speaks",
    Rides => TGO:"rides",
    HasMember => TGO:"hasMember",
    RaceIncludes => TGO:"raceIncludes",
    HouseIncludes => TGO:"houseIncludes",
    WieldedBy => TGO:"wieldedBy",
    HasParticipant => TGO:"hasParticipant",
    RiddenBy => TGO:"riddenBy",
    SpokenBy => TGO:"spokenBy",

    // Derived by the reasoner
    BelongsTo => TGO:"belongsTo",
    HasConnectionTo => TGO:"hasConnectionTo",
}

impl KnownPredicate {
    /// Absolute IRI of this predicate.
    pub fn iri(self) -> String {
        format!("{}{}", self.namespace(), self.local_name())
    }

    /// Find the curated predicate with the given absolute IRI.
    pub fn from_iri(iri: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| {
            iri.strip_prefix(p.namespace())
                .is_some_and(|local| local == p.local_name())
        })
    }
}

/// A predicate as the extractor resolves it.
///
/// Parameter keys without a curated mapping become [`Predicate::AdHoc`]
/// properties in the ontology namespace, so consumers can tell curated
/// vocabulary from free-form extensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Predicate {
    Known(KnownPredicate),
    /// Local name of an auto-generated property under the ontology namespace.
    AdHoc(String),
}

impl Predicate {
    /// Build the auto-generated predicate for a parameter key.
    ///
    /// Characters other than letters, digits and `_` become `_`. A name that
    /// coincides with a curated ontology predicate resolves to that predicate.
    pub fn ad_hoc(key: &str) -> Self {
        let local: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        match KnownPredicate::from_iri(&format!("{}{local}", ns::TGO)) {
            Some(known) => Predicate::Known(known),
            None => Predicate::AdHoc(local),
        }
    }

    /// Parse a compact or absolute IRI.
    pub fn parse(term: &str) -> SchemaResult<Self> {
        let iri = expand_curie(term)?;
        Self::from_iri(&iri).ok_or_else(|| SchemaError::UnknownPredicate(term.to_string()))
    }

    /// Classify an absolute IRI as curated, ad-hoc, or neither.
    pub fn from_iri(iri: &str) -> Option<Self> {
        if let Some(known) = KnownPredicate::from_iri(iri) {
            return Some(Predicate::Known(known));
        }
        iri.strip_prefix(ns::TGO)
            .filter(|local| !local.is_empty())
            .map(|local| Predicate::AdHoc(local.to_string()))
    }

    /// Absolute IRI of this predicate.
    pub fn iri(&self) -> String {
        match self {
            Predicate::Known(known) => known.iri(),
            Predicate::AdHoc(local) => format!("{}{local}", ns::TGO),
        }
    }

    /// Whether the predicate is part of the curated vocabulary.
    pub fn is_curated(&self) -> bool {
        matches!(self, Predicate::Known(_))
    }
}

impl From<KnownPredicate> for Predicate {
    fn from(known: KnownPredicate) -> Self {
        Predicate::Known(known)
    }
}

impl TryFrom<String> for Predicate {
    type Error = SchemaError;

    fn try_from(value: String) -> SchemaResult<Self> {
        Self::parse(&value)
    }
}

impl From<Predicate> for String {
    fn from(predicate: Predicate) -> Self {
        predicate.to_string()
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let iri = self.iri();
        match compact_iri(&iri) {
            Some(compact) => write!(f, "{compact}"),
            None => write!(f, "<{iri}>"),
        }
    }
}
