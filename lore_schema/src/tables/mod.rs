//! Extraction tables - the immutable data that drives record extraction.
//!
//! - **Classification**: template tag -> entity class
//! - **Property maps**: parameter key -> predicate, per profile
//! - **Descriptive vocabulary**: phrases that mark a value as a note, not a fact
//! - **Expansions**: parameters whose references spawn auxiliary entities

mod classification;
mod property_map;

pub use classification::*;
pub use property_map::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::vocab::{EntityClass, KnownPredicate, Predicate};

/// Phrases that mark a literal as descriptive (absence or uncertainty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptiveVocabulary {
    /// Whole-value matches.
    pub exact: Vec<String>,
    /// Leading-phrase matches.
    pub prefixes: Vec<String>,
}

impl Default for DescriptiveVocabulary {
    fn default() -> Self {
        let exact = [
            "never married",
            "unmarried",
            "none",
            "unknown",
            "n/a",
            "-",
            "no children",
            "no spouse",
            "childless",
            "none known",
            "not applicable",
            "at least one",
            "several",
            "many",
            "some",
            "disputed",
            "unclear",
            "possibly",
        ];
        let prefixes = ["at least", "possibly", "unknown", "none"];

        Self {
            exact: exact.iter().map(|s| s.to_string()).collect(),
            prefixes: prefixes.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Predicates used for descriptive values of relationship parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DescriptiveOverrides {
    entries: BTreeMap<String, Predicate>,
}

impl DescriptiveOverrides {
    /// Predicate for a descriptive value of `key`; unmapped keys get `<key>_note`.
    pub fn predicate_for(&self, key: &str) -> Predicate {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| Predicate::ad_hoc(&format!("{key}_note")))
    }
}

impl Default for DescriptiveOverrides {
    fn default() -> Self {
        use KnownPredicate::*;

        let entries = [
            ("spouse", MaritalStatus),
            ("children", ChildrenNote),
            ("parentage", ParentageNote),
            ("siblings", SiblingsNote),
            ("house", HouseNote),
            ("affiliation", AffiliationNote),
        ]
        .into_iter()
        .map(|(key, predicate)| (key.to_string(), Predicate::Known(predicate)))
        .collect();

        Self { entries }
    }
}

/// A parameter whose references become entities of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionRule {
    /// Normalized parameter key.
    pub key: String,
    /// Class given to referenced entities that have no type yet.
    pub class: EntityClass,
    /// Relation from the record's entity to each referenced entity.
    pub predicate: Predicate,
}

impl ExpansionRule {
    pub fn new(key: &str, class: EntityClass, predicate: impl Into<Predicate>) -> Self {
        Self {
            key: key.to_string(),
            class,
            predicate: predicate.into(),
        }
    }
}

/// Default expansion table.
pub fn default_expansions() -> Vec<ExpansionRule> {
    use KnownPredicate::*;

    vec![
        ExpansionRule::new("events", EntityClass::Event, ParticipatedIn),
        ExpansionRule::new("notablefor", EntityClass::Event, NotableFor),
        ExpansionRule::new("affiliation", EntityClass::Organization, MemberOf),
        ExpansionRule::new("people", EntityClass::Race, BelongsToRace),
        ExpansionRule::new("weapons", EntityClass::Artifact, Wields),
        ExpansionRule::new("house", EntityClass::House, BelongsToHouse),
        ExpansionRule::new("language", EntityClass::Language, Speaks),
        ExpansionRule::new("steed", EntityClass::Creature, Rides),
    ]
}

/// Upgrade of unclassified records that look like places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoDetection {
    /// Parameter keys that identify the class.
    pub keys: Vec<String>,
    pub class: EntityClass,
}

impl Default for AutoDetection {
    fn default() -> Self {
        let keys = [
            "location",
            "inhabitants",
            "type",
            "founded",
            "destroyed",
            "capital",
            "regions",
            "settlements",
        ];
        Self {
            keys: keys.iter().map(|s| s.to_string()).collect(),
            class: EntityClass::Place,
        }
    }
}

impl AutoDetection {
    /// Whether any of the given normalized keys is a hint key.
    pub fn matches<'a>(&self, mut keys: impl Iterator<Item = &'a str>) -> bool {
        keys.any(|key| self.keys.iter().any(|hint| hint == key))
    }
}

/// Everything the extractor reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionTables {
    /// How many page links of a record become `schema:mentions` edges.
    pub max_mentions: usize,
    pub classification: ClassificationTable,
    pub property_maps: PropertyMaps,
    pub descriptive: DescriptiveVocabulary,
    pub descriptive_overrides: DescriptiveOverrides,
    pub expansions: Vec<ExpansionRule>,
    pub auto_detection: AutoDetection,
}

impl Default for ExtractionTables {
    fn default() -> Self {
        Self {
            max_mentions: 10,
            classification: ClassificationTable::default(),
            property_maps: PropertyMaps::default(),
            descriptive: DescriptiveVocabulary::default(),
            descriptive_overrides: DescriptiveOverrides::default(),
            expansions: default_expansions(),
            auto_detection: AutoDetection::default(),
        }
    }
}
