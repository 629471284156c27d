//! Classification table: raw template tag -> entity class.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::vocab::EntityClass;

/// Outcome of classifying a record's template tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The tag matched a table entry (or was upgraded by auto-detection).
    Known(EntityClass),
    /// Nothing matched; the record is typed with the generic class.
    Fallback { raw_tag: String },
}

impl Classification {
    /// The class to assert for this classification.
    pub fn class(&self) -> EntityClass {
        match self {
            Classification::Known(class) => *class,
            Classification::Fallback { .. } => EntityClass::Thing,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Classification::Fallback { .. })
    }
}

/// Tag -> class lookup, matched case-insensitively.
///
/// Keys are stored lower-cased. Lookup tries an exact match first, then any
/// key contained in the tag; among several contained keys the longest wins,
/// ties going to the lexicographically smaller key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, EntityClass>", into = "BTreeMap<String, EntityClass>")]
pub struct ClassificationTable {
    entries: BTreeMap<String, EntityClass>,
}

impl ClassificationTable {
    /// Create an empty table; every tag falls back.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, tag: &str, class: EntityClass) {
        self.entries.insert(normalize_tag(tag), class);
    }

    pub fn with_entry(mut self, tag: &str, class: EntityClass) -> Self {
        self.insert(tag, class);
        self
    }

    /// Classify a raw tag.
    pub fn classify(&self, raw_tag: &str) -> Classification {
        let tag = normalize_tag(raw_tag);
        if let Some(class) = self.entries.get(&tag) {
            return Classification::Known(*class);
        }

        self.entries
            .iter()
            .filter(|(key, _)| !key.is_empty() && tag.contains(key.as_str()))
            .max_by(|a, b| a.0.len().cmp(&b.0.len()).then_with(|| b.0.cmp(a.0)))
            .map(|(_, class)| Classification::Known(*class))
            .unwrap_or_else(|| Classification::Fallback {
                raw_tag: raw_tag.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ClassificationTable {
    fn default() -> Self {
        use EntityClass::*;

        [
            ("infobox character", Person),
            ("character", Person),
            ("infobox location", Place),
            ("location infobox", Place),
            ("location", Place),
            ("infobox book", Book),
            ("book", Book),
            ("infobox event", Event),
            ("event", Event),
            ("infobox item", Thing),
            ("item", Thing),
            ("infobox language", Language),
            ("language", Language),
            ("infobox weapon", Product),
            ("weapon", Product),
            ("infobox organization", Organization),
            ("organization", Organization),
        ]
        .into_iter()
        .fold(Self::empty(), |table, (tag, class)| table.with_entry(tag, class))
    }
}

impl From<BTreeMap<String, EntityClass>> for ClassificationTable {
    fn from(raw: BTreeMap<String, EntityClass>) -> Self {
        raw.into_iter()
            .fold(Self::empty(), |table, (tag, class)| table.with_entry(&tag, class))
    }
}

impl From<ClassificationTable> for BTreeMap<String, EntityClass> {
    fn from(table: ClassificationTable) -> Self {
        table.entries
    }
}

/// Trim and lower-case a template tag.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let table = ClassificationTable::default();
        assert_eq!(
            table.classify("  Infobox Character "),
            Classification::Known(EntityClass::Person)
        );
    }

    #[test]
    fn test_substring_match() {
        let table = ClassificationTable::default();
        assert_eq!(
            table.classify("infobox character (elf)"),
            Classification::Known(EntityClass::Person)
        );
        assert_eq!(
            table.classify("battle event box"),
            Classification::Known(EntityClass::Event)
        );
    }

    #[test]
    fn test_longest_key_wins() {
        let table = ClassificationTable::empty()
            .with_entry("book", EntityClass::Book)
            .with_entry("book character", EntityClass::Person);
        assert_eq!(
            table.classify("infobox book character"),
            Classification::Known(EntityClass::Person)
        );
    }

    #[test]
    fn test_fallback_keeps_raw_tag() {
        let table = ClassificationTable::default();
        let result = table.classify("UnknownTemplate");
        assert_eq!(
            result,
            Classification::Fallback {
                raw_tag: "UnknownTemplate".to_string()
            }
        );
        assert!(result.is_fallback());
        assert_eq!(result.class(), EntityClass::Thing);
    }

    #[test]
    fn test_deserialized_keys_are_normalized() {
        let mut raw = BTreeMap::new();
        raw.insert("Infobox Ship".to_string(), EntityClass::Product);
        let table = ClassificationTable::from(raw);
        assert_eq!(
            table.classify("infobox ship"),
            Classification::Known(EntityClass::Product)
        );
    }
}
