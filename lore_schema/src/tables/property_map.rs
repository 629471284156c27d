//! Property maps: parameter key -> predicate, one map per property profile.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::vocab::{KnownPredicate, Predicate};

/// Which property map applies to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyProfile {
    Character,
    Location,
    Book,
}

impl PropertyProfile {
    /// Profiles in the order they are tested against a tag.
    pub const PRIORITY: [PropertyProfile; 3] = [
        PropertyProfile::Character,
        PropertyProfile::Location,
        PropertyProfile::Book,
    ];

    /// Keyword the normalized tag must contain.
    pub fn keyword(self) -> &'static str {
        match self {
            PropertyProfile::Character => "character",
            PropertyProfile::Location => "location",
            PropertyProfile::Book => "book",
        }
    }

    /// Select the first profile whose keyword occurs in the tag.
    pub fn detect(normalized_tag: &str) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|profile| normalized_tag.contains(profile.keyword()))
    }
}

/// Key -> predicate mapping. Keys are stored trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Predicate>", into = "BTreeMap<String, Predicate>")]
pub struct PropertyMap {
    entries: BTreeMap<String, Predicate>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, predicate: impl Into<Predicate>) {
        self.entries.insert(key.trim().to_lowercase(), predicate.into());
    }

    pub fn with(mut self, key: &str, predicate: impl Into<Predicate>) -> Self {
        self.insert(key, predicate);
        self
    }

    /// Predicate for a normalized key.
    pub fn get(&self, key: &str) -> Option<&Predicate> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn from_pairs(pairs: &[(&str, KnownPredicate)]) -> Self {
        pairs
            .iter()
            .fold(Self::new(), |map, (key, predicate)| map.with(key, *predicate))
    }
}

impl From<BTreeMap<String, Predicate>> for PropertyMap {
    fn from(raw: BTreeMap<String, Predicate>) -> Self {
        raw.into_iter()
            .fold(Self::new(), |map, (key, predicate)| map.with(&key, predicate))
    }
}

impl From<PropertyMap> for BTreeMap<String, Predicate> {
    fn from(map: PropertyMap) -> Self {
        map.entries
    }
}

/// The property maps of every profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyMaps {
    pub character: PropertyMap,
    pub location: PropertyMap,
    pub book: PropertyMap,
}

impl PropertyMaps {
    /// The map for a profile.
    pub fn for_profile(&self, profile: PropertyProfile) -> &PropertyMap {
        match profile {
            PropertyProfile::Character => &self.character,
            PropertyProfile::Location => &self.location,
            PropertyProfile::Book => &self.book,
        }
    }
}

impl Default for PropertyMaps {
    fn default() -> Self {
        use KnownPredicate::*;

        Self {
            character: PropertyMap::from_pairs(&[
                ("name", Name),
                ("birth", BirthDate),
                ("death", DeathDate),
                ("culture", Nationality),
                ("race", Race),
                ("realm", Realm),
                ("weapon", HasWeapon),
                ("title", JobTitle),
                ("gender", Gender),
                ("house", House),
                ("parentage", Parentage),
                ("spouse", Spouse),
                ("children", Children),
                ("height", Height),
            ]),
            location: PropertyMap::from_pairs(&[
                ("name", Name),
                ("type", AdditionalType),
                ("location", ContainedInPlace),
                ("inhabitants", Inhabitants),
                ("founded", FoundingDate),
                ("destroyed", DestructionDate),
                ("capital", HasCapital),
            ]),
            book: PropertyMap::from_pairs(&[
                ("name", Name),
                ("author", Author),
                ("published", DatePublished),
                ("publisher", Publisher),
                ("isbn", Isbn),
                ("language", InLanguage),
                ("pages", NumberOfPages),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_priority() {
        assert_eq!(
            PropertyProfile::detect("infobox character"),
            Some(PropertyProfile::Character)
        );
        // "character" is tested before "location".
        assert_eq!(
            PropertyProfile::detect("location character"),
            Some(PropertyProfile::Character)
        );
        assert_eq!(PropertyProfile::detect("book"), Some(PropertyProfile::Book));
        assert_eq!(PropertyProfile::detect("infobox event"), None);
    }

    #[test]
    fn test_default_maps() {
        let maps = PropertyMaps::default();
        assert_eq!(
            maps.for_profile(PropertyProfile::Character).get("spouse"),
            Some(&Predicate::Known(KnownPredicate::Spouse))
        );
        assert_eq!(
            maps.for_profile(PropertyProfile::Location).get("capital"),
            Some(&Predicate::Known(KnownPredicate::HasCapital))
        );
        assert!(maps.for_profile(PropertyProfile::Book).get("spouse").is_none());
    }

    #[test]
    fn test_insert_normalizes_key() {
        let map = PropertyMap::new().with(" Eyes ", Predicate::ad_hoc("eyeColour"));
        assert!(map.get("eyes").is_some());
        assert_eq!(map.len(), 1);
    }
}
