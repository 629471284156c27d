//! Entity Extractor - turns parsed records into typed facts.
//!
//! Extraction of one record:
//! 1. **Classify** the template tag (exact, then substring, else fallback)
//! 2. **Auto-detect** places among unclassified records by their keys
//! 3. **Type and label** the entity
//! 4. **Map parameters** through the profile's property map; references
//!    become relation edges, descriptive notes go through the override map
//! 5. **Provenance**: `dcterms:source` to the wiki page
//! 6. **Expand** embedded entities
//! 7. **Mentions** for the first page links
//!
//! [`EntityExtractor::finish`] then gives every untyped relation target a
//! generic type, so no edge points at an entity the graph knows nothing about.

mod expander;
mod identifier;
mod normalize;

pub use expander::*;
pub use identifier::*;
pub use normalize::*;

use std::collections::{BTreeMap, HashMap};

use lore_schema::{
    normalize_tag, Classification, EntityClass, ExtractionTables, KnownPredicate, Predicate,
    PropertyProfile, Record,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::knowledge_base::{Iri, KnowledgeGraph, Literal, Triple};

/// Two different display names that map to the same identifier.
///
/// Their facts are merged onto the one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentifierCollision {
    pub identifier: String,
    pub first: String,
    pub second: String,
}

/// Summary of an extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    /// Records turned into entities.
    pub records: usize,
    /// Records skipped because their name has no identifier characters.
    pub skipped: usize,
    /// Records that fell back to the generic class.
    pub fallbacks: usize,
    pub collisions: Vec<IdentifierCollision>,
    /// Relation targets typed `schema:Thing` because nothing else typed them.
    pub placeholders: usize,
}

/// Extracts records into a graph using a fixed set of tables.
pub struct EntityExtractor<'a> {
    tables: &'a ExtractionTables,
    /// Identifier -> first display name that produced it.
    names: HashMap<String, String>,
    /// Relation targets and the reference text that first named them.
    referenced: BTreeMap<Iri, String>,
    report: ExtractionReport,
}

impl<'a> EntityExtractor<'a> {
    pub fn new(tables: &'a ExtractionTables) -> Self {
        Self {
            tables,
            names: HashMap::new(),
            referenced: BTreeMap::new(),
            report: ExtractionReport::default(),
        }
    }

    /// Extract one record. Returns the entity IRI, or `None` when the
    /// record's name yields an empty identifier.
    pub fn extract(&mut self, record: &Record, graph: &mut KnowledgeGraph) -> Option<Iri> {
        let id = to_identifier(&record.name);
        if id.is_empty() {
            warn!(name = %record.name, "record name has no identifier characters, skipping");
            self.report.skipped += 1;
            return None;
        }
        self.register_name(&id, &record.name);

        let subject = Iri::entity(&id);
        let classification = self.classify(record);
        debug!(entity = %id, tag = %record.tag, ?classification, "classified record");
        if classification.is_fallback() {
            self.report.fallbacks += 1;
        }

        graph.add(Triple::link(
            subject.clone(),
            Iri::known(KnownPredicate::Type),
            Iri::class(classification.class()),
        ));
        graph.add(Triple::literal(
            subject.clone(),
            Iri::known(KnownPredicate::Label),
            Literal::tagged(record.name.as_str()),
        ));

        self.map_params(record, &subject, graph);

        graph.add(Triple::link(
            subject.clone(),
            Iri::known(KnownPredicate::Source),
            Iri::new(source_iri(&record.name)),
        ));

        expand(record, &subject, &self.tables.expansions, graph);
        self.add_mentions(record, &subject, graph);

        self.report.records += 1;
        Some(subject)
    }

    /// Extract every record in order.
    pub fn extract_all<'r>(
        &mut self,
        records: impl IntoIterator<Item = &'r Record>,
        graph: &mut KnowledgeGraph,
    ) -> Vec<Iri> {
        records
            .into_iter()
            .filter_map(|record| self.extract(record, graph))
            .collect()
    }

    /// Type every relation target that is still untyped, and return the
    /// report of the run.
    pub fn finish(mut self, graph: &mut KnowledgeGraph) -> ExtractionReport {
        let rdf_type = Iri::known(KnownPredicate::Type);
        let label = Iri::known(KnownPredicate::Label);

        for (target, text) in &self.referenced {
            if graph.has_predicate(target, &rdf_type) {
                continue;
            }
            graph.add(Triple::link(
                target.clone(),
                rdf_type.clone(),
                Iri::class(EntityClass::Thing),
            ));
            graph.add(Triple::literal(target.clone(), label.clone(), Literal::tagged(text.as_str())));
            self.report.placeholders += 1;
        }

        info!(
            records = self.report.records,
            skipped = self.report.skipped,
            fallbacks = self.report.fallbacks,
            collisions = self.report.collisions.len(),
            placeholders = self.report.placeholders,
            "extraction finished"
        );
        self.report
    }

    /// Classify the tag, upgrading unclassified place-like records.
    fn classify(&self, record: &Record) -> Classification {
        let classification = self.tables.classification.classify(&record.tag);
        if !classification.is_fallback() {
            return classification;
        }

        let keys: Vec<String> = record.normalized_keys().collect();
        if self
            .tables
            .auto_detection
            .matches(keys.iter().map(String::as_str))
        {
            Classification::Known(self.tables.auto_detection.class)
        } else {
            classification
        }
    }

    fn map_params(&mut self, record: &Record, subject: &Iri, graph: &mut KnowledgeGraph) {
        let property_map = PropertyProfile::detect(&normalize_tag(&record.tag))
            .map(|profile| self.tables.property_maps.for_profile(profile));

        for (raw_key, value) in &record.params {
            if value.trim().is_empty() {
                continue;
            }
            let key = raw_key.trim().to_lowercase();
            let predicate = property_map
                .and_then(|map| map.get(&key))
                .cloned()
                .unwrap_or_else(|| Predicate::ad_hoc(&key));

            if let Some(target) = extract_reference(value) {
                let target_id = to_identifier(&target);
                if !target_id.is_empty() {
                    let object = Iri::entity(&target_id);
                    self.referenced.entry(object.clone()).or_insert(target);
                    graph.add(Triple::link(subject.clone(), Iri::predicate(&predicate), object));
                    continue;
                }
            }

            let cleaned = strip_markup(value);
            if cleaned.is_empty() {
                continue;
            }
            let predicate = match classify_literal(&cleaned, &self.tables.descriptive) {
                LiteralKind::Descriptive => self.tables.descriptive_overrides.predicate_for(&key),
                LiteralKind::Substantive => predicate,
            };
            graph.add(Triple::literal(
                subject.clone(),
                Iri::predicate(&predicate),
                Literal::tagged(cleaned),
            ));
        }
    }

    fn add_mentions(&mut self, record: &Record, subject: &Iri, graph: &mut KnowledgeGraph) {
        let mentions = Iri::known(KnownPredicate::Mentions);

        for target in record.links.iter().take(self.tables.max_mentions) {
            let target_id = to_identifier(target);
            if target_id.is_empty() {
                continue;
            }
            let object = Iri::entity(&target_id);
            self.referenced
                .entry(object.clone())
                .or_insert_with(|| target.trim().to_string());
            graph.add(Triple::link(subject.clone(), mentions.clone(), object));
        }
    }

    fn register_name(&mut self, id: &str, name: &str) {
        match self.names.get(id) {
            Some(first) if first != name => {
                warn!(identifier = %id, first = %first, second = %name, "identifier collision, merging entities");
                self.report.collisions.push(IdentifierCollision {
                    identifier: id.to_string(),
                    first: first.clone(),
                    second: name.to_string(),
                });
            }
            Some(_) => {}
            None => {
                self.names.insert(id.to_string(), name.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge_base::Term;

    fn iri(p: KnownPredicate) -> Iri {
        Iri::known(p)
    }

    fn has_type(graph: &KnowledgeGraph, id: &str, class: EntityClass) -> bool {
        graph.contains(
            Some(&Iri::entity(id)),
            Some(&iri(KnownPredicate::Type)),
            Some(&Term::Iri(Iri::class(class))),
        )
    }

    fn extract_one(record: &Record) -> (KnowledgeGraph, ExtractionReport) {
        let tables = ExtractionTables::default();
        let mut graph = KnowledgeGraph::new();
        let mut extractor = EntityExtractor::new(&tables);
        extractor.extract(record, &mut graph);
        let report = extractor.finish(&mut graph);
        (graph, report)
    }

    #[test]
    fn test_frodo_character_record() {
        let record = Record::new("Frodo Baggins", "infobox character")
            .with_param("race", "[[Hobbit]]")
            .with_param("spouse", "unmarried");
        let (graph, _) = extract_one(&record);
        let frodo = Iri::entity("Frodo_Baggins");

        assert!(has_type(&graph, "Frodo_Baggins", EntityClass::Person));
        assert!(graph.contains(
            Some(&frodo),
            Some(&iri(KnownPredicate::Label)),
            Some(&Term::Literal(Literal::tagged("Frodo Baggins")))
        ));
        assert!(graph.contains(
            Some(&frodo),
            Some(&iri(KnownPredicate::Race)),
            Some(&Term::Iri(Iri::entity("Hobbit")))
        ));
        assert!(graph.contains(
            Some(&frodo),
            Some(&iri(KnownPredicate::MaritalStatus)),
            Some(&Term::Literal(Literal::tagged("unmarried")))
        ));
        assert!(!graph.contains(Some(&frodo), Some(&iri(KnownPredicate::Spouse)), None));
        assert!(graph.contains(
            Some(&frodo),
            Some(&iri(KnownPredicate::Source)),
            Some(&Term::Iri(Iri::new("https://tolkiengateway.net/wiki/Frodo_Baggins")))
        ));
    }

    #[test]
    fn test_rivendell_is_detected_as_place() {
        let record = Record::new("Rivendell", "unknowntemplate")
            .with_param("founded", "Second Age")
            .with_param("inhabitants", "[[Elves]]");
        let (graph, report) = extract_one(&record);
        let rivendell = Iri::entity("Rivendell");

        assert!(has_type(&graph, "Rivendell", EntityClass::Place));
        assert!(!has_type(&graph, "Rivendell", EntityClass::Thing));
        assert!(graph.contains(Some(&rivendell), None, Some(&Term::Iri(Iri::entity("Elves")))));
        // No profile applies, so the keys become ad-hoc predicates.
        assert!(graph.contains(
            Some(&rivendell),
            Some(&Iri::predicate(&Predicate::ad_hoc("founded"))),
            Some(&Term::Literal(Literal::tagged("Second Age")))
        ));
        assert_eq!(report.fallbacks, 0);
    }

    #[test]
    fn test_fallback_without_place_keys() {
        let record = Record::new("The One Ring", "infobox ring").with_param("maker", "Sauron");
        let (graph, report) = extract_one(&record);

        assert!(has_type(&graph, "The_One_Ring", EntityClass::Thing));
        assert_eq!(report.fallbacks, 1);
    }

    #[test]
    fn test_empty_record_still_typed_and_labelled() {
        let record = Record::new("Tom Bombadil", "infobox character").with_param("race", "   ");
        let (graph, _) = extract_one(&record);

        assert!(has_type(&graph, "Tom_Bombadil", EntityClass::Person));
        // type, label, source
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_markup_is_cleaned_from_literals() {
        let record = Record::new("Bilbo Baggins", "infobox character")
            .with_param("Birth", "'''[[Third Age|T.A.]] 2890'''")
            .with_param("height", "{{unclear}}");
        let (graph, _) = extract_one(&record);
        let bilbo = Iri::entity("Bilbo_Baggins");

        // A leading reference makes the value a relation.
        assert!(graph.contains(
            Some(&bilbo),
            Some(&iri(KnownPredicate::BirthDate)),
            Some(&Term::Iri(Iri::entity("Third_Age")))
        ));
        // Blank after cleaning: skipped.
        assert!(!graph.contains(Some(&bilbo), Some(&iri(KnownPredicate::Height)), None));
    }

    #[test]
    fn test_descriptive_value_for_unmapped_key() {
        let record = Record::new("Gollum", "infobox character").with_param("eyes", "unknown");
        let (graph, _) = extract_one(&record);

        assert!(graph.contains(
            Some(&Iri::entity("Gollum")),
            Some(&Iri::predicate(&Predicate::ad_hoc("eyes_note"))),
            Some(&Term::Literal(Literal::tagged("unknown")))
        ));
    }

    #[test]
    fn test_relation_targets_are_typed_on_finish() {
        let record = Record::new("Frodo Baggins", "infobox character").with_param("race", "[[Hobbit]]");
        let (graph, report) = extract_one(&record);

        assert!(has_type(&graph, "Hobbit", EntityClass::Thing));
        assert!(graph.contains(
            Some(&Iri::entity("Hobbit")),
            Some(&iri(KnownPredicate::Label)),
            Some(&Term::Literal(Literal::tagged("Hobbit")))
        ));
        assert_eq!(report.placeholders, 1);
    }

    #[test]
    fn test_typed_targets_are_not_placeholders() {
        let tables = ExtractionTables::default();
        let mut graph = KnowledgeGraph::new();
        let mut extractor = EntityExtractor::new(&tables);
        let records = vec![
            Record::new("Frodo Baggins", "infobox character").with_param("race", "[[Hobbits]]"),
            Record::new("Hobbits", "infobox race"),
        ];
        extractor.extract_all(&records, &mut graph);
        let report = extractor.finish(&mut graph);

        assert_eq!(report.records, 2);
        assert_eq!(report.placeholders, 0);
    }

    #[test]
    fn test_mentions_are_capped() {
        let record = (0..15).fold(Record::new("Shire", "infobox location"), |record, i| {
            record.with_link(format!("Place {i}"))
        });
        let (graph, _) = extract_one(&record);
        let mentions = iri(KnownPredicate::Mentions);

        assert_eq!(graph.matches(None, Some(&mentions), None).count(), 10);
        assert!(graph.contains(Some(&Iri::entity("Shire")), Some(&mentions), Some(&Term::Iri(Iri::entity("Place_9")))));
        assert!(!graph.contains(None, Some(&mentions), Some(&Term::Iri(Iri::entity("Place_10")))));
    }

    #[test]
    fn test_collisions_are_reported_and_merged() {
        let tables = ExtractionTables::default();
        let mut graph = KnowledgeGraph::new();
        let mut extractor = EntityExtractor::new(&tables);
        let records = vec![
            Record::new("Eärendil", "infobox character"),
            Record::new("Eärendil?", "infobox character"),
            // Same page, second infobox: not a collision.
            Record::new("Eärendil", "infobox character"),
        ];
        let subjects = extractor.extract_all(&records, &mut graph);
        let report = extractor.finish(&mut graph);

        assert_eq!(subjects[0], subjects[1]);
        assert_eq!(report.collisions.len(), 1);
        assert_eq!(report.collisions[0].identifier, "Eärendil");
        assert_eq!(report.collisions[0].second, "Eärendil?");
        assert_eq!(graph.matches(Some(&subjects[0]), Some(&iri(KnownPredicate::Type)), None).count(), 1);
    }

    #[test]
    fn test_unnamed_record_is_skipped() {
        let (graph, report) = extract_one(&Record::new("???", "infobox character"));
        assert!(graph.is_empty());
        assert_eq!(report.skipped, 1);
        assert_eq!(report.records, 0);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let tables = ExtractionTables::default();
        let record = Record::new("Samwise Gamgee", "infobox character")
            .with_param("spouse", "[[Rosie Cotton]]")
            .with_param("events", "[[War of the Ring]]");
        let mut graph = KnowledgeGraph::new();

        let mut extractor = EntityExtractor::new(&tables);
        extractor.extract(&record, &mut graph);
        extractor.finish(&mut graph);
        let size = graph.len();

        let mut extractor = EntityExtractor::new(&tables);
        extractor.extract(&record, &mut graph);
        extractor.finish(&mut graph);
        assert_eq!(graph.len(), size);
    }
}
