//! Configuration - the tables, ontology and reasoner settings bundled together.
//!
//! Every section has built-in defaults, so a TOML file only needs to name the
//! parts it overrides:
//!
//! ```toml
//! [reasoner]
//! max_closure_passes = 20
//!
//! [tables.classification]
//! "infobox ship" = "Product"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SchemaResult;
use crate::ontology::Ontology;
use crate::tables::ExtractionTables;

/// Settings of the forward-chaining reasoner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasonerSettings {
    /// Upper bound on RDFS closure passes.
    pub max_closure_passes: usize,
}

impl Default for ReasonerSettings {
    fn default() -> Self {
        Self {
            max_closure_passes: 10,
        }
    }
}

/// Complete configuration of an extraction + reasoning run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoreConfig {
    pub tables: ExtractionTables,
    pub ontology: Ontology,
    pub reasoner: ReasonerSettings,
}

impl LoreConfig {
    /// Parse a TOML document, filling unspecified sections with defaults.
    pub fn from_toml(source: &str) -> SchemaResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> SchemaResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn with_max_closure_passes(mut self, passes: usize) -> Self {
        self.reasoner.max_closure_passes = passes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::Classification;
    use crate::vocab::EntityClass;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = LoreConfig::from_toml("").unwrap();
        assert_eq!(config, LoreConfig::default());
        assert_eq!(config.reasoner.max_closure_passes, 10);
    }

    #[test]
    fn test_partial_override() {
        let config = LoreConfig::from_toml(
            r#"
            [reasoner]
            max_closure_passes = 3

            [tables.classification]
            "Infobox Ship" = "Product"
            "#,
        )
        .unwrap();

        assert_eq!(config.reasoner.max_closure_passes, 3);
        assert_eq!(
            config.tables.classification.classify("infobox ship"),
            Classification::Known(EntityClass::Product)
        );
        // A replaced table does not keep the default entries.
        assert!(config.tables.classification.classify("infobox character").is_fallback());
        // Untouched sections keep their defaults.
        assert_eq!(config.tables.max_mentions, 10);
        assert_eq!(config.ontology.inverses.len(), 9);
    }

    #[test]
    fn test_default_config_renders_and_parses_back() {
        let rendered = LoreConfig::default().to_toml().unwrap();
        let parsed = LoreConfig::from_toml(&rendered).unwrap();
        assert_eq!(parsed, LoreConfig::default());
    }

    #[test]
    fn test_bad_predicate_is_rejected() {
        let result = LoreConfig::from_toml(
            r#"
            [tables.property_maps.character]
            birth = "schema:bornOn"
            "#,
        );
        assert!(result.is_err());
    }
}
