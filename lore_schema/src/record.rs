//! Records - the parsed infobox data the extractor consumes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One parsed infobox: a page's display name, the template it used, and the
/// template parameters with their raw markup values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Page title the entity is named after.
    #[serde(alias = "title")]
    pub name: String,

    /// Raw template name, e.g. `"infobox character"`.
    #[serde(alias = "template", alias = "classification")]
    pub tag: String,

    /// Parameter key -> raw value. Keys are unique; order does not affect output.
    #[serde(default)]
    pub params: BTreeMap<String, String>,

    /// Targets of the page's links, in page order.
    #[serde(default)]
    pub links: Vec<String>,
}

impl Record {
    /// Create a record with no parameters.
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            params: BTreeMap::new(),
            links: Vec::new(),
        }
    }

    /// Add a parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add a page-link target.
    pub fn with_link(mut self, target: impl Into<String>) -> Self {
        self.links.push(target.into());
        self
    }

    /// Look up a parameter by key, ignoring case and surrounding whitespace.
    pub fn param(&self, key: &str) -> Option<&str> {
        let key = key.trim().to_lowercase();
        self.params
            .iter()
            .find(|(k, _)| k.trim().to_lowercase() == key)
            .map(|(_, v)| v.as_str())
    }

    /// Parameter keys, trimmed and lower-cased.
    pub fn normalized_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.params.keys().map(|k| k.trim().to_lowercase())
    }
}
