//! Value normalization: markup stripping, reference extraction and the
//! descriptive/substantive literal split.

use std::sync::LazyLock;

use lore_schema::DescriptiveVocabulary;
use regex::Regex;

static RE_PIPED_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]|]+)\|([^\]]+)\]\]").unwrap());

static RE_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());

static RE_BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'''([^']+)'''").unwrap());

static RE_ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"''([^']+)''").unwrap());

static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static RE_TEMPLATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{[^}]+\}\}").unwrap());

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static RE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[([^\]|]+)").unwrap());

/// Whether a cleaned literal is a note about absence or uncertainty, or a
/// value in its own right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Descriptive,
    Substantive,
}

/// Reduce wiki markup to plain text.
///
/// `[[target|display]]` keeps the display text, `[[target]]` keeps the
/// target. Bold and italic quotes, inline tags and single-level `{{...}}`
/// transclusions are removed, then whitespace is collapsed and trimmed.
pub fn strip_markup(raw: &str) -> String {
    let text = RE_PIPED_LINK.replace_all(raw, "$2");
    let text = RE_LINK.replace_all(&text, "$1");
    let text = RE_BOLD.replace_all(&text, "$1");
    let text = RE_ITALIC.replace_all(&text, "$1");
    let text = RE_TAG.replace_all(&text, "");
    let text = RE_TEMPLATE.replace_all(&text, "");
    RE_WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Target of the first link in `raw`, trimmed. Empty targets count as none.
pub fn extract_reference(raw: &str) -> Option<String> {
    RE_REFERENCE
        .captures(raw)
        .map(|caps| caps[1].trim().to_string())
        .filter(|target| !target.is_empty())
}

/// Every link target in appearance order, trimmed but not deduplicated.
pub fn extract_all_references(raw: &str) -> Vec<String> {
    RE_REFERENCE
        .captures_iter(raw)
        .map(|caps| caps[1].trim().to_string())
        .filter(|target| !target.is_empty())
        .collect()
}

/// Split a cleaned value into descriptive notes and substantive values.
pub fn classify_literal(text: &str, vocabulary: &DescriptiveVocabulary) -> LiteralKind {
    let lowered = text.trim().to_lowercase();
    let descriptive = vocabulary.exact.iter().any(|phrase| *phrase == lowered)
        || vocabulary
            .prefixes
            .iter()
            .any(|prefix| lowered.starts_with(prefix.as_str()));

    if descriptive {
        LiteralKind::Descriptive
    } else {
        LiteralKind::Substantive
    }
}
