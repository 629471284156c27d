//! Display name -> entity identifier, and the provenance IRI of a page.

use lore_schema::ns;

/// Map a display name to its entity identifier.
///
/// Keeps letters, digits, whitespace, `-` and `_`; whitespace runs become a
/// single `_`. Distinct names may map to the same identifier.
pub fn to_identifier(display_name: &str) -> String {
    let kept: String = display_name
        .trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Wiki page IRI a record was taken from.
///
/// Spaces become `_`; anything that may not appear in an IRI path segment is
/// percent-encoded, so every name yields a valid IRI.
pub fn source_iri(display_name: &str) -> String {
    let mut iri = String::from(ns::WIKI);
    for c in display_name.trim().chars() {
        match c {
            ' ' => iri.push('_'),
            c if is_segment_char(c) => iri.push(c),
            c => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    iri.push_str(&format!("%{byte:02X}"));
                }
            }
        }
    }
    iri
}

/// `ipchar` minus percent-encoded octets: unreserved, sub-delims, `:` and `@`.
/// Non-ASCII letters and digits are kept as IRI characters.
fn is_segment_char(c: char) -> bool {
    if c.is_ascii() {
        c.is_ascii_alphanumeric()
            || matches!(
                c,
                '-' | '.' | '_' | '~' | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '=' | ':' | '@'
            )
    } else {
        c.is_alphanumeric()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_is_deterministic() {
        assert_eq!(to_identifier("Aragorn II"), "Aragorn_II");
        assert_eq!(to_identifier("Aragorn II"), to_identifier("Aragorn II"));
    }

    #[test]
    fn test_identifier_drops_punctuation() {
        assert_eq!(to_identifier("Gandalf the Grey"), "Gandalf_the_Grey");
        assert_eq!(to_identifier("Half-elven"), "Half-elven");
        assert_eq!(to_identifier("Barad-dûr (tower)"), "Barad-dûr_tower");
        assert_eq!(to_identifier("  Tom  Bombadil "), "Tom_Bombadil");
        assert_eq!(to_identifier("Silvan_Elves"), "Silvan_Elves");
    }

    #[test]
    fn test_identifier_collisions_are_possible() {
        assert_eq!(to_identifier("Eärendil?"), to_identifier("Eärendil"));
    }

    #[test]
    fn test_empty_identifier() {
        assert_eq!(to_identifier("?!"), "");
    }

    #[test]
    fn test_source_iri() {
        assert_eq!(
            source_iri("Frodo Baggins"),
            "https://tolkiengateway.net/wiki/Frodo_Baggins"
        );
        assert_eq!(
            source_iri("Who is \"Strider\"?"),
            "https://tolkiengateway.net/wiki/Who_is_%22Strider%22%3F"
        );
        assert_eq!(source_iri("Barad-dûr"), "https://tolkiengateway.net/wiki/Barad-dûr");
        assert_eq!(
            source_iri("Foo [bar]"),
            "https://tolkiengateway.net/wiki/Foo_%5Bbar%5D"
        );
    }

    #[test]
    fn test_source_iri_is_always_valid() {
        let names = [
            "Foo [bar]",
            "Ring^2",
            "Minas Tirith/History",
            "Tom {Bombadil} | <Goldberry>",
            "100% `Mithril`\\",
            "Lúthien\u{200B}Tinúviel",
            "Eärendil & Elwing (Q&A): @Sirion",
        ];
        for name in names {
            let iri = source_iri(name);
            assert!(
                oxigraph::model::NamedNode::new(iri.as_str()).is_ok(),
                "{iri} is not a valid IRI"
            );
        }
    }
}
