//! Exporter - writes the graph as Turtle or N-Triples.
//!
//! Serialization goes through `oxigraph`'s RDF serializers. Triples are
//! written in sorted order so the same graph always produces the same bytes.

use std::io::Write;

use clap::ValueEnum;
use lore_schema::PREFIXES;
use oxigraph::io::{RdfFormat, RdfSerializer};
use oxigraph::model as rdf;
use serde::{Deserialize, Serialize};

use crate::error::{LoreError, LoreResult};
use crate::knowledge_base::{Iri, KnowledgeGraph, Term, Triple};

/// Output serialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Turtle with the project prefixes declared.
    #[default]
    Turtle,
    /// One triple per line, absolute IRIs.
    NTriples,
}

impl OutputFormat {
    fn rdf_format(self) -> RdfFormat {
        match self {
            OutputFormat::Turtle => RdfFormat::Turtle,
            OutputFormat::NTriples => RdfFormat::NTriples,
        }
    }
}

/// Serialize the graph into `writer`, returning the writer.
pub fn write_graph<W: Write>(graph: &KnowledgeGraph, format: OutputFormat, writer: W) -> LoreResult<W> {
    let mut sorted: Vec<&Triple> = graph.iter().collect();
    sorted.sort();

    let mut serializer = RdfSerializer::from_format(format.rdf_format());
    if format == OutputFormat::Turtle {
        for (prefix, namespace) in PREFIXES {
            serializer = serializer
                .with_prefix(*prefix, *namespace)
                .map_err(|e| LoreError::InvalidIri {
                    iri: namespace.to_string(),
                    message: e.to_string(),
                })?;
        }
    }

    let mut out = serializer.for_writer(writer);
    for triple in sorted {
        let triple = to_rdf(triple)?;
        out.serialize_triple(&triple).map_err(LoreError::Serialize)?;
    }
    out.finish().map_err(LoreError::Serialize)
}

/// Serialize the graph to a string.
pub fn graph_to_string(graph: &KnowledgeGraph, format: OutputFormat) -> LoreResult<String> {
    let bytes = write_graph(graph, format, Vec::new())?;
    String::from_utf8(bytes).map_err(|e| {
        LoreError::Serialize(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

fn to_rdf(triple: &Triple) -> LoreResult<rdf::Triple> {
    let object: rdf::Term = match &triple.object {
        Term::Iri(iri) => named_node(iri)?.into(),
        Term::Literal(literal) => match &literal.language {
            Some(language) => rdf::Literal::new_language_tagged_literal(literal.value.as_str(), language.as_str())
                .map_err(|e| LoreError::InvalidLanguage {
                    tag: language.clone(),
                    message: e.to_string(),
                })?
                .into(),
            None => rdf::Literal::new_simple_literal(literal.value.as_str()).into(),
        },
    };

    Ok(rdf::Triple::new(
        named_node(&triple.subject)?,
        named_node(&triple.predicate)?,
        object,
    ))
}

fn named_node(iri: &Iri) -> LoreResult<rdf::NamedNode> {
    rdf::NamedNode::new(iri.as_str()).map_err(|e| LoreError::InvalidIri {
        iri: iri.as_str().to_string(),
        message: e.to_string(),
    })
}
