//! Diagnostic error types for the lore pipeline.
//!
//! Extraction and reasoning never fail; errors only come from the
//! boundaries: reading configuration and records, and writing the graph.

use std::path::PathBuf;

use lore_schema::SchemaError;
use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by `lore_core`.
#[derive(Debug, Error, Diagnostic)]
pub enum LoreError {
    #[error("configuration error: {0}")]
    #[diagnostic(
        code(lore::config),
        help("Check the TOML file against `lorekg default-config`; every section is optional.")
    )]
    Config(#[from] SchemaError),

    #[error("failed to read records from {path}: {source}")]
    #[diagnostic(
        code(lore::input),
        help(
            "Input must be a JSON array of records ({{\"name\", \"tag\", \"params\"}}) \
             or a parsed-pages document ({{\"pages\": [...]}})."
        )
    )]
    Input {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {path}: {source}")]
    #[diagnostic(code(lore::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{iri}` is not a valid IRI: {message}")]
    #[diagnostic(
        code(lore::invalid_iri),
        help("Entity identifiers come from page titles; check the offending record's name.")
    )]
    InvalidIri { iri: String, message: String },

    #[error("`{tag}` is not a valid language tag: {message}")]
    #[diagnostic(code(lore::invalid_language))]
    InvalidLanguage { tag: String, message: String },

    #[error("failed to serialize graph: {0}")]
    #[diagnostic(code(lore::serialize))]
    Serialize(#[source] std::io::Error),

    #[error("failed to render statistics: {0}")]
    #[diagnostic(code(lore::stats))]
    Stats(#[source] serde_json::Error),
}

impl LoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for lore operations.
pub type LoreResult<T> = std::result::Result<T, LoreError>;
