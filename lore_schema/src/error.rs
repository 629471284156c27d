//! Errors raised while reading vocabulary terms and configuration.

use thiserror::Error;

/// Errors produced by the schema crate.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A CURIE used a prefix that is not registered.
    #[error("unknown namespace prefix `{prefix}` in `{curie}`")]
    UnknownPrefix { prefix: String, curie: String },

    /// A term was neither a CURIE nor an absolute IRI under a known namespace.
    #[error("`{0}` is not a compact IRI (expected `prefix:local`)")]
    MalformedCurie(String),

    /// A predicate outside the curated vocabulary and outside the ontology namespace.
    #[error("`{0}` is not a curated predicate and not in the ontology namespace")]
    UnknownPredicate(String),

    /// An entity class name that is not part of the vocabulary.
    #[error("unknown entity class `{0}`")]
    UnknownClass(String),

    /// The configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration could not be rendered back to TOML.
    #[error("failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Result alias for schema operations.
pub type SchemaResult<T> = std::result::Result<T, SchemaError>;
