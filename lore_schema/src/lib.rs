//! # Lore Schema
//!
//! The vocabulary and configuration crate: namespaces, curated predicates and
//! entity classes, the record model, and the immutable tables and ontology that
//! drive extraction and reasoning. Contains no graph logic.

pub mod config;
pub mod error;
pub mod ontology;
pub mod record;
pub mod tables;
pub mod vocab;

pub use config::*;
pub use error::*;
pub use ontology::*;
pub use record::*;
pub use tables::*;
pub use vocab::*;
