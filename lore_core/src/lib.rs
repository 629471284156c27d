//! # Lore Core
//!
//! Turns parsed infobox records into a typed fact graph and enriches it with
//! a forward-chaining reasoner. The vocabulary, tables and ontology come from
//! `lore_schema`; this crate owns the graph and everything that reads or
//! writes it.
//!
//! ## Core Components
//!
//! - **knowledge_base**: duplicate-free triple store with pattern queries
//! - **extraction**: record -> facts, including embedded entity expansion
//! - **reasoner**: ordered rule phases run to a fixed point
//! - **export**: Turtle and N-Triples output
//! - **stats**: entity and predicate counts
//! - **pipeline**: file input and output around the above
//!
//! ## Data Flow
//!
//! Records -> extraction -> graph -> reasoner -> graph (enriched) -> export.
//! Extraction and reasoning are infallible; only the pipeline boundary
//! returns errors.

pub mod error;
pub mod export;
pub mod extraction;
pub mod knowledge_base;
pub mod pipeline;
pub mod reasoner;
pub mod stats;

pub use error::*;
pub use export::*;
pub use extraction::*;
pub use knowledge_base::*;
pub use reasoner::*;
pub use stats::*;
