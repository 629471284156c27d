//! Knowledge Base module - the in-memory fact graph.
//!
//! The graph consists of:
//! - **Terms**: IRIs and language-tagged literals
//! - **Triples**: (subject, predicate, object) facts, never duplicated
//! - **Indexes**: by subject and by predicate, for pattern queries

mod graph;
mod term;
mod triple;

pub use graph::*;
pub use term::*;
pub use triple::*;
