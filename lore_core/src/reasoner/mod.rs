//! Forward-Chaining Reasoner - enriches the graph to a fixed point.
//!
//! The phases run in a fixed order:
//! 1. **Ontology seeding**: axioms into the graph
//! 2. **Family inference**: siblings, children, spouse mirrors
//! 3. **Curated facts**: fixed organization memberships
//! 4. **Inverses**: `owl:inverseOf` pairs and symmetric predicates
//! 5. **Group derivation**: race references imply broader groups
//! 6. **RDFS closure**: subclass and subproperty propagation, repeated
//! 7. **Location connections**: birth and death places
//!
//! Triples are only ever added. Running the reasoner on its own output adds
//! nothing.

mod axioms;
mod rules;

pub use axioms::*;
pub use rules::*;

use lore_schema::{Ontology, ReasonerSettings};
use serde::Serialize;
use tracing::{info, warn};

use crate::knowledge_base::KnowledgeGraph;

/// A reasoning phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    OntologySeeding,
    FamilyInference,
    CuratedFacts,
    InverseMaterialization,
    GroupDerivation,
    RdfsClosure,
    LocationConnections,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::OntologySeeding,
        Phase::FamilyInference,
        Phase::CuratedFacts,
        Phase::InverseMaterialization,
        Phase::GroupDerivation,
        Phase::RdfsClosure,
        Phase::LocationConnections,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Phase::OntologySeeding => "ontology seeding",
            Phase::FamilyInference => "family inference",
            Phase::CuratedFacts => "curated facts",
            Phase::InverseMaterialization => "inverse materialization",
            Phase::GroupDerivation => "group derivation",
            Phase::RdfsClosure => "rdfs closure",
            Phase::LocationConnections => "location connections",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Triples a phase added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseReport {
    pub phase: Phase,
    pub added: usize,
}

/// Non-fatal conditions met while reasoning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReasonerWarning {
    /// The RDFS closure stopped at its pass limit while still adding triples.
    /// The partial closure is kept.
    ClosureCapReached { passes: usize },
}

impl std::fmt::Display for ReasonerWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReasonerWarning::ClosureCapReached { passes } => {
                write!(f, "RDFS closure did not converge within {passes} passes")
            }
        }
    }
}

/// Summary of a reasoning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasoningReport {
    pub initial_triples: usize,
    pub final_triples: usize,
    pub phases: Vec<PhaseReport>,
    pub closure_passes: usize,
    pub converged: bool,
    pub warnings: Vec<ReasonerWarning>,
}

impl ReasoningReport {
    /// Total triples inferred.
    pub fn inferred(&self) -> usize {
        self.final_triples - self.initial_triples
    }

    /// Triples added by one phase.
    pub fn added_in(&self, phase: Phase) -> usize {
        self.phases
            .iter()
            .find(|report| report.phase == phase)
            .map_or(0, |report| report.added)
    }
}

/// Runs the rule phases over a graph.
pub struct Reasoner<'a> {
    ontology: &'a Ontology,
    settings: ReasonerSettings,
}

impl<'a> Reasoner<'a> {
    pub fn new(ontology: &'a Ontology, settings: ReasonerSettings) -> Self {
        Self { ontology, settings }
    }

    /// Run every phase once, the closure until convergence or its cap.
    pub fn run(&self, graph: &mut KnowledgeGraph) -> ReasoningReport {
        let initial_triples = graph.len();
        let mut phases = Vec::with_capacity(Phase::ALL.len());
        let mut warnings = Vec::new();
        let mut closure_passes = 0;
        let mut converged = true;

        info!(triples = initial_triples, "reasoning started");

        for phase in Phase::ALL {
            let added = match phase {
                Phase::OntologySeeding => seed(self.ontology, graph),
                Phase::FamilyInference => infer_family(graph),
                Phase::CuratedFacts => inject_memberships(&self.ontology.memberships, graph),
                Phase::InverseMaterialization => materialize_inverses(graph),
                Phase::GroupDerivation => derive_groups(&self.ontology.group_derivation, graph),
                Phase::RdfsClosure => {
                    let closure = rdfs_closure(graph, self.settings.max_closure_passes);
                    closure_passes = closure.passes;
                    converged = closure.converged;
                    if !closure.converged {
                        let warning = ReasonerWarning::ClosureCapReached {
                            passes: closure.passes,
                        };
                        warn!(passes = closure.passes, "{warning}");
                        warnings.push(warning);
                    }
                    closure.added
                }
                Phase::LocationConnections => {
                    connect_locations(&self.ontology.location_connections, graph)
                }
            };

            info!(phase = %phase, added, "phase complete");
            phases.push(PhaseReport { phase, added });
        }

        let report = ReasoningReport {
            initial_triples,
            final_triples: graph.len(),
            phases,
            closure_passes,
            converged,
            warnings,
        };
        info!(
            triples = report.final_triples,
            inferred = report.inferred(),
            closure_passes,
            converged,
            "reasoning finished"
        );
        report
    }
}
