//! Prover configuration

use crate::selection::{ClauseHeuristic, LiteralSelection};
use std::time::Duration;

/// Parameter settings for one proof search.
#[derive(Debug, Clone)]
pub struct ProverConfig {
    /// Add equality axioms when the input uses `=`.
    pub add_eq_axioms: bool,
    /// Discard newly derived (and given) clauses subsumed by the
    /// processed or unprocessed set.
    pub forward_subsumption: bool,
    /// Remove clauses that the given or a new clause properly subsumes.
    pub backward_subsumption: bool,
    /// Restrict resolution to inferences with a set-of-support ancestor.
    pub use_sos: bool,
    /// Negative (or positive) literal selection strategy.
    pub literal_selection: LiteralSelection,
    /// Given-clause selection heuristic.
    pub heuristic: ClauseHeuristic,
    /// Soft wall-clock budget; exceeding it yields GaveUp.
    pub timeout: Duration,
    /// Soft clause-count budget; 0 means no limit.
    pub max_clauses: usize,
}

impl Default for ProverConfig {
    fn default() -> Self {
        ProverConfig {
            add_eq_axioms: false,
            forward_subsumption: false,
            backward_subsumption: false,
            use_sos: false,
            literal_selection: LiteralSelection::default(),
            heuristic: ClauseHeuristic::default(),
            timeout: Duration::from_secs(300),
            max_clauses: 0,
        }
    }
}
