//! Search heuristics: clause evaluation and literal selection

mod clause;
mod literal;

pub use clause::{
    ClauseEvaluation, ClauseHeuristic, EvalStructure, FifoEvaluation, SymbolCountEvaluation,
};
pub use literal::LiteralSelection;
