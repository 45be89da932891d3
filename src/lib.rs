//! resolute: a saturation-based theorem prover for first-order logic
//! with equality
//!
//! The prover reads TPTP CNF/FOF problems and searches for a refutation
//! with the given-clause algorithm under the resolution calculus:
//! binary resolution and factoring, with equality handled by axiom
//! synthesis. Redundancy is controlled by tautology deletion, forward
//! and backward subsumption, negative literal selection, and heuristic
//! clause selection.

pub mod config;
pub mod fol;
pub mod inference;
pub mod parser;
pub mod saturation;
pub mod selection;
pub mod szs;
pub mod unification;

pub use config::ProverConfig;
pub use fol::{
    Atom, Clause, ClauseRole, CnfFormula, Constant, FunctionSymbol, Interner, Literal,
    PredicateSymbol, Substitution, Term, Variable,
};
pub use inference::{eq_axioms, factors_of, problem_has_equality, resolvents_between, Derivation};
pub use parser::{parse_problem, parse_problem_file, ParseError, ParsedProblem};
pub use saturation::{subsumes, ProofState, ProverResult, SearchStats};
pub use selection::{ClauseHeuristic, EvalStructure, LiteralSelection};
pub use unification::{unify, unify_atoms, UnificationError};
