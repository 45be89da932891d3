//! Inference rules of the resolution calculus

mod derivation;
mod eq_axioms;
mod rules;

pub use derivation::Derivation;
pub use eq_axioms::{eq_axioms, problem_has_equality};
pub use rules::{factors_of, resolvents_between};
