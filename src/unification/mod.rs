//! Syntactic unification and matching

mod matching;
mod mgu;

#[cfg(test)]
mod proptest_tests;

pub use matching::{match_literal, match_term};
pub use mgu::{unify, unify_atoms, UnificationError, UnificationResult};
