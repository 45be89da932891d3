//! Saturation of clause sets under the resolution calculus

mod state;
mod subsumption;

pub use state::{ProofState, ProverResult, SearchStats};
pub use subsumption::{subsumes, subsumes_properly};
