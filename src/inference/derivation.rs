//! Clause derivation records
//!
//! Every clause carries how it came to be: an input clause, a generated
//! equality axiom, or the conclusion of an inference with its parent
//! clause ids and the literal positions involved.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a clause was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derivation {
    /// Name of the rule that produced the clause
    pub rule_name: String,
    /// Ids of the premise clauses
    pub premises: Vec<usize>,
    /// Literal indices within the premises, rule-specific
    pub positions: Vec<usize>,
}

impl Derivation {
    /// An input clause (parsed from the problem).
    pub fn input() -> Self {
        Derivation {
            rule_name: "input".into(),
            premises: vec![],
            positions: vec![],
        }
    }

    /// A synthesized equality axiom.
    pub fn eq_axiom() -> Self {
        Derivation {
            rule_name: "eq_axiom".into(),
            premises: vec![],
            positions: vec![],
        }
    }

    /// Binary resolution between literal `lit1` of `parent1` and literal
    /// `lit2` of `parent2`.
    pub fn resolution(parent1: usize, lit1: usize, parent2: usize, lit2: usize) -> Self {
        Derivation {
            rule_name: "resolution".into(),
            premises: vec![parent1, parent2],
            positions: vec![lit1, lit2],
        }
    }

    /// Factoring of literals `lit1` and `lit2` of `parent`.
    pub fn factoring(parent: usize, lit1: usize, lit2: usize) -> Self {
        Derivation {
            rule_name: "factoring".into(),
            premises: vec![parent, parent],
            positions: vec![lit1, lit2],
        }
    }

    pub fn is_input(&self) -> bool {
        self.premises.is_empty()
    }

    /// Parent clause ids, deduplicated (factoring lists its single
    /// parent once).
    pub fn parents(&self) -> Vec<usize> {
        let mut parents = self.premises.clone();
        parents.dedup();
        parents
    }
}

impl fmt::Display for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rule_name.as_str() {
            "resolution" => write!(
                f,
                "resolution(c{},{},c{},{})",
                self.premises[0], self.positions[0], self.premises[1], self.positions[1]
            ),
            "factoring" => write!(
                f,
                "factoring(c{},{},{})",
                self.premises[0], self.positions[0], self.positions[1]
            ),
            name => write!(f, "{}", name),
        }
    }
}
