//! Clauses and clause sets as parsed from CNF problems

use super::interner::Interner;
use super::literal::Literal;
use super::term::Variable;
use crate::inference::Derivation;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Role of a clause, from TPTP or derived during saturation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClauseRole {
    #[default]
    Axiom,
    Hypothesis,
    Definition,
    NegatedConjecture,
    Derived,
}

impl ClauseRole {
    /// Map a TPTP role string onto the internal role set.
    pub fn from_tptp_role(role: &str) -> Self {
        match role {
            "hypothesis" => ClauseRole::Hypothesis,
            "definition" => ClauseRole::Definition,
            "negated_conjecture" | "conjecture" => ClauseRole::NegatedConjecture,
            _ => ClauseRole::Axiom,
        }
    }

    /// TPTP role string used when printing clauses.
    pub fn as_tptp_str(&self) -> &'static str {
        match self {
            ClauseRole::Axiom => "axiom",
            ClauseRole::Hypothesis => "hypothesis",
            ClauseRole::Definition => "definition",
            ClauseRole::NegatedConjecture => "negated_conjecture",
            ClauseRole::Derived => "plain",
        }
    }

    pub fn is_conjecture(&self) -> bool {
        matches!(self, ClauseRole::NegatedConjecture)
    }
}

/// A clause: a multiset of literals interpreted disjunctively.
///
/// The literal list is immutable after creation; the bookkeeping fields
/// (`id`, `evaluations`, `inference_lits`, `sos`) are assigned once when
/// the clause enters the unprocessed set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clause {
    pub literals: Vec<Literal>,
    /// Identifier assigned by the proof state; clauses are hashed and
    /// referenced by this, not by structure.
    pub id: Option<usize>,
    pub role: ClauseRole,
    /// How this clause came to be (input, eq_axiom, resolution, ...)
    pub derivation: Derivation,
    /// One value per configured evaluation function, set on entering U.
    pub evaluations: Vec<u64>,
    /// Indices of the inference literals. `None` means no selection was
    /// applied: every literal is eligible.
    pub inference_lits: Option<Vec<usize>>,
    /// Set-of-support tag, inherited by resolvents.
    pub sos: bool,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Clause {
            literals,
            id: None,
            role: ClauseRole::default(),
            derivation: Derivation::input(),
            evaluations: Vec::new(),
            inference_lits: None,
            sos: false,
        }
    }

    pub fn with_role(literals: Vec<Literal>, role: ClauseRole) -> Self {
        Clause {
            role,
            ..Clause::new(literals)
        }
    }

    pub fn derived(literals: Vec<Literal>, derivation: Derivation) -> Self {
        Clause {
            role: ClauseRole::Derived,
            derivation,
            ..Clause::new(literals)
        }
    }

    /// The empty clause denotes falsum.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// A clause is a tautology iff it contains a complementary literal
    /// pair, a positive literal `s=s`, or the literal `$true`.
    pub fn is_tautology(&self, interner: &Interner) -> bool {
        for i in 0..self.literals.len() {
            if self.literals[i].is_prop_true(interner) {
                return true;
            }
            for j in (i + 1)..self.literals.len() {
                if self.literals[i].is_complement_of(&self.literals[j]) {
                    return true;
                }
            }
        }

        self.literals.iter().any(|lit| {
            lit.polarity
                && lit.atom.is_equality(interner)
                && lit.atom.args[0] == lit.atom.args[1]
        })
    }

    /// True if the literal at `idx` may take part in generating
    /// inferences under the clause's literal selection.
    pub fn is_inference_lit(&self, idx: usize) -> bool {
        match &self.inference_lits {
            None => true,
            Some(selected) => selected.contains(&idx),
        }
    }

    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        for lit in &self.literals {
            lit.collect_variables(vars);
        }
    }

    /// Symbol-count weight of the clause.
    pub fn weight(&self, fweight: u64, vweight: u64) -> u64 {
        self.literals
            .iter()
            .map(|lit| lit.weight(fweight, vweight))
            .sum()
    }

    /// Format this clause resolving symbol names through the interner.
    pub fn display<'a>(&'a self, interner: &'a Interner) -> ClauseDisplay<'a> {
        ClauseDisplay {
            clause: self,
            interner,
        }
    }
}

/// A CNF problem: a conjunction of clauses
#[derive(Debug, Clone, Default)]
pub struct CnfFormula {
    pub clauses: Vec<Clause>,
}

/// Display wrapper resolving names via the interner
pub struct ClauseDisplay<'a> {
    clause: &'a Clause,
    interner: &'a Interner,
}

impl fmt::Display for ClauseDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clause.is_empty() {
            return write!(f, "$false");
        }
        for (i, lit) in self.clause.literals.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{}", lit.display(self.interner))?;
        }
        Ok(())
    }
}
