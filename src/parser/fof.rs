//! Full first-order formulas
//!
//! Representation of FOF formulas between parsing and clausification.

use crate::fol::{Atom, Variable};
use std::collections::HashSet;

/// Quantifier kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    Forall,
    Exists,
}

/// TPTP formula roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaRole {
    Axiom,
    Hypothesis,
    Definition,
    Assumption,
    Lemma,
    Theorem,
    Corollary,
    Conjecture,
    NegatedConjecture,
}

impl FormulaRole {
    pub fn from_str(role: &str) -> Option<Self> {
        match role {
            "axiom" => Some(FormulaRole::Axiom),
            "hypothesis" => Some(FormulaRole::Hypothesis),
            "definition" => Some(FormulaRole::Definition),
            "assumption" => Some(FormulaRole::Assumption),
            "lemma" => Some(FormulaRole::Lemma),
            "theorem" => Some(FormulaRole::Theorem),
            "corollary" => Some(FormulaRole::Corollary),
            "conjecture" => Some(FormulaRole::Conjecture),
            "negated_conjecture" => Some(FormulaRole::NegatedConjecture),
            _ => None,
        }
    }
}

/// A named FOF formula as it appears in the input
#[derive(Debug, Clone)]
pub struct NamedFormula {
    pub name: String,
    pub role: FormulaRole,
    pub formula: FofFormula,
}

/// First-order formula over interned atoms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FofFormula {
    Atom(Atom),
    Not(Box<FofFormula>),
    And(Box<FofFormula>, Box<FofFormula>),
    Or(Box<FofFormula>, Box<FofFormula>),
    Implies(Box<FofFormula>, Box<FofFormula>),
    Iff(Box<FofFormula>, Box<FofFormula>),
    Xor(Box<FofFormula>, Box<FofFormula>),
    Nand(Box<FofFormula>, Box<FofFormula>),
    Nor(Box<FofFormula>, Box<FofFormula>),
    Quantified(Quantifier, Variable, Box<FofFormula>),
}

impl FofFormula {
    /// Variables occurring free in the formula. TPTP formulas with free
    /// variables are implicitly universally quantified over them.
    pub fn free_variables(&self) -> HashSet<Variable> {
        match self {
            FofFormula::Atom(atom) => {
                let mut vars = HashSet::new();
                atom.collect_variables(&mut vars);
                vars
            }
            FofFormula::Not(f) => f.free_variables(),
            FofFormula::And(f1, f2)
            | FofFormula::Or(f1, f2)
            | FofFormula::Implies(f1, f2)
            | FofFormula::Iff(f1, f2)
            | FofFormula::Xor(f1, f2)
            | FofFormula::Nand(f1, f2)
            | FofFormula::Nor(f1, f2) => {
                let mut vars = f1.free_variables();
                vars.extend(f2.free_variables());
                vars
            }
            FofFormula::Quantified(_, var, f) => {
                let mut vars = f.free_variables();
                vars.remove(var);
                vars
            }
        }
    }

    /// Close the formula by universally quantifying its free variables.
    pub fn universal_closure(self) -> FofFormula {
        let mut free: Vec<Variable> = self.free_variables().into_iter().collect();
        free.sort();
        free.into_iter().rev().fold(self, |formula, var| {
            FofFormula::Quantified(Quantifier::Forall, var, Box::new(formula))
        })
    }

    /// Negation normal form: push negations down to the atoms and
    /// rewrite all connectives into and/or/quantifiers.
    pub fn to_nnf(self) -> FofFormula {
        nnf(self, false)
    }
}

fn nnf(formula: FofFormula, negate: bool) -> FofFormula {
    use FofFormula::*;
    match (formula, negate) {
        (Atom(a), false) => Atom(a),
        (Atom(a), true) => Not(Box::new(Atom(a))),

        (Not(f), negate) => nnf(*f, !negate),

        (And(f1, f2), false) => And(Box::new(nnf(*f1, false)), Box::new(nnf(*f2, false))),
        // De Morgan
        (And(f1, f2), true) => Or(Box::new(nnf(*f1, true)), Box::new(nnf(*f2, true))),
        (Or(f1, f2), false) => Or(Box::new(nnf(*f1, false)), Box::new(nnf(*f2, false))),
        (Or(f1, f2), true) => And(Box::new(nnf(*f1, true)), Box::new(nnf(*f2, true))),

        // A => B is ~A | B
        (Implies(f1, f2), false) => Or(Box::new(nnf(*f1, true)), Box::new(nnf(*f2, false))),
        (Implies(f1, f2), true) => And(Box::new(nnf(*f1, false)), Box::new(nnf(*f2, true))),

        // A <=> B is (~A | B) & (A | ~B)
        (Iff(f1, f2), false) => {
            let left = Or(
                Box::new(nnf((*f1).clone(), true)),
                Box::new(nnf((*f2).clone(), false)),
            );
            let right = Or(Box::new(nnf(*f1, false)), Box::new(nnf(*f2, true)));
            And(Box::new(left), Box::new(right))
        }
        // ~(A <=> B) is A <~> B
        (Iff(f1, f2), true) => nnf(Xor(f1, f2), false),

        // A <~> B is (A | B) & (~A | ~B)
        (Xor(f1, f2), false) => {
            let left = Or(
                Box::new(nnf((*f1).clone(), false)),
                Box::new(nnf((*f2).clone(), false)),
            );
            let right = Or(Box::new(nnf(*f1, true)), Box::new(nnf(*f2, true)));
            And(Box::new(left), Box::new(right))
        }
        (Xor(f1, f2), true) => nnf(Iff(f1, f2), false),

        (Nand(f1, f2), negate) => nnf(And(f1, f2), !negate),
        (Nor(f1, f2), negate) => nnf(Or(f1, f2), !negate),

        (Quantified(q, var, f), false) => Quantified(q, var, Box::new(nnf(*f, false))),
        (Quantified(q, var, f), true) => {
            let flipped = match q {
                Quantifier::Forall => Quantifier::Exists,
                Quantifier::Exists => Quantifier::Forall,
            };
            Quantified(flipped, var, Box::new(nnf(*f, true)))
        }
    }
}
