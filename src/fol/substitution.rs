//! Variable substitutions

use super::clause::Clause;
use super::interner::{Interner, VariableId};
use super::literal::{Atom, Literal};
use super::term::{Term, Variable};
use std::collections::{HashMap, HashSet};

/// A finite mapping from variables to terms.
///
/// The representation is kept idempotent: no variable in the domain
/// occurs in the codomain. `insert_normalized` maintains this invariant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Substitution {
    map: HashMap<VariableId, Term>,
}

impl Substitution {
    pub fn new() -> Self {
        Substitution::default()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Term bound to `var`, if any.
    pub fn get(&self, var: VariableId) -> Option<&Term> {
        self.map.get(&var)
    }

    pub fn contains(&self, var: VariableId) -> bool {
        self.map.contains_key(&var)
    }

    /// Add a binding without normalization. Only safe when `term` cannot
    /// mention domain variables (e.g. fresh renamings, matching).
    pub fn insert(&mut self, var: Variable, term: Term) {
        self.map.insert(var.id, term);
    }

    /// Add a binding, keeping the substitution idempotent: the new term
    /// is instantiated with the existing bindings, then the new binding
    /// is applied to every existing codomain term.
    pub fn insert_normalized(&mut self, var: Variable, term: Term) {
        let term = term.apply_substitution(self);
        // x -> x would be a trivial binding
        if term == Term::Variable(var) {
            return;
        }

        let mut single = Substitution::new();
        single.map.insert(var.id, term.clone());
        for bound in self.map.values_mut() {
            *bound = bound.apply_substitution(&single);
        }
        self.map.insert(var.id, term);
    }

    /// Composition: `apply(compose(σ, τ), t) = apply(τ, apply(σ, t))`.
    /// Trivial bindings `x -> x` are dropped.
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut result = Substitution::new();
        for (&var, term) in &self.map {
            let composed = term.apply_substitution(other);
            if composed != Term::Variable(Variable::new(var)) {
                result.map.insert(var, composed);
            }
        }
        for (&var, term) in &other.map {
            if !self.map.contains_key(&var) {
                result.map.insert(var, term.clone());
            }
        }
        result
    }

    /// True if applying the substitution twice equals applying it once.
    pub fn is_idempotent(&self) -> bool {
        self.map.values().all(|term| {
            term.variables()
                .iter()
                .all(|v| !self.map.contains_key(&v.id))
        })
    }
}

impl Term {
    /// Apply a substitution; unbound variables stay as they are.
    pub fn apply_substitution(&self, subst: &Substitution) -> Term {
        match self {
            Term::Variable(v) => subst
                .map
                .get(&v.id)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            Term::Constant(_) => self.clone(),
            Term::Function(f, args) => Term::Function(
                *f,
                args.iter().map(|arg| arg.apply_substitution(subst)).collect(),
            ),
        }
    }
}

impl Atom {
    pub fn apply_substitution(&self, subst: &Substitution) -> Atom {
        Atom {
            predicate: self.predicate,
            args: self
                .args
                .iter()
                .map(|arg| arg.apply_substitution(subst))
                .collect(),
        }
    }
}

impl Literal {
    pub fn apply_substitution(&self, subst: &Substitution) -> Literal {
        Literal {
            atom: self.atom.apply_substitution(subst),
            polarity: self.polarity,
        }
    }
}

impl Clause {
    /// Apply a substitution to every literal. The result carries no id
    /// and no bookkeeping; those belong to the proof state.
    pub fn apply_substitution(&self, subst: &Substitution) -> Clause {
        let mut clause = Clause::with_role(
            self.literals
                .iter()
                .map(|lit| lit.apply_substitution(subst))
                .collect(),
            self.role,
        );
        clause.derivation = self.derivation.clone();
        clause.sos = self.sos;
        clause
    }
}

/// Copy a clause with every variable replaced by a globally fresh one,
/// drawn from the interner's fresh allocator via the engine-owned
/// counter. The allocator skips names already interned, so the copy is
/// variable-disjoint from every existing clause. Returns the copy and
/// the renaming substitution.
pub fn fresh_rename(
    clause: &Clause,
    interner: &mut Interner,
    counter: &mut usize,
) -> (Clause, Substitution) {
    let mut vars = HashSet::new();
    clause.collect_variables(&mut vars);

    // Sort for a deterministic renaming independent of hash order.
    let mut vars: Vec<Variable> = vars.into_iter().collect();
    vars.sort();

    let mut renaming = Substitution::new();
    for var in vars {
        let fresh = interner.fresh_variable(counter);
        renaming.insert(var, Term::Variable(Variable::new(fresh)));
    }

    let mut renamed = clause.apply_substitution(&renaming);
    renamed.id = clause.id;
    renamed.evaluations = clause.evaluations.clone();
    renamed.inference_lits = clause.inference_lits.clone();
    (renamed, renaming)
}
