//! FOF to CNF conversion
//!
//! The classic pipeline: universal closure, negation normal form,
//! standardizing bound variables apart, skolemization, dropping the
//! universal quantifiers, and distributing disjunctions over
//! conjunctions. Skolem symbols are numbered per problem, so conversion
//! is deterministic for a fixed input.

use super::fof::{FofFormula, Quantifier};
use crate::fol::{
    Clause, ClauseRole, Constant, FunctionSymbol, Interner, Literal, Substitution, Term, Variable,
};

/// Per-problem CNF converter owning the Skolem and renaming counters.
pub struct CnfConverter<'a> {
    interner: &'a mut Interner,
    skolem_counter: usize,
    rename_counter: usize,
}

impl<'a> CnfConverter<'a> {
    pub fn new(interner: &'a mut Interner) -> Self {
        CnfConverter {
            interner,
            skolem_counter: 0,
            rename_counter: 0,
        }
    }

    /// Clausify one formula. The caller has already negated conjectures.
    pub fn convert(&mut self, formula: FofFormula, role: ClauseRole) -> Vec<Clause> {
        let closed = formula.universal_closure().to_nnf();
        let standardized = self.standardize(closed, &Substitution::new());
        let skolemized = self.skolemize(standardized, &mut Vec::new(), &Substitution::new());
        let matrix = remove_universals(skolemized);

        distribute(matrix)
            .into_iter()
            .filter_map(|literals| self.assemble_clause(literals, role))
            .collect()
    }

    /// Rename every bound variable to a fresh `V<n>`. After universal
    /// closure all variables are bound, so this also standardizes
    /// variables apart across formulas of one problem.
    fn standardize(&mut self, formula: FofFormula, renaming: &Substitution) -> FofFormula {
        match formula {
            FofFormula::Atom(atom) => FofFormula::Atom(atom.apply_substitution(renaming)),
            FofFormula::Not(f) => {
                FofFormula::Not(Box::new(self.standardize(*f, renaming)))
            }
            FofFormula::And(f1, f2) => FofFormula::And(
                Box::new(self.standardize(*f1, renaming)),
                Box::new(self.standardize(*f2, renaming)),
            ),
            FofFormula::Or(f1, f2) => FofFormula::Or(
                Box::new(self.standardize(*f1, renaming)),
                Box::new(self.standardize(*f2, renaming)),
            ),
            FofFormula::Quantified(q, var, f) => {
                self.rename_counter += 1;
                let fresh = Variable::new(
                    self.interner
                        .intern_variable(&format!("V{}", self.rename_counter)),
                );
                let mut extended = renaming.clone();
                extended.insert(var, Term::Variable(fresh));
                FofFormula::Quantified(q, fresh, Box::new(self.standardize(*f, &extended)))
            }
            // NNF leaves only atoms, negated atoms, and/or, quantifiers
            other => unreachable!("non-NNF connective after to_nnf: {:?}", other),
        }
    }

    /// Remove existential quantifiers by introducing Skolem functions
    /// over the universal variables in scope.
    fn skolemize(
        &mut self,
        formula: FofFormula,
        universals: &mut Vec<Variable>,
        skolem_subst: &Substitution,
    ) -> FofFormula {
        match formula {
            FofFormula::Atom(atom) => FofFormula::Atom(atom.apply_substitution(skolem_subst)),
            FofFormula::Not(f) => {
                FofFormula::Not(Box::new(self.skolemize(*f, universals, skolem_subst)))
            }
            FofFormula::And(f1, f2) => FofFormula::And(
                Box::new(self.skolemize(*f1, universals, skolem_subst)),
                Box::new(self.skolemize(*f2, universals, skolem_subst)),
            ),
            FofFormula::Or(f1, f2) => FofFormula::Or(
                Box::new(self.skolemize(*f1, universals, skolem_subst)),
                Box::new(self.skolemize(*f2, universals, skolem_subst)),
            ),
            FofFormula::Quantified(Quantifier::Forall, var, f) => {
                universals.push(var);
                let body = self.skolemize(*f, universals, skolem_subst);
                universals.pop();
                FofFormula::Quantified(Quantifier::Forall, var, Box::new(body))
            }
            FofFormula::Quantified(Quantifier::Exists, var, f) => {
                self.skolem_counter += 1;
                let name = format!("sk{}", self.skolem_counter);
                let skolem_term = if universals.is_empty() {
                    Term::Constant(Constant::new(self.interner.intern_constant(&name)))
                } else {
                    let f_id = self.interner.intern_function(&name);
                    Term::Function(
                        FunctionSymbol::new(f_id, universals.len() as u8),
                        universals.iter().map(|v| Term::Variable(*v)).collect(),
                    )
                };
                let mut extended = skolem_subst.clone();
                extended.insert(var, skolem_term);
                self.skolemize(*f, universals, &extended)
            }
            other => unreachable!("non-NNF connective after to_nnf: {:?}", other),
        }
    }

    /// Turn a literal list into a clause, simplifying the propositional
    /// constants: `$false` literals vanish, a `$true` literal makes the
    /// clause valid (and droppable). Returns `None` for dropped clauses.
    fn assemble_clause(&mut self, literals: Vec<RawLit>, role: ClauseRole) -> Option<Clause> {
        let mut clause_lits: Vec<Literal> = Vec::new();
        for (atom, polarity) in literals {
            let lit = Literal::new(atom, polarity, self.interner);
            if lit.is_prop_true(self.interner) {
                return None;
            }
            if lit.is_prop_false(self.interner) {
                continue;
            }
            if !clause_lits.contains(&lit) {
                clause_lits.push(lit);
            }
        }
        Some(Clause::with_role(clause_lits, role))
    }
}

type RawLit = (crate::fol::Atom, bool);

/// Strip the remaining (universal) quantifiers.
fn remove_universals(formula: FofFormula) -> FofFormula {
    match formula {
        FofFormula::Quantified(Quantifier::Forall, _, f) => remove_universals(*f),
        FofFormula::And(f1, f2) => FofFormula::And(
            Box::new(remove_universals(*f1)),
            Box::new(remove_universals(*f2)),
        ),
        FofFormula::Or(f1, f2) => FofFormula::Or(
            Box::new(remove_universals(*f1)),
            Box::new(remove_universals(*f2)),
        ),
        other => other,
    }
}

/// Distribute disjunction over conjunction, yielding literal lists.
fn distribute(formula: FofFormula) -> Vec<Vec<RawLit>> {
    match formula {
        FofFormula::Atom(atom) => vec![vec![(atom, true)]],
        FofFormula::Not(f) => match *f {
            FofFormula::Atom(atom) => vec![vec![(atom, false)]],
            other => unreachable!("negation of non-atom after NNF: {:?}", other),
        },
        FofFormula::And(f1, f2) => {
            let mut clauses = distribute(*f1);
            clauses.extend(distribute(*f2));
            clauses
        }
        FofFormula::Or(f1, f2) => {
            let left = distribute(*f1);
            let right = distribute(*f2);
            let mut clauses = Vec::with_capacity(left.len() * right.len());
            for l in &left {
                for r in &right {
                    let mut combined = l.clone();
                    combined.extend(r.iter().cloned());
                    clauses.push(combined);
                }
            }
            clauses
        }
        other => unreachable!("quantifier or connective in matrix: {:?}", other),
    }
}
