//! Most general unifier computation
//!
//! Robinson-style recursive descent with the occurs check enabled. The
//! substitution under construction is kept idempotent throughout, so the
//! returned unifier is idempotent and most general.

use crate::fol::{Atom, Substitution, Term, Variable};
use thiserror::Error;

/// Result of a unification attempt
pub type UnificationResult = Result<Substitution, UnificationError>;

/// Routine failure of unification. Not a program error: inference rules
/// treat any of these as "no inference possible".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnificationError {
    #[error("occurs check failed")]
    OccursCheck,
    #[error("head symbols differ")]
    SymbolClash,
    #[error("argument counts differ")]
    ArityMismatch,
    #[error("predicates differ")]
    PredicateClash,
}

/// Unify two terms, returning an idempotent most general unifier.
pub fn unify(term1: &Term, term2: &Term) -> UnificationResult {
    let mut subst = Substitution::new();
    unify_with_subst(term1, term2, &mut subst)?;
    Ok(subst)
}

/// Unify the argument lists of two atoms over the same predicate.
pub fn unify_atoms(atom1: &Atom, atom2: &Atom) -> UnificationResult {
    if atom1.predicate != atom2.predicate {
        return Err(UnificationError::PredicateClash);
    }
    if atom1.args.len() != atom2.args.len() {
        return Err(UnificationError::ArityMismatch);
    }
    let mut subst = Substitution::new();
    for (arg1, arg2) in atom1.args.iter().zip(atom2.args.iter()) {
        unify_with_subst(arg1, arg2, &mut subst)?;
    }
    Ok(subst)
}

/// Extend `subst` to a unifier of `term1` and `term2`.
fn unify_with_subst(
    term1: &Term,
    term2: &Term,
    subst: &mut Substitution,
) -> Result<(), UnificationError> {
    let t1 = term1.apply_substitution(subst);
    let t2 = term2.apply_substitution(subst);

    match (&t1, &t2) {
        _ if t1 == t2 => Ok(()),

        (Term::Variable(v), t) | (t, Term::Variable(v)) => {
            if occurs(v, t) {
                Err(UnificationError::OccursCheck)
            } else {
                subst.insert_normalized(*v, t.clone());
                Ok(())
            }
        }

        (Term::Function(f1, args1), Term::Function(f2, args2)) => {
            if f1.id != f2.id {
                return Err(UnificationError::SymbolClash);
            }
            if args1.len() != args2.len() {
                return Err(UnificationError::ArityMismatch);
            }
            for (arg1, arg2) in args1.iter().zip(args2.iter()) {
                unify_with_subst(arg1, arg2, subst)?;
            }
            Ok(())
        }

        // Distinct constants, or constant against function
        _ => Err(UnificationError::SymbolClash),
    }
}

/// Occurs check: does `var` occur in `term`?
fn occurs(var: &Variable, term: &Term) -> bool {
    match term {
        Term::Variable(v) => v.id == var.id,
        Term::Constant(_) => false,
        Term::Function(_, args) => args.iter().any(|arg| occurs(var, arg)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fol::{Constant, FunctionSymbol, Interner, PredicateSymbol};

    struct TestContext {
        interner: Interner,
    }

    impl TestContext {
        fn new() -> Self {
            TestContext {
                interner: Interner::new(),
            }
        }

        fn var(&mut self, name: &str) -> Term {
            Term::Variable(Variable::new(self.interner.intern_variable(name)))
        }

        fn const_(&mut self, name: &str) -> Term {
            Term::Constant(Constant::new(self.interner.intern_constant(name)))
        }

        fn func(&mut self, name: &str, args: Vec<Term>) -> Term {
            let id = self.interner.intern_function(name);
            Term::Function(FunctionSymbol::new(id, args.len() as u8), args)
        }

        fn atom(&mut self, pred: &str, args: Vec<Term>) -> Atom {
            let id = self.interner.intern_predicate(pred);
            Atom::new(PredicateSymbol::new(id, args.len() as u8), args)
        }
    }

    #[test]
    fn test_unify_variable_with_constant() {
        let mut ctx = TestContext::new();
        let x = ctx.var("X");
        let a = ctx.const_("a");

        let sigma = unify(&x, &a).unwrap();
        assert_eq!(x.apply_substitution(&sigma), a);
        assert_eq!(sigma.len(), 1);
    }

    #[test]
    fn test_unify_solves() {
        // f(X, g(a)) with f(b, g(Y))
        let mut ctx = TestContext::new();
        let x = ctx.var("X");
        let y = ctx.var("Y");
        let a = ctx.const_("a");
        let b = ctx.const_("b");
        let t1 = {
            let ga = ctx.func("g", vec![a.clone()]);
            ctx.func("f", vec![x, ga])
        };
        let t2 = {
            let gy = ctx.func("g", vec![y]);
            ctx.func("f", vec![b, gy])
        };

        let sigma = unify(&t1, &t2).unwrap();
        assert_eq!(t1.apply_substitution(&sigma), t2.apply_substitution(&sigma));
        assert!(sigma.is_idempotent());
    }

    #[test]
    fn test_unify_chained_variables() {
        // f(X, X) with f(Y, a) forces X -> a, Y -> a
        let mut ctx = TestContext::new();
        let x = ctx.var("X");
        let y = ctx.var("Y");
        let a = ctx.const_("a");
        let t1 = ctx.func("f", vec![x.clone(), x.clone()]);
        let t2 = ctx.func("f", vec![y, a.clone()]);

        let sigma = unify(&t1, &t2).unwrap();
        assert!(sigma.is_idempotent());
        assert_eq!(x.apply_substitution(&sigma), a);
        assert_eq!(t1.apply_substitution(&sigma), t2.apply_substitution(&sigma));
    }

    #[test]
    fn test_occurs_check() {
        let mut ctx = TestContext::new();
        let x = ctx.var("X");
        let fx = ctx.func("f", vec![x.clone()]);

        assert_eq!(unify(&x, &fx), Err(UnificationError::OccursCheck));
    }

    #[test]
    fn test_symbol_clash() {
        let mut ctx = TestContext::new();
        let a = ctx.const_("a");
        let b = ctx.const_("b");
        let fa = ctx.func("f", vec![a.clone()]);
        let ga = ctx.func("g", vec![a.clone()]);

        assert_eq!(unify(&a, &b), Err(UnificationError::SymbolClash));
        assert_eq!(unify(&fa, &ga), Err(UnificationError::SymbolClash));
        assert_eq!(unify(&fa, &b), Err(UnificationError::SymbolClash));
    }

    #[test]
    fn test_unify_atoms() {
        let mut ctx = TestContext::new();
        let x = ctx.var("X");
        let a = ctx.const_("a");
        let p1 = ctx.atom("p", vec![x, a.clone()]);
        let p2 = {
            let y = ctx.var("Y");
            ctx.atom("p", vec![a, y])
        };

        let sigma = unify_atoms(&p1, &p2).unwrap();
        assert_eq!(
            p1.apply_substitution(&sigma),
            p2.apply_substitution(&sigma)
        );
    }

    #[test]
    fn test_unify_atoms_predicate_clash() {
        let mut ctx = TestContext::new();
        let a = ctx.const_("a");
        let p = ctx.atom("p", vec![a.clone()]);
        let q = ctx.atom("q", vec![a]);

        assert_eq!(unify_atoms(&p, &q), Err(UnificationError::PredicateClash));
    }
}
