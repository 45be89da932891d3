//! Clause subsumption
//!
//! `C` subsumes `D` iff there is a substitution σ with `Cσ ⊆ D` as
//! multisets. The multiset reading matters: with sets, `p(X)|p(Y)`
//! would subsume `p(X)` — a clause subsuming its own factors, which
//! destroys completeness.
//!
//! The check is a backtracking search matching the literals of the
//! subsumer into distinct literals of the subsumed clause under one
//! common substitution, binding subsumer variables only.

use crate::fol::{Clause, Interner, Literal, Substitution};
use crate::unification::match_literal;

/// Does `subsumer` subsume `subsumed`? Reflexive; the empty clause
/// subsumes everything.
pub fn subsumes(subsumer: &Clause, subsumed: &Clause, interner: &Interner) -> bool {
    if subsumer.len() > subsumed.len() {
        return false;
    }
    let mut used = vec![false; subsumed.literals.len()];
    subsume_lit_lists(
        &subsumer.literals,
        &subsumed.literals,
        &mut used,
        &Substitution::new(),
        interner,
    )
}

/// Proper subsumption: subsumes, but is not subsumed back. Backward
/// subsumption uses this so that a clause never deletes its own
/// variants (or itself).
pub fn subsumes_properly(subsumer: &Clause, subsumed: &Clause, interner: &Interner) -> bool {
    subsumes(subsumer, subsumed, interner) && !subsumes(subsumed, subsumer, interner)
}

/// Match `subsumer[0..]` into the unused literals of `subsumed`,
/// extending `subst`; backtracks over the choice of target literal and
/// over the equality orientations a single target admits.
fn subsume_lit_lists(
    subsumer: &[Literal],
    subsumed: &[Literal],
    used: &mut [bool],
    subst: &Substitution,
    interner: &Interner,
) -> bool {
    let Some(first) = subsumer.first() else {
        return true;
    };
    for (i, candidate) in subsumed.iter().enumerate() {
        if used[i] {
            continue;
        }
        for extended in match_literal(first, candidate, subst, interner) {
            used[i] = true;
            if subsume_lit_lists(&subsumer[1..], subsumed, used, &extended, interner) {
                return true;
            }
            used[i] = false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fol::{Constant, FunctionSymbol, PredicateSymbol, Term, Variable};

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

        fn lit(&mut self, pred: &str, args: Vec<Term>, polarity: bool) -> Literal {
            let id = self.interner.intern_predicate(pred);
            let sym = PredicateSymbol::new(id, args.len() as u8);
            if polarity {
                Literal::positive(sym, args)
            } else {
                Literal::negative(sym, args)
            }
        }
    }

    #[test]
    fn test_subsumption_is_reflexive() {
        let mut ctx = TestContext::new();
        let x = ctx.var("X");
        let a = ctx.const_("a");
        let clause = Clause::new(vec![
            ctx.lit("p", vec![a], true),
            ctx.lit("q", vec![x], false),
        ]);
        assert!(subsumes(&clause, &clause, &ctx.interner));
        assert!(!subsumes_properly(&clause, &clause, &ctx.interner));
    }

    #[test]
    fn test_empty_clause_subsumes_everything() {
        let mut ctx = TestContext::new();
        let a = ctx.const_("a");
        let empty = Clause::new(vec![]);
        let unit = Clause::new(vec![ctx.lit("p", vec![a], true)]);

        assert!(subsumes(&empty, &unit, &ctx.interner));
        assert!(subsumes(&empty, &empty, &ctx.interner));
        assert!(!subsumes(&unit, &empty, &ctx.interner));
    }

    #[test]
    fn test_general_subsumes_instance() {
        let mut ctx = TestContext::new();
        let x = ctx.var("X");
        let a = ctx.const_("a");
        let general = Clause::new(vec![ctx.lit("p", vec![x], true)]);
        let instance = Clause::new(vec![ctx.lit("p", vec![a], true)]);

        assert!(subsumes(&general, &instance, &ctx.interner));
        assert!(!subsumes(&instance, &general, &ctx.interner));
        assert!(subsumes_properly(&general, &instance, &ctx.interner));
    }

    #[test]
    fn test_subset_subsumes_superset() {
        // p(a)|q(f(X)) subsumes p(a)|q(f(b))|p(X)
        let mut ctx = TestContext::new();
        let x = ctx.var("X");
        let a = ctx.const_("a");
        let b = ctx.const_("b");
        let fx = ctx.func("f", vec![x.clone()]);
        let fb = ctx.func("f", vec![b]);

        let small = Clause::new(vec![
            ctx.lit("p", vec![a.clone()], true),
            ctx.lit("q", vec![fx], true),
        ]);
        let large = Clause::new(vec![
            ctx.lit("p", vec![a], true),
            ctx.lit("q", vec![fb], true),
            ctx.lit("p", vec![x], true),
        ]);

        assert!(subsumes(&small, &large, &ctx.interner));
        assert!(!subsumes(&large, &small, &ctx.interner));
    }

    #[test]
    fn test_multiset_semantics() {
        // p(X)|p(Y) must NOT subsume p(a): both literals would need the
        // same target literal.
        let mut ctx = TestContext::new();
        let x = ctx.var("X");
        let y = ctx.var("Y");
        let a = ctx.const_("a");

        let two = Clause::new(vec![
            ctx.lit("p", vec![x], true),
            ctx.lit("p", vec![y], true),
        ]);
        let one = Clause::new(vec![ctx.lit("p", vec![a], true)]);

        assert!(!subsumes(&two, &one, &ctx.interner));
    }

    #[test]
    fn test_consistent_bindings_across_literals() {
        // p(X)|q(X) subsumes p(a)|q(a) but not p(a)|q(b)
        let mut ctx = TestContext::new();
        let x = ctx.var("X");
        let a = ctx.const_("a");
        let b = ctx.const_("b");

        let pattern = Clause::new(vec![
            ctx.lit("p", vec![x.clone()], true),
            ctx.lit("q", vec![x], true),
        ]);
        let same = Clause::new(vec![
            ctx.lit("p", vec![a.clone()], true),
            ctx.lit("q", vec![a.clone()], true),
        ]);
        let different = Clause::new(vec![
            ctx.lit("p", vec![a], true),
            ctx.lit("q", vec![b], true),
        ]);

        assert!(subsumes(&pattern, &same, &ctx.interner));
        assert!(!subsumes(&pattern, &different, &ctx.interner));
    }

    #[test]
    fn test_variant_clauses_subsume_each_other() {
        let mut ctx = TestContext::new();
        let x = ctx.var("X");
        let y = ctx.var("Y");
        let c1 = Clause::new(vec![ctx.lit("=", vec![x.clone(), x], true)]);
        let c2 = Clause::new(vec![ctx.lit("=", vec![y.clone(), y], true)]);

        assert!(subsumes(&c1, &c2, &ctx.interner));
        assert!(subsumes(&c2, &c1, &ctx.interner));
        assert!(!subsumes_properly(&c1, &c2, &ctx.interner));
    }

    #[test]
    fn test_ground_transitivity() {
        let mut ctx = TestContext::new();
        let a = ctx.const_("a");
        let b = ctx.const_("b");
        let c1 = Clause::new(vec![ctx.lit("p", vec![a.clone()], true)]);
        let c2 = Clause::new(vec![
            ctx.lit("p", vec![a.clone()], true),
            ctx.lit("q", vec![b.clone()], true),
        ]);
        let c = ctx.const_("c");
        let c3 = Clause::new(vec![
            ctx.lit("p", vec![a], true),
            ctx.lit("q", vec![b], true),
            ctx.lit("r", vec![c], false),
        ]);

        assert!(subsumes(&c1, &c2, &ctx.interner));
        assert!(subsumes(&c2, &c3, &ctx.interner));
        assert!(subsumes(&c1, &c3, &ctx.interner));
    }

    #[test]
    fn test_equality_orientation() {
        // a=b subsumes b=a
        let mut ctx = TestContext::new();
        let a = ctx.const_("a");
        let b = ctx.const_("b");
        let ab = Clause::new(vec![ctx.lit("=", vec![a.clone(), b.clone()], true)]);
        let ba = Clause::new(vec![ctx.lit("=", vec![b, a], true)]);

        assert!(subsumes(&ab, &ba, &ctx.interner));
        assert!(subsumes(&ba, &ab, &ctx.interner));
    }

    #[test]
    fn test_backtracking_over_equality_orientations() {
        // X=Y | p(X) against a=b | p(b): the direct orientation binds
        // X to a and dead-ends on p(b); only the swapped orientation
        // (X to b) completes the map. The search must backtrack into
        // the second orientation of the same target literal.
        let mut ctx = TestContext::new();
        let x = ctx.var("X");
        let y = ctx.var("Y");
        let a = ctx.const_("a");
        let b = ctx.const_("b");

        let subsumer = Clause::new(vec![
            ctx.lit("=", vec![x.clone(), y], true),
            ctx.lit("p", vec![x], true),
        ]);
        let subsumed = Clause::new(vec![
            ctx.lit("=", vec![a, b.clone()], true),
            ctx.lit("p", vec![b], true),
        ]);

        assert!(subsumes(&subsumer, &subsumed, &ctx.interner));
    }
}
