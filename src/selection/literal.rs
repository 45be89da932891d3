//! Negative literal selection
//!
//! Selection marks a subset of a clause's literals as inference
//! literals: resolution needs inference literals on both sides, and a
//! factor needs at least one. With negative selection, a clause with
//! negative literals gets exactly one of them selected, which reads the
//! clause `~a1 | ~a2 | a3` as a conditional: the conditions must be
//! resolved away one at a time, in an arbitrary but fixed order. This
//! keeps the calculus complete while cutting the search space.

use crate::fol::Clause;

/// Literal weight constants used to pick the smallest/largest literal.
const LIT_FWEIGHT: u64 = 2;
const LIT_VWEIGHT: u64 = 1;

/// Literal selection strategy, chosen per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiteralSelection {
    /// No selection: every literal is an inference literal.
    #[default]
    None,
    /// Select the first negative literal.
    FirstNegative,
    /// Select the negative literal with the smallest weight.
    SmallestNegative,
    /// Select the negative literal with the largest weight.
    LargestNegative,
    /// Select the first positive literal. Unlike negative selection this
    /// does not preserve completeness; offered as an experiment.
    FirstPositive,
}

impl LiteralSelection {
    /// Look up a strategy by its CLI name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(LiteralSelection::None),
            "first" => Some(LiteralSelection::FirstNegative),
            "smallest" => Some(LiteralSelection::SmallestNegative),
            "largest" => Some(LiteralSelection::LargestNegative),
            _ => None,
        }
    }

    /// Compute the inference-literal set for `clause`: `Some(indices)`
    /// when selection applies, `None` when all literals stay eligible.
    pub fn select(&self, clause: &Clause) -> Option<Vec<usize>> {
        match self {
            LiteralSelection::None => None,
            LiteralSelection::FirstNegative => {
                let idx = clause.literals.iter().position(|lit| lit.is_negative())?;
                Some(vec![idx])
            }
            LiteralSelection::SmallestNegative => {
                pick_negative_by_weight(clause, |weight, best| weight < best)
            }
            LiteralSelection::LargestNegative => {
                pick_negative_by_weight(clause, |weight, best| weight > best)
            }
            LiteralSelection::FirstPositive => {
                let idx = clause.literals.iter().position(|lit| lit.polarity)?;
                Some(vec![idx])
            }
        }
    }
}

/// Pick the negative literal optimizing `better`; first index wins ties.
fn pick_negative_by_weight(
    clause: &Clause,
    better: impl Fn(u64, u64) -> bool,
) -> Option<Vec<usize>> {
    let mut best: Option<(usize, u64)> = None;
    for (idx, lit) in clause.literals.iter().enumerate() {
        if !lit.is_negative() {
            continue;
        }
        let weight = lit.weight(LIT_FWEIGHT, LIT_VWEIGHT);
        match best {
            Some((_, best_weight)) if better(weight, best_weight) => best = Some((idx, weight)),
            None => best = Some((idx, weight)),
            _ => {}
        }
    }
    best.map(|(idx, _)| vec![idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fol::{Constant, FunctionSymbol, Interner, Literal, PredicateSymbol, Term, Variable};

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

        fn pred(&mut self, name: &str, arity: u8) -> PredicateSymbol {
            PredicateSymbol::new(self.interner.intern_predicate(name), arity)
        }
    }

    /// ~p(a) | ~p(f(X, g(a))) | q(a)
    fn sample_clause(ctx: &mut TestContext) -> Clause {
        let p = ctx.pred("p", 1);
        let q = ctx.pred("q", 1);
        let a = ctx.const_("a");
        let big = {
            let x = ctx.var("X");
            let ga = {
                let a = ctx.const_("a");
                ctx.func("g", vec![a])
            };
            ctx.func("f", vec![x, ga])
        };

        Clause::new(vec![
            Literal::negative(p, vec![a.clone()]),
            Literal::negative(p, vec![big]),
            Literal::positive(q, vec![a]),
        ])
    }

    #[test]
    fn test_no_selection() {
        let mut ctx = TestContext::new();
        let clause = sample_clause(&mut ctx);
        assert_eq!(LiteralSelection::None.select(&clause), None);
    }

    #[test]
    fn test_first_negative() {
        let mut ctx = TestContext::new();
        let clause = sample_clause(&mut ctx);
        assert_eq!(
            LiteralSelection::FirstNegative.select(&clause),
            Some(vec![0])
        );
    }

    #[test]
    fn test_smallest_and_largest() {
        let mut ctx = TestContext::new();
        let clause = sample_clause(&mut ctx);
        assert_eq!(
            LiteralSelection::SmallestNegative.select(&clause),
            Some(vec![0])
        );
        assert_eq!(
            LiteralSelection::LargestNegative.select(&clause),
            Some(vec![1])
        );
    }

    #[test]
    fn test_all_positive_clause_gets_no_selection() {
        let mut ctx = TestContext::new();
        let p = ctx.pred("p", 1);
        let a = ctx.const_("a");
        let clause = Clause::new(vec![Literal::positive(p, vec![a])]);

        assert_eq!(LiteralSelection::FirstNegative.select(&clause), None);
        assert_eq!(LiteralSelection::SmallestNegative.select(&clause), None);
        assert_eq!(LiteralSelection::LargestNegative.select(&clause), None);
    }

    #[test]
    fn test_first_positive() {
        let mut ctx = TestContext::new();
        let clause = sample_clause(&mut ctx);
        assert_eq!(
            LiteralSelection::FirstPositive.select(&clause),
            Some(vec![2])
        );
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            LiteralSelection::from_name("smallest"),
            Some(LiteralSelection::SmallestNegative)
        );
        assert_eq!(LiteralSelection::from_name("none"), Some(LiteralSelection::None));
        assert_eq!(LiteralSelection::from_name("bogus"), None);
    }
}
