//! Property-based tests for unification and substitutions

use super::{match_term, unify};
use crate::fol::{Constant, FunctionSymbol, Interner, Substitution, Term, Variable};
use proptest::prelude::*;

/// Term description, interned into a shared interner when built
#[derive(Debug, Clone)]
enum TermDesc {
    Var(u8),
    Const(u8),
    Func(u8, Vec<TermDesc>),
}

fn arb_term_desc(max_depth: u32) -> BoxedStrategy<TermDesc> {
    if max_depth == 0 {
        prop_oneof![
            (0..4u8).prop_map(TermDesc::Var),
            (0..4u8).prop_map(TermDesc::Const),
        ]
        .boxed()
    } else {
        prop_oneof![
            3 => (0..4u8).prop_map(TermDesc::Var),
            3 => (0..4u8).prop_map(TermDesc::Const),
            2 => (0..2u8, proptest::collection::vec(arb_term_desc(max_depth - 1), 1..=2))
                .prop_map(|(f, args)| TermDesc::Func(f, args)),
        ]
        .boxed()
    }
}

fn build_term(desc: &TermDesc, interner: &mut Interner) -> Term {
    match desc {
        TermDesc::Var(i) => {
            let id = interner.intern_variable(&format!("X{}", i));
            Term::Variable(Variable::new(id))
        }
        TermDesc::Const(i) => {
            let id = interner.intern_constant(&format!("c{}", i));
            Term::Constant(Constant::new(id))
        }
        TermDesc::Func(f, args) => {
            let id = interner.intern_function(&format!("f{}", f));
            let built: Vec<Term> = args.iter().map(|a| build_term(a, interner)).collect();
            Term::Function(FunctionSymbol::new(id, built.len() as u8), built)
        }
    }
}

fn arb_term_pair(max_depth: u32) -> impl Strategy<Value = (Term, Term)> {
    (arb_term_desc(max_depth), arb_term_desc(max_depth)).prop_map(|(d1, d2)| {
        let mut interner = Interner::new();
        let t1 = build_term(&d1, &mut interner);
        let t2 = build_term(&d2, &mut interner);
        (t1, t2)
    })
}

proptest! {
    /// If unify(s, t) = sigma, then s*sigma = t*sigma.
    #[test]
    fn unifier_solves((t1, t2) in arb_term_pair(3)) {
        if let Ok(sigma) = unify(&t1, &t2) {
            prop_assert_eq!(
                t1.apply_substitution(&sigma),
                t2.apply_substitution(&sigma)
            );
        }
    }

    /// Returned unifiers are idempotent.
    #[test]
    fn unifier_is_idempotent((t1, t2) in arb_term_pair(3)) {
        if let Ok(sigma) = unify(&t1, &t2) {
            prop_assert!(sigma.is_idempotent());
            let once = t1.apply_substitution(&sigma);
            let twice = once.apply_substitution(&sigma);
            prop_assert_eq!(once, twice);
        }
    }

    /// Unifiability does not depend on argument order.
    #[test]
    fn unification_is_symmetric((t1, t2) in arb_term_pair(3)) {
        prop_assert_eq!(unify(&t1, &t2).is_ok(), unify(&t2, &t1).is_ok());
    }

    /// A match is also a unifier witness: if pattern matches instance,
    /// then applying the matcher to the pattern gives the instance.
    #[test]
    fn matching_instantiates((t1, t2) in arb_term_pair(3)) {
        let mut subst = Substitution::new();
        if match_term(&t1, &t2, &mut subst) {
            prop_assert_eq!(t1.apply_substitution(&subst), t2);
        }
    }

    /// The identity substitution is neutral.
    #[test]
    fn identity_substitution_is_neutral((t, _) in arb_term_pair(3)) {
        let id = Substitution::new();
        prop_assert_eq!(t.apply_substitution(&id), t);
    }

    /// apply(compose(sigma, tau), t) = apply(tau, apply(sigma, t)),
    /// using unifiers of random term pairs as sample substitutions.
    #[test]
    fn composition_law(((s1, s2), (u1, u2), (t, _)) in
        (arb_term_pair(2), arb_term_pair(2), arb_term_pair(3)))
    {
        if let (Ok(sigma), Ok(tau)) = (unify(&s1, &s2), unify(&u1, &u2)) {
            let composed = sigma.compose(&tau);
            prop_assert_eq!(
                t.apply_substitution(&composed),
                t.apply_substitution(&sigma).apply_substitution(&tau)
            );
        }
    }
}

#[test]
fn occurs_check_rejects_cyclic_problem() {
    let mut interner = Interner::new();
    let x = Term::Variable(Variable::new(interner.intern_variable("X")));
    let f = interner.intern_function("f");
    let fx = Term::Function(FunctionSymbol::new(f, 1), vec![x.clone()]);
    assert!(unify(&x, &fx).is_err());
}
