//! One-sided matching
//!
//! Matching is unification restricted to binding variables of the
//! pattern side only; variables of the instance side are treated as
//! opaque. It is the workhorse of subsumption: `C` subsumes `D` iff the
//! literals of `C` match into `D` under one common substitution.

use crate::fol::{Interner, Literal, Substitution, Term};

/// Try to extend `subst` so that `pattern` instantiated equals
/// `instance`. On failure `subst` may be partially extended; callers
/// backtrack by cloning before the call.
pub fn match_term(pattern: &Term, instance: &Term, subst: &mut Substitution) -> bool {
    match pattern {
        Term::Variable(v) => {
            if let Some(bound) = subst.get(v.id) {
                bound == instance
            } else {
                subst.insert(*v, instance.clone());
                true
            }
        }
        Term::Constant(c1) => matches!(instance, Term::Constant(c2) if c1 == c2),
        Term::Function(f1, args1) => match instance {
            Term::Function(f2, args2) if f1.id == f2.id && args1.len() == args2.len() => args1
                .iter()
                .zip(args2.iter())
                .all(|(p, i)| match_term(p, i, subst)),
            _ => false,
        },
    }
}

/// Match argument lists pairwise under one substitution.
fn match_args(pattern: &[Term], instance: &[Term], subst: &mut Substitution) -> bool {
    pattern.len() == instance.len()
        && pattern
            .iter()
            .zip(instance.iter())
            .all(|(p, i)| match_term(p, i, subst))
}

/// All ways to match `pattern` onto `instance` as literals: polarities
/// and predicates must agree, the argument lists must match. Equality
/// literals additionally match with their arguments swapped, since
/// `s=t` and `t=s` denote the same literal for subsumption.
///
/// Each orientation may bind the pattern variables differently, so
/// every successful extension of `subst` is returned and the caller
/// backtracks through them. `subst` itself is left untouched.
pub fn match_literal(
    pattern: &Literal,
    instance: &Literal,
    subst: &Substitution,
    interner: &Interner,
) -> Vec<Substitution> {
    let mut matches = Vec::new();
    if pattern.polarity != instance.polarity
        || pattern.atom.predicate != instance.atom.predicate
    {
        return matches;
    }

    let mut attempt = subst.clone();
    if match_args(&pattern.atom.args, &instance.atom.args, &mut attempt) {
        matches.push(attempt);
    }

    if pattern.atom.is_equality(interner) {
        let swapped = [
            instance.atom.args[1].clone(),
            instance.atom.args[0].clone(),
        ];
        let mut attempt = subst.clone();
        if match_args(&pattern.atom.args, &swapped, &mut attempt)
            && !matches.contains(&attempt)
        {
            matches.push(attempt);
        }
    }

    matches
}
