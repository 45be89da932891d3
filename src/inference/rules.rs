//! Generating inference rules: binary resolution and factoring
//!
//! Both rules honor literal selection: a literal can act as resolution
//! literal only if it is an inference literal of its clause, and a
//! factor needs at least one inference literal among the two factored
//! literals. Resolution additionally renames the partner clause with
//! globally fresh variables, so the premises are variable-disjoint even
//! when a clause resolves against itself.

use super::derivation::Derivation;
use crate::fol::{fresh_rename, Clause, Interner, Literal, Substitution};
use crate::unification::unify_atoms;
use std::collections::HashSet;

/// All binary resolvents between `given` and `partner`.
///
/// `given_id` and `partner_id` identify the premises in derivation
/// records. The caller guarantees they are the ids of the two clauses.
pub fn resolvents_between(
    given: &Clause,
    given_id: usize,
    partner: &Clause,
    partner_id: usize,
    interner: &mut Interner,
    var_counter: &mut usize,
) -> Vec<Clause> {
    let mut resolvents = Vec::new();

    let (renamed, _) = fresh_rename(partner, interner, var_counter);

    for (i, lit1) in given.literals.iter().enumerate() {
        if !given.is_inference_lit(i) {
            continue;
        }
        for (j, lit2) in renamed.literals.iter().enumerate() {
            if !renamed.is_inference_lit(j) {
                continue;
            }
            if lit1.polarity == lit2.polarity || lit1.atom.predicate != lit2.atom.predicate {
                continue;
            }
            if let Ok(sigma) = unify_atoms(&lit1.atom, &lit2.atom) {
                let mut literals = collect_literals_except(given, i, &sigma);
                literals.extend(collect_literals_except(&renamed, j, &sigma));
                let literals = remove_duplicate_literals(literals);

                let mut resolvent = Clause::derived(
                    literals,
                    Derivation::resolution(given_id, i, partner_id, j),
                );
                resolvent.sos = given.sos || partner.sos;
                resolvents.push(resolvent);
            }
        }
    }

    resolvents
}

/// All direct factors of `clause`.
///
/// Quadratic in the clause length, which is harmless: single-clause
/// operations are far cheaper than clause/clause-set operations.
pub fn factors_of(clause: &Clause, clause_id: usize) -> Vec<Clause> {
    let mut factors = Vec::new();

    for i in 0..clause.literals.len() {
        for j in (i + 1)..clause.literals.len() {
            if !clause.is_inference_lit(i) && !clause.is_inference_lit(j) {
                continue;
            }
            let lit1 = &clause.literals[i];
            let lit2 = &clause.literals[j];
            if lit1.polarity != lit2.polarity || lit1.atom.predicate != lit2.atom.predicate {
                continue;
            }
            if let Ok(sigma) = unify_atoms(&lit1.atom, &lit2.atom) {
                let literals =
                    remove_duplicate_literals(collect_literals_except(clause, j, &sigma));

                let mut factor =
                    Clause::derived(literals, Derivation::factoring(clause_id, i, j));
                factor.sos = clause.sos;
                factors.push(factor);
            }
        }
    }

    factors
}

/// Literals of `clause` without index `exclude`, instantiated by `subst`.
fn collect_literals_except(clause: &Clause, exclude: usize, subst: &Substitution) -> Vec<Literal> {
    clause
        .literals
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != exclude)
        .map(|(_, lit)| lit.apply_substitution(subst))
        .collect()
}

/// Drop syntactically duplicate literals, keeping first occurrences.
fn remove_duplicate_literals(literals: Vec<Literal>) -> Vec<Literal> {
    let mut seen = HashSet::new();
    literals
        .into_iter()
        .filter(|lit| seen.insert(lit.clone()))
        .collect()
}
