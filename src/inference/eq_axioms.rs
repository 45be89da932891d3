//! Equality axiomatization
//!
//! Equality is handled by axiomatizing it as a congruence relation: the
//! equivalence axioms (reflexivity, symmetry, transitivity) plus one
//! compatibility axiom per function and predicate symbol of the problem:
//!
//! ```text
//! X=X
//! X!=Y | Y=X
//! X!=Y | Y!=Z | X=Z
//! X1!=Y1 | ... | Xn!=Yn | f(X1,...,Xn)=f(Y1,...,Yn)    for f|n
//! X1!=Y1 | ... | Xn!=Yn | ~p(X1,...,Xn) | p(Y1,...,Yn) for p|n, p != =
//! ```
//!
//! The symmetric predicate case follows from the contrapositive and the
//! symmetry of equality, so it is not generated. The axioms are added
//! once, before saturation, iff `=` occurs in the input.

use super::derivation::Derivation;
use crate::fol::{
    Clause, ClauseRole, FunctionId, FunctionSymbol, Interner, Literal, PredicateId,
    PredicateSymbol, Term, Variable,
};

/// True if any literal of the input uses the equality predicate.
pub fn problem_has_equality(clauses: &[Clause], interner: &Interner) -> bool {
    clauses
        .iter()
        .flat_map(|c| c.literals.iter())
        .any(|lit| lit.atom.is_equality(interner))
}

/// Generate the complete equality axiom set for the signature of
/// `clauses`. Constants (arity 0) need no compatibility axiom.
pub fn eq_axioms(clauses: &[Clause], interner: &mut Interner) -> Vec<Clause> {
    let eq = PredicateSymbol::new(interner.intern_predicate("="), 2);
    let mut axioms = equivalence_axioms(eq, interner);

    let (functions, predicates) = collect_signature(clauses);
    for (id, arity) in functions {
        axioms.push(function_compat_axiom(
            FunctionSymbol::new(id, arity),
            eq,
            interner,
        ));
    }
    for (id, arity) in predicates {
        if interner.resolve_predicate(id) == "=" {
            continue;
        }
        axioms.push(predicate_compat_axiom(
            PredicateSymbol::new(id, arity),
            eq,
            interner,
        ));
    }

    axioms
}

/// Reflexivity, symmetry and transitivity of `=`.
fn equivalence_axioms(eq: PredicateSymbol, interner: &mut Interner) -> Vec<Clause> {
    let x = var(interner, "X");
    let y = var(interner, "Y");
    let z = var(interner, "Z");

    let reflexivity = vec![Literal::positive(eq, vec![x.clone(), x.clone()])];
    let symmetry = vec![
        Literal::negative(eq, vec![x.clone(), y.clone()]),
        Literal::positive(eq, vec![y.clone(), x.clone()]),
    ];
    let transitivity = vec![
        Literal::negative(eq, vec![x.clone(), y.clone()]),
        Literal::negative(eq, vec![y, z.clone()]),
        Literal::positive(eq, vec![x, z]),
    ];

    [reflexivity, symmetry, transitivity]
        .into_iter()
        .map(axiom_clause)
        .collect()
}

/// `X1!=Y1 | ... | Xn!=Yn | f(X1,...,Xn)=f(Y1,...,Yn)`
fn function_compat_axiom(
    f: FunctionSymbol,
    eq: PredicateSymbol,
    interner: &mut Interner,
) -> Clause {
    let (xs, ys, mut literals) = compat_premise(f.arity, eq, interner);
    literals.push(Literal::positive(
        eq,
        vec![Term::Function(f, xs), Term::Function(f, ys)],
    ));
    axiom_clause(literals)
}

/// `X1!=Y1 | ... | Xn!=Yn | ~p(X1,...,Xn) | p(Y1,...,Yn)`
fn predicate_compat_axiom(
    p: PredicateSymbol,
    eq: PredicateSymbol,
    interner: &mut Interner,
) -> Clause {
    let (xs, ys, mut literals) = compat_premise(p.arity, eq, interner);
    literals.push(Literal::negative(p, xs));
    literals.push(Literal::positive(p, ys));
    axiom_clause(literals)
}

/// Variable vectors `X1..Xn`, `Y1..Yn` and the premise literals
/// `X1!=Y1 | ... | Xn!=Yn`.
fn compat_premise(
    arity: u8,
    eq: PredicateSymbol,
    interner: &mut Interner,
) -> (Vec<Term>, Vec<Term>, Vec<Literal>) {
    let xs: Vec<Term> = (1..=arity).map(|i| var(interner, &format!("X{}", i))).collect();
    let ys: Vec<Term> = (1..=arity).map(|i| var(interner, &format!("Y{}", i))).collect();
    let premise = xs
        .iter()
        .zip(ys.iter())
        .map(|(x, y)| Literal::negative(eq, vec![x.clone(), y.clone()]))
        .collect();
    (xs, ys, premise)
}

fn axiom_clause(literals: Vec<Literal>) -> Clause {
    let mut clause = Clause::with_role(literals, ClauseRole::Axiom);
    clause.derivation = Derivation::eq_axiom();
    clause
}

fn var(interner: &mut Interner, name: &str) -> Term {
    Term::Variable(Variable::new(interner.intern_variable(name)))
}

/// Function and predicate symbols of the clause set with their arities,
/// in interning order. Constants and 0-ary predicates are skipped: they
/// need no compatibility axiom.
fn collect_signature(clauses: &[Clause]) -> (Vec<(FunctionId, u8)>, Vec<(PredicateId, u8)>) {
    let mut functions: Vec<(FunctionId, u8)> = Vec::new();
    let mut predicates: Vec<(PredicateId, u8)> = Vec::new();

    fn visit_term(term: &Term, functions: &mut Vec<(FunctionId, u8)>) {
        if let Term::Function(f, args) = term {
            if !functions.iter().any(|(id, _)| *id == f.id) {
                functions.push((f.id, f.arity));
            }
            for arg in args {
                visit_term(arg, functions);
            }
        }
    }

    for clause in clauses {
        for lit in &clause.literals {
            let p = lit.atom.predicate;
            if p.arity > 0 && !predicates.iter().any(|(id, _)| *id == p.id) {
                predicates.push((p.id, p.arity));
            }
            for arg in &lit.atom.args {
                visit_term(arg, &mut functions);
            }
        }
    }

    functions.sort_by_key(|(id, _)| *id);
    predicates.sort_by_key(|(id, _)| *id);
    (functions, predicates)
}
