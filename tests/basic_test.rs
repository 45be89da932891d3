//! Integration tests: parse, saturate, check the outcome

use resolute::{
    parse_problem, resolvents_between, Clause, Literal, ProofState, ProverConfig, ProverResult,
};

fn prove(input: &str, config: ProverConfig) -> (ProverResult, ProofState) {
    let problem = parse_problem(input, &[]).expect("parse failed");
    let mut state = ProofState::new(problem.formula, config, problem.interner);
    let result = state.saturate();
    (result, state)
}

fn assert_refutation(input: &str, config: ProverConfig) {
    let (result, state) = prove(input, config);
    match result {
        ProverResult::Refutation(id) => assert!(state.clause(id).is_empty()),
        other => panic!("expected refutation, got {:?}", other),
    }
}

fn assert_saturation(input: &str, config: ProverConfig) {
    let (result, _) = prove(input, config);
    assert_eq!(result, ProverResult::Saturated);
}

#[test]
fn test_unit_contradiction() {
    assert_refutation(
        "cnf(a, axiom, p(X)).\n\
         cnf(b, negated_conjecture, ~p(a)).",
        ProverConfig::default(),
    );
}

#[test]
fn test_distinct_constants_saturate() {
    assert_saturation(
        "cnf(a, axiom, p(a)).\n\
         cnf(b, negated_conjecture, ~p(b)).",
        ProverConfig::default(),
    );
}

#[test]
fn test_equality_needs_axioms() {
    let input = "cnf(r, axiom, X = X).\n\
                 cnf(a, axiom, f(a) = b).\n\
                 cnf(nc, negated_conjecture, f(a) != b).";
    let config = ProverConfig {
        add_eq_axioms: true,
        ..ProverConfig::default()
    };
    assert_refutation(input, config);
}

#[test]
fn test_reflexivity_axiom_refutes_inequality() {
    // a != a alone is refuted by the generated reflexivity axiom; the
    // axiom has the shape X=X and must not fall to tautology deletion.
    let config = ProverConfig {
        add_eq_axioms: true,
        ..ProverConfig::default()
    };
    assert_refutation("cnf(nc, negated_conjecture, a != a).", config);
}

#[test]
fn test_equality_congruence_via_axioms() {
    // a=b and p(a) contradict ~p(b) only through the predicate
    // compatibility axiom.
    let input = "cnf(e, axiom, a = b).\n\
                 cnf(p, axiom, p(a)).\n\
                 cnf(nc, negated_conjecture, ~p(b)).";
    let config = ProverConfig {
        add_eq_axioms: true,
        ..ProverConfig::default()
    };
    assert_refutation(input, config);

    // Without the axioms the set saturates: equality is uninterpreted.
    assert_saturation(input, ProverConfig::default());
}

#[test]
fn test_fof_conjecture_theorem() {
    let problem = parse_problem("fof(c, conjecture, ?[X]: p(X) | ~p(a)).", &[])
        .expect("parse failed");
    assert!(problem.has_conjecture);

    let mut state = ProofState::new(problem.formula, ProverConfig::default(), problem.interner);
    assert!(matches!(state.saturate(), ProverResult::Refutation(_)));
}

#[test]
fn test_three_clause_chain() {
    assert_refutation(
        "cnf(a, axiom, p(X) | q(X)).\n\
         cnf(b, axiom, ~p(f(Y))).\n\
         cnf(c, negated_conjecture, ~q(f(Z))).",
        ProverConfig::default(),
    );
}

#[test]
fn test_subsumption_flags_preserve_outcomes() {
    let refutable = [
        "cnf(a, axiom, p(X)).\ncnf(b, negated_conjecture, ~p(a)).",
        "cnf(a, axiom, p(X) | q(X)).\ncnf(b, axiom, ~p(f(Y))).\ncnf(c, negated_conjecture, ~q(f(Z))).",
    ];
    let satisfiable = ["cnf(a, axiom, p(a)).\ncnf(b, negated_conjecture, ~p(b))."];

    for (forward, backward) in [(false, false), (true, false), (false, true), (true, true)] {
        let config = ProverConfig {
            forward_subsumption: forward,
            backward_subsumption: backward,
            ..ProverConfig::default()
        };
        for input in refutable {
            assert_refutation(input, config.clone());
        }
        for input in satisfiable {
            assert_saturation(input, config.clone());
        }
    }
}

#[test]
fn test_proof_listing_is_well_formed() {
    let (result, state) = prove(
        "cnf(a, axiom, p(X)).\n\
         cnf(b, negated_conjecture, ~p(a)).",
        ProverConfig::default(),
    );
    let ProverResult::Refutation(id) = result else {
        panic!("expected refutation");
    };

    let ancestry = state.derivation_ancestry(&[id]);
    // Parents precede children
    for &clause_id in &ancestry {
        for parent in state.clause(clause_id).derivation.parents() {
            assert!(parent < clause_id);
            assert!(ancestry.contains(&parent));
        }
    }

    let lines: Vec<String> = ancestry.iter().map(|&i| state.clause_line(i)).collect();
    assert!(lines.iter().all(|l| l.starts_with("cnf(c") && l.ends_with(").")));
    assert!(lines.last().unwrap().contains("$false"));
    assert!(lines.last().unwrap().contains("resolution("));
}

#[test]
fn test_gave_up_on_tiny_budget() {
    // An unsatisfiable problem still gives up if the clause budget is
    // too small to reach the empty clause.
    let input = "cnf(a, axiom, p(X) | p(f(X))).\n\
                 cnf(b, axiom, ~p(X) | p(f(X))).\n\
                 cnf(c, axiom, p(X) | ~p(f(X))).\n\
                 cnf(d, negated_conjecture, ~p(X) | ~p(f(X))).";
    let config = ProverConfig {
        max_clauses: 5,
        ..ProverConfig::default()
    };
    let (result, _) = prove(input, config);
    assert_eq!(result, ProverResult::GaveUp);
}

#[test]
fn test_ground_resolvents_are_consequences() {
    // For ground parents, every model (truth assignment to the ground
    // atoms) satisfying both parents must satisfy each resolvent.
    let mut problem = parse_problem(
        "cnf(a, axiom, p(a) | q(b) | ~r(c)).\n\
         cnf(b, axiom, ~p(a) | r(c)).",
        &[],
    )
    .expect("parse failed");

    let clauses: Vec<Clause> = problem.formula.clauses.clone();
    let mut var_counter = 0;
    let resolvents = resolvents_between(
        &clauses[0],
        0,
        &clauses[1],
        1,
        &mut problem.interner,
        &mut var_counter,
    );
    assert!(!resolvents.is_empty());

    // Collect the ground atoms of the problem
    let mut atoms = Vec::new();
    for clause in clauses.iter().chain(resolvents.iter()) {
        for lit in &clause.literals {
            if !atoms.contains(&lit.atom) {
                atoms.push(lit.atom.clone());
            }
        }
    }

    let satisfied = |clause: &Clause, model: usize| {
        clause.literals.iter().any(|lit: &Literal| {
            let idx = atoms.iter().position(|a| *a == lit.atom).unwrap();
            let value = model & (1 << idx) != 0;
            value == lit.polarity
        })
    };

    for model in 0..(1usize << atoms.len()) {
        if satisfied(&clauses[0], model) && satisfied(&clauses[1], model) {
            for resolvent in &resolvents {
                assert!(
                    satisfied(resolvent, model),
                    "resolvent not satisfied in model {:b}",
                    model
                );
            }
        }
    }
}

#[test]
fn test_fof_axioms_counter_satisfiable() {
    let problem =
        parse_problem("fof(a, axiom, ![X]: (p(X) => q(X))).\nfof(c, conjecture, q(a)).", &[])
            .expect("parse failed");
    assert!(problem.has_conjecture);
    let mut state = ProofState::new(problem.formula, ProverConfig::default(), problem.interner);
    // p(a) is not derivable, so the conjecture does not follow
    assert_eq!(state.saturate(), ProverResult::Saturated);
}
