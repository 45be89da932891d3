//! The given-clause saturation loop
//!
//! The proof state is split into the processed set P and the unprocessed
//! set U over a central clause storage. The main invariant: all
//! generating inferences between processed clauses have been computed.
//! Each iteration moves one clause from U to P and restores the
//! invariant by resolving it against all of P and factoring it, feeding
//! the surviving conclusions back into U.

use super::subsumption::{subsumes, subsumes_properly};
use crate::config::ProverConfig;
use crate::fol::{Clause, CnfFormula, Interner};
use crate::inference::{eq_axioms, factors_of, problem_has_equality, resolvents_between};
use crate::selection::EvalStructure;
use indexmap::IndexSet;
use log::debug;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::time::Instant;

/// Outcome of a saturation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProverResult {
    /// The empty clause with the given id was derived.
    Refutation(usize),
    /// The unprocessed set ran dry: the clause set is satisfiable.
    Saturated,
    /// The soft budget (time or clause count) was exhausted.
    GaveUp,
}

/// Proof search statistics.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SearchStats {
    pub initial_clauses: usize,
    pub processed_clauses: usize,
    pub factors_computed: usize,
    pub resolvents_computed: usize,
    pub tautologies_deleted: usize,
    pub forward_subsumed: usize,
    pub backward_subsumed: usize,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Initial clauses    : {}", self.initial_clauses)?;
        writeln!(f, "# Processed clauses  : {}", self.processed_clauses)?;
        writeln!(f, "# Factors computed   : {}", self.factors_computed)?;
        writeln!(f, "# Resolvents computed: {}", self.resolvents_computed)?;
        writeln!(f, "# Tautologies deleted: {}", self.tautologies_deleted)?;
        writeln!(f, "# Forward subsumed   : {}", self.forward_subsumed)?;
        write!(f, "# Backward subsumed  : {}", self.backward_subsumed)
    }
}

/// Top-level prover data structure: clause storage, the P/U split, the
/// evaluation scheme, and the per-problem counters.
pub struct ProofState {
    config: ProverConfig,
    pub interner: Interner,
    /// All clauses ever created, indexed by id. Clauses are never
    /// removed from storage; deletion only takes them out of P/U.
    clauses: Vec<Clause>,
    processed: IndexSet<usize>,
    unprocessed: IndexSet<usize>,
    eval_structure: EvalStructure,
    /// Fresh-variable counter, owned by the engine and reset per problem.
    var_counter: usize,
    pub stats: SearchStats,
}

impl ProofState {
    /// Set up the proof state: equality axioms (if enabled and needed),
    /// set-of-support marking, and insertion of the initial clauses.
    pub fn new(formula: CnfFormula, config: ProverConfig, mut interner: Interner) -> Self {
        let mut initial = formula.clauses;

        if config.add_eq_axioms && problem_has_equality(&initial, &interner) {
            initial.extend(eq_axioms(&initial, &mut interner));
        }

        if config.use_sos {
            for clause in &mut initial {
                clause.sos = clause.role.is_conjecture();
            }
        }

        let eval_structure = config.heuristic.build();
        let mut state = ProofState {
            config,
            interner,
            clauses: Vec::new(),
            processed: IndexSet::new(),
            unprocessed: IndexSet::new(),
            eval_structure,
            var_counter: 0,
            stats: SearchStats::default(),
        };

        for clause in initial {
            state.insert_new_clause(clause);
        }
        state.stats.initial_clauses = state.clauses.len();
        state
    }

    /// Run the given-clause loop to completion (or budget exhaustion).
    pub fn saturate(&mut self) -> ProverResult {
        let start = Instant::now();

        loop {
            if start.elapsed() > self.config.timeout {
                return ProverResult::GaveUp;
            }
            if self.config.max_clauses > 0 && self.clauses.len() > self.config.max_clauses {
                return ProverResult::GaveUp;
            }

            let Some(given_id) = self.extract_best() else {
                return ProverResult::Saturated;
            };

            if let Some(result) = self.process_clause(given_id) {
                return result;
            }
        }
    }

    /// Process one given clause; `Some` short-circuits the loop.
    fn process_clause(&mut self, given_id: usize) -> Option<ProverResult> {
        debug!(
            "given c{}: {}",
            given_id,
            self.clauses[given_id].display(&self.interner)
        );

        if self.clauses[given_id].is_empty() {
            return Some(ProverResult::Refutation(given_id));
        }

        // A clause subsumed since it entered U is redundant: every
        // inference it could contribute is covered by the subsumer.
        if self.config.forward_subsumption {
            let given = &self.clauses[given_id];
            if self
                .processed
                .iter()
                .any(|&id| subsumes(&self.clauses[id], given, &self.interner))
            {
                self.stats.forward_subsumed += 1;
                return None;
            }
        }

        self.processed.insert(given_id);
        self.stats.processed_clauses += 1;

        if self.config.backward_subsumption {
            self.backward_subsume(given_id);
        }

        // Factors once per given clause, resolvents against all of P
        // (the given clause included, for self-resolution).
        let given = self.clauses[given_id].clone();
        let factors = factors_of(&given, given_id);
        self.stats.factors_computed += factors.len();

        let mut new_clauses = factors;
        let partner_ids: Vec<usize> = self.processed.iter().copied().collect();
        for partner_id in partner_ids {
            if self.config.use_sos && !given.sos && !self.clauses[partner_id].sos {
                continue;
            }
            let resolvents = resolvents_between(
                &given,
                given_id,
                &self.clauses[partner_id],
                partner_id,
                &mut self.interner,
                &mut self.var_counter,
            );
            self.stats.resolvents_computed += resolvents.len();
            new_clauses.extend(resolvents);
        }

        for clause in new_clauses {
            if let Some(empty_id) = self.process_new(clause) {
                return Some(ProverResult::Refutation(empty_id));
            }
        }
        None
    }

    /// Redundancy pipeline for a newly generated clause. Returns the id
    /// of the empty clause if one was derived.
    fn process_new(&mut self, clause: Clause) -> Option<usize> {
        let clause = self.strip_false_literals(clause);

        if clause.is_tautology(&self.interner) {
            self.stats.tautologies_deleted += 1;
            return None;
        }

        if self.config.forward_subsumption && self.is_forward_subsumed(&clause) {
            self.stats.forward_subsumed += 1;
            return None;
        }

        if clause.is_empty() {
            let id = self.store_clause(clause);
            return Some(id);
        }

        let id = self.insert_new_clause(clause);

        if self.config.backward_subsumption {
            self.backward_subsume(id);
        }
        None
    }

    /// Pick the best unprocessed clause according to the evaluation
    /// scheme and remove it from U. Ties go to the oldest clause.
    fn extract_best(&mut self) -> Option<usize> {
        if self.unprocessed.is_empty() {
            return None;
        }
        let column = self.eval_structure.next_eval();
        let mut best: Option<usize> = None;
        let mut best_eval = u64::MAX;
        for &id in &self.unprocessed {
            let eval = self.clauses[id].evaluations[column];
            // Strict comparison: ties go to the oldest clause.
            if best.is_none() || eval < best_eval {
                best = Some(id);
                best_eval = eval;
            }
        }
        let best = best?;
        self.unprocessed.shift_remove(&best);
        Some(best)
    }

    /// Is the clause subsumed by any member of P or U?
    fn is_forward_subsumed(&self, clause: &Clause) -> bool {
        self.processed
            .iter()
            .chain(self.unprocessed.iter())
            .any(|&id| subsumes(&self.clauses[id], clause, &self.interner))
    }

    /// Remove from P and U every clause properly subsumed by `id`.
    fn backward_subsume(&mut self, id: usize) {
        let subsumer = self.clauses[id].clone();
        let victims: Vec<usize> = self
            .processed
            .iter()
            .chain(self.unprocessed.iter())
            .copied()
            .filter(|&other| {
                other != id && subsumes_properly(&subsumer, &self.clauses[other], &self.interner)
            })
            .collect();
        for victim in victims {
            self.processed.shift_remove(&victim);
            self.unprocessed.shift_remove(&victim);
            self.stats.backward_subsumed += 1;
        }
    }

    /// Drop `$false` literals; they contribute nothing to a disjunction.
    fn strip_false_literals(&self, mut clause: Clause) -> Clause {
        if clause
            .literals
            .iter()
            .any(|lit| lit.is_prop_false(&self.interner))
        {
            clause.literals.retain(|lit| !lit.is_prop_false(&self.interner));
        }
        clause
    }

    /// Assign an id and store the clause without touching P or U.
    fn store_clause(&mut self, mut clause: Clause) -> usize {
        let id = self.clauses.len();
        clause.id = Some(id);
        self.clauses.push(clause);
        id
    }

    /// Admit a clause into U: filter, evaluate, select, store.
    ///
    /// Evaluations and the inference-literal set are fixed here, once,
    /// for the lifetime of the clause.
    fn insert_new_clause(&mut self, clause: Clause) -> usize {
        let mut clause = self.strip_false_literals(clause);
        clause.evaluations = self.eval_structure.evaluate(&clause);
        clause.inference_lits = self.config.literal_selection.select(&clause);
        let id = self.store_clause(clause);
        self.unprocessed.insert(id);
        id
    }

    // === Accessors and reporting ===

    pub fn clause(&self, id: usize) -> &Clause {
        &self.clauses[id]
    }

    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    pub fn processed_ids(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self.processed.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Ids of `roots` and all their ancestors, in ascending id order.
    /// Since parents always have smaller ids, this is a reverse
    /// topological order of the derivation.
    pub fn derivation_ancestry(&self, roots: &[usize]) -> Vec<usize> {
        let mut seen: HashSet<usize> = HashSet::new();
        let mut stack: Vec<usize> = roots.to_vec();
        while let Some(id) = stack.pop() {
            if seen.insert(id) {
                stack.extend(self.clauses[id].derivation.parents());
            }
        }
        let mut ids: Vec<usize> = seen.into_iter().collect();
        ids.sort_unstable();
        ids
    }

    /// One proof-output line: identifier, role, clause, annotation.
    pub fn clause_line(&self, id: usize) -> String {
        let clause = &self.clauses[id];
        format!(
            "cnf(c{},{},{},{}).",
            id,
            clause.role.as_tptp_str(),
            clause.display(&self.interner),
            clause.derivation
        )
    }
}
