//! Heuristic clause evaluation
//!
//! A clause evaluation function maps clauses to numbers; lower is
//! better. An `EvalStructure` combines several evaluation functions in a
//! weighted round-robin: each clause receives one evaluation per
//! function when it enters the unprocessed set, and selection alternates
//! between the columns according to the configured counts. `PickGiven5`
//! picks four clauses by symbol count for every clause picked by age;
//! according to folklore, the optimal pick-given ratio is five.

use crate::fol::Clause;

/// A clause evaluation function. Some evaluations keep state between
/// calls (FIFO keeps a running counter), so evaluation takes `&mut`.
pub trait ClauseEvaluation {
    /// Evaluate a clause; lower values are processed first.
    fn evaluate(&mut self, clause: &Clause) -> u64;

    fn name(&self) -> &'static str;
}

/// First-in first-out: evaluations increase over time, independent of
/// the clause. Fair, but a weak search strategy on its own.
#[derive(Debug, Default)]
pub struct FifoEvaluation {
    fifo_counter: u64,
}

impl FifoEvaluation {
    pub fn new() -> Self {
        FifoEvaluation::default()
    }
}

impl ClauseEvaluation for FifoEvaluation {
    fn evaluate(&mut self, _clause: &Clause) -> u64 {
        self.fifo_counter += 1;
        self.fifo_counter
    }

    fn name(&self) -> &'static str {
        "FIFOEval"
    }
}

/// Standard symbol counting: smaller clauses are better. Only fair in
/// combination with subsumption or an interleaved fair strategy,
/// otherwise an infinite family of light clauses can starve a heavier
/// one forever.
#[derive(Debug)]
pub struct SymbolCountEvaluation {
    fweight: u64,
    vweight: u64,
}

impl SymbolCountEvaluation {
    pub fn new(fweight: u64, vweight: u64) -> Self {
        SymbolCountEvaluation { fweight, vweight }
    }
}

impl ClauseEvaluation for SymbolCountEvaluation {
    fn evaluate(&mut self, clause: &Clause) -> u64 {
        clause.weight(self.fweight, self.vweight)
    }

    fn name(&self) -> &'static str {
        "SymbolCountEval"
    }
}

/// A heuristic clause processing scheme: evaluation functions paired
/// with relative counts, alternated in weighted round-robin order.
pub struct EvalStructure {
    eval_funs: Vec<Box<dyn ClauseEvaluation>>,
    eval_vec: Vec<usize>,
    current: usize,
    current_count: usize,
}

impl EvalStructure {
    /// Build from (function, relative count) pairs. The descriptor must
    /// be non-empty and contain at least one non-zero count.
    pub fn new(descriptor: Vec<(Box<dyn ClauseEvaluation>, usize)>) -> Self {
        assert!(descriptor.iter().any(|(_, count)| *count > 0));
        let (eval_funs, eval_vec): (Vec<_>, Vec<_>) = descriptor.into_iter().unzip();
        let current_count = eval_vec[0];
        EvalStructure {
            eval_funs,
            eval_vec,
            current: 0,
            current_count,
        }
    }

    /// Number of evaluation columns.
    pub fn len(&self) -> usize {
        self.eval_funs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eval_funs.is_empty()
    }

    /// Composite evaluation of a clause: one value per column.
    pub fn evaluate(&mut self, clause: &Clause) -> Vec<u64> {
        self.eval_funs.iter_mut().map(|f| f.evaluate(clause)).collect()
    }

    /// Index of the evaluation column to use for the next pick.
    ///
    /// The while-loop (rather than a simple if) skips columns with a
    /// count of zero.
    pub fn next_eval(&mut self) -> usize {
        while self.current_count == 0 {
            self.current = (self.current + 1) % self.eval_vec.len();
            self.current_count = self.eval_vec[self.current];
        }
        self.current_count -= 1;
        self.current
    }

    /// Look up a processing scheme by its CLI name.
    pub fn by_name(name: &str) -> Option<EvalStructure> {
        ClauseHeuristic::from_name(name).map(|h| h.build())
    }
}

/// The closed set of clause-selection heuristics, keyed by CLI name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClauseHeuristic {
    Fifo,
    SymbolCount,
    PickGiven2,
    #[default]
    PickGiven5,
}

impl ClauseHeuristic {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "FIFO" => Some(ClauseHeuristic::Fifo),
            "SymbolCount" => Some(ClauseHeuristic::SymbolCount),
            "PickGiven2" => Some(ClauseHeuristic::PickGiven2),
            "PickGiven5" => Some(ClauseHeuristic::PickGiven5),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClauseHeuristic::Fifo => "FIFO",
            ClauseHeuristic::SymbolCount => "SymbolCount",
            ClauseHeuristic::PickGiven2 => "PickGiven2",
            ClauseHeuristic::PickGiven5 => "PickGiven5",
        }
    }

    /// Instantiate the evaluation scheme for one saturation run.
    pub fn build(&self) -> EvalStructure {
        match self {
            ClauseHeuristic::Fifo => {
                EvalStructure::new(vec![(Box::new(FifoEvaluation::new()), 1)])
            }
            ClauseHeuristic::SymbolCount => {
                EvalStructure::new(vec![(Box::new(SymbolCountEvaluation::new(2, 1)), 1)])
            }
            ClauseHeuristic::PickGiven2 => pick_given(2),
            ClauseHeuristic::PickGiven5 => pick_given(5),
        }
    }
}

/// Interleave symbol counting and age: out of every `ratio` picks, one
/// goes to the oldest clause and the rest to the lightest.
fn pick_given(ratio: usize) -> EvalStructure {
    EvalStructure::new(vec![
        (Box::new(SymbolCountEvaluation::new(2, 1)), ratio - 1),
        (Box::new(FifoEvaluation::new()), 1),
    ])
}
