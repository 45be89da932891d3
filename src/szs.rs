//! SZS result ontology output
//!
//! Status lines and output blocks in the form expected by TPTP
//! tooling:
//!
//! ```text
//! % SZS status Theorem
//! % SZS output start CNFRefutation.
//! ...
//! % SZS output end CNFRefutation.
//! ```

use std::fmt;

/// Final status of a prover run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// FOF problem with conjecture, refutation found.
    Theorem,
    /// FOF problem with conjecture, saturation reached.
    CounterSatisfiable,
    /// CNF problem, refutation found.
    Unsatisfiable,
    /// CNF problem, saturation reached.
    Satisfiable,
    /// Budget exhausted before an answer was found.
    GaveUp,
}

impl Status {
    /// Pick the status for a refutation (`true`) or saturation
    /// (`false`), depending on whether the input was a FOF problem
    /// with a conjecture.
    pub fn for_outcome(refutation: bool, fof_with_conjecture: bool) -> Status {
        match (refutation, fof_with_conjecture) {
            (true, true) => Status::Theorem,
            (true, false) => Status::Unsatisfiable,
            (false, true) => Status::CounterSatisfiable,
            (false, false) => Status::Satisfiable,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Theorem => "Theorem",
            Status::CounterSatisfiable => "CounterSatisfiable",
            Status::Unsatisfiable => "Unsatisfiable",
            Status::Satisfiable => "Satisfiable",
            Status::GaveUp => "GaveUp",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "% SZS status {}", self.as_str())
    }
}

/// Kind of output block accompanying a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    CnfRefutation,
    Saturation,
}

impl OutputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputKind::CnfRefutation => "CNFRefutation",
            OutputKind::Saturation => "Saturation",
        }
    }
}

/// Bracketed output block around a listing.
pub struct Output<'a, O> {
    pub kind: OutputKind,
    pub lines: &'a [O],
}

impl<O: fmt::Display> fmt::Display for Output<'_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "% SZS output start {}.", self.kind.as_str())?;
        for line in self.lines {
            writeln!(f, "{}", line)?;
        }
        write!(f, "% SZS output end {}.", self.kind.as_str())
    }
}
