//! TPTP parsing and clausification

mod cnf_conversion;
mod fof;
mod tptp;

pub use cnf_conversion::CnfConverter;
pub use fof::{FofFormula, FormulaRole, NamedFormula, Quantifier};
pub use tptp::{parse_problem, parse_problem_file, ParseError, ParsedProblem};
