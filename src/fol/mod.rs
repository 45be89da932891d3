//! First-order logic data model: terms, literals, clauses, substitutions

mod clause;
mod interner;
mod literal;
mod substitution;
mod term;

pub use clause::{Clause, ClauseDisplay, ClauseRole, CnfFormula};
pub use interner::{ConstantId, FunctionId, Interner, PredicateId, VariableId};
pub use literal::{Atom, Literal, PredicateSymbol};
pub use substitution::{fresh_rename, Substitution};
pub use term::{Constant, FunctionSymbol, Term, Variable};
