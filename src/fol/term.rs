//! Terms in first-order logic

use super::interner::{ConstantId, FunctionId, Interner, VariableId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A variable, identified by its interned name
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub id: VariableId,
}

/// A constant symbol
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constant {
    pub id: ConstantId,
}

/// A function symbol with its arity
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSymbol {
    pub id: FunctionId,
    pub arity: u8,
}

impl Variable {
    pub fn new(id: VariableId) -> Self {
        Variable { id }
    }
}

impl Constant {
    pub fn new(id: ConstantId) -> Self {
        Constant { id }
    }
}

impl FunctionSymbol {
    pub fn new(id: FunctionId, arity: u8) -> Self {
        FunctionSymbol { id, arity }
    }
}

/// A first-order term: variable, constant, or function application.
///
/// Terms are immutable values; structural equality (the derived
/// `PartialEq`/`Hash`) is term identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Constant(Constant),
    Function(FunctionSymbol, Vec<Term>),
}

impl Term {
    /// Collect the variables occurring in this term.
    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        match self {
            Term::Variable(v) => {
                vars.insert(*v);
            }
            Term::Constant(_) => {}
            Term::Function(_, args) => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    /// Set of variables occurring in this term.
    pub fn variables(&self) -> HashSet<Variable> {
        let mut vars = HashSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    /// True if the term contains no variables.
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Variable(_) => false,
            Term::Constant(_) => true,
            Term::Function(_, args) => args.iter().all(Term::is_ground),
        }
    }

    /// Symbol-count weight: `fweight` per function/constant symbol
    /// occurrence, `vweight` per variable occurrence.
    pub fn weight(&self, fweight: u64, vweight: u64) -> u64 {
        match self {
            Term::Variable(_) => vweight,
            Term::Constant(_) => fweight,
            Term::Function(_, args) => {
                fweight + args.iter().map(|t| t.weight(fweight, vweight)).sum::<u64>()
            }
        }
    }

    /// Format this term resolving symbol names through the interner.
    pub fn display<'a>(&'a self, interner: &'a Interner) -> TermDisplay<'a> {
        TermDisplay {
            term: self,
            interner,
        }
    }
}

/// Display wrapper resolving names via the interner
pub struct TermDisplay<'a> {
    term: &'a Term,
    interner: &'a Interner,
}

impl fmt::Display for TermDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.term {
            Term::Variable(v) => write!(f, "{}", self.interner.resolve_variable(v.id)),
            Term::Constant(c) => write!(f, "{}", self.interner.resolve_constant(c.id)),
            Term::Function(func, args) => {
                write!(f, "{}(", self.interner.resolve_function(func.id))?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg.display(self.interner))?;
                }
                write!(f, ")")
            }
        }
    }
}
