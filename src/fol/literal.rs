//! Atoms and literals

use super::interner::{Interner, PredicateId};
use super::term::{Term, Variable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A predicate symbol with its arity
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredicateSymbol {
    pub id: PredicateId,
    pub arity: u8,
}

impl PredicateSymbol {
    pub fn new(id: PredicateId, arity: u8) -> Self {
        PredicateSymbol { id, arity }
    }
}

/// An atomic formula: predicate applied to terms
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom {
    pub predicate: PredicateSymbol,
    pub args: Vec<Term>,
}

/// A signed atom. `polarity == true` is positive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub atom: Atom,
    pub polarity: bool,
}

impl Atom {
    pub fn new(predicate: PredicateSymbol, args: Vec<Term>) -> Self {
        Atom { predicate, args }
    }

    /// True if this atom uses the distinguished equality predicate.
    pub fn is_equality(&self, interner: &Interner) -> bool {
        self.predicate.arity == 2 && interner.resolve_predicate(self.predicate.id) == "="
    }

    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        for arg in &self.args {
            arg.collect_variables(vars);
        }
    }

    /// Format this atom resolving symbol names through the interner.
    pub fn display<'a>(&'a self, interner: &'a Interner) -> AtomDisplay<'a> {
        AtomDisplay {
            atom: self,
            interner,
        }
    }
}

impl Literal {
    /// Create a literal, normalizing the propositional constants:
    /// `~$true` becomes `$false` and `~$false` becomes `$true`.
    pub fn new(atom: Atom, polarity: bool, interner: &mut Interner) -> Self {
        if !polarity && atom.args.is_empty() {
            let name = interner.resolve_predicate(atom.predicate.id);
            let flipped = match name {
                "$true" => Some("$false"),
                "$false" => Some("$true"),
                _ => None,
            };
            if let Some(flipped) = flipped {
                let id = interner.intern_predicate(flipped);
                return Literal {
                    atom: Atom::new(PredicateSymbol::new(id, 0), vec![]),
                    polarity: true,
                };
            }
        }
        Literal { atom, polarity }
    }

    pub fn positive(predicate: PredicateSymbol, args: Vec<Term>) -> Self {
        Literal {
            atom: Atom::new(predicate, args),
            polarity: true,
        }
    }

    pub fn negative(predicate: PredicateSymbol, args: Vec<Term>) -> Self {
        Literal {
            atom: Atom::new(predicate, args),
            polarity: false,
        }
    }

    pub fn is_negative(&self) -> bool {
        !self.polarity
    }

    /// True for the propositional literal `$true`.
    pub fn is_prop_true(&self, interner: &Interner) -> bool {
        self.polarity
            && self.atom.args.is_empty()
            && interner.resolve_predicate(self.atom.predicate.id) == "$true"
    }

    /// True for the propositional literal `$false`.
    pub fn is_prop_false(&self, interner: &Interner) -> bool {
        self.polarity
            && self.atom.args.is_empty()
            && interner.resolve_predicate(self.atom.predicate.id) == "$false"
    }

    /// True if the two literals are syntactic complements.
    pub fn is_complement_of(&self, other: &Literal) -> bool {
        self.polarity != other.polarity && self.atom == other.atom
    }

    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        self.atom.collect_variables(vars);
    }

    /// Symbol-count weight; the predicate symbol counts as a function
    /// symbol occurrence.
    pub fn weight(&self, fweight: u64, vweight: u64) -> u64 {
        fweight
            + self
                .atom
                .args
                .iter()
                .map(|t| t.weight(fweight, vweight))
                .sum::<u64>()
    }

    /// Format this literal resolving symbol names through the interner.
    pub fn display<'a>(&'a self, interner: &'a Interner) -> LiteralDisplay<'a> {
        LiteralDisplay {
            literal: self,
            interner,
        }
    }
}

/// Display wrapper resolving names via the interner
pub struct AtomDisplay<'a> {
    atom: &'a Atom,
    interner: &'a Interner,
}

impl fmt::Display for AtomDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.atom.is_equality(self.interner) {
            return write!(
                f,
                "{}={}",
                self.atom.args[0].display(self.interner),
                self.atom.args[1].display(self.interner)
            );
        }
        write!(f, "{}", self.interner.resolve_predicate(self.atom.predicate.id))?;
        if !self.atom.args.is_empty() {
            write!(f, "(")?;
            for (i, arg) in self.atom.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", arg.display(self.interner))?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Display wrapper resolving names via the interner
pub struct LiteralDisplay<'a> {
    literal: &'a Literal,
    interner: &'a Interner,
}

impl fmt::Display for LiteralDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Negated equalities print with the infix != operator.
        if !self.literal.polarity && self.literal.atom.is_equality(self.interner) {
            return write!(
                f,
                "{}!={}",
                self.literal.atom.args[0].display(self.interner),
                self.literal.atom.args[1].display(self.interner)
            );
        }
        if !self.literal.polarity {
            write!(f, "~")?;
        }
        write!(f, "{}", self.literal.atom.display(self.interner))
    }
}
